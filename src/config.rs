//! Construct-time engine configuration.
//!
//! ```yaml
//! gravitational_constant: 0.5
//! speed_of_light: 1000.0
//! enable_tidal_forces: true
//! enable_relativistic_effects: true
//! enable_n_body_gravity: true
//! ```
//!
//! Every field may be omitted, in which case the default is used.

use serde::Deserialize;

use crate::consts::{DEFAULT_GRAVITATIONAL_CONSTANT, DEFAULT_SPEED_OF_LIGHT};
use crate::error::ConfigError;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Scales every gravitational force. Gameplay units, not SI.
    pub gravitational_constant: f64,
    /// Denominator of the relativistic terms; keep it well above ship speeds.
    pub speed_of_light: f64,
    pub enable_tidal_forces: bool,
    pub enable_relativistic_effects: bool,
    /// When off, only the closest source pulls on a ship and perturbations vanish.
    pub enable_n_body_gravity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            speed_of_light: DEFAULT_SPEED_OF_LIGHT,
            enable_tidal_forces: true,
            enable_relativistic_effects: true,
            enable_n_body_gravity: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("gravitational_constant", self.gravitational_constant)?;
        validate_positive("speed_of_light", self.speed_of_light)?;
        Ok(())
    }
}

fn validate_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}
