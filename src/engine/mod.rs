//! The orbital physics engine.
//!
//! [OrbitalPhysicsEngine] holds nothing but its [EngineConfig]; every
//! operation takes fresh body state and returns a fresh result. The methods
//! are spread across submodules by layer:
//! - `forces`: gravity, accumulation over many sources, perturbations, frame
//!   dragging and atmospheric drag
//! - `orbit`: circular and escape velocities, two-body orbit classification
//! - `effects`: slingshots, tidal stress, time dilation, Roche limits
//! - `points`: Lagrange points, Hill spheres and the sphere of influence
//!
//! Nothing here mutates its inputs. The two routines that represent an
//! integration step ([OrbitalPhysicsEngine::accumulate_gravity] and
//! [OrbitalPhysicsEngine::atmospheric_drag]) return a `delta_v` for the caller
//! to apply with [Body::apply_delta_v](crate::body::Body::apply_delta_v).

use log::debug;

use crate::config::EngineConfig;
use crate::error::ConfigError;

mod effects;
mod forces;
mod orbit;
mod points;

pub use effects::{DisruptionCheck, SlingshotResult, TidalStress};
pub use forces::{DragInfo, GravityForce, GravityInfo, Perturbation};
pub use orbit::{OrbitType, OrbitalParameters};
pub use points::{
    influence_radius, DominantBody, LagrangeLabel, LagrangePoint, LagrangePoints,
    NearLagrangePoint,
};

#[derive(Debug, Clone, Copy)]
pub struct OrbitalPhysicsEngine {
    config: EngineConfig,
}

impl OrbitalPhysicsEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("Constructed physics engine with {:?}", config);
        Ok(OrbitalPhysicsEngine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn g(&self) -> f64 {
        self.config.gravitational_constant
    }

    fn c_squared(&self) -> f64 {
        self.config.speed_of_light * self.config.speed_of_light
    }
}

impl Default for OrbitalPhysicsEngine {
    fn default() -> Self {
        OrbitalPhysicsEngine {
            config: EngineConfig::default(),
        }
    }
}
