//! Loading star systems from YAML.
//!
//! A scenario is the engine configuration, the player's ship and the massive
//! bodies around it:
//!
//! ```yaml
//! engine:
//!   gravitational_constant: 0.5
//!   enable_tidal_forces: true
//!
//! ship:
//!   name: Scout
//!   x: 400.0
//!   y: 0.0
//!   vx: 0.0
//!   vy: 1.1
//!   mass: 1.0
//!
//! bodies:
//!   - name: Sol
//!     x: 0.0
//!     y: 0.0
//!     mass: 1000.0
//!     radius: 20.0
//!     angular_velocity: 0.05
//! ```
//!
//! Velocity, radius, spin and the black-hole flag may be omitted. Building a
//! scenario checks the things the physics takes on trust: positive masses,
//! non-negative radii and finite numbers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use nalgebra::Vector2;
use serde::Deserialize;

use crate::body::Body;
use crate::config::EngineConfig;
use crate::engine::OrbitalPhysicsEngine;
use crate::error::ConfigError;
use crate::simulation::Simulation;

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub mass: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub angular_velocity: Option<f64>,
    #[serde(default)]
    pub black_hole: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub ship: BodyConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

/// A validated scenario, ready to simulate.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: OrbitalPhysicsEngine,
    pub ship_name: String,
    pub ship: Body,
    pub names: Vec<String>,
    pub bodies: Vec<Body>,
}

impl BodyConfig {
    fn to_body(&self) -> Result<Body, ConfigError> {
        let invalid = |reason| ConfigError::InvalidBody {
            name: self.name.clone(),
            reason,
        };

        let numbers = [self.x, self.y, self.vx, self.vy, self.mass, self.radius];
        if numbers.iter().any(|n| !n.is_finite())
            || self.angular_velocity.map_or(false, |w| !w.is_finite())
        {
            return Err(invalid("all numbers must be finite"));
        }
        if self.mass <= 0.0 {
            return Err(invalid("mass must be positive"));
        }
        if self.radius < 0.0 {
            return Err(invalid("radius must not be negative"));
        }

        Ok(Body {
            position: Vector2::new(self.x, self.y),
            velocity: Vector2::new(self.vx, self.vy),
            mass: self.mass,
            radius: self.radius,
            angular_velocity: self.angular_velocity,
            black_hole: self.black_hole,
        })
    }
}

impl ScenarioConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn build(self) -> Result<Scenario, ConfigError> {
        let engine = OrbitalPhysicsEngine::new(self.engine)?;
        let ship = self.ship.to_body()?;
        let bodies = self
            .bodies
            .iter()
            .map(BodyConfig::to_body)
            .collect::<Result<Vec<_>, _>>()?;
        let names = self.bodies.into_iter().map(|b| b.name).collect();

        debug!(
            "Built scenario with {} bodies around ship '{}'",
            bodies.len(),
            self.ship.name
        );

        Ok(Scenario {
            engine,
            ship_name: self.ship.name,
            ship,
            names,
            bodies,
        })
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ScenarioConfig::from_path(path)?.build()
    }

    pub fn into_simulation(self) -> Simulation {
        Simulation::new(self.engine, self.ship, self.bodies)
    }
}
