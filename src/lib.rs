pub mod body;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod math;
pub mod scenario;
pub mod simulation;

pub use body::Body;
pub use config::EngineConfig;
pub use engine::OrbitalPhysicsEngine;
pub use error::ConfigError;
