//! Gameplay-scale constants shared by the physics routines.
//!
//! None of these are SI values. They are tuned so that ships moving at a few
//! hundred world units per second feel the bodies of a typical star system.

// Engine defaults
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 0.5;
pub const DEFAULT_SPEED_OF_LIGHT: f64 = 1000.0;

/// Separations below this are treated as coincident; forces vanish instead of blowing up.
pub const MIN_DISTANCE: f64 = 1.0;

// Influence radius = min(SCALE * cbrt(mass), MAX)
pub const INFLUENCE_RADIUS_SCALE: f64 = 100.0;
pub const MAX_INFLUENCE_RADIUS: f64 = 10_000.0;

/// A ship is "in the well" of its closest source when nearer than this many radii.
pub const GRAVITY_WELL_RADII: f64 = 5.0;

// Slingshot
pub const SLINGSHOT_MAX_BOOST_FACTOR: f64 = 2.0;
pub const SLINGSHOT_MIN_EFFECTIVE_FACTOR: f64 = 0.5;
pub const SLINGSHOT_EFFECTIVE_RADII: f64 = 10.0;
pub const SLINGSHOT_BOOST_SPEED: f64 = 10.0;

// Tidal stress
pub const TIDAL_RANGE_RADII: f64 = 2.5;
pub const ASSUMED_SHIP_LENGTH: f64 = 10.0;
pub const TIDAL_DESTRUCTION_THRESHOLD: f64 = 100.0;

/// Time never runs slower than this fraction of coordinate time.
pub const MIN_TIME_DILATION: f64 = 0.1;

// Orbit classification
pub const STABLE_ECCENTRICITY_LIMIT: f64 = 0.9;
pub const SAFE_PERIAPSIS_RADII: f64 = 1.5;

/// Standalone bodies (no parent) get a Hill sphere of this many radii.
pub const STANDALONE_HILL_RADII: f64 = 50.0;

// Roche limit coefficients
pub const ROCHE_RIGID_FACTOR: f64 = 2.46;
pub const ROCHE_FLUID_FACTOR: f64 = 2.88;

// Solid sphere: I = 2/5 M R^2
pub const SPHERE_INERTIA_FACTOR: f64 = 0.4;

// Atmosphere
pub const ATMOSPHERE_HEIGHT_RADII: f64 = 1.5;
pub const ATMOSPHERE_SCALE_HEIGHT_RADII: f64 = 0.3;
pub const DRAG_COEFFICIENT: f64 = 0.01;
