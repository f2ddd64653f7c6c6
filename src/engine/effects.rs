use log::trace;
use nalgebra::Vector2;

use super::OrbitalPhysicsEngine;
use crate::body::Body;
use crate::consts::{
    ASSUMED_SHIP_LENGTH, MIN_DISTANCE, MIN_TIME_DILATION, ROCHE_FLUID_FACTOR, ROCHE_RIGID_FACTOR,
    SLINGSHOT_BOOST_SPEED, SLINGSHOT_EFFECTIVE_RADII, SLINGSHOT_MAX_BOOST_FACTOR,
    SLINGSHOT_MIN_EFFECTIVE_FACTOR, TIDAL_DESTRUCTION_THRESHOLD, TIDAL_RANGE_RADII,
};
use crate::math::geometry::{normalize_or_zero, perpendicular};

/// A gravity-assist the ship could take. Nothing is applied automatically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingshotResult {
    pub boost_factor: f64,
    pub boost_velocity: Vector2<f64>,
    pub is_effective: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidalStress {
    pub stress: f64,
    pub is_destroying: bool,
    /// Fraction of the destruction threshold, in [0, 1].
    pub warning_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisruptionCheck {
    pub roche_limit: f64,
    pub distance: f64,
    pub is_disrupted: bool,
    /// Rises linearly from 0 at the limit to 1 at zero separation.
    pub warning_level: f64,
}

impl SlingshotResult {
    fn none() -> Self {
        SlingshotResult {
            boost_factor: 0.0,
            boost_velocity: Vector2::zeros(),
            is_effective: false,
        }
    }
}

impl TidalStress {
    fn none() -> Self {
        TidalStress {
            stress: 0.0,
            is_destroying: false,
            warning_level: 0.0,
        }
    }
}

impl OrbitalPhysicsEngine {
    /// Computes the boost a flyby of `body` would give.
    ///
    /// The boost is perpendicular to the relative velocity (rotated +90
    /// degrees), scaled by how fast the ship is going compared to the local
    /// escape velocity, capped at 2. It only counts as effective when the ship
    /// is both fast and close.
    pub fn gravity_slingshot(&self, ship: &Body, body: &Body) -> SlingshotResult {
        let distance = ship.distance_to(body);
        if distance < MIN_DISTANCE {
            return SlingshotResult::none();
        }

        let relative_velocity = ship.velocity_relative_to(body);
        let relative_speed = relative_velocity.norm();
        let escape_velocity = self.escape_velocity(body.mass, distance);

        let boost_factor = (relative_speed / escape_velocity).min(SLINGSHOT_MAX_BOOST_FACTOR);
        let direction = perpendicular(&normalize_or_zero(&relative_velocity, 0.0));

        SlingshotResult {
            boost_factor,
            boost_velocity: direction * boost_factor * SLINGSHOT_BOOST_SPEED,
            is_effective: boost_factor > SLINGSHOT_MIN_EFFECTIVE_FACTOR
                && distance < SLINGSHOT_EFFECTIVE_RADII * body.radius,
        }
    }

    /// Inverse-cube tidal stretching across the ship's length.
    ///
    /// Only felt within 2.5 radii of the body; zero everywhere else.
    pub fn tidal_forces(&self, ship: &Body, body: &Body) -> TidalStress {
        if !self.config.enable_tidal_forces {
            trace!("Tidal forces disabled");
            return TidalStress::none();
        }

        let distance = ship.distance_to(body);
        if distance >= body.radius * TIDAL_RANGE_RADII {
            return TidalStress::none();
        }

        let distance = distance.max(MIN_DISTANCE);
        let stress = 2.0 * self.g() * body.mass * ASSUMED_SHIP_LENGTH / distance.powi(3);

        TidalStress {
            stress,
            is_destroying: stress > TIDAL_DESTRUCTION_THRESHOLD,
            warning_level: (stress / TIDAL_DESTRUCTION_THRESHOLD).clamp(0.0, 1.0),
        }
    }

    /// 2 G M / c^2
    pub fn schwarzschild_radius(&self, mass: f64) -> f64 {
        2.0 * self.g() * mass / self.c_squared()
    }

    /// Rate at which the ship's clock runs, relative to a distant observer.
    ///
    /// Always in [0.1, 1]: inside the Schwarzschild radius, or close enough
    /// that the square root would dip below 0.1, the floor is returned.
    pub fn time_dilation(&self, ship: &Body, body: &Body) -> f64 {
        if !self.config.enable_relativistic_effects {
            return 1.0;
        }

        let rs = self.schwarzschild_radius(body.mass);
        let distance = ship.distance_to(body);

        if distance <= rs {
            return MIN_TIME_DILATION;
        }

        (1.0 - rs / distance).sqrt().clamp(MIN_TIME_DILATION, 1.0)
    }

    /// Distance inside which `satellite` is torn apart by `primary`.
    ///
    /// Density is approximated as mass / radius^3, which is enough for the
    /// ratio. Uses the rigid-body coefficient (2.46) unless `is_fluid`, in
    /// which case the fluid one (2.88).
    pub fn roche_limit(&self, primary: &Body, satellite: &Body, is_fluid: bool) -> f64 {
        let factor = if is_fluid {
            ROCHE_FLUID_FACTOR
        } else {
            ROCHE_RIGID_FACTOR
        };

        // R_p * cbrt((M_p / R_p^3) / (M_s / R_s^3)) = R_s * cbrt(M_p / M_s)
        factor * satellite.radius * (primary.mass / satellite.mass).cbrt()
    }

    pub fn tidal_disruption_check(&self, body1: &Body, body2: &Body) -> DisruptionCheck {
        let roche_limit = self.roche_limit(body1, body2, false);
        let distance = body1.distance_to(body2);

        let warning_level = if roche_limit > 0.0 {
            (1.0 - distance / roche_limit).max(0.0)
        } else {
            0.0
        };

        DisruptionCheck {
            roche_limit,
            distance,
            is_disrupted: distance < roche_limit,
            warning_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::EngineConfig;

    fn planet() -> Body {
        Body::new(Vector2::zeros(), 1000.0, 10.0)
    }

    fn ship(x: f64, vy: f64) -> Body {
        Body::new(Vector2::new(x, 0.0), 1.0, 0.0).with_velocity(Vector2::new(0.0, vy))
    }

    #[test]
    fn test_slingshot() {
        let engine = OrbitalPhysicsEngine::default();

        // Escape velocity at 50 is sqrt(20)
        let result = engine.gravity_slingshot(&ship(50.0, 5.0), &planet());
        let factor = 5.0 / 20.0_f64.sqrt();
        assert_relative_eq!(result.boost_factor, factor);
        assert_relative_eq!(result.boost_velocity, Vector2::new(-factor * 10.0, 0.0));
        assert!(result.is_effective);

        // Capped
        let result = engine.gravity_slingshot(&ship(50.0, 100.0), &planet());
        assert_relative_eq!(result.boost_factor, 2.0);
        assert_relative_eq!(result.boost_velocity, Vector2::new(-20.0, 0.0));

        // Too slow
        let result = engine.gravity_slingshot(&ship(50.0, 1.0), &planet());
        assert!(!result.is_effective);

        // Too far: 200 is not within 10 radii
        let result = engine.gravity_slingshot(&ship(200.0, 100.0), &planet());
        assert!(result.boost_factor > 0.5);
        assert!(!result.is_effective);

        // Matching the body's velocity gives nothing
        let result = engine.gravity_slingshot(&ship(50.0, 0.0), &planet());
        assert_eq!(result.boost_factor, 0.0);
        assert_eq!(result.boost_velocity, Vector2::zeros());
    }

    #[test]
    fn test_tidal_forces() {
        let engine = OrbitalPhysicsEngine::default();

        // 2 * 0.5 * 1000 * 10 / 20^3
        let result = engine.tidal_forces(&ship(20.0, 0.0), &planet());
        assert_relative_eq!(result.stress, 1.25);
        assert_relative_eq!(result.warning_level, 0.0125);
        assert!(!result.is_destroying);

        let result = engine.tidal_forces(&ship(3.0, 0.0), &planet());
        assert!(result.is_destroying);
        assert_eq!(result.warning_level, 1.0);

        assert_eq!(engine.tidal_forces(&ship(25.0, 0.0), &planet()).stress, 0.0);
        assert_eq!(engine.tidal_forces(&ship(80.0, 0.0), &planet()).stress, 0.0);

        let disabled = OrbitalPhysicsEngine::new(EngineConfig {
            enable_tidal_forces: false,
            ..EngineConfig::default()
        })
        .unwrap();
        assert_eq!(disabled.tidal_forces(&ship(3.0, 0.0), &planet()).stress, 0.0);
    }

    #[test]
    fn test_time_dilation() {
        let engine = OrbitalPhysicsEngine::default();
        // rs = 2 * 0.5 * 1e8 / 1000^2 = 100
        let hole = Body::new(Vector2::zeros(), 1e8, 5.0).as_black_hole();
        assert_relative_eq!(engine.schwarzschild_radius(hole.mass), 100.0);

        assert_relative_eq!(engine.time_dilation(&ship(400.0, 0.0), &hole), 0.75_f64.sqrt());
        assert_eq!(engine.time_dilation(&ship(101.0, 0.0), &hole), 0.1);
        assert_eq!(engine.time_dilation(&ship(100.0, 0.0), &hole), 0.1);
        assert_eq!(engine.time_dilation(&ship(0.0, 0.0), &hole), 0.1);

        // An ordinary planet barely registers
        let factor = engine.time_dilation(&ship(50.0, 0.0), &planet());
        assert!(factor < 1.0);
        assert_relative_eq!(factor, 1.0, epsilon = 1e-4);

        let disabled = OrbitalPhysicsEngine::new(EngineConfig {
            enable_relativistic_effects: false,
            ..EngineConfig::default()
        })
        .unwrap();
        assert_eq!(disabled.time_dilation(&ship(50.0, 0.0), &hole), 1.0);
    }

    #[test]
    fn test_roche_limit() {
        let engine = OrbitalPhysicsEngine::default();
        // Equal densities, so the limit is just factor * R_p
        let primary = Body::new(Vector2::zeros(), 8000.0, 20.0);
        let moon = Body::new(Vector2::new(40.0, 0.0), 1000.0, 10.0);

        assert_relative_eq!(engine.roche_limit(&primary, &moon, false), 2.46 * 20.0);
        assert_relative_eq!(engine.roche_limit(&primary, &moon, true), 2.88 * 20.0);

        let check = engine.tidal_disruption_check(&primary, &moon);
        assert!(check.is_disrupted);
        assert_relative_eq!(check.distance, 40.0);
        assert_relative_eq!(check.warning_level, 1.0 - 40.0 / 49.2);

        let far_moon = Body::new(Vector2::new(60.0, 0.0), 1000.0, 10.0);
        let check = engine.tidal_disruption_check(&primary, &far_moon);
        assert!(!check.is_disrupted);
        assert_eq!(check.warning_level, 0.0);

        // A point-like satellite has no size to tear apart
        let pebble = Body::new(Vector2::new(1.0, 0.0), 1.0, 0.0);
        let check = engine.tidal_disruption_check(&primary, &pebble);
        assert_eq!(check.roche_limit, 0.0);
        assert!(!check.is_disrupted);
    }
}
