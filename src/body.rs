use nalgebra::Vector2;

/// A ship, star, planet or moon, as seen by the physics engine.
///
/// Immobile bodies have zero velocity. `angular_velocity` is only needed for
/// frame dragging, and `black_hole` is informational (the relativistic
/// routines key off mass, not this flag).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Gameplay-scaled; must be positive for anything used as a gravity source.
    pub mass: f64,
    pub radius: f64,
    pub angular_velocity: Option<f64>,
    pub black_hole: bool,
}

impl Body {
    /// A body at rest.
    pub fn new(position: Vector2<f64>, mass: f64, radius: f64) -> Self {
        Body {
            position,
            velocity: Vector2::zeros(),
            mass,
            radius,
            angular_velocity: None,
            black_hole: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_spin(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = Some(angular_velocity);
        self
    }

    pub fn as_black_hole(mut self) -> Self {
        self.black_hole = true;
        self
    }

    /// Vector pointing from `other` to `self`.
    pub fn offset_from(&self, other: &Body) -> Vector2<f64> {
        self.position - other.position
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.offset_from(other).norm()
    }

    /// Velocity of `self` as measured by an observer riding along with `other`.
    pub fn velocity_relative_to(&self, other: &Body) -> Vector2<f64> {
        self.velocity - other.velocity
    }

    /// Applies a velocity change returned by one of the integration-step routines.
    pub fn apply_delta_v(&mut self, delta_v: Vector2<f64>) {
        self.velocity += delta_v;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_relative_quantities() {
        let planet = Body::new(Vector2::new(100.0, 0.0), 500.0, 10.0)
            .with_velocity(Vector2::new(0.0, 2.0));
        let ship = Body::new(Vector2::new(100.0, 40.0), 1.0, 0.0)
            .with_velocity(Vector2::new(3.0, 2.0));

        assert_relative_eq!(ship.offset_from(&planet), Vector2::new(0.0, 40.0));
        assert_relative_eq!(ship.distance_to(&planet), 40.0);
        assert_relative_eq!(planet.distance_to(&ship), 40.0);
        assert_relative_eq!(ship.velocity_relative_to(&planet), Vector2::new(3.0, 0.0));
    }

    #[test]
    fn test_builders() {
        let hole = Body::new(Vector2::zeros(), 1e8, 5.0)
            .with_spin(0.25)
            .as_black_hole();
        assert!(hole.black_hole);
        assert_eq!(hole.angular_velocity, Some(0.25));
        assert_eq!(hole.velocity, Vector2::zeros());

        let mut ship = Body::new(Vector2::zeros(), 1.0, 0.0);
        ship.apply_delta_v(Vector2::new(1.0, -2.0));
        ship.apply_delta_v(Vector2::new(0.5, 0.5));
        assert_relative_eq!(ship.velocity, Vector2::new(1.5, -1.5));
    }
}
