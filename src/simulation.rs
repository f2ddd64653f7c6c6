//! A minimal host loop around the engine.
//!
//! The engine never integrates positions itself. This is the reference
//! caller: one gravity tick, atmospheric drag from the closest body, then a
//! semi-implicit Euler step for the ship and straight-line drift for any
//! moving bodies.

use log::trace;
use nalgebra::Vector2;

use crate::body::Body;
use crate::engine::{DragInfo, GravityInfo, OrbitalPhysicsEngine};

#[derive(Debug, Clone)]
pub struct Simulation {
    engine: OrbitalPhysicsEngine,
    ship: Body,
    bodies: Vec<Body>,
    time: f64,
    /// Time as measured on the ship's clock.
    proper_time: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub gravity: GravityInfo,
    /// Only present when there was a body in range to drag against.
    pub drag: Option<DragInfo>,
    pub time_dilation: f64,
}

impl Simulation {
    pub fn new(engine: OrbitalPhysicsEngine, ship: Body, bodies: Vec<Body>) -> Self {
        Simulation {
            engine,
            ship,
            bodies,
            time: 0.0,
            proper_time: 0.0,
        }
    }

    pub fn engine(&self) -> &OrbitalPhysicsEngine {
        &self.engine
    }

    pub fn ship(&self) -> &Body {
        &self.ship
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn proper_time(&self) -> f64 {
        self.proper_time
    }

    pub fn step(&mut self, dt: f64) -> StepReport {
        let gravity = self.engine.accumulate_gravity(&self.ship, &self.bodies, dt);
        self.ship.apply_delta_v(gravity.delta_v);

        let closest = gravity.closest_body.map(|idx| self.bodies[idx]);

        let drag = closest.map(|body| self.engine.atmospheric_drag(&self.ship, &body, dt));
        if let Some(drag) = &drag {
            self.ship.apply_delta_v(drag.delta_v);
        }

        let time_dilation = closest.map_or(1.0, |body| self.engine.time_dilation(&self.ship, &body));

        self.ship.position += self.ship.velocity * dt;
        for body in self.bodies.iter_mut() {
            body.position += body.velocity * dt;
        }

        self.time += dt;
        self.proper_time += dt * time_dilation;

        trace!(
            "t = {:.3}: ship at {:?}, |a| = {:.4}",
            self.time,
            self.ship.position,
            gravity.acceleration
        );

        StepReport {
            gravity,
            drag,
            time_dilation,
        }
    }

    /// Steps `n` times, returning the ship's position after every step.
    pub fn run(&mut self, n: usize, dt: f64) -> Vec<Vector2<f64>> {
        (0..n)
            .map(|_| {
                self.step(dt);
                self.ship.position
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_coasting() {
        let ship = Body::new(Vector2::zeros(), 1.0, 0.0).with_velocity(Vector2::new(2.0, 1.0));
        let mut sim = Simulation::new(OrbitalPhysicsEngine::default(), ship, vec![]);

        let report = sim.step(0.5);
        assert_eq!(report.gravity.closest_body, None);
        assert_eq!(report.drag, None);
        assert_eq!(report.time_dilation, 1.0);

        sim.run(3, 0.5);
        assert_relative_eq!(sim.ship().position, Vector2::new(4.0, 2.0));
        assert_relative_eq!(sim.time(), 2.0);
        assert_relative_eq!(sim.proper_time(), 2.0);
    }

    #[test]
    fn test_falls_toward_body() {
        let star = Body::new(Vector2::zeros(), 1000.0, 10.0);
        let ship = Body::new(Vector2::new(100.0, 0.0), 1.0, 0.0);
        let mut sim = Simulation::new(OrbitalPhysicsEngine::default(), ship, vec![star]);

        let report = sim.step(1.0);
        assert_eq!(report.gravity.closest_body, Some(0));
        // Above the atmosphere, so the drag check ran but did nothing
        assert!(!report.drag.unwrap().in_atmosphere);
        assert!(report.time_dilation < 1.0);

        assert!(sim.ship().velocity.x < 0.0);
        assert!(sim.ship().position.x < 100.0);
        assert!(sim.proper_time() < sim.time());
    }

    #[test]
    fn test_bodies_drift() {
        let moon = Body::new(Vector2::new(500.0, 0.0), 10.0, 1.0).with_velocity(Vector2::new(0.0, 3.0));
        let ship = Body::new(Vector2::new(-5000.0, 0.0), 1.0, 0.0);
        let mut sim = Simulation::new(OrbitalPhysicsEngine::default(), ship, vec![moon]);

        sim.run(10, 1.0);
        assert_relative_eq!(sim.bodies()[0].position, Vector2::new(500.0, 30.0));
    }
}
