use log::trace;
use nalgebra::Vector2;

use super::points::influence_radius;
use super::OrbitalPhysicsEngine;
use crate::body::Body;
use crate::consts::{
    ATMOSPHERE_HEIGHT_RADII, ATMOSPHERE_SCALE_HEIGHT_RADII, DRAG_COEFFICIENT, GRAVITY_WELL_RADII,
    MIN_DISTANCE, SPHERE_INERTIA_FACTOR,
};
use crate::math::geometry::{normalize_or_zero, perpendicular};

/// Newtonian attraction between two bodies, as felt by the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityForce {
    pub force: Vector2<f64>,
    /// Separation between the bodies; zero if they were too close to compute a force.
    pub distance: f64,
    pub magnitude: f64,
}

/// Summary of one gravity tick, for warnings and ambient effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityInfo {
    /// Magnitude of the net acceleration.
    pub acceleration: f64,
    /// Velocity change for this tick; the caller applies it.
    pub delta_v: Vector2<f64>,
    /// Index (into the source slice) of the closest source in range.
    pub closest_body: Option<usize>,
    /// Infinite if nothing was in range.
    pub closest_distance: f64,
    pub in_gravity_well: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub force: Vector2<f64>,
    pub magnitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInfo {
    pub in_atmosphere: bool,
    pub density: f64,
    pub altitude: f64,
    pub drag_force: f64,
    /// Velocity change for this tick; the caller applies it.
    pub delta_v: Vector2<f64>,
}

impl GravityForce {
    pub fn zero() -> Self {
        GravityForce {
            force: Vector2::zeros(),
            distance: 0.0,
            magnitude: 0.0,
        }
    }
}

impl OrbitalPhysicsEngine {
    /// Force that `source` exerts on `target`, pointing from the target towards the source.
    pub fn compute_gravitational_force(&self, source: &Body, target: &Body) -> GravityForce {
        let offset = source.offset_from(target);
        let distance = offset.norm();

        if distance < MIN_DISTANCE {
            return GravityForce::zero();
        }

        let magnitude = self.g() * source.mass * target.mass / (distance * distance);
        GravityForce {
            force: offset / distance * magnitude,
            distance,
            magnitude,
        }
    }

    /// Sums the pull of every source in range of the target over one tick.
    ///
    /// A source only contributes if the target is within its
    /// [influence_radius]. If n-body gravity is disabled, only the closest
    /// source in range contributes.
    pub fn accumulate_gravity(&self, target: &Body, sources: &[Body], dt: f64) -> GravityInfo {
        let n_body = self.config.enable_n_body_gravity;

        let mut net_force = Vector2::zeros();
        let mut closest: Option<(usize, f64)> = None;

        for (idx, source) in sources.iter().enumerate() {
            let distance = target.distance_to(source);
            if distance > influence_radius(source.mass) {
                trace!("Source {} out of range at distance {}", idx, distance);
                continue;
            }

            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((idx, distance));
            }

            if n_body {
                net_force += self.compute_gravitational_force(source, target).force;
            }
        }

        if !n_body {
            if let Some((idx, _)) = closest {
                net_force = self.compute_gravitational_force(&sources[idx], target).force;
            }
        }

        let acceleration = if target.mass > 0.0 {
            net_force / target.mass
        } else {
            Vector2::zeros()
        };

        let (closest_body, closest_distance) = match closest {
            Some((idx, distance)) => (Some(idx), distance),
            None => (None, f64::INFINITY),
        };
        let in_gravity_well = closest_body
            .map_or(false, |idx| closest_distance < GRAVITY_WELL_RADII * sources[idx].radius);

        GravityInfo {
            acceleration: acceleration.norm(),
            delta_v: acceleration * dt,
            closest_body,
            closest_distance,
            in_gravity_well,
        }
    }

    /// Differential pull of secondary bodies, relative to the primary's frame.
    ///
    /// For each perturber other than the primary, the force it exerts on the
    /// primary is subtracted from the force it exerts on the ship.
    pub fn perturbations(
        &self,
        ship: &Body,
        primary: &Body,
        perturbing_bodies: &[Body],
    ) -> Perturbation {
        if !self.config.enable_n_body_gravity {
            trace!("N-body gravity disabled; skipping perturbations");
            return Perturbation {
                force: Vector2::zeros(),
                magnitude: 0.0,
            };
        }

        let force: Vector2<f64> = perturbing_bodies
            .iter()
            .filter(|body| *body != primary)
            .map(|body| {
                let on_ship = self.compute_gravitational_force(body, ship).force;
                let on_primary = self.compute_gravitational_force(body, primary).force;
                on_ship - on_primary
            })
            .sum();

        Perturbation {
            force,
            magnitude: force.norm(),
        }
    }

    /// Lense-Thirring style drag from a spinning body.
    ///
    /// The body is treated as a solid sphere, so J = 0.4 M R^2 omega. The
    /// dragged frame rotates at 2 G J / (c^2 r^3); the returned force is
    /// tangential, in the direction of the spin.
    pub fn frame_dragging(
        &self,
        ship: &Body,
        rotating_body: &Body,
        angular_velocity: f64,
    ) -> Vector2<f64> {
        if !self.config.enable_relativistic_effects {
            return Vector2::zeros();
        }

        let offset = ship.offset_from(rotating_body);
        let r = offset.norm();
        if r < MIN_DISTANCE {
            return Vector2::zeros();
        }

        let inertia = SPHERE_INERTIA_FACTOR * rotating_body.mass * rotating_body.radius.powi(2);
        let ang_mom = inertia * angular_velocity;
        let drag_rate = 2.0 * self.g() * ang_mom / (self.c_squared() * r.powi(3));

        let tangent = perpendicular(&(offset / r));
        tangent * (drag_rate * r * ship.mass)
    }

    /// Quadratic drag from an exponentially thinning atmosphere.
    ///
    /// The atmosphere extends to 1.5 planetary radii from the centre. The
    /// returned `delta_v` opposes the ship's velocity and never exceeds it.
    /// Altitude is clamped at zero, so below the surface the density stays at
    /// its surface value of 1.
    pub fn atmospheric_drag(&self, ship: &Body, planet: &Body, dt: f64) -> DragInfo {
        let distance = ship.distance_to(planet);
        let altitude = (distance - planet.radius).max(0.0);

        if distance >= planet.radius * ATMOSPHERE_HEIGHT_RADII {
            return DragInfo {
                in_atmosphere: false,
                density: 0.0,
                altitude,
                drag_force: 0.0,
                delta_v: Vector2::zeros(),
            };
        }

        let density = (-altitude / (planet.radius * ATMOSPHERE_SCALE_HEIGHT_RADII)).exp();
        let speed = ship.velocity.norm();
        let drag_force = DRAG_COEFFICIENT * density * speed * speed;

        let delta_v = if speed > 0.0 && ship.mass > 0.0 {
            let dv = (drag_force / ship.mass * dt).min(speed);
            -normalize_or_zero(&ship.velocity, 0.0) * dv
        } else {
            Vector2::zeros()
        };

        DragInfo {
            in_atmosphere: true,
            density,
            altitude,
            drag_force,
            delta_v,
        }
    }
}
