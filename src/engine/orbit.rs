use std::f64::consts::PI;
use std::fmt;

use super::OrbitalPhysicsEngine;
use crate::body::Body;
use crate::consts::{MIN_DISTANCE, SAFE_PERIAPSIS_RADII, STABLE_ECCENTRICITY_LIMIT};
use crate::math::geometry::cross;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitType {
    Elliptical,
    Parabolic,
    Hyperbolic,
}

/// Instantaneous two-body orbit of a ship around a central body.
///
/// Unbound orbits (parabolic or hyperbolic) have an infinite semi-major axis,
/// an eccentricity of exactly 1 and no apsides. This is a gameplay
/// simplification: a true hyperbola has e > 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    pub distance: f64,
    pub speed: f64,
    /// Specific orbital energy, v^2/2 - GM/r
    pub energy: f64,
    pub orbit_type: OrbitType,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub apoapsis: Option<f64>,
    pub periapsis: Option<f64>,
    pub period: Option<f64>,
    pub is_stable: bool,
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitType::Elliptical => "elliptical",
            OrbitType::Parabolic => "parabolic",
            OrbitType::Hyperbolic => "hyperbolic",
        };
        write!(f, "{}", name)
    }
}

impl OrbitalParameters {
    pub fn is_bound(&self) -> bool {
        self.orbit_type == OrbitType::Elliptical
    }
}

impl OrbitalPhysicsEngine {
    /// Speed of a circular orbit at the given radius. The radius must be positive.
    pub fn orbital_velocity(&self, central_mass: f64, orbit_radius: f64) -> f64 {
        (self.g() * central_mass / orbit_radius).sqrt()
    }

    /// Speed needed to escape from the given distance. The distance must be positive.
    pub fn escape_velocity(&self, central_mass: f64, distance: f64) -> f64 {
        (2.0 * self.g() * central_mass / distance).sqrt()
    }

    /// Classifies the ship's orbit around `central_body`, ignoring every other body.
    pub fn orbital_parameters(&self, ship: &Body, central_body: &Body) -> OrbitalParameters {
        let mu = self.g() * central_body.mass;

        let position = ship.offset_from(central_body);
        let velocity = ship.velocity_relative_to(central_body);
        let distance = position.norm();
        let speed = velocity.norm();

        // Keep the potential finite when the ship sits on the body's centre
        let energy = speed * speed / 2.0 - mu / distance.max(MIN_DISTANCE);

        let orbit_type = if energy < 0.0 {
            OrbitType::Elliptical
        } else if energy > 0.0 {
            OrbitType::Hyperbolic
        } else {
            OrbitType::Parabolic
        };

        if orbit_type != OrbitType::Elliptical {
            return OrbitalParameters {
                distance,
                speed,
                energy,
                orbit_type,
                semi_major_axis: f64::INFINITY,
                eccentricity: 1.0,
                apoapsis: None,
                periapsis: None,
                period: None,
                is_stable: false,
            };
        }

        let semi_major_axis = -mu / (2.0 * energy);

        // e^2 = 1 + 2 E h^2 / mu^2; round tiny negatives (circular orbits) up to zero
        let ang_mom = cross(&position, &velocity);
        let e_squared = 1.0 + 2.0 * energy * ang_mom * ang_mom / (mu * mu);
        let eccentricity = e_squared.max(0.0).sqrt();

        OrbitalParameters {
            distance,
            speed,
            energy,
            orbit_type,
            semi_major_axis,
            eccentricity,
            apoapsis: Some(semi_major_axis * (1.0 + eccentricity)),
            periapsis: Some(semi_major_axis * (1.0 - eccentricity)),
            period: Some(2.0 * PI * (semi_major_axis.powi(3) / mu).sqrt()),
            is_stable: eccentricity < STABLE_ECCENTRICITY_LIMIT,
        }
    }

    /// Whether the ship is in a bound, not-too-eccentric orbit whose periapsis
    /// clears the central body by a safety margin.
    ///
    /// `max_eccentricity` replaces the default eccentricity cutoff of 0.9.
    pub fn is_in_stable_orbit(
        &self,
        ship: &Body,
        central_body: &Body,
        max_eccentricity: Option<f64>,
    ) -> bool {
        let params = self.orbital_parameters(ship, central_body);
        let max_eccentricity = max_eccentricity.unwrap_or(STABLE_ECCENTRICITY_LIMIT);
        let safe_periapsis = central_body.radius * SAFE_PERIAPSIS_RADII;

        params.is_bound()
            && params.eccentricity < max_eccentricity
            && params
                .periapsis
                .map_or(false, |periapsis| periapsis > safe_periapsis)
    }
}
