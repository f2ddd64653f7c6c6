use std::f64::consts::FRAC_PI_3;
use std::fmt;

use nalgebra::Vector2;

use super::OrbitalPhysicsEngine;
use crate::body::Body;
use crate::consts::{
    INFLUENCE_RADIUS_SCALE, MAX_INFLUENCE_RADIUS, MIN_DISTANCE, STANDALONE_HILL_RADII,
};
use crate::math::geometry::unit_at_angle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LagrangeLabel {
    L1,
    L2,
    L3,
    L4,
    L5,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangePoint {
    pub label: LagrangeLabel,
    pub position: Vector2<f64>,
    pub stable: bool,
}

/// The five Lagrange points of a two-body system, in order L1 through L5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangePoints {
    points: [LagrangePoint; 5],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearLagrangePoint {
    pub point: LagrangePoint,
    pub distance: f64,
}

/// The body that dominates a ship's surroundings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantBody {
    /// Index into the candidate slice.
    pub index: usize,
    pub distance: f64,
    pub influence: f64,
}

impl LagrangeLabel {
    pub const ALL: [LagrangeLabel; 5] = [
        LagrangeLabel::L1,
        LagrangeLabel::L2,
        LagrangeLabel::L3,
        LagrangeLabel::L4,
        LagrangeLabel::L5,
    ];

    /// Only the triangular points are treated as stable. In reality this
    /// depends on the mass ratio; we don't model that.
    pub fn is_stable(&self) -> bool {
        matches!(self, LagrangeLabel::L4 | LagrangeLabel::L5)
    }
}

impl fmt::Display for LagrangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl LagrangePoints {
    pub fn iter(&self) -> impl Iterator<Item = &LagrangePoint> {
        self.points.iter()
    }

    pub fn get(&self, label: LagrangeLabel) -> &LagrangePoint {
        // Stored in declaration order
        &self.points[label as usize]
    }
}

/// How far a body's gravity is worth computing: grows with the cube root of
/// mass, capped to keep the candidate set small.
pub fn influence_radius(mass: f64) -> f64 {
    (INFLUENCE_RADIUS_SCALE * mass.cbrt()).min(MAX_INFLUENCE_RADIUS)
}

impl OrbitalPhysicsEngine {
    /// Lagrange points of `body2` orbiting `body1`, or `None` if the bodies coincide.
    ///
    /// L1 and L2 sit d * cbrt(q / 3) from body1 and past body2 respectively,
    /// where q = m2 / (m1 + m2). L3 mirrors body2 through body1, and L4/L5
    /// lead and trail body2 by 60 degrees.
    pub fn lagrange_points(&self, body1: &Body, body2: &Body) -> Option<LagrangePoints> {
        let offset = body2.offset_from(body1);
        let distance = offset.norm();
        if distance < MIN_DISTANCE {
            return None;
        }

        let angle = offset.y.atan2(offset.x);
        let axis = unit_at_angle(angle);
        let mass_ratio = body2.mass / (body1.mass + body2.mass);
        let hill_offset = distance * (mass_ratio / 3.0).cbrt();

        let origin = body1.position;
        let positions = [
            origin + axis * hill_offset,
            origin + axis * (distance + hill_offset),
            origin - axis * distance,
            origin + unit_at_angle(angle + FRAC_PI_3) * distance,
            origin + unit_at_angle(angle - FRAC_PI_3) * distance,
        ];

        let mut points = [LagrangePoint {
            label: LagrangeLabel::L1,
            position: Vector2::zeros(),
            stable: false,
        }; 5];
        for ((point, label), position) in points
            .iter_mut()
            .zip(LagrangeLabel::ALL)
            .zip(positions)
        {
            *point = LagrangePoint {
                label,
                position,
                stable: label.is_stable(),
            };
        }

        Some(LagrangePoints { points })
    }

    /// The first Lagrange point (in order L1..L5) closer than `threshold` to `position`.
    ///
    /// Note that this is the first match, not necessarily the nearest one.
    pub fn near_lagrange_point(
        &self,
        position: &Vector2<f64>,
        body1: &Body,
        body2: &Body,
        threshold: f64,
    ) -> Option<NearLagrangePoint> {
        let points = self.lagrange_points(body1, body2)?;

        let near = points.iter().find_map(|point| {
            let distance = (point.position - position).norm();
            if distance < threshold {
                Some(NearLagrangePoint {
                    point: *point,
                    distance,
                })
            } else {
                None
            }
        });
        near
    }

    /// Radius within which `body` holds on to things against `central_body`.
    ///
    /// Bodies with no parent get a fixed multiple of their own radius.
    pub fn hill_sphere(&self, body: &Body, central_body: Option<&Body>, orbit_radius: f64) -> f64 {
        match central_body {
            Some(central) => orbit_radius * (body.mass / (3.0 * central.mass)).cbrt(),
            None => body.radius * STANDALONE_HILL_RADII,
        }
    }

    /// Picks the body with the greatest influence score among those whose
    /// influence radius contains the ship. Ties go to the earliest body.
    pub fn sphere_of_influence(&self, ship: &Body, bodies: &[Body]) -> Option<DominantBody> {
        let mut best: Option<DominantBody> = None;

        for (index, body) in bodies.iter().enumerate() {
            let distance = ship.distance_to(body);
            let radius = influence_radius(body.mass);
            if distance > radius {
                continue;
            }

            let clamped = distance.max(MIN_DISTANCE);
            let influence = body.mass / (clamped * clamped) / radius;

            if best.map_or(true, |b| influence > b.influence) {
                best = Some(DominantBody {
                    index,
                    distance,
                    influence,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_influence_radius() {
        assert_relative_eq!(influence_radius(1000.0), 1000.0);
        assert_relative_eq!(influence_radius(8.0), 200.0);
        assert_eq!(influence_radius(1e15), MAX_INFLUENCE_RADIUS);
    }

    #[test]
    fn test_lagrange_points_on_axis() {
        let engine = OrbitalPhysicsEngine::default();
        let sun = Body::new(Vector2::zeros(), 999.0, 10.0);
        let planet = Body::new(Vector2::new(0.0, 300.0), 3.0, 2.0);

        // q = 3 / 1002, so the offset is 300 * cbrt(1 / 1002)
        let points = engine.lagrange_points(&sun, &planet).unwrap();
        let offset = 300.0 * (1.0_f64 / 1002.0).cbrt();

        assert_relative_eq!(
            points.get(LagrangeLabel::L1).position,
            Vector2::new(0.0, offset),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            points.get(LagrangeLabel::L2).position,
            Vector2::new(0.0, 300.0 + offset),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            points.get(LagrangeLabel::L3).position,
            Vector2::new(0.0, -300.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            points.get(LagrangeLabel::L4).position,
            Vector2::new(-300.0 * 3.0_f64.sqrt() / 2.0, 150.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            points.get(LagrangeLabel::L5).position,
            Vector2::new(300.0 * 3.0_f64.sqrt() / 2.0, 150.0),
            epsilon = 1e-12
        );

        let labels: Vec<_> = points.iter().map(|p| p.label).collect();
        assert_eq!(labels, LagrangeLabel::ALL.to_vec());
        let stable: Vec<_> = points.iter().map(|p| p.stable).collect();
        assert_eq!(stable, vec![false, false, false, true, true]);
    }

    #[test]
    fn test_coincident_bodies() {
        let engine = OrbitalPhysicsEngine::default();
        let body = Body::new(Vector2::new(5.0, 5.0), 100.0, 1.0);
        assert_eq!(engine.lagrange_points(&body, &body), None);
        assert_eq!(
            engine.near_lagrange_point(&Vector2::new(5.0, 5.0), &body, &body, 1e9),
            None
        );
    }

    #[test]
    fn test_near_lagrange_point() {
        let engine = OrbitalPhysicsEngine::default();
        let sun = Body::new(Vector2::zeros(), 1000.0, 10.0);
        let planet = Body::new(Vector2::new(1000.0, 0.0), 1000.0, 5.0);
        let points = engine.lagrange_points(&sun, &planet).unwrap();
        let l4 = points.get(LagrangeLabel::L4).position;

        let near = engine
            .near_lagrange_point(&(l4 + Vector2::new(3.0, 4.0)), &sun, &planet, 10.0)
            .unwrap();
        assert_eq!(near.point.label, LagrangeLabel::L4);
        assert!(near.point.stable);
        assert_relative_eq!(near.distance, 5.0, epsilon = 1e-9);

        assert_eq!(
            engine.near_lagrange_point(&Vector2::new(0.0, -50.0), &sun, &planet, 10.0),
            None
        );

        // With a huge threshold, L1 wins even when L2 is closer
        let l2 = points.get(LagrangeLabel::L2).position;
        let near = engine
            .near_lagrange_point(&l2, &sun, &planet, 5000.0)
            .unwrap();
        assert_eq!(near.point.label, LagrangeLabel::L1);
    }

    #[test]
    fn test_hill_sphere() {
        let engine = OrbitalPhysicsEngine::default();
        let star = Body::new(Vector2::zeros(), 1e6, 100.0);
        let planet = Body::new(Vector2::new(5000.0, 0.0), 3000.0, 20.0);

        // cbrt(3000 / 3e6) = 0.1
        assert_relative_eq!(
            engine.hill_sphere(&planet, Some(&star), 5000.0),
            500.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(engine.hill_sphere(&planet, None, 5000.0), 1000.0);
    }

    #[test]
    fn test_sphere_of_influence() {
        let engine = OrbitalPhysicsEngine::default();
        let ship = Body::new(Vector2::zeros(), 1.0, 0.0);

        // Scores: (1000 / 100^2) / 1000 = 1e-4, and (8000 / 300^2) / 2000 ~ 4.4e-5
        let bodies = [
            Body::new(Vector2::new(0.0, 300.0), 8000.0, 10.0),
            Body::new(Vector2::new(100.0, 0.0), 1000.0, 10.0),
        ];
        let dominant = engine.sphere_of_influence(&ship, &bodies).unwrap();
        assert_eq!(dominant.index, 1);
        assert_relative_eq!(dominant.distance, 100.0);
        assert_relative_eq!(dominant.influence, 1e-4, max_relative = 1e-12);

        // Ties go to the first body
        let twins = [
            Body::new(Vector2::new(100.0, 0.0), 1000.0, 10.0),
            Body::new(Vector2::new(-100.0, 0.0), 1000.0, 10.0),
        ];
        assert_eq!(engine.sphere_of_influence(&ship, &twins).unwrap().index, 0);

        // Nothing in range
        let far = [Body::new(Vector2::new(5000.0, 0.0), 1000.0, 10.0)];
        assert_eq!(engine.sphere_of_influence(&ship, &far), None);
        assert_eq!(engine.sphere_of_influence(&ship, &[]), None);
    }
}
