use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use nalgebra::Vector2;

use orbital_physics::math::geometry::directed_angle;
use orbital_physics::scenario::Scenario;

#[derive(Debug, Parser)]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Advance the simulation this many steps before reporting
    #[arg(long, default_value_t = 0)]
    steps: usize,

    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// How close counts as "at" a Lagrange point
    #[arg(long, default_value_t = 50.0)]
    lagrange_threshold: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = Scenario::load(&args.scenario)?;
    let ship_name = scenario.ship_name.clone();
    let names = scenario.names.clone();
    let mut sim = scenario.into_simulation();

    if args.steps > 0 {
        info!("Advancing {} steps of {}", args.steps, args.dt);
        sim.run(args.steps, args.dt);
    }

    let engine = sim.engine();
    let ship = sim.ship();
    let bodies = sim.bodies();

    println!(
        "{} at ({:.2}, {:.2}), t = {:.2} (ship clock {:.2})",
        ship_name,
        ship.position.x,
        ship.position.y,
        sim.time(),
        sim.proper_time()
    );
    println!();

    // Hill spheres are measured against the heaviest body
    let heaviest = (0..bodies.len()).max_by(|&a, &b| bodies[a].mass.total_cmp(&bodies[b].mass));

    for (idx, (name, body)) in names.iter().zip(bodies).enumerate() {
        let params = engine.orbital_parameters(ship, body);

        println!("Relative to {}", name);
        println!("- Distance: {:.3}", params.distance);
        if params.distance > 0.0 {
            println!(
                "- Bearing: {:.1} deg",
                directed_angle(&Vector2::x(), &ship.offset_from(body)).to_degrees()
            );
            println!(
                "- Circular / escape velocity: {:.4} / {:.4}",
                engine.orbital_velocity(body.mass, params.distance),
                engine.escape_velocity(body.mass, params.distance)
            );
        }
        println!("- Relative speed: {:.4}", params.speed);
        println!("- Orbit: {}", params.orbit_type);
        println!("- Semi-major axis: {}", params.semi_major_axis);
        println!("- Eccentricity: {:.4}", params.eccentricity);
        println!("- Apoapsis: {:?}", params.apoapsis);
        println!("- Periapsis: {:?}", params.periapsis);
        println!("- Period: {:?}", params.period);
        println!(
            "- Stable: {}",
            engine.is_in_stable_orbit(ship, body, None)
        );

        let slingshot = engine.gravity_slingshot(ship, body);
        println!(
            "- Slingshot: factor {:.3}, effective {}",
            slingshot.boost_factor, slingshot.is_effective
        );

        let tidal = engine.tidal_forces(ship, body);
        println!(
            "- Tidal stress: {:.4} (warning {:.2}{})",
            tidal.stress,
            tidal.warning_level,
            if tidal.is_destroying { ", HULL FAILING" } else { "" }
        );

        let disruption = engine.tidal_disruption_check(body, ship);
        println!(
            "- Roche limit: {:.3} (disrupted {})",
            disruption.roche_limit, disruption.is_disrupted
        );

        println!("- Time dilation: {:.5}", engine.time_dilation(ship, body));

        if let Some(omega) = body.angular_velocity {
            let drag = engine.frame_dragging(ship, body, omega);
            println!("- Frame dragging: ({:.3e}, {:.3e})", drag.x, drag.y);
        }

        let atmosphere = engine.atmospheric_drag(ship, body, args.dt);
        if atmosphere.in_atmosphere {
            println!(
                "- In atmosphere: density {:.4}, drag {:.4}",
                atmosphere.density, atmosphere.drag_force
            );
        }

        let central = heaviest.filter(|&h| h != idx).map(|h| &bodies[h]);
        let orbit_radius = central.map_or(0.0, |c| body.distance_to(c));
        println!(
            "- Hill sphere: {:.3}",
            engine.hill_sphere(body, central, orbit_radius)
        );
        println!();
    }

    match engine.sphere_of_influence(ship, bodies) {
        Some(dominant) => {
            let primary = &bodies[dominant.index];
            println!(
                "Dominant body: {} (influence {:.3e})",
                names[dominant.index], dominant.influence
            );
            let perturbation = engine.perturbations(ship, primary, bodies);
            println!("- Perturbing force: {:.4e}", perturbation.magnitude);
        }
        None => println!("No body dominates; the ship is coasting"),
    }

    let mut by_mass: Vec<usize> = (0..bodies.len()).collect();
    by_mass.sort_by(|&a, &b| bodies[b].mass.total_cmp(&bodies[a].mass));
    if let &[first, second, ..] = by_mass.as_slice() {
        println!();
        println!("Lagrange points of {} and {}", names[first], names[second]);
        match engine.lagrange_points(&bodies[first], &bodies[second]) {
            Some(points) => {
                for point in points.iter() {
                    println!(
                        "- {}: ({:.2}, {:.2}){}",
                        point.label,
                        point.position.x,
                        point.position.y,
                        if point.stable { " stable" } else { "" }
                    );
                }
            }
            None => println!("- none; the bodies coincide"),
        }

        if let Some(near) = engine.near_lagrange_point(
            &ship.position,
            &bodies[first],
            &bodies[second],
            args.lagrange_threshold,
        ) {
            println!(
                "{} is {:.2} from {}",
                ship_name, near.distance, near.point.label
            );
        }
    }

    Ok(())
}
