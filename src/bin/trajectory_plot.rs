use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use log::info;
use plotters::prelude::*;

use orbital_physics::scenario::Scenario;

#[derive(Debug, Parser)]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    #[arg(long, default_value_t = 5000)]
    steps: usize,

    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    #[arg(short, long, default_value = "plots/trajectory.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = Scenario::load(&args.scenario)?;
    let mut sim = scenario.into_simulation();
    let start = sim.ship().position;
    let mut path = vec![(start.x, start.y)];
    path.extend(sim.run(args.steps, args.dt).iter().map(|p| (p.x, p.y)));

    let bodies: Vec<(f64, f64)> = sim
        .bodies()
        .iter()
        .map(|b| (b.position.x, b.position.y))
        .collect();

    info!(
        "Simulated {:.1} time units ({:.1} on the ship's clock)",
        sim.time(),
        sim.proper_time()
    );

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw_plot(&args.output, &path, &bodies)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

fn draw_plot(output: &Path, path: &[(f64, f64)], bodies: &[(f64, f64)]) -> Result<()> {
    // Square bounds around everything, with a margin
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in path.iter().chain(bodies) {
        lo = lo.min(x.min(y));
        hi = hi.max(x.max(y));
    }
    let margin = ((hi - lo) * 0.05).max(1.0);
    let range = (lo - margin) as f32..(hi + margin) as f32;

    let root = BitMapBackend::new(output, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(range.clone(), range)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(
        path.iter().map(|&(x, y)| (x as f32, y as f32)),
        &RED,
    ))?;
    chart.draw_series(
        bodies
            .iter()
            .map(|&(x, y)| Circle::new((x as f32, y as f32), 5, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}
