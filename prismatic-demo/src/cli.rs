use anyhow::Result;
use prismatic::{BounceSimulator, Color, LightSource, Ray, SimulationDesc, Trace, Vec2};
use std::f32::consts::TAU;

use crate::scenes;

pub fn run_cli_tests() -> Result<()> {
    log::info!("=== Showcase Scene, Parallel Beam ===");
    trace_showcase_parallel()?;

    log::info!("=== Showcase Scene, Radial Beam ===");
    trace_showcase_radial()?;

    log::info!("=== Facing Mirrors ===");
    trace_facing_mirrors()?;

    log::info!("=== Beam Sweep ===");
    sweep_beam()?;

    Ok(())
}

fn report(label: &str, trace: &Trace) {
    let stats = &trace.stats;
    log::info!(
        "{}: {} rays, {} hits, {} iterations, {} truncated, {:?}",
        label,
        trace.rays.len(),
        stats.hits,
        stats.iterations,
        stats.truncated,
        stats.elapsed
    );
    for (iteration, size) in stats.frontier_sizes.iter().enumerate() {
        log::debug!("  iteration {}: {} active rays", iteration + 1, size);
    }
}

fn trace_showcase_parallel() -> Result<()> {
    let world = scenes::showcase()?;
    let simulator = BounceSimulator::new(SimulationDesc::default())?;
    let trace = simulator.run(&world, &scenes::default_source());
    report("parallel", &trace);
    Ok(())
}

fn trace_showcase_radial() -> Result<()> {
    let world = scenes::showcase()?;
    let simulator = BounceSimulator::new(SimulationDesc::default())?;
    let source = LightSource::radial(Ray::new(Vec2::new(0.0, 0.3), Vec2::X), 36, Color::WHEAT);
    let trace = simulator.run(&world, &source);
    report("radial", &trace);
    Ok(())
}

fn trace_facing_mirrors() -> Result<()> {
    let world = scenes::facing_mirrors()?;
    for max_bounces in [2, 6, 12] {
        let desc = SimulationDesc::default().max_bounces(max_bounces);
        let simulator = BounceSimulator::new(desc)?;
        let source = LightSource::parallel(Ray::new(Vec2::new(0.0, 0.5), Vec2::X), 4, 0.5, Color::WHEAT);
        let trace = simulator.run(&world, &source);
        report(&format!("mirrors, limit {max_bounces}"), &trace);
    }
    Ok(())
}

fn sweep_beam() -> Result<()> {
    let mut world = scenes::showcase()?;
    let simulator = BounceSimulator::new(SimulationDesc::default())?;
    let source = scenes::default_source();
    let steps = 24;
    let mut total_rays = 0;
    for step in 0..steps {
        let angle = TAU * step as f32 / steps as f32;
        let center = source.beam.center().rotate(angle);
        let trace = simulator.run(&world, &source.aimed(center));
        total_rays += trace.rays.len();
        log::debug!(
            "angle {:>6.1} deg: {} rays, {} hits",
            angle.to_degrees(),
            trace.rays.len(),
            trace.stats.hits
        );
        world.spin(TAU / 288.0);
    }
    log::info!(
        "sweep: {} steps, {:.1} rays per step",
        steps,
        total_rays as f32 / steps as f32
    );
    Ok(())
}
