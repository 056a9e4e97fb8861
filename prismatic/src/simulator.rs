//! Multi-bounce beam simulation.
//!
//! Rays are processed one bounce iteration at a time. Every ray in the current
//! frontier is cast once, searching up to the model size; hits spawn a
//! reflected and (unless totally internally reflected) a refracted child into
//! the next frontier. A ray that hits nothing is drawn to its reach: the model
//! size for source rays, half of it for children. Facing mirrors bounce
//! forever, so the bounce limit is what ends a pass.

use std::time::{Duration, Instant};

use crate::color::Color;
use crate::config::{LightSource, SimulationDesc};
use crate::error::Result;
use crate::geometry::Ray;
use crate::math::Vec2;
use crate::scene::{RayHit, RayTracer};

/// A ray segment produced by the simulator, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracedRay {
    pub ray: Ray,
    pub color: Color,
    /// Length drawn when the ray hits nothing.
    pub reach: f32,
    /// Length actually travelled: the hit distance, or `reach` on a miss.
    pub distance: f32,
    /// Number of bounces between the light source and this ray.
    pub generation: u32,
    /// Set when the bounce limit stopped the ray before it was cast.
    pub truncated: bool,
}

impl TracedRay {
    fn spawn(ray: Ray, color: Color, reach: f32, generation: u32) -> Self {
        Self {
            ray,
            color,
            reach,
            distance: reach,
            generation,
            truncated: false,
        }
    }

    pub fn end_point(&self) -> Vec2 {
        self.ray.point_along(self.distance)
    }
}

/// Counters collected during one simulation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceStats {
    /// Bounce iterations executed
    pub iterations: u32,
    /// Frontier size at the start of each iteration
    pub frontier_sizes: Vec<usize>,
    pub hits: usize,
    pub reflections: usize,
    pub refractions: usize,
    pub total_internal_reflections: usize,
    /// Rays still pending when the bounce limit was reached
    pub truncated: usize,
    pub elapsed: Duration,
}

/// Output of one simulation pass.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    pub rays: Vec<TracedRay>,
    pub stats: TraceStats,
}

pub struct BounceSimulator {
    desc: SimulationDesc,
}

impl BounceSimulator {
    pub fn new(desc: SimulationDesc) -> Result<Self> {
        desc.validate()?;
        Ok(Self { desc })
    }

    pub fn desc(&self) -> &SimulationDesc {
        &self.desc
    }

    /// Traces `source` through the scene seen by `tracer`.
    pub fn run<T: RayTracer + ?Sized>(&self, tracer: &T, source: &LightSource) -> Trace {
        let started = Instant::now();
        let mut stats = TraceStats::default();
        let mut rays = Vec::new();

        let mut frontier: Vec<TracedRay> = source
            .rays()
            .into_iter()
            .map(|ray| TracedRay::spawn(ray, source.color, self.desc.model_size, 0))
            .collect();
        let mut next = Vec::new();
        let mut bounce = 0;

        while !frontier.is_empty() && bounce <= self.desc.max_bounces {
            bounce += 1;
            stats.frontier_sizes.push(frontier.len());

            for mut traced in frontier.drain(..) {
                let hit = tracer.cast_ray(
                    &traced.ray,
                    self.desc.min_hit_distance,
                    self.desc.model_size,
                );
                if let Some(hit) = hit {
                    traced.distance = hit.distance;
                    stats.hits += 1;
                    self.split(&traced, &hit, source.color, &mut next, &mut stats);
                }
                rays.push(traced);
            }
            std::mem::swap(&mut frontier, &mut next);
        }

        stats.iterations = bounce;
        stats.truncated = frontier.len();
        rays.extend(frontier.into_iter().map(|mut traced| {
            traced.truncated = true;
            traced
        }));
        stats.elapsed = started.elapsed();

        log::debug!(
            "Traced {} rays in {} iterations ({} hits, {} reflections, {} refractions, {} total internal reflections, {} truncated) in {:?}",
            rays.len(),
            stats.iterations,
            stats.hits,
            stats.reflections,
            stats.refractions,
            stats.total_internal_reflections,
            stats.truncated,
            stats.elapsed
        );

        Trace { rays, stats }
    }

    fn split(
        &self,
        parent: &TracedRay,
        hit: &RayHit,
        base_color: Color,
        next: &mut Vec<TracedRay>,
        stats: &mut TraceStats,
    ) {
        let direction = parent.ray.direction();
        let normal = if direction.dot(hit.normal) > 0.0 {
            -hit.normal
        } else {
            hit.normal
        };
        let reach = 0.5 * self.desc.model_size;
        let generation = parent.generation + 1;
        let tint = |factor: f32| {
            hit.color
                .blend(base_color, factor)
                .with_alpha(self.desc.child_alpha)
        };

        let reflected = parent.ray.reflect_from(hit.point, normal);
        next.push(TracedRay::spawn(
            reflected,
            tint(self.desc.reflection_blend),
            reach,
            generation,
        ));
        stats.reflections += 1;

        match parent
            .ray
            .refract_from(hit.point, normal, self.desc.refractive_index)
        {
            Some(refracted) => {
                next.push(TracedRay::spawn(
                    refracted,
                    tint(self.desc.refraction_blend),
                    reach,
                    generation,
                ));
                stats.refractions += 1;
            }
            None => stats.total_internal_reflections += 1,
        }

        log::trace!(
            "{} hit at {} (t = {}), generation {}",
            hit.object,
            hit.point,
            hit.distance,
            generation
        );
    }
}
