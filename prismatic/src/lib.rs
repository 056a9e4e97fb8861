//! # Prismatic
//!
//! A 2D optical ray tracing kernel. Analytic shapes answer containment,
//! closest-point and ray intersection queries; a bounce simulator walks a light
//! beam through a scene of such shapes, reflecting and refracting at every
//! boundary it meets.
//!
//! ## Quick Start
//!
//! ```
//! use prismatic::*;
//!
//! let mut world = World::new();
//! world.add(
//!     SceneObject::new(Circle::new(Vec2::ZERO, 0.75), Color::YELLOW)
//!         .with_position(Vec2::new(2.0, 0.0)),
//! )?;
//!
//! let simulator = BounceSimulator::new(SimulationDesc::default())?;
//! let source = LightSource::parallel(
//!     Ray::new(Vec2::new(-4.0, 0.0), Vec2::X),
//!     12,
//!     0.4,
//!     Color::WHEAT,
//! );
//! let trace = simulator.run(&world, &source);
//!
//! for traced in &trace.rays {
//!     println!("{} -> {}", traced.ray.origin(), traced.end_point());
//! }
//! # Ok::<(), PrismaticError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`Shape`]** / **[`Primitive`]**: box, circle, ellipse, polygon and triangle
//!   primitives sharing one query interface
//! - **[`Frame`]**: local/world conversion every shape applies at its boundary
//! - **[`SceneObject`]**: a colored entity built from one or more primitives
//! - **[`World`]**: the object list, with [`ObjectId`] selection tokens and a
//!   [`RayTracer`] implementation
//! - **[`BounceSimulator`]**: turns a [`LightSource`] into a bounded tree of
//!   reflected and refracted rays
//!
//! ## Conventions
//!
//! - Angles are radians, counter-clockwise
//! - Degenerate queries (parallel rays, empty shapes, total internal
//!   reflection) return `None` or a miss, never an error
//! - Errors are reserved for construction: invalid shapes, invalid
//!   configuration, stale object tokens

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod simulator;
pub mod world;

pub use color::{Color, Hsl};
pub use config::{LightSource, SimulationDesc};
pub use error::{PrismaticError, Result};
pub use geometry::{
    Beam, BoxShape, Circle, Ellipse, Frame, Intersection, Polygon, Primitive, Ray, Segment, Shape,
    Triangle,
};
pub use math::Vec2;
pub use scene::{RayHit, RayTracer, SceneObject};
pub use simulator::{BounceSimulator, Trace, TraceStats, TracedRay};
pub use world::{ObjectId, World};
