//! Scene objects and the ray-casting seam used by the bounce simulator.
//!
//! # Overview
//!
//! 1. **SceneObject** - a colored entity built from one or several shape primitives,
//!    placed in the world by a position and an angle
//! 2. **RayTracer** - trait answering "what does this ray hit first?"
//! 3. **RayHit** - the answer, including the surface color the simulator mixes into
//!    spawned rays
//!
//! [`World`](crate::world::World) implements `RayTracer` over its objects. Other
//! implementations (an acceleration structure, a test double) can be handed to
//! [`BounceSimulator::run`](crate::simulator::BounceSimulator::run) directly.

pub mod object;
pub mod ray_tracer;

pub use object::SceneObject;
pub use ray_tracer::{RayHit, RayTracer};
