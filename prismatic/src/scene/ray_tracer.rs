//! Ray casting trait consumed by the bounce simulator.

use crate::color::Color;
use crate::geometry::Ray;
use crate::math::Vec2;
use crate::world::ObjectId;

/// First surface a cast ray reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of `point`; the ray direction is unit length, so also the travelled length.
    pub distance: f32,
    pub object: ObjectId,
    pub point: Vec2,
    /// Unit surface normal. Which side it faces is up to the shape; the
    /// simulator turns it against the incoming ray.
    pub normal: Vec2,
    /// Surface color, blended into the spawned rays.
    pub color: Color,
}

impl RayHit {
    pub fn new(distance: f32, object: ObjectId, point: Vec2, normal: Vec2, color: Color) -> Self {
        Self {
            distance,
            object,
            point,
            normal,
            color,
        }
    }
}

/// Anything that can report the first object along a ray.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Within one bounce iteration every ray
/// is cast independently against the same read-only scene, so callers may fan
/// casts out across threads.
pub trait RayTracer: Send + Sync {
    /// Finds the closest hit along `ray` with
    /// `min_distance <= distance < max_distance`.
    ///
    /// `min_distance` keeps rays spawned on a boundary from hitting that same
    /// spot again. Returns `None` when nothing lies in range.
    fn cast_ray(&self, ray: &Ray, min_distance: f32, max_distance: f32) -> Option<RayHit>;
}
