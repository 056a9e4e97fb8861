//! Local/world frame conversion shared by every shape and scene object.
//!
//! A [`Frame`] places a local coordinate system at `center`, rotated by `angle`
//! radians. Points go through translation and rotation, directions through the
//! rotation only. Shapes and scene objects apply a frame exactly once at the
//! boundary of each public query.

use super::{Ray, Segment};
use crate::math::{Vec2, Vec2Ext, direction_from_angle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub center: Vec2,
    pub angle: f32,
}

impl Frame {
    pub const IDENTITY: Self = Self {
        center: Vec2::ZERO,
        angle: 0.0,
    };

    pub fn new(center: Vec2, angle: f32) -> Self {
        Self { center, angle }
    }

    /// Builds a frame from an orientation vector instead of an angle.
    pub fn from_direction(center: Vec2, direction: Vec2) -> Self {
        Self {
            center,
            angle: direction.heading(),
        }
    }

    pub fn direction(&self) -> Vec2 {
        direction_from_angle(self.angle)
    }

    /// Composes `inner` (expressed in this frame) into a single frame.
    pub fn then(&self, inner: &Frame) -> Frame {
        Frame {
            center: self.from_local(inner.center),
            angle: self.angle + inner.angle,
        }
    }

    pub fn from_local(&self, point: Vec2) -> Vec2 {
        self.center + point.rotated(self.angle)
    }

    pub fn to_local(&self, point: Vec2) -> Vec2 {
        (point - self.center).rotated(-self.angle)
    }

    pub fn from_local_direction(&self, direction: Vec2) -> Vec2 {
        direction.rotated(self.angle)
    }

    pub fn to_local_direction(&self, direction: Vec2) -> Vec2 {
        direction.rotated(-self.angle)
    }

    pub fn from_local_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.from_local(ray.origin()),
            self.from_local_direction(ray.direction()),
        )
    }

    pub fn to_local_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.to_local(ray.origin()),
            self.to_local_direction(ray.direction()),
        )
    }

    pub fn from_local_segment(&self, segment: &Segment) -> Segment {
        Segment::new(self.from_local(segment.a), self.from_local(segment.b))
    }

    pub fn to_local_segment(&self, segment: &Segment) -> Segment {
        Segment::new(self.to_local(segment.a), self.to_local(segment.b))
    }

    pub fn from_local_points(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.from_local(p)).collect()
    }

    pub fn to_local_points(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.to_local(p)).collect()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}
