//! Finite line segments.

use super::{Intersection, Ray};
use crate::math::{Vec2, Vec2Ext, sign};

/// Segment from `a` to `b`.
///
/// Direction, normal, offset and length are derived on demand. A segment with
/// `a == b` is degenerate: its direction and normal are the zero vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    pub fn direction(&self) -> Vec2 {
        (self.b - self.a).normalize_or_zero()
    }

    /// Left-hand unit normal of `a -> b`.
    pub fn normal(&self) -> Vec2 {
        (self.b - self.a).orthogonal().normalize_or_zero()
    }

    /// Offset of the supporting line, so that `normal . p = offset` on it.
    pub fn offset(&self) -> f32 {
        self.normal().dot(self.a)
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    pub fn length_squared(&self) -> f32 {
        self.a.distance_squared(self.b)
    }

    pub fn midpoint(&self) -> Vec2 {
        0.5 * (self.a + self.b)
    }

    /// Crossing of `ray` with the segment.
    ///
    /// The normal faces the side the ray comes from. The ray parameter is not
    /// checked, so segments behind the origin still report a crossing.
    pub fn hit(&self, ray: &Ray) -> Option<Intersection> {
        let dir = ray.direction();
        let d = dir.cross(self.b - self.a);
        if d == 0.0 || !d.is_finite() {
            return None;
        }
        let w_b = dir.cross(ray.origin() - self.a) / d;
        let w_a = dir.cross(self.b - ray.origin()) / d;
        if !(0.0..=1.0).contains(&w_a) || !(0.0..=1.0).contains(&w_b) {
            return None;
        }
        Some(Intersection {
            point: w_a * self.a + w_b * self.b,
            normal: sign(d) * self.normal(),
        })
    }

    /// Edge weights `(w_a, w_b)` of the projection of `point` onto the line.
    pub fn coords_of_point(&self, point: Vec2) -> (f32, f32) {
        let edge = self.b - self.a;
        let length_sq = edge.length_squared();
        if length_sq == 0.0 {
            return (1.0, 0.0);
        }
        let w_b = (point - self.a).dot(edge) / length_sq;
        (1.0 - w_b, w_b)
    }

    pub fn point_from_coords(&self, w_a: f32, w_b: f32) -> Vec2 {
        w_a * self.a + w_b * self.b
    }

    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        let (_, w_b) = self.coords_of_point(point);
        let w_b = w_b.clamp(0.0, 1.0);
        self.point_from_coords(1.0 - w_b, w_b)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point_to(point))
    }

    /// Whether `point` lies on the segment within `tolerance`.
    pub fn contains(&self, point: Vec2, tolerance: f32) -> bool {
        let length = self.length();
        if length == 0.0 {
            return point.distance(self.a) <= tolerance;
        }
        let doubled_area = self.a.cross(self.b) + self.b.cross(point) + point.cross(self.a);
        if doubled_area.abs() / length > tolerance {
            return false;
        }
        let (w_a, w_b) = self.coords_of_point(point);
        (0.0..=1.0).contains(&w_a) && (0.0..=1.0).contains(&w_b)
    }

    pub fn flip(&self) -> Segment {
        Segment::new(self.b, self.a)
    }

    pub fn translate(&self, offset: Vec2) -> Segment {
        Segment::new(self.a + offset, self.b + offset)
    }

    /// Rotation about the origin.
    pub fn rotate(&self, angle: f32) -> Segment {
        Segment::new(self.a.rotated(angle), self.b.rotated(angle))
    }

    pub fn rotate_about(&self, angle: f32, pivot: Vec2) -> Segment {
        Segment::new(
            pivot + (self.a - pivot).rotated(angle),
            pivot + (self.b - pivot).rotated(angle),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Segment {
        Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0))
    }

    #[test]
    fn test_derived_quantities() {
        let segment = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 1.0));
        assert_eq!(segment.direction(), Vec2::X);
        assert_eq!(segment.normal(), Vec2::Y);
        assert_eq!(segment.offset(), 1.0);
        assert_eq!(segment.length(), 2.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let segment = Segment::new(Vec2::ONE, Vec2::ONE);
        assert!(segment.is_degenerate());
        assert_eq!(segment.normal(), Vec2::ZERO);
        assert!(segment.hit(&Ray::new(Vec2::ZERO, Vec2::ONE)).is_none());
        assert_eq!(segment.closest_point_to(Vec2::new(5.0, 5.0)), Vec2::ONE);
    }

    #[test]
    fn test_hit_normal_faces_ray() {
        let segment = horizontal();
        let from_above = Ray::new(Vec2::new(0.5, 2.0), -Vec2::Y);
        let hit = segment.hit(&from_above).unwrap();
        assert!(hit.point.abs_diff_eq(Vec2::new(0.5, 0.0), 1e-6));
        assert!(hit.normal.abs_diff_eq(Vec2::Y, 1e-6));

        let from_below = Ray::new(Vec2::new(0.5, -2.0), Vec2::Y);
        let hit = segment.hit(&from_below).unwrap();
        assert!(hit.normal.abs_diff_eq(-Vec2::Y, 1e-6));
    }

    #[test]
    fn test_hit_outside_range() {
        let segment = horizontal();
        let ray = Ray::new(Vec2::new(1.5, 2.0), -Vec2::Y);
        assert!(segment.hit(&ray).is_none());
        let parallel = Ray::new(Vec2::new(-3.0, 0.0), Vec2::X);
        assert!(segment.hit(&parallel).is_none());
    }

    #[test]
    fn test_closest_point_clamps() {
        let segment = horizontal();
        assert_eq!(segment.closest_point_to(Vec2::new(0.25, 3.0)), Vec2::new(0.25, 0.0));
        assert_eq!(segment.closest_point_to(Vec2::new(5.0, 3.0)), Vec2::new(1.0, 0.0));
        assert_eq!(segment.closest_point_to(Vec2::new(-5.0, -3.0)), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let segment = horizontal();
        assert!(segment.contains(Vec2::new(0.3, 0.0), 1e-6));
        assert!(segment.contains(Vec2::new(0.3, 1e-7), 1e-6));
        assert!(!segment.contains(Vec2::new(0.3, 0.1), 1e-6));
        assert!(!segment.contains(Vec2::new(1.3, 0.0), 1e-6));
    }

    #[test]
    fn test_rotate_about() {
        let segment = horizontal().rotate_about(std::f32::consts::FRAC_PI_2, Vec2::new(1.0, 0.0));
        assert!(segment.a.abs_diff_eq(Vec2::new(1.0, -2.0), 1e-6));
        assert!(segment.b.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-6));
    }
}
