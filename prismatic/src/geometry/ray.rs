//! Half-infinite rays: parametrization, reflection, refraction and line tests.

use super::Segment;
use crate::error::{PrismaticError, Result};
use crate::math::{Vec2, Vec2Ext};

/// A ray with an origin and a unit direction.
///
/// The direction is normalized on construction. A zero direction stays zero
/// when built through [`Ray::new`]; use [`Ray::try_new`] to reject it instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec2,
    direction: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Like [`Ray::new`], but fails on a zero or non-finite direction.
    pub fn try_new(origin: Vec2, direction: Vec2) -> Result<Self> {
        let ray = Self::new(origin, direction);
        if ray.is_degenerate() || !origin.is_finite() {
            return Err(PrismaticError::DegenerateGeometry(format!(
                "ray from {origin} has no usable direction ({direction})"
            )));
        }
        Ok(ray)
    }

    /// Ray starting at `origin` and heading towards `target`.
    pub fn towards(origin: Vec2, target: Vec2) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::ZERO || !self.direction.is_finite()
    }

    pub fn point_along(&self, t: f32) -> Vec2 {
        self.origin + t * self.direction
    }

    /// Signed projection of `point` onto the ray. Negative behind the origin.
    pub fn distance_along(&self, point: Vec2) -> f32 {
        self.direction.dot(point - self.origin)
    }

    /// Ray parameter where it crosses the line `normal . p = offset`.
    ///
    /// Non-finite when the ray runs parallel to the line.
    pub fn distance_to_line(&self, normal: Vec2, offset: f32) -> f32 {
        (offset - normal.dot(self.origin)) / normal.dot(self.direction)
    }

    pub fn reflect_from(&self, point: Vec2, normal: Vec2) -> Ray {
        Ray::new(point, self.direction.reflect_about(normal))
    }

    /// Refracts through a surface with the given relative index of refraction.
    ///
    /// `normal` must face the incoming ray. Returns `None` on total internal
    /// reflection.
    pub fn refract_from(&self, point: Vec2, normal: Vec2, relative_index: f32) -> Option<Ray> {
        let ratio = 1.0 / relative_index;
        let cos_incident = self.direction.dot(normal);
        let tangential = self.direction - cos_incident * normal;
        let d = 1.0 - ratio * ratio * (1.0 - cos_incident * cos_incident);
        if d < 0.0 || !d.is_finite() {
            return None;
        }
        Some(Ray::new(point, -d.sqrt() * normal + ratio * tangential))
    }

    /// Distance along `self` to where it crosses `other`.
    ///
    /// `None` when the rays are parallel or the crossing lies behind `self`.
    pub fn intersect_ray(&self, other: &Ray) -> Option<f32> {
        let denominator = other.direction.cross(self.direction);
        if denominator.abs() <= f32::EPSILON {
            return None;
        }
        let t = other.direction.cross(other.origin - self.origin) / denominator;
        (t.is_finite() && t >= 0.0).then_some(t)
    }

    /// Signed distance along `self` to where it crosses `segment`.
    ///
    /// `None` when parallel or when the crossing falls outside the segment.
    pub fn intersect_segment(&self, segment: &Segment) -> Option<f32> {
        segment
            .hit(self)
            .map(|intersection| self.distance_along(intersection.point))
    }

    pub fn flip(&self) -> Ray {
        Ray {
            origin: self.origin,
            direction: -self.direction,
        }
    }

    /// Copy of the ray shifted sideways by `offset` along its left-hand normal.
    pub fn parallel(&self, offset: f32) -> Ray {
        Ray {
            origin: self.origin + offset * self.direction.orthogonal(),
            direction: self.direction,
        }
    }

    /// Same origin, direction rotated counter-clockwise by `angle`.
    pub fn rotate(&self, angle: f32) -> Ray {
        Ray::new(self.origin, self.direction.rotated(angle))
    }

    /// Whether `point` lies on the ray within `tolerance`.
    pub fn contains(&self, point: Vec2, tolerance: f32) -> bool {
        let offset = point - self.origin;
        offset.dot(self.direction) >= -tolerance && offset.cross(self.direction).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let ray = Ray::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!(ray.direction().abs_diff_eq(Vec2::new(0.6, 0.8), 1e-6));
    }

    #[test]
    fn test_zero_direction() {
        let ray = Ray::new(Vec2::ONE, Vec2::ZERO);
        assert!(ray.is_degenerate());
        assert_eq!(ray.direction(), Vec2::ZERO);
        assert!(matches!(
            Ray::try_new(Vec2::ONE, Vec2::ZERO),
            Err(PrismaticError::DegenerateGeometry(_))
        ));
        assert!(Ray::try_new(Vec2::ONE, Vec2::X).is_ok());
    }

    #[test]
    fn test_point_and_distance_along() {
        let ray = Ray::new(Vec2::new(1.0, 1.0), Vec2::X);
        assert_eq!(ray.point_along(2.0), Vec2::new(3.0, 1.0));
        assert_eq!(ray.distance_along(Vec2::new(-1.0, 5.0)), -2.0);
    }

    #[test]
    fn test_distance_to_line() {
        let ray = Ray::new(Vec2::new(0.0, -5.0), Vec2::Y);
        assert_eq!(ray.distance_to_line(Vec2::Y, -0.5), 4.5);
        assert!(!ray.distance_to_line(Vec2::X, 1.0).is_finite());
    }

    #[test]
    fn test_reflection_law() {
        let ray = Ray::new(Vec2::new(-1.0, 1.0), Vec2::new(1.0, -1.0));
        let reflected = ray.reflect_from(Vec2::ZERO, Vec2::Y);
        let incidence = (-ray.direction()).dot(Vec2::Y);
        let reflection = reflected.direction().dot(Vec2::Y);
        assert!((incidence - reflection).abs() < 1e-6);
        assert!(reflected.direction().abs_diff_eq(Vec2::new(1.0, 1.0).normalize(), 1e-6));
    }

    #[test]
    fn test_refraction_snell() {
        let incoming = Vec2::new(30f32.to_radians().sin(), -30f32.to_radians().cos());
        let ray = Ray::new(Vec2::new(0.0, 1.0), incoming);
        let refracted = ray.refract_from(Vec2::ZERO, Vec2::Y, 1.5).unwrap();
        let sin_out = refracted.direction().x;
        assert!((sin_out - 0.5 / 1.5).abs() < 1e-5);
        assert!(refracted.direction().y < 0.0);
    }

    #[test]
    fn test_refraction_normal_incidence() {
        let ray = Ray::new(Vec2::new(0.0, 1.0), -Vec2::Y);
        let refracted = ray.refract_from(Vec2::ZERO, Vec2::Y, 1.3).unwrap();
        assert!(refracted.direction().abs_diff_eq(-Vec2::Y, 1e-6));
    }

    #[test]
    fn test_total_internal_reflection() {
        let incoming = Vec2::new(60f32.to_radians().sin(), -60f32.to_radians().cos());
        let ray = Ray::new(Vec2::new(0.0, 1.0), incoming);
        assert!(ray.refract_from(Vec2::ZERO, Vec2::Y, 1.0 / 1.5).is_none());
    }

    #[test]
    fn test_intersect_ray() {
        let ray = Ray::new(Vec2::ZERO, Vec2::X);
        let other = Ray::new(Vec2::new(2.0, -1.0), Vec2::Y);
        let t = ray.intersect_ray(&other).unwrap();
        assert!((t - 2.0).abs() < 1e-6);

        let behind = Ray::new(Vec2::new(-2.0, -1.0), Vec2::Y);
        assert!(ray.intersect_ray(&behind).is_none());

        let parallel = Ray::new(Vec2::new(0.0, 1.0), Vec2::X);
        assert!(ray.intersect_ray(&parallel).is_none());
    }

    #[test]
    fn test_intersect_segment() {
        let ray = Ray::new(Vec2::ZERO, Vec2::X);
        let crossing = Segment::new(Vec2::new(3.0, -1.0), Vec2::new(3.0, 1.0));
        let t = ray.intersect_segment(&crossing).unwrap();
        assert!((t - 3.0).abs() < 1e-6);

        let missed = Segment::new(Vec2::new(3.0, 1.0), Vec2::new(3.0, 2.0));
        assert!(ray.intersect_segment(&missed).is_none());

        let parallel = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(4.0, 1.0));
        assert!(ray.intersect_segment(&parallel).is_none());
    }

    #[test]
    fn test_parallel_and_rotate() {
        let ray = Ray::new(Vec2::ZERO, Vec2::X);
        assert_eq!(ray.parallel(2.0).origin(), Vec2::new(0.0, 2.0));
        let turned = ray.rotate(std::f32::consts::PI);
        assert!(turned.direction().abs_diff_eq(ray.flip().direction(), 1e-6));
        assert!(ray.contains(Vec2::new(5.0, 0.0), 1e-6));
        assert!(!ray.contains(Vec2::new(-5.0, 0.0), 1e-6));
    }
}
