//! Circles.

use std::f32::consts::{PI, TAU};

use super::shape::{BOUNDARY_TOLERANCE, select_root};
use super::{Intersection, Ray, Shape};
use crate::math::{Vec2, direction_from_angle};

/// Circle around `center`. Orientation is fixed to +X.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn outline(&self, resolution: usize) -> Vec<Vec2> {
        (0..resolution)
            .map(|i| self.center + self.radius * direction_from_angle(TAU * i as f32 / resolution as f32))
            .collect()
    }
}

impl Shape for Circle {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn direction(&self) -> Vec2 {
        Vec2::X
    }

    fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    fn centroid(&self) -> Vec2 {
        self.center
    }

    fn start_point(&self) -> Vec2 {
        self.center + Vec2::new(self.radius, 0.0)
    }

    fn contains(&self, point: Vec2) -> bool {
        let reach = self.radius + BOUNDARY_TOLERANCE;
        point.distance_squared(self.center) <= reach * reach
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        self.center + self.radius * (point - self.center).normalize_or_zero()
    }

    /// The returned normal always points away from the center.
    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        let offset = ray.origin() - self.center;
        let b = ray.direction().dot(offset);
        let a_sq = self.radius * self.radius - offset.length_squared();
        let discriminant = a_sq + b * b;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t = select_root(-b - root, -b + root, nearest)?;
        let point = ray.point_along(t);
        Some(Intersection::new(
            point,
            (point - self.center).normalize_or_zero(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_near_and_far() {
        let circle = Circle::new(Vec2::ZERO, 0.75);
        let ray = Ray::new(Vec2::new(-5.0, 0.0), Vec2::X);

        let near = circle.hit(&ray, true).unwrap();
        assert!(near.point.abs_diff_eq(Vec2::new(-0.75, 0.0), 1e-6));
        assert!(near.normal.abs_diff_eq(Vec2::new(-1.0, 0.0), 1e-6));

        let far = circle.hit(&ray, false).unwrap();
        assert!(far.point.abs_diff_eq(Vec2::new(0.75, 0.0), 1e-6));
        assert!(far.normal.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_miss_and_behind() {
        let circle = Circle::new(Vec2::new(2.0, 0.0), 0.5);
        assert!(circle.hit(&Ray::new(Vec2::ZERO, Vec2::Y), true).is_none());
        assert!(circle.hit(&Ray::new(Vec2::new(4.0, 0.0), Vec2::X), true).is_none());
    }

    #[test]
    fn test_closest_point() {
        let circle = Circle::new(Vec2::new(1.0, 1.0), 2.0);
        let closest = circle.closest_point_to(Vec2::new(5.0, 1.0));
        assert!(closest.abs_diff_eq(Vec2::new(3.0, 1.0), 1e-6));
        let from_inside = circle.closest_point_to(Vec2::new(1.0, 1.5));
        assert!(from_inside.abs_diff_eq(Vec2::new(1.0, 3.0), 1e-6));
        assert!(circle.contains(from_inside));
    }

    #[test]
    fn test_measures() {
        let circle = Circle::new(Vec2::new(1.0, 0.0), 0.5);
        assert!((circle.area() - PI * 0.25).abs() < 1e-6);
        assert_eq!(circle.start_point(), Vec2::new(1.5, 0.0));
        assert_eq!(circle.angle(), 0.0);
        assert!(circle.contains(Vec2::new(1.2, 0.2)));
        assert!(!circle.contains(Vec2::new(1.6, 0.0)));
    }
}
