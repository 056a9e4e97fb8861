//! Oriented rectangles.

use super::shape::{BOUNDARY_TOLERANCE, select_root};
use super::{Intersection, Polygon, Ray, Shape};
use crate::math::{Vec2, direction_from_angle};

#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub center: Vec2,
    pub direction: Vec2,
    pub width: f32,
    pub height: f32,
}

impl BoxShape {
    /// Axis-aligned box of the given size centered on the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            direction: Vec2::X,
            width,
            height,
        }
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.direction = direction_from_angle(angle);
        self
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(0.5 * self.width, 0.5 * self.height)
    }

    /// The same box as a four-node polygon, counter-clockwise from the lower-left corner.
    pub fn to_polygon(&self) -> Polygon {
        let h = self.half_extents();
        Polygon::new(vec![
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ])
        .with_center(self.center)
        .with_direction(self.direction)
    }
}

impl Shape for BoxShape {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn direction(&self) -> Vec2 {
        self.direction
    }

    fn area(&self) -> f32 {
        self.width * self.height
    }

    fn centroid(&self) -> Vec2 {
        self.center
    }

    fn start_point(&self) -> Vec2 {
        self.frame().from_local(-self.half_extents())
    }

    fn contains(&self, point: Vec2) -> bool {
        let local = self.frame().to_local(point);
        let h = self.half_extents();
        local.x.abs() <= h.x + BOUNDARY_TOLERANCE && local.y.abs() <= h.y + BOUNDARY_TOLERANCE
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        self.to_polygon().closest_point_to(point)
    }

    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        let frame = self.frame();
        let local = frame.to_local_ray(ray);
        let h = self.half_extents();

        // Each face as (ray parameter, outward normal).
        let faces = [
            (local.distance_to_line(Vec2::X, -h.x), -Vec2::X),
            (local.distance_to_line(Vec2::X, h.x), Vec2::X),
            (local.distance_to_line(Vec2::Y, -h.y), -Vec2::Y),
            (local.distance_to_line(Vec2::Y, h.y), Vec2::Y),
        ];
        let (x_min, x_max) = (faces[0].0.min(faces[1].0), faces[0].0.max(faces[1].0));
        let (y_min, y_max) = (faces[2].0.min(faces[3].0), faces[2].0.max(faces[3].0));
        let t_near = x_min.max(y_min);
        let t_far = x_max.min(y_max);
        if t_far < t_near {
            return None;
        }

        let t = select_root(t_near, t_far, nearest)?;
        let (_, normal) = faces.iter().find(|(face_t, _)| *face_t == t)?;
        Some(Intersection::new(
            frame.from_local(local.point_along(t)),
            frame.from_local_direction(*normal),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2Ext;

    #[test]
    fn test_hit_from_below() {
        let shape = BoxShape::new(2.0, 1.0);
        let ray = Ray::new(Vec2::new(0.0, -5.0), Vec2::Y);
        let hit = shape.hit(&ray, true).unwrap();
        assert!(hit.point.abs_diff_eq(Vec2::new(0.0, -0.5), 1e-6));
        assert!(hit.normal.abs_diff_eq(Vec2::new(0.0, -1.0), 1e-6));

        let exit = shape.hit(&ray, false).unwrap();
        assert!(exit.point.abs_diff_eq(Vec2::new(0.0, 0.5), 1e-6));
        assert!(exit.normal.abs_diff_eq(Vec2::Y, 1e-6));
    }

    #[test]
    fn test_hit_rotated() {
        let shape = BoxShape::new(2.0, 1.0)
            .with_center(Vec2::new(3.0, 1.0))
            .with_angle(std::f32::consts::FRAC_PI_2);
        let ray = Ray::new(Vec2::new(0.0, 1.0), Vec2::X);
        let hit = shape.hit(&ray, true).unwrap();
        assert!(hit.point.abs_diff_eq(Vec2::new(2.5, 1.0), 1e-5));
        assert!(hit.normal.abs_diff_eq(-Vec2::X, 1e-5));
    }

    #[test]
    fn test_miss() {
        let shape = BoxShape::new(2.0, 1.0);
        let ray = Ray::new(Vec2::new(-5.0, 2.0), Vec2::X);
        assert!(shape.hit(&ray, true).is_none());
        let diagonal = Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(shape.hit(&diagonal, true).is_none());
    }

    #[test]
    fn test_reflection_law_on_face() {
        let shape = BoxShape::new(2.0, 2.0);
        let ray = Ray::new(Vec2::new(-1.5, 3.0), Vec2::new(1.0, -2.0));
        let hit = shape.hit(&ray, true).unwrap();
        let reflected = ray.reflect_from(hit.point, hit.normal);
        let incidence = (-ray.direction()).dot(hit.normal).acos();
        let reflection = reflected.direction().dot(hit.normal).acos();
        assert!((incidence - reflection).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec2::Y, 1e-6));
        assert_eq!(
            hit.normal.cross(ray.direction()).signum(),
            hit.normal.cross(reflected.direction()).signum()
        );
    }

    #[test]
    fn test_contains_and_closest() {
        let shape = BoxShape::new(2.0, 1.0);
        assert!(shape.contains(Vec2::new(0.9, 0.4)));
        assert!(!shape.contains(Vec2::new(1.1, 0.0)));

        let inside = Vec2::new(0.5, 0.1);
        let closest = shape.closest_point_to(inside);
        assert!(closest.abs_diff_eq(Vec2::new(0.5, 0.5), 1e-6));
        assert!(shape.contains(closest));

        let outside = Vec2::new(3.0, 2.0);
        assert!(shape.closest_point_to(outside).abs_diff_eq(Vec2::new(1.0, 0.5), 1e-6));
    }

    #[test]
    fn test_measures() {
        let shape = BoxShape::new(2.0, 1.0).with_center(Vec2::new(1.0, 1.0));
        assert_eq!(shape.area(), 2.0);
        assert_eq!(shape.centroid(), Vec2::new(1.0, 1.0));
        assert!(shape.start_point().abs_diff_eq(Vec2::new(0.0, 0.5), 1e-6));
    }
}
