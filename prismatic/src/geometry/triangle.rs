//! Triangles.

use super::shape::BOUNDARY_TOLERANCE;
use super::{Intersection, Polygon, Ray, Segment, Shape};
use crate::math::{Vec2, Vec2Ext, direction_from_angle, sign};

/// Triangle over three local nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub center: Vec2,
    pub direction: Vec2,
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            center: Vec2::ZERO,
            direction: Vec2::X,
            a,
            b,
            c,
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

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = direction.normalize_or_zero();
        self
    }

    /// Twice the signed area of the local nodes.
    fn doubled_area(&self) -> f32 {
        self.a.cross(self.b) + self.b.cross(self.c) + self.c.cross(self.a)
    }

    /// +1 for counter-clockwise nodes, -1 for clockwise, 0 when collinear.
    pub fn winding(&self) -> f32 {
        sign(self.doubled_area())
    }

    /// Nodes in the parent frame.
    pub fn nodes(&self) -> [Vec2; 3] {
        let frame = self.frame();
        [frame.from_local(self.a), frame.from_local(self.b), frame.from_local(self.c)]
    }

    pub fn segments(&self) -> [Segment; 3] {
        let [a, b, c] = self.nodes();
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(vec![self.a, self.b, self.c])
            .with_center(self.center)
            .with_direction(self.direction)
    }

    /// Barycentric weights `[w_a, w_b, w_c]` of a parent-frame point.
    pub fn coords(&self, point: Vec2) -> [f32; 3] {
        let p = self.frame().to_local(point);
        let (a, b, c) = (self.a, self.b, self.c);
        let d = self.doubled_area();
        [
            (p.cross(b) + b.cross(c) + c.cross(p)) / d,
            (a.cross(p) + p.cross(c) + c.cross(a)) / d,
            (a.cross(b) + b.cross(p) + p.cross(a)) / d,
        ]
    }

    pub fn point_from_coords(&self, weights: [f32; 3]) -> Vec2 {
        self.frame()
            .from_local(weights[0] * self.a + weights[1] * self.b + weights[2] * self.c)
    }
}

impl Shape for Triangle {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn direction(&self) -> Vec2 {
        self.direction
    }

    fn area(&self) -> f32 {
        0.5 * self.doubled_area().abs()
    }

    fn centroid(&self) -> Vec2 {
        self.frame().from_local((self.a + self.b + self.c) / 3.0)
    }

    fn start_point(&self) -> Vec2 {
        self.frame().from_local(self.a)
    }

    fn contains(&self, point: Vec2) -> bool {
        if self.doubled_area() == 0.0 {
            return false;
        }
        self.coords(point)
            .iter()
            .all(|w| (-BOUNDARY_TOLERANCE..=1.0 + BOUNDARY_TOLERANCE).contains(w))
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        self.to_polygon().closest_point_to(point)
    }

    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        self.to_polygon().hit(ray, nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Triangle {
        Triangle::new(Vec2::new(-1.0, -0.5), Vec2::new(1.0, -0.5), Vec2::new(0.0, 1.0))
    }

    #[test]
    fn test_coords_at_nodes_and_centroid() {
        let triangle = sample();
        assert_eq!(triangle.coords(Vec2::new(-1.0, -0.5)), [1.0, 0.0, 0.0]);
        let centroid = triangle.coords(triangle.centroid());
        for w in centroid {
            assert!((w - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_coords_match_polygon() {
        let triangle = sample().with_center(Vec2::new(0.0, 2.0)).with_angle(0.8);
        let polygon = triangle.to_polygon();
        let point = triangle.centroid() + Vec2::new(0.2, 0.1);
        let expected = triangle.coords(point);
        let weights = polygon.coords(point);
        for (w, e) in weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-5);
        }
        assert!(triangle.point_from_coords(expected).abs_diff_eq(point, 1e-5));
    }

    #[test]
    fn test_contains() {
        let triangle = sample().with_center(Vec2::new(0.0, 2.0));
        assert!(triangle.contains(Vec2::new(0.0, 2.0)));
        assert!(!triangle.contains(Vec2::new(0.9, 2.9)));
        assert!(!triangle.contains(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_hit_delegates_to_edges() {
        let triangle = sample();
        let ray = Ray::new(Vec2::new(0.0, -5.0), Vec2::Y);
        let near = triangle.hit(&ray, true).unwrap();
        assert!(near.point.abs_diff_eq(Vec2::new(0.0, -0.5), 1e-6));
        assert!(near.normal.abs_diff_eq(-Vec2::Y, 1e-6));
    }

    #[test]
    fn test_measures_and_winding() {
        let triangle = sample();
        assert!((triangle.area() - 1.5).abs() < 1e-6);
        assert_eq!(triangle.winding(), 1.0);
        let flipped = Triangle::new(triangle.a, triangle.c, triangle.b);
        assert_eq!(flipped.winding(), -1.0);
        assert!(flipped.contains(Vec2::ZERO));
        assert_eq!(triangle.start_point(), Vec2::new(-1.0, -0.5));
    }
}
