//! Closed polygons with generalized barycentric containment.

use super::shape::{BOUNDARY_TOLERANCE, face_against, select_root};
use super::{Intersection, Ray, Segment, Shape, Triangle};
use crate::math::{Vec2, Vec2Ext, direction_from_angle, sign};

/// Closed polygon over an ordered list of local nodes.
///
/// Edges wrap from the last node back to the first. Containment uses
/// Wachspress coordinates, which are exact for convex polygons in either
/// winding and an approximation for concave ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub center: Vec2,
    pub direction: Vec2,
    nodes: Vec<Vec2>,
}

impl Polygon {
    pub fn new(nodes: Vec<Vec2>) -> Self {
        Self {
            center: Vec2::ZERO,
            direction: Vec2::X,
            nodes,
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

    pub fn local_nodes(&self) -> &[Vec2] {
        &self.nodes
    }

    /// Nodes in the parent frame.
    pub fn nodes(&self) -> Vec<Vec2> {
        self.frame().from_local_points(&self.nodes)
    }

    /// Closed edge loop in the parent frame.
    pub fn segments(&self) -> Vec<Segment> {
        let nodes = self.nodes();
        if nodes.len() < 2 {
            return Vec::new();
        }
        (0..nodes.len())
            .map(|i| Segment::new(nodes[i], nodes[(i + 1) % nodes.len()]))
            .collect()
    }

    /// Signed shoelace area; positive for counter-clockwise nodes.
    pub fn signed_area(&self) -> f32 {
        let n = self.nodes.len();
        0.5 * (0..n)
            .map(|i| self.nodes[i].cross(self.nodes[(i + 1) % n]))
            .sum::<f32>()
    }

    /// +1 for counter-clockwise, -1 for clockwise, 0 when flat.
    pub fn winding(&self) -> f32 {
        sign(self.signed_area())
    }

    fn local_centroid(&self) -> Vec2 {
        if self.nodes.is_empty() {
            return Vec2::ZERO;
        }
        self.nodes.iter().copied().sum::<Vec2>() / self.nodes.len() as f32
    }

    /// Triangle fan around the vertex centroid, sharing this polygon's placement.
    pub fn triangles(&self) -> Vec<Triangle> {
        let n = self.nodes.len();
        if n < 3 {
            return Vec::new();
        }
        let pivot = self.local_centroid();
        (0..n)
            .map(|i| {
                Triangle::new(pivot, self.nodes[i], self.nodes[(i + 1) % n])
                    .with_center(self.center)
                    .with_direction(self.direction)
            })
            .collect()
    }

    /// Indices of nodes that are not repeated by their successor.
    fn distinct_indices(&self) -> Vec<usize> {
        let n = self.nodes.len();
        (0..n)
            .filter(|&i| self.nodes[i] != self.nodes[(i + 1) % n])
            .collect()
    }

    pub fn distinct_node_count(&self) -> usize {
        self.distinct_indices().len()
    }

    /// Wachspress weights of a parent-frame point, one per node.
    ///
    /// Weights sum to one. All of them lie in `[0, 1]` exactly when the point
    /// is inside a convex polygon. Repeated nodes get weight zero.
    pub fn coords(&self, point: Vec2) -> Vec<f32> {
        self.local_coords(self.frame().to_local(point))
    }

    fn local_coords(&self, point: Vec2) -> Vec<f32> {
        let mut weights = vec![0.0; self.nodes.len()];
        let distinct = self.distinct_indices();
        let m = distinct.len();
        if m < 3 {
            return weights;
        }
        let node = |k: usize| self.nodes[distinct[k % m]];

        // Doubled signed area of the triangle (point, edge k).
        let mut edge_areas = Vec::with_capacity(m);
        for k in 0..m {
            let (start, end) = (node(k), node(k + 1));
            let area = (start - point).cross(end - point);
            let edge = end - start;
            let length = edge.length();
            if area.abs() <= BOUNDARY_TOLERANCE * length {
                let slack = BOUNDARY_TOLERANCE / length;
                let s = (point - start).dot(edge) / (length * length);
                if (-slack..=1.0 + slack).contains(&s) {
                    let s = s.clamp(0.0, 1.0);
                    weights[distinct[k]] = 1.0 - s;
                    weights[distinct[(k + 1) % m]] = s;
                    return weights;
                }
            }
            edge_areas.push(area);
        }

        let mut raw = Vec::with_capacity(m);
        for k in 0..m {
            let previous = node(k + m - 1);
            let current = node(k);
            let next = node(k + 1);
            let corner = (current - previous).cross(next - current);
            raw.push(corner / (edge_areas[(k + m - 1) % m] * edge_areas[k]));
        }
        let total: f32 = raw.iter().sum();
        for (k, w) in raw.into_iter().enumerate() {
            weights[distinct[k]] = w / total;
        }
        weights
    }

    /// Parent-frame point with the given per-node weights.
    pub fn point_from_coords(&self, weights: &[f32]) -> Vec2 {
        let local = self
            .nodes
            .iter()
            .zip(weights)
            .map(|(&node, &w)| w * node)
            .sum::<Vec2>();
        self.frame().from_local(local)
    }

    pub fn scale_nodes(&mut self, factor: f32) {
        self.nodes.iter_mut().for_each(|n| *n *= factor);
    }

    pub fn move_nodes(&mut self, offset: Vec2) {
        self.nodes.iter_mut().for_each(|n| *n += offset);
    }

    /// Rotates the local nodes about the local origin.
    pub fn rotate_nodes(&mut self, angle: f32) {
        self.nodes.iter_mut().for_each(|n| *n = n.rotated(angle));
    }

    pub fn rotate_nodes_about(&mut self, angle: f32, pivot: Vec2) {
        self.nodes
            .iter_mut()
            .for_each(|n| *n = pivot + (*n - pivot).rotated(angle));
    }
}

impl Shape for Polygon {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn direction(&self) -> Vec2 {
        self.direction
    }

    fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    fn centroid(&self) -> Vec2 {
        self.frame().from_local(self.local_centroid())
    }

    fn start_point(&self) -> Vec2 {
        self.frame()
            .from_local(self.nodes.first().copied().unwrap_or(Vec2::ZERO))
    }

    fn contains(&self, point: Vec2) -> bool {
        if self.distinct_node_count() < 3 {
            return false;
        }
        self.coords(point)
            .iter()
            .all(|w| (-BOUNDARY_TOLERANCE..=1.0 + BOUNDARY_TOLERANCE).contains(w))
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        match self.nodes.len() {
            0 => point,
            1 => self.frame().from_local(self.nodes[0]),
            _ => {
                let mut best = point;
                let mut best_distance = f32::INFINITY;
                for segment in self.segments() {
                    let candidate = segment.closest_point_to(point);
                    let distance = candidate.distance_squared(point);
                    if distance < best_distance {
                        best = candidate;
                        best_distance = distance;
                    }
                }
                best
            }
        }
    }

    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        let crossings: Vec<(f32, Intersection)> = self
            .segments()
            .iter()
            .filter_map(|segment| segment.hit(ray))
            .map(|hit| (ray.distance_along(hit.point), hit))
            .collect();
        if crossings.is_empty() {
            return None;
        }

        let t_near = crossings.iter().map(|(t, _)| *t).fold(f32::INFINITY, f32::min);
        let t_far = crossings.iter().map(|(t, _)| *t).fold(f32::NEG_INFINITY, f32::max);
        let t = select_root(t_near, t_far, nearest)?;
        let (_, hit) = crossings.iter().find(|(edge_t, _)| *edge_t == t)?;
        Some(Intersection::new(
            hit.point,
            face_against(hit.normal, ray.direction()),
        ))
    }
}
