//! Composite scene objects.

use crate::color::Color;
use crate::error::{PrismaticError, Result};
use crate::geometry::{Frame, Intersection, Primitive, Ray, Shape};
use crate::math::Vec2;

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Single(Primitive),
    Multi(Vec<Primitive>),
}

/// A colored scene entity owning one shape or an ordered list of shapes.
///
/// The object's `position` and `angle` form an outer frame; each shape's own
/// center and direction are expressed inside it. All queries take and return
/// world-space values.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub color: Color,
    pub position: Vec2,
    pub angle: f32,
    body: Body,
}

impl SceneObject {
    pub fn new(shape: impl Into<Primitive>, color: Color) -> Self {
        Self {
            color,
            position: Vec2::ZERO,
            angle: 0.0,
            body: Body::Single(shape.into()),
        }
    }

    pub fn compound(shapes: Vec<Primitive>, color: Color) -> Self {
        Self {
            color,
            position: Vec2::ZERO,
            angle: 0.0,
            body: Body::Multi(shapes),
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.position, self.angle)
    }

    pub fn shapes(&self) -> &[Primitive] {
        match &self.body {
            Body::Single(shape) => std::slice::from_ref(shape),
            Body::Multi(shapes) => shapes,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.body, Body::Multi(_))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() || !self.angle.is_finite() {
            return Err(PrismaticError::InvalidShape(format!(
                "object placement ({}, {}) is not finite",
                self.position, self.angle
            )));
        }
        if self.shapes().is_empty() {
            return Err(PrismaticError::InvalidShape(
                "compound object has no shapes".to_string(),
            ));
        }
        self.shapes().iter().try_for_each(Primitive::validate)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let local = self.frame().to_local(point);
        self.shapes().iter().any(|shape| shape.contains(local))
    }

    /// Nearest boundary point over all member shapes; the first shape wins ties.
    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        let frame = self.frame();
        let local = frame.to_local(point);
        let mut best = local;
        let mut best_distance = f32::INFINITY;
        for shape in self.shapes() {
            let candidate = shape.closest_point_to(local);
            let distance = candidate.distance_squared(local);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        frame.from_local(best)
    }

    /// Ray intersection in world space.
    ///
    /// A compound object reports the member hit with the smallest positive ray
    /// parameter, the first member winning exact ties.
    pub fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        let frame = self.frame();
        let local_ray = frame.to_local_ray(ray);
        let local_hit = match &self.body {
            Body::Single(shape) => shape.hit(&local_ray, nearest),
            Body::Multi(shapes) => {
                let mut best: Option<(f32, Intersection)> = None;
                for shape in shapes {
                    let Some(hit) = shape.hit(&local_ray, nearest) else {
                        continue;
                    };
                    let t = local_ray.distance_along(hit.point);
                    if t > 0.0 && best.is_none_or(|(best_t, _)| t < best_t) {
                        best = Some((t, hit));
                    }
                }
                best.map(|(_, hit)| hit)
            }
        }?;
        Some(Intersection::new(
            frame.from_local(local_hit.point),
            frame.from_local_direction(local_hit.normal),
        ))
    }

    /// Closest world-space hit at ray parameter `min_t` or beyond, with its parameter.
    ///
    /// Every member tries its near root first and falls back to its far root
    /// when the near one lies before `min_t`, so a ray starting on one member's
    /// boundary still sees the near walls of the others.
    pub fn hit_within(&self, ray: &Ray, min_t: f32) -> Option<(f32, Intersection)> {
        let frame = self.frame();
        let local_ray = frame.to_local_ray(ray);
        let (_, local_hit) = self
            .shapes()
            .iter()
            .filter_map(|shape| {
                [true, false].into_iter().find_map(|nearest| {
                    shape
                        .hit(&local_ray, nearest)
                        .map(|hit| (local_ray.distance_along(hit.point), hit))
                        .filter(|(t, _)| *t >= min_t)
                })
            })
            .fold(None, |best: Option<(f32, Intersection)>, (t, hit)| match best {
                Some((best_t, _)) if best_t <= t => best,
                _ => Some((t, hit)),
            })?;
        let point = frame.from_local(local_hit.point);
        Some((
            ray.distance_along(point),
            Intersection::new(point, frame.from_local_direction(local_hit.normal)),
        ))
    }

    /// World-space outline of every member shape.
    pub fn outlines(&self, resolution: usize) -> Vec<Vec<Vec2>> {
        let frame = self.frame();
        self.shapes()
            .iter()
            .map(|shape| frame.from_local_points(&shape.outline(resolution)))
            .collect()
    }

    /// Area-weighted centroid of the member shapes in world space.
    pub fn centroid(&self) -> Vec2 {
        let (weighted, total) = self
            .shapes()
            .iter()
            .fold((Vec2::ZERO, 0.0), |(sum, area), shape| {
                let a = shape.area();
                (sum + a * shape.centroid(), area + a)
            });
        if total > 0.0 {
            self.frame().from_local(weighted / total)
        } else {
            self.position
        }
    }
}
