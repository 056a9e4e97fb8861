//! The capability set shared by all shape primitives.

use std::fmt;

use super::{BoxShape, Circle, Ellipse, Frame, Polygon, Ray, Triangle};
use crate::error::{PrismaticError, Result};
use crate::math::{Vec2, Vec2Ext};

/// Slack applied to containment tests so points on the boundary count as inside.
pub const BOUNDARY_TOLERANCE: f32 = 1e-5;

/// Where a ray meets a shape boundary, with the surface normal there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Vec2,
    pub normal: Vec2,
}

impl Intersection {
    pub fn new(point: Vec2, normal: Vec2) -> Self {
        Self { point, normal }
    }
}

/// Uniform geometric queries over a shape placed in its parent frame.
///
/// Points, rays and normals passed in and returned are parent-frame values.
/// Implementations convert to their local frame internally.
pub trait Shape {
    fn center(&self) -> Vec2;

    /// Unit orientation vector.
    fn direction(&self) -> Vec2;

    fn angle(&self) -> f32 {
        self.direction().heading()
    }

    fn frame(&self) -> Frame {
        Frame::new(self.center(), self.angle())
    }

    fn area(&self) -> f32;

    fn centroid(&self) -> Vec2;

    /// A fixed reference point on the outline.
    fn start_point(&self) -> Vec2;

    fn contains(&self, point: Vec2) -> bool;

    fn closest_point_to(&self, point: Vec2) -> Vec2;

    /// Intersects `ray` with the shape boundary.
    ///
    /// `nearest` picks the smaller of two non-negative ray parameters, otherwise
    /// the larger one. When only one parameter is non-negative (the ray starts
    /// inside) that one is used regardless of `nearest`. A shape entirely
    /// behind the ray is a miss.
    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection>;

    fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point_to(point))
    }
}

/// Picks a ray parameter out of an ordered `(near, far)` root pair.
pub(crate) fn select_root(t_near: f32, t_far: f32, nearest: bool) -> Option<f32> {
    if !t_near.is_finite() || !t_far.is_finite() || t_far < 0.0 {
        return None;
    }
    if t_near < 0.0 {
        return Some(t_far);
    }
    Some(if nearest { t_near } else { t_far })
}

/// Flips `normal` so it faces against `direction`.
pub(crate) fn face_against(normal: Vec2, direction: Vec2) -> Vec2 {
    if direction.dot(normal) > 0.0 {
        -normal
    } else {
        normal
    }
}

pub(crate) fn validate_placement(center: Vec2, direction: Vec2) -> Result<()> {
    if !center.is_finite() {
        return Err(PrismaticError::InvalidShape(format!(
            "center {center} is not finite"
        )));
    }
    if !direction.is_finite() || direction == Vec2::ZERO {
        return Err(PrismaticError::InvalidShape(format!(
            "direction {direction} cannot orient a shape"
        )));
    }
    Ok(())
}

pub(crate) fn validate_length(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PrismaticError::InvalidShape(format!(
            "{name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}

/// Closed set of shape primitives a scene object can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Box(BoxShape),
    Circle(Circle),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Triangle(Triangle),
}

impl Primitive {
    fn as_shape(&self) -> &dyn Shape {
        match self {
            Self::Box(s) => s,
            Self::Circle(s) => s,
            Self::Ellipse(s) => s,
            Self::Polygon(s) => s,
            Self::Triangle(s) => s,
        }
    }

    /// Rejects parameters that would make the queries meaningless.
    pub fn validate(&self) -> Result<()> {
        validate_placement(self.center(), self.direction())?;
        match self {
            Self::Box(s) => {
                validate_length("box width", s.width)?;
                validate_length("box height", s.height)
            }
            Self::Circle(s) => validate_length("circle radius", s.radius),
            Self::Ellipse(s) => {
                validate_length("ellipse major axis", s.major)?;
                validate_length("ellipse minor axis", s.minor)?;
                if s.major < s.minor {
                    return Err(PrismaticError::InvalidShape(format!(
                        "ellipse major axis {} is shorter than minor axis {}",
                        s.major, s.minor
                    )));
                }
                Ok(())
            }
            Self::Polygon(s) => {
                if s.local_nodes().iter().any(|n| !n.is_finite()) {
                    return Err(PrismaticError::InvalidShape(
                        "polygon has non-finite nodes".to_string(),
                    ));
                }
                if s.distinct_node_count() < 3 {
                    return Err(PrismaticError::InvalidShape(format!(
                        "polygon needs at least 3 distinct nodes, got {}",
                        s.distinct_node_count()
                    )));
                }
                if s.area() == 0.0 {
                    return Err(PrismaticError::InvalidShape(
                        "polygon encloses no area".to_string(),
                    ));
                }
                Ok(())
            }
            Self::Triangle(s) => {
                if s.area() > 0.0 {
                    Ok(())
                } else {
                    Err(PrismaticError::InvalidShape(
                        "triangle nodes are collinear".to_string(),
                    ))
                }
            }
        }
    }

    /// Outline in the parent frame, for renderers.
    ///
    /// Curved shapes are sampled at `resolution` points.
    pub fn outline(&self, resolution: usize) -> Vec<Vec2> {
        match self {
            Self::Box(s) => s.to_polygon().nodes(),
            Self::Circle(s) => s.outline(resolution),
            Self::Ellipse(s) => s.outline(resolution),
            Self::Polygon(s) => s.nodes(),
            Self::Triangle(s) => s.nodes().to_vec(),
        }
    }
}

impl Shape for Primitive {
    fn center(&self) -> Vec2 {
        self.as_shape().center()
    }

    fn direction(&self) -> Vec2 {
        self.as_shape().direction()
    }

    fn area(&self) -> f32 {
        self.as_shape().area()
    }

    fn centroid(&self) -> Vec2 {
        self.as_shape().centroid()
    }

    fn start_point(&self) -> Vec2 {
        self.as_shape().start_point()
    }

    fn contains(&self, point: Vec2) -> bool {
        self.as_shape().contains(point)
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        self.as_shape().closest_point_to(point)
    }

    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        self.as_shape().hit(ray, nearest)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box(s) => write!(f, "Box({}, {})", s.width, s.height),
            Self::Circle(s) => write!(f, "Circle({})", s.radius),
            Self::Ellipse(s) => write!(f, "Ellipse({}, {})", s.major, s.minor),
            Self::Polygon(s) => write!(f, "Polygon({} nodes)", s.local_nodes().len()),
            Self::Triangle(_) => write!(f, "Triangle"),
        }
    }
}

impl From<BoxShape> for Primitive {
    fn from(shape: BoxShape) -> Self {
        Self::Box(shape)
    }
}

impl From<Circle> for Primitive {
    fn from(shape: Circle) -> Self {
        Self::Circle(shape)
    }
}

impl From<Ellipse> for Primitive {
    fn from(shape: Ellipse) -> Self {
        Self::Ellipse(shape)
    }
}

impl From<Polygon> for Primitive {
    fn from(shape: Polygon) -> Self {
        Self::Polygon(shape)
    }
}

impl From<Triangle> for Primitive {
    fn from(shape: Triangle) -> Self {
        Self::Triangle(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Primitive> {
        vec![
            BoxShape::new(2.0, 1.0).with_center(Vec2::new(1.0, -1.0)).with_angle(0.4).into(),
            Circle::new(Vec2::new(-2.0, 0.5), 0.75).into(),
            Ellipse::new(1.5, 0.5).with_center(Vec2::new(0.5, 2.0)).with_angle(-0.9).into(),
            Polygon::new(vec![
                Vec2::new(-1.0, 0.0),
                Vec2::new(-0.5, -0.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ])
            .with_center(Vec2::new(3.0, 3.0))
            .with_angle(1.2)
            .into(),
            Triangle::new(Vec2::new(-1.0, -0.5), Vec2::new(1.0, -0.5), Vec2::new(0.0, 1.0))
                .with_center(Vec2::new(-3.0, -2.0))
                .with_angle(2.5)
                .into(),
        ]
    }

    #[test]
    fn test_select_root_policy() {
        assert_eq!(select_root(1.0, 2.0, true), Some(1.0));
        assert_eq!(select_root(1.0, 2.0, false), Some(2.0));
        assert_eq!(select_root(-1.0, 2.0, true), Some(2.0));
        assert_eq!(select_root(-1.0, 2.0, false), Some(2.0));
        assert_eq!(select_root(-2.0, -1.0, true), None);
        assert_eq!(select_root(f32::NAN, 1.0, true), None);
    }

    #[test]
    fn test_ray_at_centroid_hits_near_then_far() {
        for shape in samples() {
            let centroid = shape.centroid();
            let origin = centroid + Vec2::new(-20.0, 7.0);
            let ray = Ray::towards(origin, centroid);
            let near = shape.hit(&ray, true).unwrap_or_else(|| panic!("{shape} missed"));
            let far = shape.hit(&ray, false).unwrap();
            let t_near = ray.distance_along(near.point);
            let t_far = ray.distance_along(far.point);
            assert!(t_near > 0.0, "{shape}");
            assert!(t_near < t_far, "{shape}: {t_near} >= {t_far}");
        }
    }

    #[test]
    fn test_ray_from_inside_uses_single_root() {
        for shape in samples() {
            let ray = Ray::new(shape.centroid(), Vec2::new(0.3, 1.0));
            let near = shape.hit(&ray, true).unwrap();
            let far = shape.hit(&ray, false).unwrap();
            assert!(near.point.abs_diff_eq(far.point, 1e-5), "{shape}");
        }
    }

    #[test]
    fn test_shape_behind_ray_misses() {
        for shape in samples() {
            let origin = shape.centroid() + Vec2::new(10.0, 0.0);
            let ray = Ray::new(origin, Vec2::X);
            assert!(shape.hit(&ray, true).is_none(), "{shape}");
        }
    }

    #[test]
    fn test_closest_point_of_inside_point_is_contained() {
        for shape in samples() {
            let inside = shape.centroid();
            assert!(shape.contains(inside), "{shape}");
            let closest = shape.closest_point_to(inside);
            assert!(shape.contains(closest), "{shape}: {closest}");
        }
    }

    #[test]
    fn test_validate() {
        for shape in samples() {
            assert!(shape.validate().is_ok(), "{shape}");
        }
        let bad_circle: Primitive = Circle::new(Vec2::ZERO, 0.0).into();
        assert!(matches!(bad_circle.validate(), Err(PrismaticError::InvalidShape(_))));
        let bad_ellipse: Primitive = Ellipse::new(0.5, 1.5).into();
        assert!(bad_ellipse.validate().is_err());
        let flat: Primitive = Polygon::new(vec![Vec2::ZERO, Vec2::X, Vec2::X]).into();
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_outline_and_display() {
        let boxed: Primitive = BoxShape::new(2.0, 1.0).into();
        assert_eq!(boxed.outline(16).len(), 4);
        assert_eq!(boxed.to_string(), "Box(2, 1)");
        let circle: Primitive = Circle::new(Vec2::ZERO, 0.75).into();
        let outline = circle.outline(32);
        assert_eq!(outline.len(), 32);
        assert!(outline.iter().all(|p| (p.length() - 0.75).abs() < 1e-5));
    }
}
