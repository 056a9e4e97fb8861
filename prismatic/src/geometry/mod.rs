//! Analytic 2D geometry: rays, segments, shape primitives and beams.
//!
//! Every shape stores its own `center` and orientation `direction` and keeps
//! its parameters in a local frame where the center is the origin and the
//! angle is zero. Queries take and return parent-frame values; the
//! [`Frame`] conversion happens once at that boundary.

pub mod beam;
pub mod box_shape;
pub mod circle;
pub mod ellipse;
pub mod polygon;
pub mod ray;
pub mod segment;
pub mod shape;
pub mod transform;
pub mod triangle;

pub use beam::Beam;
pub use box_shape::BoxShape;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use polygon::Polygon;
pub use ray::Ray;
pub use segment::Segment;
pub use shape::{BOUNDARY_TOLERANCE, Intersection, Primitive, Shape};
pub use transform::Frame;
pub use triangle::Triangle;
