//! Math types and scalar helpers for Prismatic

pub use glam::Vec2;

/// 2D vector operations that glam does not spell the way the kernel needs them.
pub trait Vec2Ext {
    /// Scalar cross product (`x1 * y2 - y1 * x2`).
    fn cross(self, other: Vec2) -> f32;

    /// Counter-clockwise perpendicular `(-y, x)`.
    fn orthogonal(self) -> Vec2;

    /// Counter-clockwise rotation by `angle` radians.
    fn rotated(self, angle: f32) -> Vec2;

    /// Projection of `self` onto `axis`. A zero axis projects to zero.
    fn projected_on(self, axis: Vec2) -> Vec2;

    /// Mirror image of `self` about a unit `normal`.
    fn reflect_about(self, normal: Vec2) -> Vec2;

    /// Orientation angle, `atan2(y, x)`.
    fn heading(self) -> f32;
}

impl Vec2Ext for Vec2 {
    fn cross(self, other: Vec2) -> f32 {
        self.perp_dot(other)
    }

    fn orthogonal(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    fn rotated(self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    fn projected_on(self, axis: Vec2) -> Vec2 {
        let length_sq = axis.length_squared();
        if length_sq == 0.0 {
            return Vec2::ZERO;
        }
        axis * (self.dot(axis) / length_sq)
    }

    fn reflect_about(self, normal: Vec2) -> Vec2 {
        self - 2.0 * self.dot(normal) * normal
    }

    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// Unit vector pointing at `angle` radians.
pub fn direction_from_angle(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

/// Sign of `value` as -1, 0 or +1.
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `value * value`, for the quadratic coefficients of conic hits.
pub fn sqr(value: f32) -> f32 {
    value * value
}

/// Clamps `value` into `[min, max]`.
///
/// With `periodic` set the value wraps into `[min, max)` instead of saturating,
/// which is what angles want.
pub fn clamp_value(value: f32, min: f32, max: f32, periodic: bool) -> f32 {
    if periodic {
        let span = max - min;
        if span <= 0.0 {
            return min;
        }
        min + (value - min).rem_euclid(span)
    } else {
        value.max(min).min(max)
    }
}

/// Snaps `value` to the nearest multiple of `step` measured from `origin`.
///
/// Midpoints round away from zero. A non-positive step leaves the value alone.
pub fn quantize(value: f32, step: f32, origin: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    origin + ((value - origin) / step).round() * step
}

/// Real roots of `a*t^2 + b*t + c = 0`, ordered `(near, far)`.
///
/// Returns `None` for a negative discriminant or a degenerate (`a == 0`) equation.
pub fn quadratic_roots(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    Some((t0.min(t1), t0.max(t1)))
}
