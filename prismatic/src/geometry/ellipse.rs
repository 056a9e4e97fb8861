//! Ellipses, with an iterative closest-point query.

use std::f32::consts::{PI, TAU};

use super::shape::{BOUNDARY_TOLERANCE, face_against, select_root};
use super::{Intersection, Ray, Shape};
use crate::math::{Vec2, direction_from_angle, quadratic_roots, sqr};

/// Bisection cap for the closest-point root search.
const MAX_BISECTION_STEPS: usize = 200;

/// Ellipse with semi-axis `major` along its local X axis and `minor` along Y.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub direction: Vec2,
    pub major: f32,
    pub minor: f32,
}

impl Ellipse {
    pub fn new(major: f32, minor: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            direction: Vec2::X,
            major,
            minor,
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

    pub fn outline(&self, resolution: usize) -> Vec<Vec2> {
        let frame = self.frame();
        (0..resolution)
            .map(|i| {
                let theta = TAU * i as f32 / resolution as f32;
                frame.from_local(Vec2::new(self.major * theta.cos(), self.minor * theta.sin()))
            })
            .collect()
    }

    /// Outward normal at a local boundary point.
    fn local_normal(&self, point: Vec2) -> Vec2 {
        let (a, b) = (self.major, self.minor);
        Vec2::new(b * point.x / a, a * point.y / b).normalize_or_zero()
    }

    fn closest_local(&self, point: Vec2) -> Vec2 {
        // The search below wants the longer axis first.
        if self.major >= self.minor {
            closest_on_ellipse(self.major, self.minor, point)
        } else {
            let swapped = closest_on_ellipse(self.minor, self.major, Vec2::new(point.y, point.x));
            Vec2::new(swapped.y, swapped.x)
        }
    }
}

impl Shape for Ellipse {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn direction(&self) -> Vec2 {
        self.direction
    }

    fn area(&self) -> f32 {
        PI * self.major * self.minor
    }

    fn centroid(&self) -> Vec2 {
        self.center
    }

    fn start_point(&self) -> Vec2 {
        self.frame().from_local(Vec2::new(self.major, 0.0))
    }

    fn contains(&self, point: Vec2) -> bool {
        let local = self.frame().to_local(point);
        sqr(local.x / self.major) + sqr(local.y / self.minor) <= 1.0 + BOUNDARY_TOLERANCE
    }

    fn closest_point_to(&self, point: Vec2) -> Vec2 {
        let frame = self.frame();
        frame.from_local(self.closest_local(frame.to_local(point)))
    }

    /// The returned normal faces against the incoming ray.
    fn hit(&self, ray: &Ray, nearest: bool) -> Option<Intersection> {
        let frame = self.frame();
        let local = frame.to_local_ray(ray);
        let (a, b) = (self.major, self.minor);
        let p = local.origin();
        let e = local.direction();

        let quadratic = sqr(a * e.y) + sqr(b * e.x);
        let linear = 2.0 * (a * a * e.y * p.y + b * b * e.x * p.x);
        let constant = -sqr(a * b) + sqr(a * p.y) + sqr(b * p.x);
        let (t_near, t_far) = quadratic_roots(quadratic, linear, constant)?;
        let t = select_root(t_near, t_far, nearest)?;

        let point = local.point_along(t);
        let normal = face_against(self.local_normal(point), e);
        Some(Intersection::new(
            frame.from_local(point),
            frame.from_local_direction(normal),
        ))
    }
}

/// Closest boundary point of the axis-aligned ellipse `(x/e0)^2 + (y/e1)^2 = 1`
/// with `e0 >= e1`, after Eberly's bisection method.
fn closest_on_ellipse(e0: f32, e1: f32, point: Vec2) -> Vec2 {
    // Work in the first quadrant and mirror back. Zero coordinates mirror with +1.
    let sign_x = if point.x < 0.0 { -1.0 } else { 1.0 };
    let sign_y = if point.y < 0.0 { -1.0 } else { 1.0 };
    let (y0, y1) = (point.x.abs(), point.y.abs());

    let (x0, x1) = if y1 > 0.0 {
        if y0 > 0.0 {
            let z0 = y0 / e0;
            let z1 = y1 / e1;
            let g = z0 * z0 + z1 * z1 - 1.0;
            if g != 0.0 {
                let r0 = sqr(e0 / e1);
                let s = bisect_root(r0, z0, z1, g);
                (r0 * y0 / (s + r0), y1 / (s + 1.0))
            } else {
                (y0, y1)
            }
        } else {
            (0.0, e1)
        }
    } else {
        let numerator = e0 * y0;
        let denominator = e0 * e0 - e1 * e1;
        if numerator < denominator {
            let ratio = numerator / denominator;
            (e0 * ratio, e1 * (1.0 - ratio * ratio).sqrt())
        } else {
            (e0, 0.0)
        }
    };

    Vec2::new(sign_x * x0, sign_y * x1)
}

fn bisect_root(r0: f32, z0: f32, z1: f32, g: f32) -> f32 {
    let n0 = r0 * z0;
    let mut s0 = z1 - 1.0;
    let mut s1 = if g < 0.0 { 0.0 } else { n0.hypot(z1) - 1.0 };
    let mut s = 0.0;
    for _ in 0..MAX_BISECTION_STEPS {
        s = 0.5 * (s0 + s1);
        if s == s0 || s == s1 {
            break;
        }
        let ratio0 = n0 / (s + r0);
        let ratio1 = z1 / (s + 1.0);
        let g = ratio0 * ratio0 + ratio1 * ratio1 - 1.0;
        if g > 0.0 {
            s0 = s;
        } else if g < 0.0 {
            s1 = s;
        } else {
            break;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2Ext;

    fn brute_force_distance(ellipse: &Ellipse, point: Vec2) -> f32 {
        ellipse
            .outline(20_000)
            .into_iter()
            .map(|p| p.distance(point))
            .fold(f32::INFINITY, f32::min)
    }

    #[test]
    fn test_hit_on_major_axis() {
        let ellipse = Ellipse::new(2.0, 1.0);
        let ray = Ray::new(Vec2::new(-5.0, 0.0), Vec2::X);
        let near = ellipse.hit(&ray, true).unwrap();
        assert!(near.point.abs_diff_eq(Vec2::new(-2.0, 0.0), 1e-5));
        assert!(near.normal.abs_diff_eq(-Vec2::X, 1e-5));

        let far = ellipse.hit(&ray, false).unwrap();
        assert!(far.point.abs_diff_eq(Vec2::new(2.0, 0.0), 1e-5));
        // Oriented against the ray, so it points back inside.
        assert!(far.normal.abs_diff_eq(-Vec2::X, 1e-5));
    }

    #[test]
    fn test_hit_rotated() {
        let ellipse = Ellipse::new(2.0, 1.0)
            .with_center(Vec2::new(1.0, 1.0))
            .with_angle(std::f32::consts::FRAC_PI_2);
        let ray = Ray::new(Vec2::new(1.0, -5.0), Vec2::Y);
        let hit = ellipse.hit(&ray, true).unwrap();
        assert!(hit.point.abs_diff_eq(Vec2::new(1.0, -1.0), 1e-5));
        assert!(hit.normal.abs_diff_eq(-Vec2::Y, 1e-5));
    }

    #[test]
    fn test_normal_incidence_refraction_is_collinear() {
        let ellipse = Ellipse::new(2.0, 1.0).with_angle(0.6);
        let target = ellipse.start_point();
        let outward = ellipse.frame().from_local_direction(Vec2::X);
        let ray = Ray::new(target + 4.0 * outward, -outward);

        let hit = ellipse.hit(&ray, true).unwrap();
        assert!(hit.point.abs_diff_eq(target, 1e-4));
        assert!(ray.direction().abs_diff_eq(-hit.normal, 1e-5));

        let refracted = ray.refract_from(hit.point, hit.normal, 1.3).unwrap();
        assert!(refracted.direction().cross(ray.direction()).abs() < 1e-5);
        assert!(refracted.direction().dot(ray.direction()) > 0.0);
    }

    #[test]
    fn test_contains() {
        let ellipse = Ellipse::new(2.0, 1.0).with_angle(std::f32::consts::FRAC_PI_2);
        assert!(ellipse.contains(Vec2::new(0.0, 1.9)));
        assert!(!ellipse.contains(Vec2::new(1.9, 0.0)));
    }

    #[test]
    fn test_closest_point_matches_brute_force() {
        let ellipse = Ellipse::new(2.0, 0.75)
            .with_center(Vec2::new(0.5, -0.5))
            .with_angle(0.35);
        let probes = [
            Vec2::new(4.0, 1.0),
            Vec2::new(-3.0, -2.5),
            Vec2::new(0.5, 3.0),
            Vec2::new(2.6, -0.1),
            Vec2::new(-1.0, 1.5),
        ];
        for probe in probes {
            assert!(!ellipse.contains(probe));
            let closest = ellipse.closest_point_to(probe);
            let distance = closest.distance(probe);
            let expected = brute_force_distance(&ellipse, probe);
            assert!((distance - expected).abs() < 1e-3, "{probe}: {distance} vs {expected}");
            assert!(distance <= expected + 1e-4);
        }
    }

    #[test]
    fn test_closest_point_from_inside() {
        let ellipse = Ellipse::new(2.0, 1.0);
        for probe in [Vec2::ZERO, Vec2::new(0.5, 0.0), Vec2::new(0.0, -0.3), Vec2::new(1.2, 0.4)] {
            let closest = ellipse.closest_point_to(probe);
            assert!(ellipse.contains(closest), "{probe} -> {closest}");
            let expected = brute_force_distance(&ellipse, probe);
            assert!((closest.distance(probe) - expected).abs() < 1e-3, "{probe}");
        }
        assert!(ellipse.closest_point_to(Vec2::ZERO).abs_diff_eq(Vec2::new(0.0, 1.0), 1e-6));
    }
}
