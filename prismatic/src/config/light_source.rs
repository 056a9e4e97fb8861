use crate::color::Color;
use crate::geometry::{Beam, Ray};

/// Alpha given to radial sources, whose rays overlap near the origin.
const RADIAL_ALPHA: f32 = 0.6;

/// A beam together with the base color of the light it emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub beam: Beam,
    pub color: Color,
}

impl LightSource {
    pub fn new(beam: Beam, color: Color) -> Self {
        Self { beam, color }
    }

    /// A fan of parallel rays around `center`.
    pub fn parallel(center: Ray, count: usize, width: f32, color: Color) -> Self {
        Self::new(Beam::parallel(center, count, width), color)
    }

    /// Rays spread around the full turn from `center`'s origin.
    pub fn radial(center: Ray, count: usize, color: Color) -> Self {
        Self::new(Beam::radial(center, count), color.with_alpha(RADIAL_ALPHA))
    }

    pub fn rays(&self) -> Vec<Ray> {
        self.beam.rays()
    }

    /// Same source aimed along a different center ray.
    pub fn aimed(self, center: Ray) -> Self {
        Self {
            beam: self.beam.with_center(center),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn test_radial_source_is_translucent() {
        let source = LightSource::radial(Ray::new(Vec2::ZERO, Vec2::X), 8, Color::WHEAT);
        assert_eq!(source.color.a, 153);
        assert_eq!(source.rays().len(), 8);
    }

    #[test]
    fn test_aimed_keeps_color_and_count() {
        let source = LightSource::parallel(Ray::new(Vec2::ZERO, Vec2::X), 12, 0.4, Color::WHEAT);
        let aimed = source.aimed(Ray::new(Vec2::new(1.0, 2.0), Vec2::Y));
        assert_eq!(aimed.color, Color::WHEAT);
        assert_eq!(aimed.beam.count(), 12);
        assert_eq!(aimed.beam.center().origin(), Vec2::new(1.0, 2.0));
    }
}
