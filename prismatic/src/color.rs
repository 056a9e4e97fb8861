//! RGBA colors with HSL mixing.
//!
//! The simulator treats colors as opaque and only calls [`Color::blend`] and
//! [`Color::with_alpha`]. The HSL helpers exist for those two operations and for
//! renderers that want to shift hues (selection highlights and the like).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue in degrees `[0, 360)`, saturation, lightness and alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 128, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);
    pub const CYAN: Self = Self::from_rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::from_rgb(255, 0, 255);
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);
    pub const SILVER: Self = Self::from_rgb(192, 192, 192);
    pub const WHEAT: Self = Self::from_rgb(245, 222, 179);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = 0.5 * (max + min);
        let a = self.a as f32 / 255.0;
        if max == min {
            return Hsl { h: 0.0, s: 0.0, l, a };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        Hsl {
            h: 60.0 * sector,
            s,
            l,
            a,
        }
    }

    /// Linear interpolation towards `target` in HSL space, alpha included.
    ///
    /// Hue is interpolated numerically, without taking the short way round.
    pub fn blend(self, target: Color, amount: f32) -> Color {
        let from = self.to_hsl();
        let to = target.to_hsl();
        let lerp = |x: f32, y: f32| x + (y - x) * amount;
        Hsl {
            h: lerp(from.h, to.h),
            s: lerp(from.s, to.s),
            l: lerp(from.l, to.l),
            a: lerp(from.a, to.a),
        }
        .to_color()
    }

    /// Same color with alpha set from a `[0, 1]` fraction.
    pub fn with_alpha(self, alpha: f32) -> Color {
        Color {
            a: to_channel(alpha),
            ..self
        }
    }

    /// Rotates the hue by `turns` full turns.
    pub fn add_hue(self, turns: f32) -> Color {
        let mut hsl = self.to_hsl();
        hsl.h += turns * 360.0;
        hsl.to_color()
    }
}

impl Hsl {
    pub fn to_color(self) -> Color {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };
        Color::from_rgba(to_channel(r), to_channel(g), to_channel(b), to_channel(self.a))
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| (*x as i16 - y as i16).abs() <= 1)
    }

    #[test]
    fn test_hsl_of_primaries() {
        let red = Color::RED.to_hsl();
        assert_eq!((red.h, red.s, red.l, red.a), (0.0, 1.0, 0.5, 1.0));
        let blue = Color::BLUE.to_hsl();
        assert!((blue.h - 240.0).abs() < 1e-4);
        let gray = Color::SILVER.to_hsl();
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn test_hsl_round_trip() {
        for color in [
            Color::RED,
            Color::GREEN,
            Color::WHEAT,
            Color::ORANGE,
            Color::from_rgba(12, 200, 77, 90),
        ] {
            assert!(close(color.to_hsl().to_color(), color), "{color:?}");
        }
    }

    #[test]
    fn test_blend_endpoints() {
        assert!(close(Color::RED.blend(Color::BLUE, 0.0), Color::RED));
        assert!(close(Color::RED.blend(Color::BLUE, 1.0), Color::BLUE));
        let half = Color::RED.blend(Color::BLUE, 0.5);
        // Hue 120 without shortest-arc interpolation.
        assert!(close(half, Color::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_blend_interpolates_alpha() {
        let faded = Color::WHITE.with_alpha(0.0).blend(Color::WHITE, 0.5);
        assert!((faded.a as i16 - 128).abs() <= 1);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::WHEAT.with_alpha(0.6).a, 153);
        assert_eq!(Color::WHEAT.with_alpha(2.0).a, 255);
        assert_eq!(Color::WHEAT.with_alpha(0.6).r, 245);
    }

    #[test]
    fn test_add_hue_wraps() {
        assert!(close(Color::RED.add_hue(1.0 / 3.0), Color::from_rgb(0, 255, 0)));
        assert!(close(Color::RED.add_hue(-1.0 / 3.0), Color::BLUE));
        assert!(close(Color::RED.add_hue(1.0), Color::RED));
    }
}
