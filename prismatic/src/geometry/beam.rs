//! Beam generators that fan a center ray out into a finite set of rays.

use std::f32::consts::TAU;

use super::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Beam {
    /// `count` parallel rays spread evenly across `width`, centered on `center`.
    Parallel { center: Ray, count: usize, width: f32 },
    /// `count` rays sharing the center's origin, evenly spaced around the full turn.
    Radial { center: Ray, count: usize },
}

impl Beam {
    pub fn parallel(center: Ray, count: usize, width: f32) -> Self {
        Self::Parallel {
            center,
            count,
            width,
        }
    }

    pub fn radial(center: Ray, count: usize) -> Self {
        Self::Radial { center, count }
    }

    pub fn center(&self) -> Ray {
        match self {
            Self::Parallel { center, .. } | Self::Radial { center, .. } => *center,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Parallel { count, .. } | Self::Radial { count, .. } => *count,
        }
    }

    /// Same beam fanned out from a different center ray.
    pub fn with_center(self, ray: Ray) -> Self {
        match self {
            Self::Parallel { count, width, .. } => Self::parallel(ray, count, width),
            Self::Radial { count, .. } => Self::radial(ray, count),
        }
    }

    pub fn rays(&self) -> Vec<Ray> {
        match *self {
            Self::Parallel {
                center,
                count,
                width,
            } => match count {
                0 => Vec::new(),
                1 => vec![center],
                _ => (0..count)
                    .map(|i| center.parallel(width * (i as f32 / (count - 1) as f32 - 0.5)))
                    .collect(),
            },
            Self::Radial { center, count } => (0..count)
                .map(|i| center.rotate(i as f32 * TAU / count as f32))
                .collect(),
        }
    }
}
