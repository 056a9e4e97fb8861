use crate::error::{PrismaticError, Result};

/// Configuration descriptor for a bounce simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDesc {
    /// Extent of the scene (scene units). Hits are searched up to this
    /// distance; a source ray that hits nothing is drawn this long, a spawned
    /// ray half as long.
    pub model_size: f32,
    /// Bounce iterations allowed after the first pass; rays still pending past
    /// this limit are drawn to their reach and dropped
    pub max_bounces: u32,
    /// Hits closer than this to a ray origin are ignored, so a ray spawned on
    /// a boundary does not immediately hit the same boundary again
    pub min_hit_distance: f32,
    /// Relative index of refraction used for every boundary crossing
    pub refractive_index: f32,
    /// How far a reflected ray's color moves from the surface color towards the beam color
    pub reflection_blend: f32,
    /// How far a refracted ray's color moves from the surface color towards the beam color
    pub refraction_blend: f32,
    /// Alpha of every spawned ray
    pub child_alpha: f32,
}

impl Default for SimulationDesc {
    fn default() -> Self {
        Self {
            model_size: 10.0,
            max_bounces: 6,
            min_hit_distance: 1e-6,
            refractive_index: 1.3,
            reflection_blend: 0.2,
            refraction_blend: 0.6,
            child_alpha: 0.6,
        }
    }
}

impl SimulationDesc {
    pub fn model_size(mut self, model_size: f32) -> Self {
        self.model_size = model_size;
        self
    }

    pub fn max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    pub fn min_hit_distance(mut self, min_hit_distance: f32) -> Self {
        self.min_hit_distance = min_hit_distance;
        self
    }

    pub fn refractive_index(mut self, refractive_index: f32) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    pub fn blend_factors(mut self, reflection: f32, refraction: f32) -> Self {
        self.reflection_blend = reflection;
        self.refraction_blend = refraction;
        self
    }

    pub fn child_alpha(mut self, child_alpha: f32) -> Self {
        self.child_alpha = child_alpha;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.model_size.is_finite() || self.model_size <= 0.0 {
            return Err(PrismaticError::Configuration(format!(
                "model_size must be positive, got {}",
                self.model_size
            )));
        }
        if !self.min_hit_distance.is_finite() || self.min_hit_distance < 0.0 {
            return Err(PrismaticError::Configuration(format!(
                "min_hit_distance must be non-negative, got {}",
                self.min_hit_distance
            )));
        }
        if !self.refractive_index.is_finite() || self.refractive_index <= 0.0 {
            return Err(PrismaticError::Configuration(format!(
                "refractive_index must be positive, got {}",
                self.refractive_index
            )));
        }
        for (name, value) in [
            ("reflection_blend", self.reflection_blend),
            ("refraction_blend", self.refraction_blend),
            ("child_alpha", self.child_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PrismaticError::Configuration(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let desc = SimulationDesc::default();
        assert!(desc.validate().is_ok());
        assert_eq!(desc.max_bounces, 6);
        assert_eq!(desc.refractive_index, 1.3);
    }

    #[test]
    fn test_setters_chain() {
        let desc = SimulationDesc::default()
            .model_size(20.0)
            .max_bounces(3)
            .blend_factors(0.1, 0.9)
            .child_alpha(1.0);
        assert_eq!(desc.model_size, 20.0);
        assert_eq!(desc.max_bounces, 3);
        assert_eq!(desc.reflection_blend, 0.1);
        assert_eq!(desc.refraction_blend, 0.9);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert!(SimulationDesc::default().model_size(0.0).validate().is_err());
        assert!(SimulationDesc::default().refractive_index(-1.0).validate().is_err());
        assert!(SimulationDesc::default().min_hit_distance(f32::NAN).validate().is_err());
        let err = SimulationDesc::default().child_alpha(1.5).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: child_alpha must be within [0, 1], got 1.5"
        );
    }
}
