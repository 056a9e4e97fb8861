use std::f32::consts::TAU;
use std::fmt;

use crate::error::{PrismaticError, Result};
use crate::geometry::Ray;
use crate::math::{Vec2, clamp_value};
use crate::scene::{RayHit, RayTracer, SceneObject};

/// Selection token for an object in a [`World`].
///
/// Tokens are indices handed out by [`World::add`] and stay valid until
/// [`World::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// The scene: an ordered list of objects that can be picked, moved and ray cast.
///
/// Object order matters: [`World::pick`] returns the first object containing
/// the point, and ray casts break exact distance ties in favour of earlier
/// objects.
#[derive(Debug, Clone, Default)]
pub struct World {
    objects: Vec<SceneObject>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds an object, returning its token.
    pub fn add(&mut self, object: SceneObject) -> Result<ObjectId> {
        object.validate()?;
        let id = ObjectId(self.objects.len());
        log::debug!(
            "Added {} with {} shape(s) at {}",
            id,
            object.shapes().len(),
            object.position
        );
        self.objects.push(object);
        Ok(id)
    }

    pub fn clear(&mut self) {
        log::debug!("Cleared {} objects", self.objects.len());
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(id.0)
            .ok_or(PrismaticError::UnknownObject(id))
    }

    /// First object containing `point`.
    pub fn pick(&self, point: Vec2) -> Option<ObjectId> {
        self.iter()
            .find(|(_, object)| object.contains(point))
            .map(|(id, _)| id)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec2) -> Result<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    /// Sets the object angle, wrapped into `[0, 2pi)`.
    pub fn set_angle(&mut self, id: ObjectId, angle: f32) -> Result<()> {
        self.get_mut(id)?.angle = clamp_value(angle, 0.0, TAU, true);
        Ok(())
    }

    pub fn translate(&mut self, id: ObjectId, offset: Vec2) -> Result<()> {
        let object = self.get_mut(id)?;
        object.position += offset;
        Ok(())
    }

    pub fn rotate(&mut self, id: ObjectId, delta: f32) -> Result<()> {
        let angle = self.get_mut(id)?.angle + delta;
        self.set_angle(id, angle)
    }

    /// Rotates every object by `delta`; one animation step.
    pub fn spin(&mut self, delta: f32) {
        for object in &mut self.objects {
            object.angle = clamp_value(object.angle + delta, 0.0, TAU, true);
        }
    }
}

impl RayTracer for World {
    fn cast_ray(&self, ray: &Ray, min_distance: f32, max_distance: f32) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;
        for (id, object) in self.iter() {
            let Some((t, intersection)) = object.hit_within(ray, min_distance) else {
                continue;
            };
            if t < max_distance && closest.is_none_or(|best| t < best.distance) {
                closest = Some(RayHit::new(
                    t,
                    id,
                    intersection.point,
                    intersection.normal,
                    object.color,
                ));
            }
        }
        closest
    }
}
