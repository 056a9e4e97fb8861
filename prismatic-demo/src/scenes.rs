//! Scenes shared by the CLI and the viewer.

use prismatic::{
    BoxShape, Circle, Color, Ellipse, LightSource, Polygon, Ray, Result, SceneObject, Triangle,
    Vec2, World,
};

/// Half the side of the square region the viewer shows.
pub const MODEL_HALF_SIZE: f32 = 5.0;

/// Box, triangle, pentagon and circle around the origin, plus an ellipse and a
/// two-circle lens.
pub fn showcase() -> Result<World> {
    let mut world = World::new();
    world.add(
        SceneObject::new(BoxShape::new(1.0, 1.0), Color::RED).with_position(Vec2::new(-2.0, 0.0)),
    )?;
    world.add(
        SceneObject::new(
            Triangle::new(
                Vec2::new(-1.0, -0.5),
                Vec2::new(1.0, -0.5),
                Vec2::new(0.0, 1.0),
            ),
            Color::BLUE,
        )
        .with_position(Vec2::new(0.0, 2.0)),
    )?;
    world.add(
        SceneObject::new(
            Polygon::new(vec![
                Vec2::new(-1.0, 0.0),
                Vec2::new(-0.5, -0.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(-1.0, 0.0),
            ]),
            Color::GREEN,
        )
        .with_position(Vec2::new(0.0, -2.0)),
    )?;
    world.add(
        SceneObject::new(Circle::new(Vec2::ZERO, 0.75), Color::YELLOW)
            .with_position(Vec2::new(2.0, 0.0)),
    )?;
    world.add(
        SceneObject::new(Ellipse::new(0.8, 0.35), Color::MAGENTA)
            .with_position(Vec2::new(3.2, 2.4))
            .with_angle(0.6),
    )?;
    world.add(
        SceneObject::compound(
            vec![
                Circle::new(Vec2::new(-0.35, 0.0), 0.6).into(),
                Circle::new(Vec2::new(0.35, 0.0), 0.6).into(),
            ],
            Color::CYAN,
        )
        .with_position(Vec2::new(-3.0, -2.6)),
    )?;
    Ok(world)
}

/// Two tall slabs facing each other across a unit gap.
pub fn facing_mirrors() -> Result<World> {
    let mut world = World::new();
    for x in [-0.75, 0.75] {
        world.add(
            SceneObject::new(BoxShape::new(0.5, 4.0), Color::SILVER).with_position(Vec2::new(x, 0.0)),
        )?;
    }
    Ok(world)
}

/// Twelve parallel wheat-colored rays entering from the left.
pub fn default_source() -> LightSource {
    LightSource::parallel(
        Ray::new(Vec2::new(-4.5, 0.3), Vec2::X),
        12,
        0.4,
        Color::WHEAT,
    )
}
