use egui::{Color32, Pos2, Rect, Stroke};
use prismatic::{
    BounceSimulator, Color, LightSource, ObjectId, Ray, SimulationDesc, Trace, TraceStats, Vec2,
    World,
    math::{Vec2Ext, clamp_value, direction_from_angle, quantize},
};
use std::collections::VecDeque;
use std::f32::consts::PI;

use super::profiling;
use crate::scenes;

/// Object rotation snaps to this step while right-dragging.
const ROTATE_STEP: f32 = PI / 48.0;
/// Beam rotation per right click on empty space.
const BEAM_STEP: f32 = PI / 36.0;
/// Per-frame rotation while animating.
const SPIN_STEP: f32 = PI / 144.0;
const OUTLINE_RESOLUTION: usize = 64;
const HISTORY_LENGTH: usize = 240;
/// One frame at 60 Hz.
const FRAME_BUDGET_US: u64 = 16_667;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BeamKind {
    Parallel,
    Radial,
}

enum Drag {
    Move {
        id: ObjectId,
        grab_offset: Vec2,
    },
    Rotate {
        id: ObjectId,
        start_angle: f32,
        start_heading: f32,
    },
}

pub struct PrismaticViewer {
    world: World,
    desc: SimulationDesc,
    trace: Trace,
    timing_history: VecDeque<TraceStats>,
    settings_error: Option<String>,
    grid_size: f32,

    // Beam state
    beam_kind: BeamKind,
    beam_origin: Vec2,
    beam_angle: f32,
    ray_count: usize,
    beam_width: f32,
    follow_pointer: bool,

    // UI state
    animate: bool,
    hovered: Option<ObjectId>,
    drag: Option<Drag>,
}

impl PrismaticViewer {
    pub fn new() -> Self {
        let world = scenes::showcase().unwrap_or_else(|err| {
            log::error!("Failed to build showcase scene: {}", err);
            World::new()
        });
        log::info!("Loaded scene with {} objects", world.len());

        let source = scenes::default_source();
        let center = source.beam.center();

        Self {
            world,
            desc: SimulationDesc::default(),
            trace: Trace::default(),
            timing_history: VecDeque::with_capacity(HISTORY_LENGTH),
            settings_error: None,
            grid_size: scenes::MODEL_HALF_SIZE,
            beam_kind: BeamKind::Parallel,
            beam_origin: center.origin(),
            beam_angle: center.direction().heading(),
            ray_count: source.beam.count(),
            beam_width: 0.4,
            follow_pointer: false,
            animate: false,
            hovered: None,
            drag: None,
        }
    }

    fn light_source(&self) -> LightSource {
        let center = Ray::new(self.beam_origin, direction_from_angle(self.beam_angle));
        match self.beam_kind {
            BeamKind::Parallel => {
                LightSource::parallel(center, self.ray_count, self.beam_width, Color::WHEAT)
            }
            BeamKind::Radial => LightSource::radial(center, self.ray_count, Color::WHEAT),
        }
    }

    fn retrace(&mut self) {
        let simulator = match BounceSimulator::new(self.desc.clone()) {
            Ok(simulator) => simulator,
            Err(err) => {
                if self.settings_error.is_none() {
                    log::warn!("Keeping previous trace: {}", err);
                }
                self.settings_error = Some(err.to_string());
                return;
            }
        };
        self.settings_error = None;
        self.trace = simulator.run(&self.world, &self.light_source());

        if self.timing_history.len() == HISTORY_LENGTH {
            self.timing_history.pop_front();
        }
        self.timing_history.push_back(self.trace.stats.clone());
    }

    fn scale(&self, rect: Rect) -> f32 {
        rect.width().min(rect.height()) / (self.grid_size * 2.0)
    }

    fn world_to_screen(&self, world_pos: Vec2, rect: Rect) -> Pos2 {
        // World: X right, Y up, origin at center
        let center = rect.center();
        let scale = self.scale(rect);

        Pos2::new(
            center.x + world_pos.x * scale,
            center.y - world_pos.y * scale, // Negative because screen Y goes down
        )
    }

    fn screen_to_world(&self, screen_pos: Pos2, rect: Rect) -> Vec2 {
        let center = rect.center();
        let scale = self.scale(rect);

        Vec2::new(
            (screen_pos.x - center.x) / scale,
            -(screen_pos.y - center.y) / scale,
        )
    }

    fn draw_grid(&self, ui: &mut egui::Ui, rect: Rect) {
        let painter = ui.painter();

        let grid_step = 1.0;
        let num_lines = (self.grid_size / grid_step) as i32;

        for i in -num_lines..=num_lines {
            let offset = i as f32 * grid_step;

            let top = self.world_to_screen(Vec2::new(offset, self.grid_size), rect);
            let bottom = self.world_to_screen(Vec2::new(offset, -self.grid_size), rect);
            painter.line_segment([top, bottom], Stroke::new(1.0, Color32::from_gray(50)));

            let left = self.world_to_screen(Vec2::new(-self.grid_size, offset), rect);
            let right = self.world_to_screen(Vec2::new(self.grid_size, offset), rect);
            painter.line_segment([left, right], Stroke::new(1.0, Color32::from_gray(50)));
        }
    }

    fn draw_objects(&self, ui: &mut egui::Ui, rect: Rect) {
        let painter = ui.painter();

        for (id, object) in self.world.iter() {
            let highlighted = self.hovered == Some(id) || self.dragged_object() == Some(id);
            let color = if highlighted {
                object.color.add_hue(0.12)
            } else {
                object.color
            };
            let fill = to_color32(color.with_alpha(0.35));
            let stroke = Stroke::new(if highlighted { 2.5 } else { 1.5 }, to_color32(color));

            for outline in object.outlines(OUTLINE_RESOLUTION) {
                let points: Vec<Pos2> = outline
                    .iter()
                    .map(|&point| self.world_to_screen(point, rect))
                    .collect();
                painter.add(egui::Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
                painter.add(egui::Shape::closed_line(points, stroke));
            }
        }
    }

    fn draw_rays(&self, ui: &mut egui::Ui, rect: Rect) {
        let painter = ui.painter();

        for traced in &self.trace.rays {
            let start = self.world_to_screen(traced.ray.origin(), rect);
            let end = self.world_to_screen(traced.end_point(), rect);
            painter.line_segment([start, end], Stroke::new(1.0, to_color32(traced.color)));
        }

        let origin = self.world_to_screen(self.beam_origin, rect);
        painter.circle_filled(origin, 4.0, to_color32(Color::WHEAT));
        painter.circle_stroke(origin, 4.0, Stroke::new(1.0, Color32::WHITE));
    }

    fn dragged_object(&self) -> Option<ObjectId> {
        match self.drag {
            Some(Drag::Move { id, .. }) | Some(Drag::Rotate { id, .. }) => Some(id),
            None => None,
        }
    }

    fn handle_mouse_interaction(&mut self, ui: &mut egui::Ui, rect: Rect) {
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        self.hovered = response
            .hover_pos()
            .and_then(|pos| self.world.pick(self.screen_to_world(pos, rect)));

        if self.follow_pointer && self.drag.is_none() {
            if let Some(pos) = response.hover_pos() {
                self.beam_origin = self.screen_to_world(pos, rect);
            }
        }

        if response.secondary_clicked() && self.hovered.is_none() {
            self.beam_angle = clamp_value(self.beam_angle + BEAM_STEP, -PI, PI, true);
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let pointer = self.screen_to_world(pos, rect);
                self.drag = self.world.pick(pointer).and_then(|id| {
                    let object = self.world.get(id)?;
                    if response.drag_started_by(egui::PointerButton::Secondary) {
                        Some(Drag::Rotate {
                            id,
                            start_angle: object.angle,
                            start_heading: (pointer - object.position).heading(),
                        })
                    } else {
                        Some(Drag::Move {
                            id,
                            grab_offset: object.position - pointer,
                        })
                    }
                });
                if let Some(id) = self.dragged_object() {
                    log::debug!("Started dragging {}", id);
                }
            }
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let pointer = self.screen_to_world(pos, rect);
                let result = match self.drag {
                    Some(Drag::Move { id, grab_offset }) => {
                        self.world.set_position(id, pointer + grab_offset)
                    }
                    Some(Drag::Rotate {
                        id,
                        start_angle,
                        start_heading,
                    }) => match self.world.get(id) {
                        Some(object) => {
                            let heading = (pointer - object.position).heading();
                            let angle =
                                quantize(start_angle + heading - start_heading, ROTATE_STEP, 0.0);
                            self.world.set_angle(id, angle)
                        }
                        None => Ok(()),
                    },
                    None => Ok(()),
                };
                if let Err(err) = result {
                    log::warn!("Drag failed: {}", err);
                    self.drag = None;
                }
            }
        }

        if response.drag_stopped() {
            if let Some(id) = self.dragged_object() {
                log::debug!("Stopped dragging {}", id);
            }
            self.drag = None;
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Beam");
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.beam_kind, BeamKind::Parallel, "Parallel");
            ui.radio_value(&mut self.beam_kind, BeamKind::Radial, "Radial");
        });
        ui.add(egui::Slider::new(&mut self.ray_count, 1..=72).text("Rays"));
        if self.beam_kind == BeamKind::Parallel {
            ui.add(egui::Slider::new(&mut self.beam_width, 0.0..=3.0).text("Width"));
        }
        ui.add(
            egui::Slider::new(&mut self.beam_angle, -PI..=PI)
                .text("Angle")
                .smart_aim(false),
        );
        ui.checkbox(&mut self.follow_pointer, "Follow pointer");

        ui.add_space(10.0);
        ui.heading("Simulation");
        ui.add(egui::Slider::new(&mut self.desc.max_bounces, 0..=16).text("Max bounces"));
        ui.add(egui::Slider::new(&mut self.desc.refractive_index, 0.5..=2.5).text("Refractive index"));
        ui.add(egui::Slider::new(&mut self.desc.child_alpha, 0.0..=1.0).text("Child alpha"));
        if let Some(err) = &self.settings_error {
            ui.colored_label(Color32::RED, err);
        }
        ui.checkbox(&mut self.animate, "Animate (Space)");

        ui.horizontal(|ui| {
            if ui.button("Showcase").clicked() {
                self.load_scene(scenes::showcase());
            }
            if ui.button("Mirrors").clicked() {
                self.load_scene(scenes::facing_mirrors());
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.label(format!(
            "Traced rays: {} ({} truncated)",
            self.trace.rays.len(),
            self.trace.stats.truncated
        ));

        if let Some(id) = self.hovered.or(self.dragged_object()) {
            if let Some(object) = self.world.get(id) {
                ui.group(|ui| {
                    ui.label(format!("{}", id));
                    for shape in object.shapes() {
                        ui.label(format!("  {}", shape));
                    }
                    ui.label(format!(
                        "  Pos: ({:.2}, {:.2})",
                        object.position.x, object.position.y
                    ));
                    ui.label(format!("  Angle: {:.1}°", object.angle.to_degrees()));
                });
            }
        }

        ui.add_space(10.0);
        profiling::draw_profiling_widget(ui, &self.timing_history, FRAME_BUDGET_US);
    }

    fn load_scene(&mut self, scene: prismatic::Result<World>) {
        match scene {
            Ok(world) => {
                log::info!("Loaded scene with {} objects", world.len());
                self.world = world;
                self.drag = None;
            }
            Err(err) => log::error!("Failed to build scene: {}", err),
        }
    }
}

fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

impl eframe::App for PrismaticViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.animate = !self.animate;
        }
        if self.animate && self.drag.is_none() {
            self.world.spin(SPIN_STEP);
        }

        // Right panel for controls
        egui::SidePanel::right("control_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_controls(ui);
                });
            });

        // Central panel for visualization
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Prismatic Ray Viewer");
            ui.label("Left-drag moves a shape, right-drag rotates it, right-click empty space turns the beam");
            ui.separator();

            let available_size = ui.available_size();
            let size = available_size.x.min(available_size.y) - 20.0;
            let rect = Rect::from_center_size(
                ui.available_rect_before_wrap().center(),
                egui::Vec2::splat(size),
            );

            self.handle_mouse_interaction(ui, rect);
            self.retrace();

            self.draw_grid(ui, rect);
            self.draw_objects(ui, rect);
            self.draw_rays(ui, rect);
        });

        // Request continuous repaint for smooth interaction
        ctx.request_repaint();
    }
}
