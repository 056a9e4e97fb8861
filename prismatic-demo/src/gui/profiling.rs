use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use prismatic::TraceStats;
use std::collections::VecDeque;

/// Format time in microseconds to the most appropriate unit (µs, ms, or s)
fn format_time_auto(time_us: u64) -> String {
    let time_us_f = time_us as f64;

    if time_us < 1_000 {
        format!("{:.2} µs", time_us_f)
    } else if time_us < 1_000_000 {
        format!("{:.2} ms", time_us_f / 1_000.0)
    } else {
        format!("{:.2} s", time_us_f / 1_000_000.0)
    }
}

fn elapsed_us(stats: &TraceStats) -> u64 {
    stats.elapsed.as_micros() as u64
}

/// Draw a profiling widget showing how long recent traces took
///
/// # Arguments
/// * `ui` - The egui UI context
/// * `history` - Statistics of the most recent traces, oldest first
/// * `frame_budget_us` - Time a trace may take before the viewer drops frames
pub fn draw_profiling_widget(
    ui: &mut egui::Ui,
    history: &VecDeque<TraceStats>,
    frame_budget_us: u64,
) {
    ui.collapsing("Trace Profiling", |ui| {
        let Some(latest) = history.back() else {
            ui.label("No trace data available yet...");
            return;
        };

        let utilization = (elapsed_us(latest) as f32 / frame_budget_us as f32 * 100.0).min(999.0);

        ui.heading("Latest Trace");
        ui.label(format!(
            "Elapsed: {} ({:.1}%)",
            format_time_auto(elapsed_us(latest)),
            utilization
        ));
        ui.label(format!("Iterations: {}", latest.iterations));
        ui.label(format!(
            "Hits: {} (reflected {}, refracted {}, TIR {})",
            latest.hits, latest.reflections, latest.refractions, latest.total_internal_reflections
        ));
        ui.label(format!("Truncated: {}", latest.truncated));
        ui.label(format!("Budget: {}", format_time_auto(frame_budget_us)));

        if utilization > 90.0 {
            ui.colored_label(Color32::RED, "⚠ Trace is eating the frame budget");
        } else if utilization > 70.0 {
            ui.colored_label(Color32::YELLOW, "⚠ Trace time is high");
        }

        ui.add_space(10.0);
        draw_timing_graph(ui, history, frame_budget_us);

        ui.add_space(10.0);
        ui.label("Active rays per iteration");
        draw_frontier_bars(ui, &latest.frontier_sizes);
    });
}

fn draw_timing_graph(ui: &mut egui::Ui, history: &VecDeque<TraceStats>, frame_budget_us: u64) {
    let (response, painter) =
        ui.allocate_painter(Vec2::new(ui.available_width(), 160.0), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Color32::from_gray(20));

    if history.len() < 2 {
        return;
    }

    let max_y_value = history
        .iter()
        .map(|stats| elapsed_us(stats) as f32)
        .fold(frame_budget_us as f32 * 1.2, f32::max);

    // Budget line
    let budget_y = rect.max.y - (frame_budget_us as f32 / max_y_value) * rect.height();
    painter.line_segment(
        [
            Pos2::new(rect.min.x, budget_y),
            Pos2::new(rect.max.x, budget_y),
        ],
        Stroke::new(2.0, Color32::RED),
    );
    painter.text(
        Pos2::new(rect.max.x - 5.0, budget_y - 5.0),
        egui::Align2::RIGHT_BOTTOM,
        format_time_auto(frame_budget_us),
        egui::FontId::proportional(10.0),
        Color32::RED,
    );

    let x_step = rect.width() / (history.len() - 1) as f32;
    let points: Vec<Pos2> = history
        .iter()
        .enumerate()
        .map(|(i, stats)| {
            Pos2::new(
                rect.min.x + i as f32 * x_step,
                rect.max.y - (elapsed_us(stats) as f32 / max_y_value) * rect.height(),
            )
        })
        .collect();
    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], Stroke::new(2.0, Color32::WHITE));
    }

    // Y-axis labels in milliseconds
    let num_y_labels = 4;
    for i in 0..=num_y_labels {
        let value = (max_y_value / 1000.0) * (i as f32 / num_y_labels as f32);
        let y = rect.max.y - (i as f32 / num_y_labels as f32) * rect.height();
        painter.text(
            Pos2::new(rect.min.x + 2.0, y),
            egui::Align2::LEFT_CENTER,
            format!("{:.1}", value),
            egui::FontId::proportional(9.0),
            Color32::GRAY,
        );
    }
}

fn draw_frontier_bars(ui: &mut egui::Ui, frontier_sizes: &[usize]) {
    let (response, painter) =
        ui.allocate_painter(Vec2::new(ui.available_width(), 80.0), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Color32::from_gray(20));

    let Some(&largest) = frontier_sizes.iter().max() else {
        return;
    };
    if largest == 0 {
        return;
    }

    let bar_width = rect.width() / frontier_sizes.len() as f32;
    for (i, &size) in frontier_sizes.iter().enumerate() {
        let height = size as f32 / largest as f32 * (rect.height() - 12.0);
        let left = rect.min.x + i as f32 * bar_width;
        let bar = Rect::from_min_max(
            Pos2::new(left + 1.0, rect.max.y - height),
            Pos2::new(left + bar_width - 1.0, rect.max.y),
        );
        painter.rect_filled(bar, 0.0, Color32::LIGHT_BLUE);
        painter.text(
            Pos2::new(bar.center().x, bar.min.y - 1.0),
            egui::Align2::CENTER_BOTTOM,
            size.to_string(),
            egui::FontId::proportional(9.0),
            Color32::GRAY,
        );
    }
}
