use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::chart::{ProportionSpec, ScatterSpec};
use crate::color::{generate_palette, CategoryColors};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel: both charts stacked
// ---------------------------------------------------------------------------

/// Render the dashboard charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch-records file to start  (File → Open…)");
        });
        return;
    }

    let half = ui.available_height() * 0.45;

    if let Some(spec) = &state.outcome_chart {
        ui.allocate_ui(Vec2::new(ui.available_width(), half), |ui: &mut Ui| {
            proportion_chart(ui, spec);
        });
    }

    ui.separator();

    if let Some(spec) = &state.scatter_chart {
        scatter_chart(ui, spec, state.category_colors.as_ref());
    }
}

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

/// Draw a proportion spec as a pie with a legend on the right.
pub fn proportion_chart(ui: &mut Ui, spec: &ProportionSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    let total = spec.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    let colors = generate_palette(spec.segments.len());
    let size = Vec2::new(ui.available_width(), ui.available_height());
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let radius = (0.5 * rect.height().min(rect.width() * 0.55) - 8.0).max(10.0);
    let center = Pos2::new(rect.left() + rect.width() * 0.32, rect.center().y);

    // Wedges, starting at twelve o'clock and sweeping clockwise.
    let mut angle = -TAU / 4.0;
    for (segment, color) in spec.segments.iter().zip(&colors) {
        if segment.value == 0 {
            continue;
        }
        let sweep = TAU * (segment.value as f32 / total as f32);
        painter.add(pie_wedge(center, radius, angle, angle + sweep, *color));
        angle += sweep;
    }

    // Legend: swatch, label, count and share per segment.
    let legend_x = rect.left() + rect.width() * 0.64;
    let mut legend_y = rect.top() + 10.0;
    for (segment, color) in spec.segments.iter().zip(&colors) {
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(legend_x, legend_y), Vec2::splat(12.0)),
            2.0,
            *color,
        );
        let share = 100.0 * segment.value as f64 / total as f64;
        painter.text(
            Pos2::new(legend_x + 18.0, legend_y + 6.0),
            Align2::LEFT_CENTER,
            format!("{}: {} ({share:.1}%)", segment.label, segment.value),
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        legend_y += 18.0;
    }
}

/// Approximate one pie wedge as a triangle fan around the centre.
fn pie_wedge(center: Pos2, radius: f32, from: f32, to: f32, color: Color32) -> Shape {
    let steps = (((to - from) / 0.05).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let a = from + (to - from) * i as f32 / steps as f32;
        points.push(Pos2::new(
            center.x + radius * a.cos(),
            center.y + radius * a.sin(),
        ));
    }
    Shape::convex_polygon(points, color, Stroke::new(1.0, Color32::WHITE))
}

// ---------------------------------------------------------------------------
// Payload scatter chart
// ---------------------------------------------------------------------------

/// Draw a scatter spec with one coloured point series per booster category.
pub fn scatter_chart(ui: &mut Ui, spec: &ScatterSpec, colors: Option<&CategoryColors>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    // One series per category so the legend lists each booster once.
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &spec.points {
        by_category
            .entry(p.category.as_str())
            .or_default()
            .push([p.x, p.y]);
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, pts) in by_category {
                let color = colors
                    .map(|c| c.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points = Points::new(PlotPoints::from(pts))
                    .name(category)
                    .color(color)
                    .radius(3.0);

                plot_ui.points(points);
            }
        });
}
