use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::theme;

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// One donut slice.
pub struct Slice {
    pub label: String,
    pub value: u64,
    pub color: Color32,
}

/// Draw a donut chart with the slice values and percentages inside the ring
/// and a legend row underneath. Slices are separated by white spokes.
pub fn donut_chart(ui: &mut Ui, title: &str, slices: &[Slice]) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });

    let total: u64 = slices.iter().map(|s| s.value).sum();
    let size = ui.available_width().min(240.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), size), Sense::hover());

    if total == 0 {
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "no data",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let painter = ui.painter_at(rect);
    let center = rect.center();
    let outer = size * 0.5 - 4.0;
    let inner = outer * 0.45;

    // Fill the ring segments, starting at 12 o'clock.
    let mut angle = -std::f64::consts::FRAC_PI_2;
    let mut boundaries = vec![angle];
    for slice in slices {
        let frac = slice.value as f64 / total as f64;
        let sweep = frac * std::f64::consts::TAU;
        ring_segment(&painter, center, inner, outer, angle, angle + sweep, slice.color);
        angle += sweep;
        boundaries.push(angle);
    }

    // White spokes between slices.
    for &a in &boundaries {
        painter.line_segment(
            [polar(center, a, inner), polar(center, a, outer)],
            Stroke::new(2.0, Color32::WHITE),
        );
    }

    // Value and percentage inside each large-enough slice.
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for slice in slices {
        let frac = slice.value as f64 / total as f64;
        let sweep = frac * std::f64::consts::TAU;
        if frac >= 0.05 {
            let mid = angle + sweep / 2.0;
            let pos = polar(center, mid, (inner + outer) / 2.0);
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!(
                    "{} ({:.1}%)",
                    theme::format_count(slice.value as i64),
                    frac * 100.0
                ),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
        angle += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for slice in slices {
            ui.colored_label(slice.color, "■");
            ui.label(format!(
                "{} — {}",
                slice.label,
                theme::format_count(slice.value as i64)
            ));
            ui.add_space(8.0);
        }
    });
}

fn polar(center: Pos2, angle: f64, radius: f32) -> Pos2 {
    center + Vec2::new(angle.cos() as f32 * radius, angle.sin() as f32 * radius)
}

/// Tessellate one ring segment as a fan of small convex quads.
fn ring_segment(
    painter: &Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f64,
    end: f64,
    color: Color32,
) {
    let steps = (((end - start) / 0.05).ceil() as usize).max(2);
    for i in 0..steps {
        let a0 = start + (end - start) * i as f64 / steps as f64;
        let a1 = start + (end - start) * (i + 1) as f64 / steps as f64;
        painter.add(Shape::convex_polygon(
            vec![
                polar(center, a0, inner),
                polar(center, a0, outer),
                polar(center, a1, outer),
                polar(center, a1, inner),
            ],
            color,
            Stroke::NONE,
        ));
    }
}

// ---------------------------------------------------------------------------
// Outside-warehouse bar chart
// ---------------------------------------------------------------------------

/// Bar chart of outside-warehouse counts per height class.
pub fn outside_bar_chart(ui: &mut Ui, outside_075: u32, outside_150: u32) {
    let bars = vec![
        Bar::new(0.0, f64::from(outside_075))
            .name("0.75 m")
            .width(0.5)
            .fill(theme::ALERT_RED),
        Bar::new(1.0, f64::from(outside_150))
            .name("1.50 m")
            .width(0.5)
            .fill(theme::lighten(theme::ALERT_RED, 0.12)),
    ];
    let top = f64::from(outside_075.max(outside_150));

    Plot::new("outside_by_height")
        .height(220.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(top * 1.2 + 1.0)
        .y_axis_label("Positions")
        .x_axis_formatter(|mark, _range| {
            if (mark.value - 0.0).abs() < 0.01 {
                "0.75 m".to_owned()
            } else if (mark.value - 1.0).abs() < 0.01 {
                "1.50 m".to_owned()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (x, count) in [(0.0, outside_075), (1.0, outside_150)] {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, f64::from(count) + top * 0.06 + 0.2),
                        theme::format_count(i64::from(count)),
                    )
                    .color(theme::ALERT_RED),
                );
            }
        });
}
