use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::model::LaunchDataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – counts chart + payload/outcome scatter
// ---------------------------------------------------------------------------

/// Render both charts in the central panel, stacked vertically.
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file to begin  (File → Open…)");
        });
        return;
    };

    // Split the available height between the two charts.
    let chart_height = (ui.available_height() / 2.0 - 28.0).max(120.0);

    ui.heading(state.counts_title());
    counts_chart(ui, state, chart_height);

    ui.separator();

    ui.heading("Payload vs. Outcome");
    scatter_chart(ui, state, dataset, chart_height);
}

/// Grouped launch counts as one bar (and legend entry) per grouping key.
fn counts_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let palette = generate_palette(state.counts.len());

    Plot::new("counts_chart")
        .legend(Legend::default())
        .height(height)
        .y_axis_label("Launches")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in state.counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64).width(0.6);
                let chart = BarChart::new(vec![bar])
                    .name(label)
                    .color(palette[i]);
                plot_ui.bar_chart(chart);
            }
        });
}

/// Payload mass (x) against outcome class (y) for the filtered rows,
/// coloured by booster version category.
fn scatter_chart(ui: &mut Ui, state: &AppState, dataset: &LaunchDataset, height: f32) {
    Plot::new("scatter_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome (1 = success)")
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One series per booster category so the legend stays stable.
            for category in &dataset.booster_categories {
                let coords: Vec<[f64; 2]> = state
                    .scatter_indices
                    .iter()
                    .map(|&i| &dataset.records[i])
                    .filter(|rec| &rec.booster_category == category)
                    .map(|rec| [rec.payload_mass_kg, rec.outcome.as_class() as f64])
                    .collect();

                if coords.is_empty() {
                    continue;
                }

                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(eframe::egui::Color32::LIGHT_BLUE);

                let points: PlotPoints = coords.into();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );
            }
        });
}
