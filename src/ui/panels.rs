use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use healthcare_dashboard::data::filter::ChartType;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter controls and push any edits back into the state.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut selection = state.selection.clone();
    let controls = &state.controls;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Patient demographics: feeds every chart ----
            ui.strong("Patient Demographics");
            option_dropdown(
                ui,
                "patient_gender",
                "Gender",
                &mut selection.gender,
                &controls.gender_options,
            );
            ui.separator();

            // ---- Billing ceiling: feeds the billing histogram ----
            if let Some(slider) = &controls.billing_slider {
                ui.strong("Billing Amount Ceiling");
                let mut ceiling = selection.billing_ceiling.unwrap_or(slider.default);
                let response = ui.add(
                    egui::Slider::new(&mut ceiling, slider.min..=slider.max)
                        .step_by(slider.step)
                        .fixed_decimals(0),
                );
                if response.changed() {
                    selection.billing_ceiling = Some(ceiling);
                }
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for tick in &slider.ticks {
                        ui.small(&tick.label);
                    }
                });
                ui.separator();
            }

            // ---- Admission trend controls ----
            ui.strong("Controls");
            ui.label("Chart Type:");
            ui.horizontal(|ui: &mut Ui| {
                for chart_type in ChartType::ALL {
                    ui.radio_value(&mut selection.chart_type, chart_type, chart_type.label());
                }
            });
            option_dropdown(
                ui,
                "trend_condition",
                "Condition",
                &mut selection.medical_condition,
                &controls.condition_options,
            );
        });

    state.update_selection(selection);
}

/// A dropdown over `options` with an "All" entry mapping to `None`.
fn option_dropdown(
    ui: &mut Ui,
    id: &str,
    label: &str,
    value: &mut Option<String>,
    options: &[String],
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        let current = value.clone().unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_salt(id)
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(value, None, "All");
                for option in options {
                    ui.selectable_value(value, Some(option.clone()), option);
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar – title and stat cards
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Healthcare Dashboard").strong());
    });
    ui.separator();

    let cards = state.store.summary().stat_cards();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(240.0))
        .column(Column::remainder())
        .body(|mut body| {
            for (label, value) in &cards {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(*label);
                    });
                    row.col(|ui| {
                        ui.strong(value);
                    });
                });
            }
        });
}
