use eframe::egui::{self, RichText, Ui};

use crate::chart::ChartKind;
use crate::run::RunOutcome;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – chart selectors
// ---------------------------------------------------------------------------

/// Render the column and chart-kind selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart");
    ui.separator();

    let Some(ready) = state.outcome.ready() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Edit a copy; apply after the widgets so `state` is free to mutate.
    let columns = ready.numeric.names().to_vec();
    let current = ready.selection.clone();
    let mut selection = current.clone();

    ui.strong("Select a column to visualize");
    egui::ComboBox::from_id_salt("column_select")
        .selected_text(&selection.column)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                ui.selectable_value(&mut selection.column, col.clone(), col);
            }
        });
    ui.add_space(8.0);

    ui.strong("Select plot type");
    for kind in ChartKind::ALL {
        ui.radio_value(&mut selection.kind, kind, kind.label());
    }

    if selection != current {
        state.apply_selection(selection);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.outcome {
            RunOutcome::Ready(ready) => {
                ui.label(format!(
                    "{}: {} rows × {} columns",
                    ready.file_name,
                    ready.table.len(),
                    ready.table.column_count()
                ));
            }
            RunOutcome::Failed { file_name, .. } => {
                ui.label(file_name);
            }
            RunOutcome::NoFile => {}
        }

        if let Some(msg) = &state.notice {
            ui.separator();
            ui.label(RichText::new(msg).color(ui.visuals().warn_fg_color));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – messages, raw data, chart
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("CSV Data Explorer 📊");
    ui.add_space(4.0);

    let ready = match &state.outcome {
        RunOutcome::NoFile => {
            ui.label(
                RichText::new("Please upload a CSV file to get started.")
                    .color(ui.visuals().warn_fg_color),
            );
            ui.label("Use File → Open… or drop a .csv file onto this window.");
            return;
        }
        RunOutcome::Failed { error, .. } => {
            error_label(ui, &format!("Error: {error}"));
            return;
        }
        RunOutcome::Ready(ready) => ready,
    };

    ui.strong("Raw Data");
    table::data_table(ui, &ready.table);
    ui.separator();

    ui.strong(format!("Plot of {}", ready.selection.column));
    match &ready.chart {
        Ok(chart) => plot::chart_plot(ui, chart),
        Err(e) => error_label(ui, &e.to_string()),
    }
}

fn error_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(ui.visuals().error_fg_color));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload a CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
