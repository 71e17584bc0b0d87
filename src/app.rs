use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CsvExplorerApp {
    pub state: AppState,
}

impl CsvExplorerApp {
    /// Upload the first dropped file; one file per run.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(first) = dropped.first() else {
            return;
        };

        if let Some(path) = &first.path {
            self.state.open_path(path);
        } else if let Some(bytes) = &first.bytes {
            self.state.open_bytes(&first.name, bytes);
        }

        if dropped.len() > 1 {
            log::warn!("{} files dropped, only the first is used", dropped.len());
            self.state.notice = Some(format!(
                "Only one file at a time; ignored {} other file(s)",
                dropped.len() - 1
            ));
        }
    }
}

impl eframe::App for CsvExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table and chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state);
        });
    }
}
