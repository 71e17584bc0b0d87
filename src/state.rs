use std::path::Path;

use crate::chart::ChartKind;
use crate::data::intake::{display_name, has_csv_extension, UploadedFile};
use crate::run::{run, RunOutcome, Session};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Upload and last selection, fed into every run.
    pub session: Session,

    /// Result of the latest run, shown until the next interaction.
    pub outcome: RunOutcome,

    /// Warning about an ignored upload attempt (wrong extension, extra files).
    pub notice: Option<String>,
}

impl AppState {
    /// Re-run the whole pipeline from the current session.
    pub fn rerun(&mut self) {
        self.outcome = run(&self.session);
        self.session.commit(&self.outcome);
        if let Some(ready) = self.outcome.ready() {
            log::info!(
                "Loaded {} with {} rows, numeric columns {:?}",
                ready.file_name,
                ready.table.len(),
                ready.numeric.names()
            );
        }
    }

    /// Take a new upload and re-run.
    pub fn upload(&mut self, file: UploadedFile) {
        self.notice = None;
        self.session.set_upload(file);
        self.rerun();
    }

    /// Upload a file from disk, rejecting non-CSV names.
    pub fn open_path(&mut self, path: &Path) {
        let name = display_name(path);
        if !has_csv_extension(&name) {
            self.ignore(&name);
            return;
        }
        match UploadedFile::from_path(path) {
            Ok(file) => self.upload(file),
            Err(e) => {
                log::error!("Failed to read file: {e}");
                self.notice = None;
                self.session.clear();
                self.outcome = RunOutcome::Failed {
                    file_name: name,
                    error: e,
                };
            }
        }
    }

    /// Upload bytes that arrived without a path (drag-and-drop on the web).
    pub fn open_bytes(&mut self, name: &str, bytes: &[u8]) {
        if !has_csv_extension(name) {
            self.ignore(name);
            return;
        }
        self.upload(UploadedFile::new(name, bytes));
    }

    fn ignore(&mut self, name: &str) {
        log::warn!("Ignoring non-CSV file {name}");
        self.notice = Some(format!("Only .csv files are supported; ignored {name}"));
    }

    pub fn select_column(&mut self, column: String) {
        let kind = self.current_selection().map(|s| s.kind).unwrap_or_default();
        self.apply_selection(Selection { column, kind });
    }

    pub fn select_kind(&mut self, kind: ChartKind) {
        if let Some(column) = self.current_selection().map(|s| s.column.clone()) {
            self.apply_selection(Selection { column, kind });
        }
    }

    pub fn apply_selection(&mut self, selection: Selection) {
        log::debug!("Selection changed to {selection:?}");
        self.session.set_selection(selection);
        self.rerun();
    }

    /// Forget the upload and selection.
    pub fn clear(&mut self) {
        self.notice = None;
        self.session.clear();
        self.rerun();
    }

    fn current_selection(&self) -> Option<&Selection> {
        self.outcome.ready().map(|r| &r.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartData;
    use crate::data::error::ExplorerError;

    #[test]
    fn starts_with_no_file() {
        let state = AppState::default();
        assert!(matches!(state.outcome, RunOutcome::NoFile));
    }

    #[test]
    fn selector_changes_rerun_the_chart() {
        let mut state = AppState::default();
        state.open_bytes("data.csv", b"x,y\n1,10\n2,20\n");
        state.select_column("y".into());
        state.select_kind(ChartKind::Bar);

        let ready = state.outcome.ready().unwrap();
        assert_eq!(ready.selection.column, "y");
        let chart = ready.chart.as_ref().unwrap();
        assert_eq!(chart.data, ChartData::Bar(vec![Some(10.0), Some(20.0)]));
    }

    #[test]
    fn non_csv_upload_is_ignored_with_notice() {
        let mut state = AppState::default();
        state.open_bytes("data.csv", b"x\n1\n");
        state.open_bytes("notes.txt", b"x\n1\n");
        assert!(state.notice.as_deref().unwrap().contains("notes.txt"));
        assert_eq!(state.outcome.ready().unwrap().file_name, "data.csv");
    }

    #[test]
    fn unreadable_path_is_unexpected_error() {
        let mut state = AppState::default();
        state.open_path(Path::new("/no/such/dir/data.csv"));
        match &state.outcome {
            RunOutcome::Failed { file_name, error } => {
                assert_eq!(file_name, "data.csv");
                assert!(matches!(error, ExplorerError::Unexpected(_)));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn clear_drops_everything() {
        let mut state = AppState::default();
        state.open_bytes("data.csv", b"x\n1\n");
        state.clear();
        assert!(matches!(state.outcome, RunOutcome::NoFile));
        assert!(state.session.upload().is_none());
    }
}
