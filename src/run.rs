use crate::chart::{render_chart, Chart};
use crate::data::error::ExplorerError;
use crate::data::intake::UploadedFile;
use crate::data::loader;
use crate::data::model::Table;
use crate::data::validate::{validate, NumericColumns};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Session – what survives between runs
// ---------------------------------------------------------------------------

/// Session-scoped input to a run: the current upload and the last selection.
#[derive(Debug, Default)]
pub struct Session {
    upload: Option<UploadedFile>,
    selection: Option<Selection>,
}

impl Session {
    pub fn upload(&self) -> Option<&UploadedFile> {
        self.upload.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Replace the current file. The selection is kept and reconciled on the next run.
    pub fn set_upload(&mut self, file: UploadedFile) {
        self.upload = Some(file);
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear(&mut self) {
        self.upload = None;
        self.selection = None;
    }

    /// Remember the selection a successful run settled on.
    pub fn commit(&mut self, outcome: &RunOutcome) {
        if let RunOutcome::Ready(ready) = outcome {
            self.selection = Some(ready.selection.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Everything the window shows after a successful parse and validation.
#[derive(Debug)]
pub struct Ready {
    pub file_name: String,
    pub table: Table,
    pub numeric: NumericColumns,
    pub selection: Selection,
    /// A render failure leaves the table and selectors usable.
    pub chart: Result<Chart, ExplorerError>,
}

#[derive(Debug, Default)]
pub enum RunOutcome {
    #[default]
    NoFile,
    Failed {
        file_name: String,
        error: ExplorerError,
    },
    Ready(Box<Ready>),
}

impl RunOutcome {
    pub fn ready(&self) -> Option<&Ready> {
        match self {
            RunOutcome::Ready(ready) => Some(&**ready),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Run controller
// ---------------------------------------------------------------------------

/// One complete pass: intake → parse → validate → select → render.
pub fn run(session: &Session) -> RunOutcome {
    let Some(file) = session.upload() else {
        log::debug!("run: no file uploaded");
        return RunOutcome::NoFile;
    };

    let checked = loader::parse(file).and_then(|table| {
        let numeric = validate(&table)?;
        Ok((table, numeric))
    });
    let (table, numeric) = match checked {
        Ok(ok) => ok,
        Err(error) => {
            log::warn!("run: {} rejected ({}): {error}", file.name, error.kind());
            return RunOutcome::Failed {
                file_name: file.name.clone(),
                error,
            };
        }
    };

    let selection = Selection::reconcile(session.selection(), &numeric);
    log::debug!(
        "run: {} rows, charting '{}' as {}",
        table.len(),
        selection.column,
        selection.kind
    );

    let chart = render_chart(&table, &selection.column, selection.kind);
    if let Err(e) = &chart {
        log::error!("run: chart for '{}' failed: {e}", selection.column);
    }

    RunOutcome::Ready(Box::new(Ready {
        file_name: file.name.clone(),
        table,
        numeric,
        selection,
        chart,
    }))
}
