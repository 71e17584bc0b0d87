use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every way a run can fail. Each variant ends up as a message in the UI.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The bytes are not valid UTF-8.
    #[error("Could not decode the file (invalid byte sequence at offset {offset}). Ensure it's a standard CSV.")]
    Encoding { offset: usize },

    /// The text is not parseable as delimited tabular data.
    #[error("The uploaded file is not a valid CSV (line {line}): {message}")]
    Malformed { line: u64, message: String },

    /// Nothing to parse: no header fields at all.
    #[error("The uploaded file is not a valid CSV or is empty.")]
    EmptyInput,

    /// A header was parsed but there are no data rows.
    #[error("The uploaded file is empty.")]
    EmptyTable,

    #[error("No numeric columns found in the data.")]
    NoNumericColumns,

    /// Chart construction failed. Never ends a run.
    #[error("Plotting failed: {0}")]
    Render(String),

    #[error("An unexpected error occurred: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl ExplorerError {
    /// Short machine-friendly name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ExplorerError::Encoding { .. } => "encoding",
            ExplorerError::Malformed { .. } => "malformed",
            ExplorerError::EmptyInput => "empty_input",
            ExplorerError::EmptyTable => "empty_table",
            ExplorerError::NoNumericColumns => "no_numeric_columns",
            ExplorerError::Render(_) => "render",
            ExplorerError::Unexpected(_) => "unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_error_shows_context_chain() {
        let err: ExplorerError = anyhow::anyhow!("disk gone")
            .context("reading data.csv")
            .into();
        let msg = err.to_string();
        assert!(msg.contains("reading data.csv"));
        assert!(msg.contains("disk gone"));
        assert_eq!(err.kind(), "unexpected");
    }

    #[test]
    fn malformed_message_names_line() {
        let err = ExplorerError::Malformed {
            line: 4,
            message: "expected 2 fields, saw 3".into(),
        };
        assert!(err.to_string().contains("line 4"));
    }
}
