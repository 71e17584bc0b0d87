use std::fmt;

use crate::data::error::ExplorerError;
use crate::data::model::Table;

/// Fixed number of histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Chart kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Histogram];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Histogram => "Histogram",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// Binned frequency counts over `[min, max]`, uniform bin width.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `None` when the value range is too wide for a finite bin width.
    fn new(values: &[f64], bins: usize) -> Option<Self> {
        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        if !width.is_finite() {
            return None;
        }
        let mut counts = vec![0; bins];
        for &v in values {
            // The last bin is closed on the right.
            let index = (((v - min) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Histogram { min, max, counts })
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// `(left edge, right edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        let width = self.bin_width();
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = self.min + i as f64 * width;
            (left, left + width, count)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// One entry per row; `None` leaves a gap.
    Line(Vec<Option<f64>>),
    /// One entry per row; `None` draws no bar.
    Bar(Vec<Option<f64>>),
    Histogram(Histogram),
}

/// A chart ready to hand to the plot widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub data: ChartData,
}

impl Chart {
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Line(_) => ChartKind::Line,
            ChartData::Bar(_) => ChartKind::Bar,
            ChartData::Histogram(_) => ChartKind::Histogram,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build a chart of one numeric column.
pub fn render_chart(table: &Table, column: &str, kind: ChartKind) -> Result<Chart, ExplorerError> {
    let col = table
        .column(column)
        .ok_or_else(|| ExplorerError::Render(format!("column '{column}' does not exist")))?;
    let values = col
        .numeric_values()
        .ok_or_else(|| ExplorerError::Render(format!("column '{column}' is not numeric")))?;

    let data = match kind {
        ChartKind::Line => ChartData::Line(finite_or_gap(values)),
        ChartKind::Bar => ChartData::Bar(finite_or_gap(values)),
        ChartKind::Histogram => {
            let present: Vec<f64> = values.into_iter().flatten().collect();
            if present.is_empty() {
                return Err(ExplorerError::Render(format!(
                    "column '{column}' has no values to bin"
                )));
            }
            if let Some(bad) = present.iter().find(|v| !v.is_finite()) {
                return Err(ExplorerError::Render(format!(
                    "cannot bin non-finite value {bad} in column '{column}'"
                )));
            }
            let hist = Histogram::new(&present, HISTOGRAM_BINS).ok_or_else(|| {
                ExplorerError::Render(format!("range of column '{column}' is too wide to bin"))
            })?;
            ChartData::Histogram(hist)
        }
    };

    Ok(Chart {
        title: column.to_string(),
        data,
    })
}

fn finite_or_gap(values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect()
}
