use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::chart::{Chart, ChartData, ChartKind, Histogram};

const SERIES_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Draw a rendered chart, titled with its column name.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    ui.label(&chart.title);

    let (x_label, y_label) = match chart.kind() {
        ChartKind::Histogram => (chart.title.as_str(), "count"),
        ChartKind::Line | ChartKind::Bar => ("row", chart.title.as_str()),
    };

    // Keyed by selection so a new chart starts with fresh bounds.
    Plot::new(("chart_plot", &chart.title, chart.kind()))
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match &chart.data {
            ChartData::Line(values) => {
                // One line per run of present values; gaps stay open.
                for segment in line_segments(values) {
                    let line = Line::new(PlotPoints::from(segment))
                        .name(&chart.title)
                        .color(SERIES_COLOR)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
            ChartData::Bar(values) => {
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|y| Bar::new(i as f64, y).width(0.8)))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&chart.title).color(SERIES_COLOR));
            }
            ChartData::Histogram(hist) => {
                plot_ui.bar_chart(
                    BarChart::new(histogram_bars(hist))
                        .name(&chart.title)
                        .color(SERIES_COLOR),
                );
            }
        });
}

/// Split row values into contiguous `[row, value]` runs.
fn line_segments(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push([i as f64, *y]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn histogram_bars(hist: &Histogram) -> Vec<Bar> {
    let width = hist.bin_width();
    hist.bins()
        .map(|(left, right, count)| Bar::new((left + right) / 2.0, count as f64).width(width))
        .collect()
}
