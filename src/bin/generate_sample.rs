use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the demo file. `Option` fields serialize as empty cells.
#[derive(Debug, Serialize)]
struct SampleRow {
    id: i64,
    station: &'static str,
    temperature: f64,
    pressure: Option<f64>,
    rainfall_mm: f64,
    raining: bool,
}

/// Seeded SplitMix64 stream; the demo file must be the same on every run.
struct Noise(u64);

impl Noise {
    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data.csv"));

    let mut noise = Noise(42);
    let stations = ["Oslo", "Bergen", "Tromsø"];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let days = 120;
    for day in 0..days {
        let station = stations[day % stations.len()];
        let season = (day as f64 / days as f64 * 2.0 * std::f64::consts::PI).sin();
        let rainfall = noise.normal(2.0, 3.0).max(0.0);

        let row = SampleRow {
            id: day as i64,
            station,
            temperature: round2(8.0 + 10.0 * season + noise.normal(0.0, 1.5)),
            // Every 17th reading is missing.
            pressure: (day % 17 != 5).then(|| round2(noise.normal(1013.0, 6.0))),
            rainfall_mm: round2(rainfall),
            raining: rainfall > 1.0,
        };
        writer
            .serialize(&row)
            .with_context(|| format!("writing row {day}"))?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {days} rows to {}", output_path.display());
    Ok(())
}
