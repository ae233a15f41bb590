use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Regions and their base economically-active population (thousands).
const REGIONS: &[(&str, f64)] = &[
    ("서울", 5_400.0),
    ("부산", 1_750.0),
    ("대구", 1_250.0),
    ("인천", 1_600.0),
    ("광주", 780.0),
    ("대전", 790.0),
    ("울산", 590.0),
    ("세종", 200.0),
    ("경기", 7_500.0),
    ("강원", 830.0),
    ("충북", 900.0),
    ("충남", 1_200.0),
    ("전북", 950.0),
    ("전남", 1_000.0),
    ("경북", 1_450.0),
    ("경남", 1_800.0),
    ("제주", 390.0),
];

const YEARS: std::ops::RangeInclusive<i32> = 2017..=2023;

/// Year-on-year growth that differs per region so the bars move between years.
fn population(base: f64, region_idx: usize, year: i32) -> f64 {
    let step = (year - YEARS.start()) as f64;
    let rate = 0.004 + (region_idx % 5) as f64 * 0.003;
    (base * (1.0 + rate).powf(step)).round()
}

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("경제활동_통합.csv"));

    let mut file = std::fs::File::create(&out)
        .with_context(|| format!("creating {}", out.display()))?;
    // Spreadsheet tools expect the BOM on Korean CSV exports.
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(["년도", "지역", "경제활동인구 (천명)", "취업자 (천명)", "실업자 (천명)"])?;

    let mut rows = 0usize;
    for year in YEARS.rev() {
        let mut total = (0.0, 0.0, 0.0);
        for (i, &(region, base)) in REGIONS.iter().enumerate() {
            let active = population(base, i, year);
            let unemployed = (active * 0.035).round();
            let employed = active - unemployed;
            total.0 += active;
            total.1 += employed;
            total.2 += unemployed;
            writer.write_record([
                year.to_string(),
                region.to_string(),
                active.to_string(),
                employed.to_string(),
                unemployed.to_string(),
            ])?;
            rows += 1;
        }
        writer.write_record([
            year.to_string(),
            "계".to_string(),
            total.0.to_string(),
            total.1.to_string(),
            total.2.to_string(),
        ])?;
        rows += 1;
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {}", out.display());
    Ok(())
}
