//! Export the detail table for a whole dataset as CSV.
//!
//! Columns: `number,name,atk,def,hit`, then `cp_l{level}_min`/`cp_l{level}_max` for each of
//! [DETAIL_CP_LEVELS], then `fundo,released,shiny`. Unknown CP values and missing dates are
//! empty cells; fundo levels are space separated.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use tracing::info;

use crate::data::species::Species;
use crate::error::ExportError;
use crate::gallery::detail::{Detail, DETAIL_CP_LEVELS};
use crate::parallel::WorkerPool;
use crate::stats::LevelLabel;

pub fn export_header() -> Vec<String> {
    let mut header: Vec<String> = ["number", "name", "atk", "def", "hit"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for &level in &DETAIL_CP_LEVELS {
        let column = LevelLabel::from_level(level).to_string().to_lowercase().replace('.', "_");
        header.push(format!("cp_{column}_min"));
        header.push(format!("cp_{column}_max"));
    }
    header.extend(["fundo", "released", "shiny"].iter().map(|s| s.to_string()));
    header
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

pub fn detail_row(detail: &Detail) -> Vec<String> {
    let mut row = vec![
        detail.card.number.to_string(),
        detail.card.name.clone(),
        detail.base.atk.to_string(),
        detail.base.def.to_string(),
        detail.base.hit.to_string(),
    ];
    for range in &detail.cp_ranges {
        row.push(optional_cell(range.low));
        row.push(optional_cell(range.high));
    }
    let fundo: Vec<String> = detail.fundo_levels.iter().map(ToString::to_string).collect();
    row.push(fundo.join(" "));
    row.push(date_cell(detail.released.date));
    row.push(date_cell(detail.shiny.date));
    row
}

/// Rows in dataset order; the per-species work is spread over `pool`.
pub fn export_rows(species: &[Species], now: DateTime<Utc>, pool: &WorkerPool) -> Vec<Vec<String>> {
    pool.install(|| {
        species
            .par_iter()
            .map(|entry| detail_row(&Detail::build(entry, now)))
            .collect()
    })
}

/// Write header plus one row per species; returns the number of data rows.
pub fn write_export<W: io::Write>(
    writer: W,
    species: &[Species],
    now: DateTime<Utc>,
    pool: &WorkerPool,
) -> Result<usize, ExportError> {
    let rows = export_rows(species, now, pool);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_header())?;
    for row in &rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

pub fn export_to_path(
    path: impl AsRef<Path>,
    species: &[Species],
    now: DateTime<Utc>,
    pool: &WorkerPool,
) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let count = write_export(file, species, now, pool)?;
    info!(path = %path.display(), rows = count, "export written");
    Ok(count)
}
