//! Card and detail view models: what the gallery shows for a species, computed from the
//! stat engine. Rendering-agnostic; the CLI prints [render_text], the API serializes.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::data::species::Species;
use crate::stats::{
    cp_range, days_ago, hit_point_breakpoint, start_of_day, BaseStats, CpRange, LevelLabel,
};

/// Levels listed in the CP range block.
pub const DETAIL_CP_LEVELS: [f64; 7] = [15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0];
/// Levels checked for an IV 14 / IV 15 HP tie.
pub const FUNDO_LEVELS: [f64; 3] = [40.0, 50.0, 51.0];

const NOT_RELEASED: &str = "Not Released";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub number: u32,
    /// `#NNN`, zero padded to three digits.
    pub label: String,
    pub name: String,
    pub sprite: String,
}

impl Card {
    pub fn from_species(species: &Species) -> Self {
        Self {
            number: species.number,
            label: dex_label(species.number),
            name: species.name.clone(),
            sprite: format!("sprites/{}.png", species.number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    pub date: Option<NaiveDate>,
    pub days_ago: Option<i64>,
    pub display: String,
}

impl ReleaseInfo {
    fn build(date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        match date {
            Some(date) => {
                let days = days_ago(start_of_day(date), now);
                Self {
                    date: Some(date),
                    days_ago: Some(days),
                    display: format!(
                        "{} ({} days ago)",
                        date.format("%d/%m/%Y"),
                        format_thousands(days)
                    ),
                }
            }
            None => Self {
                date: None,
                days_ago: None,
                display: NOT_RELEASED.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub card: Card,
    pub base: BaseStats,
    pub cp_ranges: Vec<CpRange>,
    /// Serialized as labels, e.g. `["L40", "L50"]`.
    #[serde(serialize_with = "serialize_labels")]
    pub fundo_levels: Vec<LevelLabel>,
    pub released: ReleaseInfo,
    pub shiny: ReleaseInfo,
}

impl Detail {
    pub fn build(species: &Species, now: DateTime<Utc>) -> Self {
        let base = species.base_stats();
        Self {
            card: Card::from_species(species),
            base,
            cp_ranges: DETAIL_CP_LEVELS
                .iter()
                .map(|&level| cp_range(&base, level))
                .collect(),
            fundo_levels: fundo_levels(&base),
            released: ReleaseInfo::build(species.released, now),
            shiny: ReleaseInfo::build(species.shiny, now),
        }
    }

    pub fn fundo_summary(&self) -> Option<String> {
        if self.fundo_levels.is_empty() {
            return None;
        }
        let labels: Vec<String> = self.fundo_levels.iter().map(ToString::to_string).collect();
        Some(format!("Fundo at {}", labels.join(" • ")))
    }
}

/// Fundo levels among [FUNDO_LEVELS] where HP IV 14 and 15 give the same HP.
pub fn fundo_levels(base: &BaseStats) -> Vec<LevelLabel> {
    FUNDO_LEVELS
        .iter()
        .filter(|&&level| hit_point_breakpoint(base, level).equal)
        .map(|&level| LevelLabel::from_level(level))
        .collect()
}

fn serialize_labels<S>(labels: &[LevelLabel], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(labels.iter().map(ToString::to_string))
}

pub fn dex_label(number: u32) -> String {
    format!("#{number:03}")
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn cp_cell(value: Option<u64>) -> String {
    value.map_or_else(|| "?".to_string(), |cp| cp.to_string())
}

pub fn render_text(detail: &Detail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", detail.card.label, detail.card.name);
    let _ = writeln!(out, "sprite: {}", detail.card.sprite);
    let _ = writeln!(
        out,
        "ATK {} • DEF {} • HP {}",
        detail.base.atk, detail.base.def, detail.base.hit
    );
    let _ = writeln!(out, "CP RANGES (10/10/10 - 15/15/15):");
    for range in &detail.cp_ranges {
        let _ = writeln!(
            out,
            "  {}: {} - {}",
            range.level,
            cp_cell(range.low),
            cp_cell(range.high)
        );
    }
    if let Some(summary) = detail.fundo_summary() {
        let _ = writeln!(out, "{summary}");
    }
    let _ = writeln!(out, "RELEASED: {}", detail.released.display);
    let _ = writeln!(out, "SHINY RELEASED: {}", detail.shiny.display);
    out
}
