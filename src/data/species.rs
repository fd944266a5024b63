//! Species dataset: base stats plus optional release dates, loaded from a JSON array.
//! The file is an external data contract; records are only ever read.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::DataError;
use crate::stats::BaseStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub number: u32,
    pub name: String,
    pub atk: u32,
    pub def: u32,
    pub hit: u32,
    /// Absent, null, empty or unparseable dates all mean "not released".
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub released: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub shiny: Option<NaiveDate>,
}

impl Species {
    pub fn base_stats(&self) -> BaseStats {
        BaseStats::new(self.atk, self.def, self.hit)
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its UTC date).
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = parse_release_date(&value);
        if parsed.is_none() && !value.trim().is_empty() {
            warn!(value = %value, "unparseable date treated as not released");
        }
        parsed
    }))
}

/// Load the dataset and sort it ascending by `number`.
pub fn load_species(path: impl AsRef<Path>) -> Result<Vec<Species>, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut species = parse_species(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    species.sort_by_key(|entry| entry.number);
    debug!(path = %path.display(), count = species.len(), "species dataset loaded");
    Ok(species)
}

pub fn parse_species(raw: &str) -> Result<Vec<Species>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn find_by_number(species: &[Species], number: u32) -> Option<&Species> {
    species.iter().find(|entry| entry.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_and_without_dates() {
        let raw = r#"[
            {"number": 4, "name": "Charmander", "atk": 116, "def": 93, "hit": 118, "released": "2016-07-06"},
            {"number": 1, "name": "Bulbasaur", "atk": 118, "def": 111, "hit": 128, "shiny": null},
            {"number": 7, "name": "Squirtle", "atk": 94, "def": 121, "hit": 127, "released": "2016-07-06T00:00:00Z", "shiny": ""}
        ]"#;
        let species = parse_species(raw).unwrap();
        assert_eq!(species.len(), 3);
        assert_eq!(species[0].released, NaiveDate::from_ymd_opt(2016, 7, 6));
        assert_eq!(species[1].released, None);
        assert_eq!(species[1].shiny, None);
        assert_eq!(species[2].released, NaiveDate::from_ymd_opt(2016, 7, 6));
        assert_eq!(species[2].shiny, None);
        assert_eq!(species[1].base_stats(), BaseStats::new(118, 111, 128));
    }

    #[test]
    fn garbage_dates_are_not_released() {
        let raw = r#"[{"number": 25, "name": "Pikachu", "atk": 112, "def": 96, "hit": 111, "released": "soon"}]"#;
        let species = parse_species(raw).unwrap();
        assert_eq!(species[0].released, None);
    }

    #[test]
    fn rfc3339_offsets_reduce_to_utc_date() {
        assert_eq!(
            parse_release_date("2020-01-01T01:00:00+03:00"),
            NaiveDate::from_ymd_opt(2019, 12, 31)
        );
        assert_eq!(parse_release_date("   "), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_species("does/not/exist.json").unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn find_by_number_matches_identity() {
        let species = parse_species(
            r#"[{"number": 150, "name": "Mewtwo", "atk": 300, "def": 182, "hit": 214}]"#,
        )
        .unwrap();
        assert_eq!(find_by_number(&species, 150).map(|s| s.name.as_str()), Some("Mewtwo"));
        assert!(find_by_number(&species, 151).is_none());
    }
}
