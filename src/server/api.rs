use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::search_state::SearchStateStore;
use crate::data::species::{find_by_number, Species};
use crate::error::DataError;
use crate::gallery::{filter_species, Card, Detail};
use crate::stats::{hit_points, DEFAULT_HP_IV, DEFAULT_HP_LEVEL};

/// Everything a request handler reads: the loaded dataset, the search store and a clock.
#[derive(Debug, Clone)]
pub struct AppState {
    pub species: Vec<Species>,
    pub search_store: SearchStateStore,
    pub clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(species: Vec<Species>, search_store: SearchStateStore) -> Self {
        Self {
            species,
            search_store,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("species #{0} not found")]
    NotFound(u32),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid request body: {0}")]
    Parse(serde_json::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Decoded value of `key` in the query string of `path`. `+` and `%XX` escapes are decoded.
pub fn query_param(path: &str, key: &str) -> Option<String> {
    let query = path.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        (name == key).then(|| percent_decode(value))
    })
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        out.push((high << 4) | low);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).map(|digit| digit as u8)
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "pogodex-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
struct SpeciesListResponse<'a> {
    search: &'a str,
    count: usize,
    species: Vec<Card>,
}

pub fn species_list_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let term = query_param(path, "search").unwrap_or_default();
    let species: Vec<Card> = filter_species(&state.species, &term)
        .into_iter()
        .map(Card::from_species)
        .collect();
    Ok(serde_json::to_string_pretty(&SpeciesListResponse {
        search: &term,
        count: species.len(),
        species,
    })?)
}

pub fn parse_number(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ApiError::BadRequest(format!("invalid species number '{raw}'")))
}

fn lookup(state: &AppState, number: u32) -> Result<&Species, ApiError> {
    find_by_number(&state.species, number).ok_or(ApiError::NotFound(number))
}

pub fn species_detail_payload(state: &AppState, raw_number: &str) -> Result<String, ApiError> {
    let species = lookup(state, parse_number(raw_number)?)?;
    let detail = Detail::build(species, (state.clock)());
    Ok(serde_json::to_string_pretty(&detail)?)
}

#[derive(Debug, Serialize)]
struct HitPointsResponse {
    number: u32,
    iv: i32,
    level: f64,
    hp: i64,
}

/// HP for `?iv=&level=` (defaults 15 and 40). Off-table levels follow the engine's fallback.
pub fn species_hp_payload(
    state: &AppState,
    raw_number: &str,
    path: &str,
) -> Result<String, ApiError> {
    let species = lookup(state, parse_number(raw_number)?)?;
    let iv = match query_param(path, "iv") {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| ApiError::BadRequest(format!("invalid iv '{raw}'")))?,
        None => DEFAULT_HP_IV,
    };
    let level = match query_param(path, "level") {
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|level| level.is_finite())
            .ok_or_else(|| ApiError::BadRequest(format!("invalid level '{raw}'")))?,
        None => DEFAULT_HP_LEVEL,
    };
    let hp = hit_points(&species.base_stats(), iv, level);
    Ok(serde_json::to_string_pretty(&HitPointsResponse {
        number: species.number,
        iv,
        level,
        hp,
    })?)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPayload {
    pub search: String,
}

pub fn search_get_payload(state: &AppState) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&SearchPayload {
        search: state.search_store.load(),
    })?)
}

pub fn search_put_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let request: SearchPayload = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let stored = state.search_store.save(&request.search)?;
    Ok(serde_json::to_string_pretty(&SearchPayload { search: stored })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_decodes_values() {
        assert_eq!(query_param("/api/species?search=mr+mime", "search").as_deref(), Some("mr mime"));
        assert_eq!(query_param("/api/species?a=1&search=%C3%A9", "search").as_deref(), Some("é"));
        assert_eq!(query_param("/api/species?search", "search").as_deref(), Some(""));
        assert_eq!(query_param("/api/species", "search"), None);
        assert_eq!(query_param("/x?search=100%", "search").as_deref(), Some("100%"));
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(parse_number("25").unwrap(), 25);
        assert!(matches!(parse_number("pika"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_number("-1"), Err(ApiError::BadRequest(_))));
    }
}
