//! Runtime configuration loaded from environment variables.
//!
//! | Variable               | Default                   | Description                              |
//! |------------------------|---------------------------|------------------------------------------|
//! | `POGODEX_DATA`         | `data/pokemon.json`       | Species dataset (JSON array)             |
//! | `POGODEX_SEARCH_STATE` | `data/search_state.json`  | File holding the persisted search string |
//! | `POGODEX_BIND`         | `127.0.0.1:3000`          | HTTP listen address for `serve`          |
//! | `POGODEX_WORKERS`      | `0`                       | Export worker threads (0 = Rayon default)|
//! | `POGODEX_LOG`          | `warn`                    | tracing filter (trace/debug/info/warn/error) |

use std::env;
use std::str::FromStr;

pub const DEFAULT_DATA_PATH: &str = "data/pokemon.json";
pub const DEFAULT_SEARCH_STATE_PATH: &str = "data/search_state.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: String,
    pub search_state_path: String,
    pub bind_addr: String,
    /// Worker threads for batch computation; 0 uses the global Rayon pool.
    pub workers: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            search_state_path: DEFAULT_SEARCH_STATE_PATH.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            workers: 0,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Read every variable, falling back to the default when absent or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env_str("POGODEX_DATA", &defaults.data_path),
            search_state_path: env_str("POGODEX_SEARCH_STATE", &defaults.search_state_path),
            bind_addr: env_str("POGODEX_BIND", &defaults.bind_addr),
            workers: env_parse("POGODEX_WORKERS", defaults.workers),
            log_filter: env_str("POGODEX_LOG", &defaults.log_filter),
        }
    }
}

fn env_str(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
