//! Species gallery with derived Pokémon GO style stats: CP ranges per level, HP, and
//! HP IV 14/15 breakpoints, over a static base-stat dataset.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod gallery;
pub mod parallel;
pub mod server;
pub mod stats;

pub use error::{DataError, ExportError};
