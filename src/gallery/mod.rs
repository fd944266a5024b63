pub mod detail;
pub mod export_csv;
pub mod search;

pub use detail::{
    dex_label, format_thousands, fundo_levels, render_text, Card, Detail, ReleaseInfo,
    DETAIL_CP_LEVELS, FUNDO_LEVELS,
};
pub use export_csv::{detail_row, export_header, export_rows, export_to_path, write_export};
pub use search::{filter_species, fuzzy_match};
