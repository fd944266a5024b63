pub mod search_state;
pub mod species;
pub mod validate;

pub use search_state::{SearchStateStore, SEARCH_KEY};
pub use species::{find_by_number, load_species, parse_release_date, parse_species, Species};
pub use validate::{
    validate_species, validate_species_file, ValidationDiagnostic, ValidationReport,
    ValidationSeverity,
};
