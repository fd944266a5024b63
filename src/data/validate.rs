use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::data::species::{load_species, Species};
use crate::error::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub record_count: usize,
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

fn context_for(index: usize, entry: &Species) -> String {
    format!("species[{index}] #{}", entry.number)
}

/// Check identity and sanity of every record. Errors make the dataset unusable; warnings
/// flag suspicious but displayable entries.
pub fn validate_species(species: &[Species]) -> ValidationReport {
    let mut report = ValidationReport {
        record_count: species.len(),
        ..ValidationReport::default()
    };
    let mut seen = HashSet::new();

    for (index, entry) in species.iter().enumerate() {
        let context = context_for(index, entry);
        if entry.number == 0 {
            report.push(ValidationSeverity::Error, &context, "number must be positive");
        }
        if !seen.insert(entry.number) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate number {}", entry.number),
            );
        }
        if entry.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "name is empty");
        }
        if entry.atk == 0 && entry.def == 0 && entry.hit == 0 {
            report.push(ValidationSeverity::Warning, &context, "all base stats are zero");
        }
        if let (Some(released), Some(shiny)) = (entry.released, entry.shiny) {
            if shiny < released {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    format!("shiny date {shiny} precedes release date {released}"),
                );
            }
        }
    }

    report
}

pub fn validate_species_file(path: impl AsRef<Path>) -> Result<ValidationReport, DataError> {
    let species = load_species(path)?;
    Ok(validate_species(&species))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn species(number: u32, name: &str) -> Species {
        Species {
            number,
            name: name.to_string(),
            atk: 100,
            def: 100,
            hit: 100,
            released: None,
            shiny: None,
        }
    }

    #[test]
    fn clean_dataset_has_no_diagnostics() {
        let report = validate_species(&[species(1, "Bulbasaur"), species(2, "Ivysaur")]);
        assert_eq!(report.record_count, 2);
        assert!(report.diagnostics.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn identity_problems_are_errors() {
        let report = validate_species(&[species(0, "Zero"), species(3, " "), species(3, "Dup")]);
        assert!(report.has_errors());
        assert_eq!(report.count(ValidationSeverity::Error), 3);
        assert!(report
            .diagnostics
            .iter()
            .any(|diag| diag.message == "duplicate number 3"));
    }

    #[test]
    fn suspicious_records_are_warnings() {
        let mut zero = species(10, "Blank");
        zero.atk = 0;
        zero.def = 0;
        zero.hit = 0;
        let mut early = species(11, "Early");
        early.released = NaiveDate::from_ymd_opt(2020, 5, 1);
        early.shiny = NaiveDate::from_ymd_opt(2019, 5, 1);

        let report = validate_species(&[zero, early]);
        assert!(!report.has_errors());
        assert_eq!(report.count(ValidationSeverity::Warning), 2);
        assert_eq!(
            report.diagnostics[0].to_string(),
            "[warning] species[0] #10: all base stats are zero"
        );
    }
}
