use crate::data::species::Species;

/// Case-insensitive subsequence match: every needle character appears in the haystack in
/// order, gaps allowed. An empty needle matches everything.
pub fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    let needle = needle.to_lowercase();
    let haystack = haystack.to_lowercase();

    let mut remaining = haystack.chars();
    needle
        .chars()
        .all(|wanted| remaining.by_ref().any(|candidate| candidate == wanted))
}

/// Species whose name matches `term`, in dataset order.
pub fn filter_species<'a>(species: &'a [Species], term: &str) -> Vec<&'a Species> {
    species
        .iter()
        .filter(|entry| fuzzy_match(term, &entry.name))
        .collect()
}
