//! Assertion helpers for candidate lists.

use nestor::ide::CandidateEdit;

pub fn labels(candidates: &[CandidateEdit]) -> Vec<&str> {
    candidates.iter().map(|c| c.label.as_str()).collect()
}

pub fn insertions(candidates: &[CandidateEdit]) -> Vec<&str> {
    candidates.iter().map(|c| c.insertion_text.as_str()).collect()
}

/// The candidate with `label`, or a panic listing what was offered.
pub fn candidate<'a>(candidates: &'a [CandidateEdit], label: &str) -> &'a CandidateEdit {
    candidates
        .iter()
        .find(|c| c.label == label)
        .unwrap_or_else(|| panic!("Expected candidate '{}'. Got: {:?}", label, labels(candidates)))
}

/// Assert that no candidate carries the absolute marker twice.
pub fn assert_no_doubled_marker(candidates: &[CandidateEdit]) {
    for c in candidates {
        assert!(
            !c.insertion_text.starts_with("::::"),
            "Doubled absolute marker in '{}'",
            c.insertion_text
        );
    }
}
