//! Merging matched versions into an existing version list

use std::collections::VecDeque;

/// Merge newly matched versions into the previously configured list.
///
/// Starts from `existing` (or from nothing when `replace` is set) and pushes
/// every matched version that is not present yet to the front. Because each
/// version is prepended in turn, the last matched version ends up first:
/// merging `["10.2.0", "8.11.3"]` into `["6.14.2"]` gives
/// `["8.11.3", "10.2.0", "6.14.2"]`.
pub fn merge_versions(existing: &[String], matched: &[String], replace: bool) -> Vec<String> {
    let mut merged: VecDeque<String> = if replace {
        VecDeque::new()
    } else {
        existing.iter().cloned().collect()
    };

    for version in matched {
        if !merged.contains(version) {
            merged.push_front(version.clone());
        }
    }

    merged.into()
}
