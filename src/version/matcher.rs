//! Selection of catalog versions for a match specification

use std::collections::HashMap;
use std::num::NonZeroUsize;

use semver::Version;
use tracing::debug;

use crate::version::catalog::{CatalogEntry, LATEST_VERSION, MatchSpec};
use crate::version::error::MatchError;
use crate::version::range::VersionRange;
use crate::version::semver::{clean_version, normalize_version};

/// Select the catalog versions matching `spec`, newest first.
///
/// A `latest` sentinel is resolved against `catalog[0]`, entries are
/// filtered by range and date, and at most `per_major` entries survive for
/// each major version line. Returned versions are normalized ("v8.11.3" ->
/// "8.11.3").
pub fn match_versions(
    catalog: &[CatalogEntry],
    spec: &MatchSpec,
    per_major: NonZeroUsize,
) -> Result<Vec<String>, MatchError> {
    let Some(newest) = catalog.first() else {
        return Ok(Vec::new());
    };

    let resolved = if spec.version_range.contains(LATEST_VERSION) {
        let latest = normalize_version(&newest.version)
            .ok_or_else(|| MatchError::LatestUnresolved(newest.version.clone()))?;
        spec.resolve_latest(&latest)
    } else {
        spec.version_range.clone()
    };
    let range = VersionRange::parse(&resolved).ok_or_else(|| {
        MatchError::InvalidSpec(format!("\"{resolved}\" is not a valid version range"))
    })?;

    debug!("Matching catalog of {} entries against {}", catalog.len(), resolved);

    let matching: Vec<Version> = catalog
        .iter()
        .filter(|entry| spec.date_matches(&entry.date))
        .filter_map(|entry| clean_version(&entry.version))
        .filter(|version| range.satisfies(version))
        .collect();

    Ok(cap_per_major(matching, per_major)
        .into_iter()
        .map(|version| version.to_string())
        .collect())
}

/// Keep the first `per_major` versions of every major line, preserving order
fn cap_per_major(versions: Vec<Version>, per_major: NonZeroUsize) -> Vec<Version> {
    let mut seen: HashMap<u64, usize> = HashMap::new();

    versions
        .into_iter()
        .filter(|version| {
            let count = seen.entry(version.major).or_insert(0);
            *count += 1;
            *count <= per_major.get()
        })
        .collect()
}
