use semver::{BuildMetadata, Version};

/// Strip everything in front of the first digit ("v10.2.0" -> "10.2.0").
pub fn strip_version_prefix(version: &str) -> &str {
    version
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit())
}

/// Parse a published version string, tolerating a "v"/"=" prefix.
///
/// Build metadata is dropped so that ordering and equality only consider
/// `major.minor.patch[-prerelease]`.
///
/// Examples:
/// - "v10.2.0" -> Version(10, 2, 0)
/// - "8.11.3+build.7" -> Version(8, 11, 3)
/// - "latest" -> None
pub fn clean_version(version: &str) -> Option<Version> {
    let mut parsed = Version::parse(strip_version_prefix(version)).ok()?;
    parsed.build = BuildMetadata::EMPTY;
    Some(parsed)
}

/// Normalize a version string into its canonical form ("v8.11.3" -> "8.11.3").
pub fn normalize_version(version: &str) -> Option<String> {
    clean_version(version).map(|v| v.to_string())
}
