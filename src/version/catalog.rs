//! Catalog entries and match specifications

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::version::error::MatchError;
use crate::version::range::VersionRange;

/// Sentinel that resolves to the newest version in the catalog
pub const LATEST_VERSION: &str = "latest";

/// Placeholder used to validate ranges before the catalog is known
const LATEST_PLACEHOLDER: &str = "0.0.0";

/// One published version, as listed by the remote index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub version: String,
    #[serde(default)]
    pub date: String,
}

impl CatalogEntry {
    pub fn new(version: &str, date: &str) -> Self {
        Self {
            version: version.to_string(),
            date: date.to_string(),
        }
    }
}

/// Which catalog entries to select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpec {
    /// Range expression, may contain the `latest` sentinel
    pub version_range: String,
    pub min_date: Option<DateTime<Utc>>,
    pub max_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredSpec {
    version: Option<String>,
    min_date: Option<String>,
    max_date: Option<String>,
}

impl MatchSpec {
    /// Build a spec from a plain range string
    pub fn new(version_range: &str) -> Result<Self, MatchError> {
        validate_range(version_range)?;
        Ok(Self {
            version_range: version_range.to_string(),
            min_date: None,
            max_date: None,
        })
    }

    /// Build a spec from a configuration value: either a range string or an
    /// object `{ "version": ..., "minDate"?: ..., "maxDate"?: ... }`
    pub fn from_value(value: &serde_json::Value) -> Result<Self, MatchError> {
        match value {
            serde_json::Value::String(range) => Self::new(range),
            serde_json::Value::Object(_) => {
                let structured: StructuredSpec = serde_json::from_value(value.clone())
                    .map_err(|e| MatchError::InvalidSpec(e.to_string()))?;

                let version = structured.version.ok_or_else(|| {
                    MatchError::InvalidSpec("version match object has no \"version\" field".into())
                })?;

                let mut spec = Self::new(&version)?;
                spec.min_date = structured
                    .min_date
                    .as_deref()
                    .map(parse_bound)
                    .transpose()?;
                spec.max_date = structured
                    .max_date
                    .as_deref()
                    .map(parse_bound)
                    .transpose()?;
                Ok(spec)
            }
            other => Err(MatchError::InvalidSpec(format!(
                "type of version should be a string or an object, got {other}"
            ))),
        }
    }

    pub fn with_min_date(mut self, min_date: DateTime<Utc>) -> Self {
        self.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: DateTime<Utc>) -> Self {
        self.max_date = Some(max_date);
        self
    }

    /// Replace every `latest` sentinel with the given version
    pub fn resolve_latest(&self, latest: &str) -> String {
        self.version_range.replace(LATEST_VERSION, latest)
    }

    /// Whether a catalog date falls inside the (inclusive) date bounds
    pub fn date_matches(&self, date: &str) -> bool {
        if self.min_date.is_none() && self.max_date.is_none() {
            return true;
        }

        let Some(date) = parse_date(date) else {
            return false;
        };

        self.min_date.is_none_or(|min| date >= min) && self.max_date.is_none_or(|max| date <= max)
    }
}

fn validate_range(version_range: &str) -> Result<(), MatchError> {
    let probe = version_range.replace(LATEST_VERSION, LATEST_PLACEHOLDER);
    match VersionRange::parse(&probe) {
        Some(_) => Ok(()),
        None => Err(MatchError::InvalidSpec(format!(
            "\"{version_range}\" is not a valid version range"
        ))),
    }
}

fn parse_bound(raw: &str) -> Result<DateTime<Utc>, MatchError> {
    parse_date(raw).ok_or_else(|| MatchError::InvalidSpec(format!("invalid date: {raw}")))
}

/// Parse an ISO-ish date: "2018-06-12", "2018-06-12T10:00:00" or RFC 3339.
/// Dates without a time are midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn date(raw: &str) -> DateTime<Utc> {
        parse_date(raw).unwrap()
    }

    #[test]
    fn from_value_accepts_plain_string() {
        let spec = MatchSpec::from_value(&json!(">=8")).unwrap();

        assert_eq!(spec, MatchSpec::new(">=8").unwrap());
        assert_eq!(spec.min_date, None);
        assert_eq!(spec.max_date, None);
    }

    #[test]
    fn from_value_accepts_structured_object() {
        let spec = MatchSpec::from_value(&json!({
            "version": "^10",
            "minDate": "2018-05-01",
            "maxDate": "2018-07-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(spec.version_range, "^10");
        assert_eq!(spec.min_date, Some(date("2018-05-01")));
        assert_eq!(spec.max_date, Some(date("2018-07-01T12:00:00Z")));
    }

    #[rstest]
    #[case(json!(10))]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!(["latest"]))]
    #[case(json!({ "minDate": "2018-01-01" }))]
    #[case(json!({ "version": 10 }))]
    #[case(json!({ "version": "latest", "minDate": "yesterday" }))]
    #[case(json!("not a range"))]
    fn from_value_rejects_malformed_specs(#[case] value: serde_json::Value) {
        assert!(matches!(
            MatchSpec::from_value(&value),
            Err(MatchError::InvalidSpec(_))
        ));
    }

    #[rstest]
    #[case("latest")]
    #[case(">=latest")]
    #[case("^6 || latest")]
    fn ranges_with_latest_sentinel_are_valid(#[case] range: &str) {
        assert!(MatchSpec::new(range).is_ok());
    }

    #[test]
    fn resolve_latest_replaces_every_occurrence() {
        let spec = MatchSpec::new("latest || <latest").unwrap();
        assert_eq!(spec.resolve_latest("10.2.0"), "10.2.0 || <10.2.0");
    }

    #[rstest]
    #[case(None, None, "2018-06-12", true)]
    #[case(None, None, "garbage", true)]
    #[case(Some("2018-06-01"), Some("2018-06-30"), "2018-06-12", true)]
    #[case(Some("2018-06-01"), Some("2018-06-30"), "2018-06-01", true)]
    #[case(Some("2018-06-01"), Some("2018-06-30"), "2018-06-30", true)]
    #[case(Some("2018-06-01"), Some("2018-06-30"), "2018-07-01", false)]
    #[case(Some("2018-06-01"), None, "2018-06-01", true)]
    #[case(Some("2018-06-01"), None, "2018-05-31", false)]
    #[case(None, Some("2018-06-30"), "2018-06-30", true)]
    #[case(None, Some("2018-06-30"), "2018-07-01", false)]
    #[case(Some("2018-06-01"), None, "garbage", false)]
    fn date_matches_uses_inclusive_bounds(
        #[case] min: Option<&str>,
        #[case] max: Option<&str>,
        #[case] entry_date: &str,
        #[case] expected: bool,
    ) {
        let mut spec = MatchSpec::new("*").unwrap();
        if let Some(min) = min {
            spec = spec.with_min_date(date(min));
        }
        if let Some(max) = max {
            spec = spec.with_max_date(date(max));
        }

        assert_eq!(spec.date_matches(entry_date), expected);
    }

    #[test]
    fn catalog_entry_ignores_extra_fields_and_defaults_date() {
        let entries: Vec<CatalogEntry> = serde_json::from_value(json!([
            { "version": "v10.2.0", "date": "2018-05-23", "lts": false, "files": [] },
            { "version": "v10.1.0" }
        ]))
        .unwrap();

        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("v10.2.0", "2018-05-23"),
                CatalogEntry::new("v10.1.0", ""),
            ]
        );
    }
}
