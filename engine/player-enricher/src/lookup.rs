//! Stage 2: load the biographical lookup table and derive each player's age
//! from their birth date.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{EnrichError, Result};
use crate::types::LookupEntry;

/// Raw lookup row, named after the source CSV columns.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawLookupRow {
    playerId: String,
    #[serde(default)]
    primaryNumber: Option<String>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    birthDate: Option<String>,
}

/// Load the lookup table. `reference` is the instant ages are computed
/// against; the caller passes `Utc::now()` in production and a pinned value
/// in tests.
pub fn load_lookup(path: &Path, reference: DateTime<Utc>) -> Result<Vec<LookupEntry>> {
    let file = File::open(path).map_err(|e| EnrichError::from_open(path, e))?;
    let entries = lookup_from_reader(file, path, reference)?;
    info!("Loaded {} lookup entries from {:?}", entries.len(), path);
    Ok(entries)
}

fn lookup_from_reader<R: Read>(
    rdr: R,
    path: &Path,
    reference: DateTime<Utc>,
) -> Result<Vec<LookupEntry>> {
    let mut reader = csv::Reader::from_reader(rdr);
    reader
        .headers()
        .map_err(|e| EnrichError::Csv { path: path.to_path_buf(), source: e })?;

    let mut entries = Vec::new();
    for row in reader.deserialize::<RawLookupRow>() {
        match row {
            Ok(raw) => {
                let age = raw
                    .birthDate
                    .as_deref()
                    .and_then(parse_birth_date)
                    .map(|birth| age_in_years(birth, reference));
                entries.push(LookupEntry {
                    id: raw.playerId.trim().to_string(),
                    jersey_number: non_empty(raw.primaryNumber),
                    height: non_empty(raw.height),
                    age,
                });
            }
            Err(e) => warn!("skipping malformed lookup row: {}", e),
        }
    }
    Ok(entries)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Best-effort birth date parsing. Unparseable dates yield `None`, which
/// surfaces as the "?" age placeholder downstream.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// Approximate age in whole years: elapsed days divided by 365.25, rounded.
/// Birth dates in the future produce negative ages; the source data is
/// trusted not to contain them.
fn age_in_years(birth: NaiveDate, reference: DateTime<Utc>) -> i64 {
    let days = (reference.date_naive() - birth).num_days();
    (days as f64 / 365.25).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_age_from_birth_date() {
        let birth = NaiveDate::from_ymd_opt(1997, 1, 13).unwrap();
        assert_eq!(age_in_years(birth, reference()), 28);
    }

    #[test]
    fn test_parse_birth_date_formats() {
        assert_eq!(
            parse_birth_date("1997-01-13"),
            Some(NaiveDate::from_ymd_opt(1997, 1, 13).unwrap())
        );
        assert_eq!(
            parse_birth_date("1997-01-13 00:00:00"),
            Some(NaiveDate::from_ymd_opt(1997, 1, 13).unwrap())
        );
        assert_eq!(
            parse_birth_date("1997-01-13T00:00:00Z"),
            Some(NaiveDate::from_ymd_opt(1997, 1, 13).unwrap())
        );
        assert_eq!(parse_birth_date("January 13, 1997"), None);
        assert_eq!(parse_birth_date(""), None);
    }

    #[test]
    fn test_load_resolves_ages_and_blanks() {
        let csv = "playerId,primaryNumber,height,birthDate\n\
                   8478402,34,\"6'2\"\"\",1997-01-13\n\
                   8471214,,,garbage\n";
        let entries =
            lookup_from_reader(Cursor::new(csv), Path::new("test.csv"), reference()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "8478402");
        assert_eq!(entries[0].jersey_number.as_deref(), Some("34"));
        assert_eq!(entries[0].height.as_deref(), Some("6'2\""));
        assert_eq!(entries[0].age, Some(28));

        // Unparseable date and empty cells degrade to None, not an error
        assert_eq!(entries[1].jersey_number, None);
        assert_eq!(entries[1].height, None);
        assert_eq!(entries[1].age, None);
    }

    #[test]
    fn test_missing_file_is_its_own_error() {
        let err = load_lookup(Path::new("does_not_exist.csv"), reference()).unwrap_err();
        assert!(matches!(err, EnrichError::MissingInput(_)));
    }
}
