//! Stage 3: left-join the rated players onto the lookup entries, fill
//! placeholders for missing enrichment data, and write the output JSON.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{EnrichError, Result};
use crate::types::{JerseyNumber, LookupEntry, PlayerProfile, RatedPlayer};

/// Left outer join by id. Every rated player appears exactly once in the
/// result, in input order; lookup entries without a rating are dropped.
/// When the lookup table repeats an id, the first entry wins.
pub fn merge_profiles(rated: Vec<RatedPlayer>, lookup: Vec<LookupEntry>) -> Vec<PlayerProfile> {
    let mut by_id: HashMap<String, LookupEntry> = HashMap::with_capacity(lookup.len());
    for entry in lookup {
        by_id.entry(entry.id.clone()).or_insert(entry);
    }

    rated
        .into_iter()
        .map(|p| {
            let hit = by_id.get(&p.id);
            let jersey_number = coerce_jersey(hit.and_then(|e| e.jersey_number.as_deref()));
            let age = match hit.and_then(|e| e.age) {
                Some(age) => age.to_string(),
                None => "?".to_string(),
            };
            let height = hit
                .and_then(|e| e.height.clone())
                .unwrap_or_else(|| "?".to_string());

            PlayerProfile {
                id: p.id,
                team_name: p.team_abbr.clone(),
                team_abbr: p.team_abbr,
                player_name: p.player_name,
                position: p.position,
                rating: p.rating,
                unique_trait: p.unique_trait,
                is_unique_fact: true,
                jersey_number,
                age,
                height,
            }
        })
        .collect()
}

/// Coerce a raw jersey value to an integer, accepting float artifacts like
/// "34.0". Anything that is not a finite whole number becomes "XX".
fn coerce_jersey(raw: Option<&str>) -> JerseyNumber {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(n) if n.is_finite() && n.fract() == 0.0 => JerseyNumber::Number(n as i64),
        _ => JerseyNumber::placeholder(),
    }
}

/// Serialize the profiles as an indented JSON array and overwrite `path`.
/// Serialization happens before the file is touched, so a failed run never
/// leaves a partial file behind.
pub fn write_profiles(path: &Path, profiles: &[PlayerProfile]) -> Result<()> {
    let json = serde_json::to_string_pretty(profiles)?;
    std::fs::write(path, json)
        .map_err(|e| EnrichError::Io { path: path.to_path_buf(), source: e })?;
    info!("Wrote {} profiles to {:?}", profiles.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: &str) -> RatedPlayer {
        RatedPlayer {
            id: id.to_string(),
            player_name: "A. Example".to_string(),
            team_abbr: "TOR".to_string(),
            position: "C".to_string(),
            rating: 97,
            rating_rank: 1,
            unique_trait: "League's highest-rated player. An elite playmaker.".to_string(),
            takeaways_per60: 0.0,
        }
    }

    fn entry(id: &str, jersey: Option<&str>, height: Option<&str>, age: Option<i64>) -> LookupEntry {
        LookupEntry {
            id: id.to_string(),
            jersey_number: jersey.map(str::to_string),
            height: height.map(str::to_string),
            age,
        }
    }

    #[test]
    fn test_matched_join_fills_enrichment_fields() {
        let profiles = merge_profiles(
            vec![rated("8478402")],
            vec![entry("8478402", Some("34"), Some("6'2\""), Some(28))],
        );

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].jersey_number, JerseyNumber::Number(34));
        assert_eq!(profiles[0].age, "28");
        assert_eq!(profiles[0].height, "6'2\"");
        assert_eq!(profiles[0].team_name, profiles[0].team_abbr);
        assert!(profiles[0].is_unique_fact);
    }

    #[test]
    fn test_unmatched_left_record_gets_placeholders() {
        let profiles = merge_profiles(vec![rated("999")], vec![entry("8478402", Some("34"), None, None)]);

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].jersey_number, JerseyNumber::placeholder());
        assert_eq!(profiles[0].age, "?");
        assert_eq!(profiles[0].height, "?");
    }

    #[test]
    fn test_unmatched_right_records_are_dropped() {
        let profiles = merge_profiles(
            vec![rated("1")],
            vec![entry("1", None, None, None), entry("2", Some("88"), None, None)],
        );

        // Output cardinality equals left cardinality
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "1");
    }

    #[test]
    fn test_duplicate_lookup_id_first_entry_wins() {
        let profiles = merge_profiles(
            vec![rated("1")],
            vec![entry("1", Some("10"), None, None), entry("1", Some("20"), None, None)],
        );

        assert_eq!(profiles[0].jersey_number, JerseyNumber::Number(10));
    }

    #[test]
    fn test_jersey_coercion() {
        assert_eq!(coerce_jersey(Some("34")), JerseyNumber::Number(34));
        assert_eq!(coerce_jersey(Some("34.0")), JerseyNumber::Number(34));
        assert_eq!(coerce_jersey(Some("34.5")), JerseyNumber::placeholder());
        assert_eq!(coerce_jersey(Some("abc")), JerseyNumber::placeholder());
        assert_eq!(coerce_jersey(Some("")), JerseyNumber::placeholder());
        assert_eq!(coerce_jersey(None), JerseyNumber::placeholder());
    }

    #[test]
    fn test_serialized_key_order_is_stable() {
        let profiles = merge_profiles(vec![rated("1")], vec![]);
        let json = serde_json::to_string_pretty(&profiles).unwrap();

        let keys = [
            "\"id\"",
            "\"team_name\"",
            "\"team_abbr\"",
            "\"player_name\"",
            "\"position\"",
            "\"rating\"",
            "\"unique_trait\"",
            "\"is_unique_fact\"",
            "\"jersey_number\"",
            "\"age\"",
            "\"height\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Placeholders are serialized as strings, numbers as numbers
        assert!(json.contains("\"jersey_number\": \"XX\""));
        assert!(json.contains("\"age\": \"?\""));
    }
}
