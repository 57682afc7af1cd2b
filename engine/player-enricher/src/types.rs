use serde::Serialize;

/// A skater's base profile derived from the ratings table.
///
/// This is the left side of the enrichment join; one record per ratings row.
#[derive(Debug, Clone)]
pub struct RatedPlayer {
    /// Stable join key (ratings `playerId`, coerced to string)
    pub id: String,
    /// Player name (e.g., "Auston Matthews")
    pub player_name: String,
    /// Team abbreviation (e.g., "TOR")
    pub team_abbr: String,
    /// Position code (e.g., "C", "D", "LW")
    pub position: String,
    /// Overall talent rating, rounded to the nearest integer
    pub rating: i32,
    /// Rank over the full population, descending by rating (1 = best).
    /// Ties share the minimum rank.
    pub rating_rank: u32,
    /// Narrative trait derived from rank/position/rating/takeaways
    pub unique_trait: String,
    /// Takeaways per 60 minutes; 0.0 when the source column is absent
    pub takeaways_per60: f64,
}

/// Biographical fields for one player from the lookup table.
///
/// Everything except the id is optional; missing values resolve to
/// placeholders at merge time rather than dropping the record.
#[derive(Debug, Clone)]
pub struct LookupEntry {
    /// Join key (lookup `playerId`, coerced to string)
    pub id: String,
    /// Raw jersey number as it appeared in the source (may be "34" or "34.0")
    pub jersey_number: Option<String>,
    /// Height descriptor (e.g., "6'2\"")
    pub height: Option<String>,
    /// Age in years, derived from birth date and the reference instant
    pub age: Option<i64>,
}

/// Jersey number as it appears in the output: an integer when the source
/// value is a finite whole number, otherwise the literal placeholder "XX".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JerseyNumber {
    Number(i64),
    Placeholder(String),
}

impl JerseyNumber {
    pub fn placeholder() -> Self {
        JerseyNumber::Placeholder("XX".to_string())
    }
}

/// The final enriched record written to the output JSON.
///
/// Field order here is the serialization order; every output object has
/// exactly these 11 keys regardless of how much source data was missing.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub id: String,
    /// Currently a direct copy of `team_abbr` (no separate source field)
    pub team_name: String,
    pub team_abbr: String,
    pub player_name: String,
    pub position: String,
    pub rating: i32,
    pub unique_trait: String,
    /// Constant `true` for every record
    pub is_unique_fact: bool,
    pub jersey_number: JerseyNumber,
    /// Age in years as a string, or "?" when unresolvable
    pub age: String,
    /// Height descriptor, or "?" when missing
    pub height: String,
}
