//! Player profile enrichment pipeline
//!
//! Combines NHL skater ratings with biographical lookup data and writes the
//! enriched profiles as a JSON array for the downstream UI. Three stages run
//! in sequence: load-and-rank the ratings table, derive ages from the lookup
//! table, then left-join and serialize.

pub mod error;
pub mod lookup;
pub mod merge;
pub mod ratings;
pub mod types;

pub use error::{EnrichError, Result};
pub use lookup::load_lookup;
pub use merge::{merge_profiles, write_profiles};
pub use ratings::load_ratings;
pub use types::{JerseyNumber, LookupEntry, PlayerProfile, RatedPlayer};
