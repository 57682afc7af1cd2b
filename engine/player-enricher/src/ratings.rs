//! Stage 1: load the ratings table, round ratings, rank the population,
//! and derive each player's narrative trait.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{EnrichError, Result};
use crate::types::RatedPlayer;

/// Raw ratings row, named after the source CSV columns. Extra columns in
/// the file are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawRatingRow {
    playerId: String,
    name: String,
    team: String,
    position: String,
    Overall_Talent_Rating: f64,
    /// Optional column; an absent header or empty cell both mean "no data"
    /// and downgrade the trait logic to its takeaway-free default.
    #[serde(default)]
    I_F_takeaways_per60: Option<f64>,
}

/// Load the ratings table and produce one ranked, trait-annotated
/// `RatedPlayer` per row, in the file's row order.
pub fn load_ratings(path: &Path) -> Result<Vec<RatedPlayer>> {
    let file = File::open(path).map_err(|e| EnrichError::from_open(path, e))?;
    let players = ratings_from_reader(file, path)?;
    info!("Loaded {} rated players from {:?}", players.len(), path);
    Ok(players)
}

fn ratings_from_reader<R: Read>(rdr: R, path: &Path) -> Result<Vec<RatedPlayer>> {
    let mut reader = csv::Reader::from_reader(rdr);
    reader
        .headers()
        .map_err(|e| EnrichError::Csv { path: path.to_path_buf(), source: e })?;

    let mut players = Vec::new();
    for row in reader.deserialize::<RawRatingRow>() {
        match row {
            Ok(raw) => {
                if !raw.Overall_Talent_Rating.is_finite() {
                    warn!("skipping '{}': non-finite rating", raw.name.trim());
                    continue;
                }
                players.push(RatedPlayer {
                    id: raw.playerId.trim().to_string(),
                    player_name: raw.name.trim().to_string(),
                    team_abbr: raw.team.trim().to_string(),
                    position: raw.position.trim().to_string(),
                    // Round half away from zero, matching f64::round
                    rating: raw.Overall_Talent_Rating.round() as i32,
                    rating_rank: 0,
                    unique_trait: String::new(),
                    takeaways_per60: raw.I_F_takeaways_per60.unwrap_or(0.0),
                });
            }
            Err(e) => warn!("skipping malformed ratings row: {}", e),
        }
    }

    assign_ranks(&mut players);
    for p in players.iter_mut() {
        p.unique_trait = derive_trait(p.rating_rank, &p.position, p.rating, p.takeaways_per60);
    }
    Ok(players)
}

/// Assign competition ranks: descending by rating, ties sharing the minimum
/// rank (1, 1, 3, ...). Row order is left untouched.
fn assign_ranks(players: &mut [RatedPlayer]) {
    let mut ratings: Vec<i32> = players.iter().map(|p| p.rating).collect();
    ratings.sort_unstable_by(|a, b| b.cmp(a));

    for p in players.iter_mut() {
        // Number of strictly higher ratings, plus one
        let higher = ratings.partition_point(|&r| r > p.rating);
        p.rating_rank = (higher + 1) as u32;
    }
}

/// Derive the narrative trait for one player. First matching branch wins;
/// every player lands in exactly one branch.
fn derive_trait(rank: u32, position: &str, rating: i32, takeaways_per60: f64) -> String {
    if rank == 1 {
        "League's highest-rated player. An elite playmaker.".to_string()
    } else if rank <= 10 {
        format!("Top 10 rated player, elite {position} talent.")
    } else if rank <= 50 {
        format!("Top 50 rated player. A standout {position} in the league.")
    } else if rating >= 80 {
        format!("An excellent top-tier {position}, known for high offensive contributions.")
    } else if takeaways_per60 > 1.0 {
        "Exceptional on the forecheck, known for high takeaway rate.".to_string()
    } else {
        "Solid rotational player with consistent play.".to_string()
    }
}
