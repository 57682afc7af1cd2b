use anyhow::Result;
use chrono::Utc;
use player_enricher::{
    load_lookup, load_ratings, merge_profiles, write_profiles, EnrichError, JerseyNumber,
    PlayerProfile,
};
use std::path::Path;
use tracing::info;

const RATINGS_FILE: &str = "all_skaters_ratings_final.csv";
const LOOKUP_FILE: &str = "allPlayersLookup.csv";
const OUTPUT_FILE: &str = "nhl_players.json";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Building enriched player profiles...");

    let Some(rated) = check_loaded(load_ratings(Path::new(RATINGS_FILE)))? else {
        return Ok(());
    };
    let Some(lookup) = check_loaded(load_lookup(Path::new(LOOKUP_FILE), Utc::now()))? else {
        return Ok(());
    };

    let profiles = merge_profiles(rated, lookup);
    write_profiles(Path::new(OUTPUT_FILE), &profiles)?;

    println!("Successfully created '{OUTPUT_FILE}'.");
    println!("--- Sample of final data ---");
    print_preview(&profiles);

    info!("Profile build completed successfully");
    Ok(())
}

/// A missing input file is reported on stdout and ends the run cleanly with
/// no output file; every other load error propagates.
fn check_loaded<T>(result: player_enricher::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(EnrichError::MissingInput(path)) => {
            println!("Error: '{}' not found.", path.display());
            println!("Please ensure this file is in the same directory.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the first few profiles as a fixed-width table.
fn print_preview(profiles: &[PlayerProfile]) {
    println!(
        "{:<10} {:<22} {:<5} {:<4} {:<7} {:<5} {:<4} {:<8}",
        "Id", "Name", "Team", "Pos", "Rating", "No.", "Age", "Height"
    );
    println!("{}", "-".repeat(70));

    for p in profiles.iter().take(5) {
        let jersey = match &p.jersey_number {
            JerseyNumber::Number(n) => n.to_string(),
            JerseyNumber::Placeholder(s) => s.clone(),
        };
        println!(
            "{:<10} {:<22} {:<5} {:<4} {:<7} {:<5} {:<4} {:<8}",
            p.id, p.player_name, p.team_abbr, p.position, p.rating, jersey, p.age, p.height
        );
    }
}
