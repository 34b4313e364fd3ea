//! Season Simulator CLI Tool
//!
//! Drives synthetic players and matches through the full rating engine and
//! prints the resulting leaderboards.
//!
//! Usage:
//!   cargo run --bin season-simulator -- simulate --players 20 --matches 200
//!   cargo run --bin season-simulator -- simulate --seed 7 --draw-every 10
//!   cargo run --bin season-simulator -- show-config

use anyhow::Result;
use clap::{Parser, Subcommand};
use cue_score::config::AppConfig;
use cue_score::leaderboard::LeaderboardBuilder;
use cue_score::processor::MatchResultProcessor;
use cue_score::rating::EloRatingCalculator;
use cue_score::stats::AggregateUpdater;
use cue_score::store::{InMemoryStore, LeaderboardStore};
use cue_score::types::{Discipline, LeaderboardCriterion, MatchRecord, MatchStatus, SnapshotKey};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "season-simulator")]
#[command(about = "Exercise the cue-score rating engine with a synthetic club season")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML); falls back to environment variables
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic season and print the leaderboards
    Simulate {
        /// Number of players in the club
        #[arg(short, long, default_value = "16")]
        players: u32,
        /// Number of matches to play
        #[arg(short, long, default_value = "200")]
        matches: u32,
        /// Seed for the deterministic outcome generator
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Every Nth match ends in a draw (0 disables draws)
        #[arg(long, default_value = "12")]
        draw_every: u32,
        /// Every Nth match is unranked (0 disables unranked play)
        #[arg(long, default_value = "7")]
        unranked_every: u32,
    },
    /// Print the effective configuration and exit
    ShowConfig,
}

/// Small deterministic generator so the tool stays dependency-free
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::from_env(),
    }
}

async fn run_simulation(
    config: AppConfig,
    players: u32,
    matches: u32,
    seed: u64,
    draw_every: u32,
    unranked_every: u32,
) -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let calculator = Arc::new(EloRatingCalculator::new(config.elo.clone())?);
    let updater = AggregateUpdater::new(store.clone(), config.elo.initial_rating);
    let processor = MatchResultProcessor::new(
        store.clone(),
        store.clone(),
        calculator,
        config.processing.clone(),
    );
    let builder = LeaderboardBuilder::new(
        store.clone(),
        store.clone(),
        config.leaderboard.clone(),
    )?;

    println!("Registering {} players...", players);
    let mut ids = Vec::with_capacity(players as usize);
    for i in 0..players {
        let id = format!("player_{:03}", i);
        updater.initialize_player(&id).await?;
        ids.push(id);
    }

    println!("Playing {} matches...", matches);
    let mut rng = Rng(seed);
    for n in 0..matches {
        let p1 = rng.below(ids.len() as u64) as usize;
        let mut p2 = rng.below(ids.len() as u64) as usize;
        if p2 == p1 {
            p2 = (p2 + 1) % ids.len();
        }

        let is_draw = draw_every > 0 && n % draw_every == draw_every - 1;
        let winner_id = if is_draw {
            None
        } else if rng.below(2) == 0 {
            Some(ids[p1].clone())
        } else {
            Some(ids[p2].clone())
        };

        let discipline = Discipline::ALL[rng.below(4) as usize];
        let record = MatchRecord {
            match_id: format!("match_{:05}", n),
            player1_id: ids[p1].clone(),
            player2_id: ids[p2].clone(),
            winner_id,
            is_ranked: !(unranked_every > 0 && n % unranked_every == unranked_every - 1),
            discipline: Some(discipline),
            status: MatchStatus::Completed,
        };

        processor.process_completed(&record).await?;
    }

    let stats = processor.stats()?;
    println!();
    println!("Processed:       {} matches", stats.matches_applied);
    println!("Rating updates:  {}", stats.rating_updates);
    println!("Duplicates:      {}", stats.duplicates_skipped);

    let summary = builder.rebuild_all().await;
    if !summary.all_succeeded() {
        anyhow::bail!("Leaderboard rebuild failed: {:?}", summary.failed);
    }

    for criterion in LeaderboardCriterion::ALL {
        let snapshot = store
            .get_snapshot(&SnapshotKey::global(criterion))
            .await?
            .expect("snapshot was just rebuilt");

        println!();
        println!(
            "=== {} (min {} matches, {} players) ===",
            snapshot.name, snapshot.min_matches_required, snapshot.total_players
        );
        for entry in snapshot.rankings.iter().take(10) {
            println!(
                "  {:>3}. {:<12} {:>8.3}",
                entry.rank, entry.player_id, entry.value
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Simulate {
            players,
            matches,
            seed,
            draw_every,
            unranked_every,
        } => {
            if players < 2 {
                anyhow::bail!("Need at least 2 players to simulate matches");
            }
            run_simulation(config, players, matches, seed, draw_every, unranked_every).await
        }
        Commands::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
