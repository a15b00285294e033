//! Headless self-play runner (default binary).
//!
//! Plays a full match between computer seats configured from the environment
//! (see [`MatchConfig::from_env`]) and prints the result. Set `TILESEQ_JSON=1`
//! for a JSON report instead of the text summary.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_seq::core::rng::fold_seed;
use tile_seq::engine::{Match, MatchConfig, MatchReport};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = MatchConfig::from_env();
    let json = std::env::var("TILESEQ_JSON")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false);

    info!(
        mode = config.mode.as_str(),
        seed = %config.seed,
        seats = config.seats.len(),
        rounds = config.rounds,
        "starting match"
    );

    // Turn order and bot choices replay for the same seed.
    let rng = StdRng::seed_from_u64(u64::from(fold_seed(&config.seed)));
    let mut game = Match::new(config, rng).context("invalid match configuration")?;
    let report = game.play_to_end().context("match aborted")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &MatchReport) {
    println!("mode {} seed {}", report.mode.as_str(), report.seed);

    for round in &report.rounds {
        let label = if round.tie_breaker { "tie-breaker" } else { "round" };
        let scores: Vec<String> = round.scores.iter().map(|s| s.to_string()).collect();
        println!(
            "{} {:>2}: scores [{}] in {} turns, won by {}",
            label,
            round.round,
            scores.join(", "),
            round.turns,
            names(report, &round.winners)
        );
    }

    for p in &report.players {
        println!(
            "  {:<12} {:<6} {} round win(s)",
            p.name,
            p.difficulty.as_str(),
            p.round_wins
        );
    }

    if report.winners.len() == 1 {
        println!("winner: {}", names(report, &report.winners));
    } else {
        println!("shared result: {}", names(report, &report.winners));
    }
}

fn names(report: &MatchReport, seats: &[usize]) -> String {
    seats
        .iter()
        .filter_map(|&i| report.players.get(i))
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
