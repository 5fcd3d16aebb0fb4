use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pickspread::db::{self, BetStore, GameStore, UserStore};
use pickspread::{Config, SettlementEngine};

/// Admin tool: settle one game with its final scores and resolve every
/// pending bet on it.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "settle=info,pickspread=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let (game_id, home_score, away_score) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: settle <game-id> <final-home-score> <final-away-score>");
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::from_env()?;
    let pool = db::connect(&config.database_url).await?;
    let engine = SettlementEngine::new(
        GameStore::new(pool.clone()),
        BetStore::new(pool.clone()),
        UserStore::new(pool),
    );

    info!("Settling game {} ({}-{})", game_id, home_score, away_score);

    let settlement = engine
        .settle_game(&game_id, home_score, away_score)
        .await
        .context("Settlement failed")?;

    println!("{}", serde_json::to_string_pretty(&settlement)?);
    info!(
        "Done: {} bets settled, {} points awarded",
        settlement.settled_bets, settlement.points_awarded
    );

    Ok(ExitCode::SUCCESS)
}

fn parse_args(args: &[String]) -> Result<(String, i64, i64)> {
    if args.len() != 4 {
        bail!("expected 3 arguments, got {}", args.len() - 1);
    }

    let home_score: i64 = args[2]
        .parse()
        .with_context(|| format!("invalid home score '{}'", args[2]))?;
    let away_score: i64 = args[3]
        .parse()
        .with_context(|| format!("invalid away score '{}'", args[3]))?;

    Ok((args[1].clone(), home_score, away_score))
}
