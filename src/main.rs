mod app;
mod cli;

use app::{Outcome, SelfPlay};
use clap::Parser;
use cli::Cli;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut play = match SelfPlay::from_cli(&cli) {
        Ok(play) => play,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.random_plies > 0 {
        let mut rng = StdRng::seed_from_u64(cli.seed);
        let played = play.random_opening(cli.random_plies, &mut rng);
        tracing::info!(seed = cli.seed, "{played} random opening plies");
    }

    let outcome = play.run();
    tracing::info!(plies = play.plies(), "{outcome}\n{}", play.game.board);

    match outcome {
        Outcome::Stalled(_) => ExitCode::FAILURE,
        Outcome::Won(_) | Outcome::Unfinished => ExitCode::SUCCESS,
    }
}
