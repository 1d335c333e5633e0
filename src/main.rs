//! Space Duel headless runner
//!
//! Plays random-vs-random episodes and prints the tally.
//!
//! Usage: `space-duel [config.json] [episodes] [seed]`

use std::process::ExitCode;

use space_duel::sim::{MatchResult, PlayerId};
use space_duel::{RandomAgent, ShooterEnv, SimError, SimulationConfig, play_episode};

const DEFAULT_EPISODES: u32 = 10;
const DEFAULT_SEED: u64 = 42;

/// Safety net for the runner only; the library default is unbounded
const RUNNER_MAX_TICKS: u64 = 20_000;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Space Duel (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimError> {
    let mut args = std::env::args().skip(1);

    let mut config = match args.next() {
        Some(path) if path != "-" => SimulationConfig::load(&path)?,
        _ => SimulationConfig::default(),
    };
    let episodes = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EPISODES);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SEED);
    if config.max_ticks.is_none() {
        config.max_ticks = Some(RUNNER_MAX_TICKS);
    }

    log::info!(
        "Running {} episodes with seed {} ({}x{}, {} actions)",
        episodes,
        seed,
        config.arena_size().x,
        config.arena_size().y,
        config.action_set.as_str()
    );

    let opponent = RandomAgent::new(config.action_set, seed.wrapping_add(1));
    let mut agent = RandomAgent::new(config.action_set, seed.wrapping_add(2));
    let mut env = ShooterEnv::with_seed(config, opponent, seed)?;

    let mut tally = [0u32; 4];
    for episode in 1..=episodes {
        let total = play_episode(&mut env, &mut agent)?;
        let arena = env.arena();
        let slot = match arena.result {
            Some(MatchResult::Player1Wins) => 0,
            Some(MatchResult::Player2Wins) => 1,
            Some(MatchResult::MutualDestruction) => 2,
            Some(MatchResult::TimeLimit) | None => 3,
        };
        tally[slot] += 1;
        println!(
            "episode {:>3}: {:<24} reward {:>2} after {} ticks",
            episode,
            arena.message(),
            total,
            arena.time_ticks
        );
    }

    println!(
        "\n{} wins: {}, {} wins: {}, draws: {}, timeouts: {}",
        PlayerId::One,
        tally[0],
        PlayerId::Two,
        tally[1],
        tally[2],
        tally[3]
    );
    Ok(())
}
