//! FIVA simulator - run AI-vs-AI games in memory and report results.

use clap::Parser;
use fiva_engine::ai::{AiConfig, AutoPlay, Difficulty, StopReason};
use fiva_engine::board::BoardLayout;
use fiva_engine::core::{GameConfig, PlayerMap};
use fiva_engine::rules::Game;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fiva-sim")]
#[command(about = "Run AI-vs-AI FIVA games and print a JSON summary")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "10")]
    games: u32,

    /// Players at the table
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Teams (players are split evenly)
    #[arg(short, long, default_value = "2")]
    teams: usize,

    /// Difficulty per team, comma separated (easy, medium, hard); the last
    /// entry repeats for remaining teams
    #[arg(long, value_delimiter = ',', default_value = "medium")]
    difficulty: Vec<Difficulty>,

    /// Seed of the first game; game `n` uses `seed + n`
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Give up on a game after this many turns
    #[arg(long, default_value = "2000")]
    max_turns: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: u32,
    players: usize,
    teams: usize,
    difficulty: Vec<String>,
    wins_per_team: Vec<u32>,
    draws: u32,
    unfinished: u32,
    average_turns: f64,
    elapsed_ms: u128,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GameConfig::new(args.players, args.teams)?;
    let team_difficulty: Vec<Difficulty> = (0..args.teams)
        .map(|t| {
            args.difficulty
                .get(t)
                .or(args.difficulty.last())
                .copied()
                .unwrap_or(Difficulty::Medium)
        })
        .collect();
    info!(games = args.games, players = args.players, teams = args.teams, "starting simulation");

    let mut summary = Summary {
        games: args.games,
        players: args.players,
        teams: args.teams,
        difficulty: team_difficulty.iter().map(ToString::to_string).collect(),
        wins_per_team: vec![0; args.teams],
        ..Summary::default()
    };

    let started = Instant::now();
    let mut total_turns: u64 = 0;

    for n in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(n));
        let mut game = Game::new(config.clone().with_seed(seed), BoardLayout::sequential())?;

        let seats = PlayerMap::new(args.players, |p| {
            let team = game.team_of(p);
            Some(AiConfig::new(team_difficulty[team.index()]).with_seed(seed))
        });
        let report = AutoPlay::new(seats).with_max_turns(args.max_turns).run(&mut game);
        total_turns += u64::from(report.turns_played);

        match (report.reason, game.winner()) {
            (StopReason::GameOver, Some(team)) => summary.wins_per_team[team.index()] += 1,
            (StopReason::GameOver, None) => summary.draws += 1,
            (reason, _) => {
                warn!(game = n, seed, ?reason, "game did not finish");
                summary.unfinished += 1;
            }
        }
    }

    summary.elapsed_ms = started.elapsed().as_millis();
    if args.games > 0 {
        summary.average_turns = total_turns as f64 / f64::from(args.games);
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
