//! Headless session runner (default binary).
//!
//! Drives a session the way a host shell would: one optional action every few
//! frames, then a gravity update with the frame's elapsed time. Actions come from
//! a comma-separated script or a seeded random policy. Prints a JSON report with
//! the final snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{GameConfig, GameSnapshot, GameState, SimpleRng};
use blockfall::types::{GameAction, TICK_MS};
use blockfall::FrameClock;

#[derive(Debug, Parser)]
#[command(name = "blockfall-sim", about = "Run a headless falling-block session")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "JSON file with session settings (seed, randomizer, scoring)")]
    config: Option<PathBuf>,

    #[arg(long, help = "RNG seed, overrides the config file")]
    seed: Option<u32>,

    #[arg(long, default_value_t = 3600, help = "Number of frames to simulate")]
    frames: u32,

    #[arg(long, default_value_t = TICK_MS, help = "Milliseconds per simulated frame")]
    tick_ms: u32,

    #[arg(long, default_value_t = 8, help = "Issue one action every N frames")]
    action_every: u32,

    #[arg(long, help = "Comma-separated actions to cycle through, e.g. moveLeft,rotate,hardDrop")]
    script: Option<String>,

    #[arg(long, default_value_t = 0, help = "Restarts allowed after game over")]
    restarts: u32,

    #[arg(long, help = "Pace frames with the wall clock instead of fixed ticks")]
    realtime: bool,

    #[arg(long, help = "Pretty-print the JSON report")]
    pretty: bool,
}

/// Where the runner's actions come from
enum Policy {
    Script { actions: Vec<GameAction>, index: usize },
    Random(SimpleRng),
}

impl Policy {
    const RANDOM_ACTIONS: [GameAction; 5] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    fn next_action(&mut self) -> GameAction {
        match self {
            Policy::Script { actions, index } => {
                let action = actions[*index];
                *index = (*index + 1) % actions.len();
                action
            }
            Policy::Random(rng) => {
                let i = rng.next_range(Self::RANDOM_ACTIONS.len() as u32) as usize;
                Self::RANDOM_ACTIONS[i]
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u32,
    frames_run: u32,
    games_played: u32,
    actions_applied: u32,
    snapshot: GameSnapshot,
}

fn parse_script(script: &str) -> Result<Vec<GameAction>> {
    let actions = script
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(|token| {
            GameAction::from_str(token)
                .with_context(|| format!("unknown action in script: {:?}", token.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    if actions.is_empty() {
        bail!("script contains no actions");
    }
    Ok(actions)
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.action_every == 0 {
        bail!("--action-every must be at least 1");
    }

    let mut policy = match cli.script.as_deref() {
        Some(script) => Policy::Script {
            actions: parse_script(script)?,
            index: 0,
        },
        None => Policy::Random(SimpleRng::new(config.seed ^ 0x9e37_79b9)),
    };

    info!(seed = config.seed, randomizer = ?config.randomizer, frames = cli.frames, "starting session");
    let report = run(&cli, config, &mut policy);
    info!(
        score = report.snapshot.score,
        lines = report.snapshot.lines,
        level = report.snapshot.level,
        games = report.games_played,
        "session finished"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

fn run(cli: &Cli, config: GameConfig, policy: &mut Policy) -> Report {
    let mut state = GameState::new(config);
    let mut clock = FrameClock::new();
    let frame = Duration::from_millis(u64::from(cli.tick_ms));

    let mut restarts_left = cli.restarts;
    let mut games_played = 1;
    let mut actions_applied = 0;
    let mut frames_run = 0;

    for n in 0..cli.frames {
        if state.game_over() {
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            state.restart();
            games_played += 1;
        }

        if n % cli.action_every == 0 {
            let action = policy.next_action();
            if action == GameAction::Pause {
                clock.resync();
            }
            if state.apply_action(action) {
                actions_applied += 1;
            }
        }

        let elapsed_ms = if cli.realtime {
            std::thread::sleep(clock.remaining(frame));
            clock.tick()
        } else {
            cli.tick_ms
        };
        state.update(elapsed_ms);
        frames_run += 1;

        if let Some(event) = state.take_last_event() {
            if event.lines_cleared > 0 {
                debug!(
                    lines = event.lines_cleared,
                    points = event.line_clear_score,
                    level_up = event.level_up,
                    "clear"
                );
            }
        }
    }

    Report {
        seed: config.seed,
        frames_run,
        games_played,
        actions_applied,
        snapshot: state.snapshot(),
    }
}
