//! TrailBot console host
//!
//! Stands in for a chat transport. Every line on stdin is one message from a
//! single session and every screen update is printed to stdout. Logs go to
//! stderr, filtered by `RUST_LOG`.
//!
//! Usage:
//!   cargo run -p trailbot-host
//!   cargo run -p trailbot-host -- --trail win --seed 7
//!   RUST_LOG=debug cargo run -p trailbot-host -- --config my.json

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trailbot_core::config::SimulationConfig;
use trailbot_core::error::Result;
use trailbot_core::scene_graph::ScreenUpdate;
use trailbot_core::session::{SessionId, SessionRegistry};
use trailbot_logic::trail::TrailKind;

#[derive(Parser, Debug)]
#[command(name = "trailbot", version, about = "Play the Oregon Trail one line at a time")]
struct Cli {
    /// JSON config file, written with defaults when missing
    #[arg(long, default_value = "trailbot.json")]
    config: PathBuf,

    /// Session id to play as
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    session: i64,

    /// Trail to play instead of the configured one
    #[arg(long)]
    trail: Option<TrailKind>,

    /// Random seed instead of the configured one
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn print_update(update: &ScreenUpdate, config: &SimulationConfig) {
    println!("\n{}", update.content);
    if let Some(commands) = update.commands.as_ref().filter(|c| !c.is_empty()) {
        println!();
        for (i, label) in commands.iter().enumerate() {
            println!("  [{}] {}", i + 1, label);
        }
    }
    if let Some(image) = &update.image {
        match config.asset_path(image) {
            Some(path) => println!("  (image: {})", path.display()),
            None => println!("  (image: {})", image),
        }
    }
}

/// Prints until every sender is gone.
fn spawn_printer(updates: Receiver<ScreenUpdate>, config: SimulationConfig) -> JoinHandle<()> {
    thread::spawn(move || {
        for update in updates {
            print_update(&update, &config);
        }
    })
}

/// Forwards stdin lines to the session until EOF, then raises `done`.
fn spawn_reader(registry: Arc<SessionRegistry>, session: SessionId, done: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("stdin: {}", err);
                    break;
                }
            };
            if let Err(err) = registry.deliver(session, &line) {
                log::error!("[{}] {}", session, err);
                break;
            }
        }
        done.store(true, Ordering::SeqCst);
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = SimulationConfig::load(&cli.config)?;
    if let Some(trail) = cli.trail {
        config.trail = trail;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let session = SessionId(cli.session);
    let (tx, rx) = mpsc::channel();
    let registry = Arc::new(SessionRegistry::new(config.clone(), tx));
    let printer = spawn_printer(rx, config.clone());

    // First contact brings up the main menu.
    registry.deliver(session, "")?;
    let done = Arc::new(AtomicBool::new(false));
    let reader = spawn_reader(Arc::clone(&registry), session, Arc::clone(&done));

    log::info!(
        "[{}] {} trail, pulse every {} ms",
        session,
        config.trail,
        config.pulse_interval_ms
    );
    while !done.load(Ordering::SeqCst) {
        registry.pump();
        thread::sleep(registry.config().poll_sleep());
    }
    registry.pump();

    if reader.join().is_err() {
        log::error!("stdin reader panicked");
    }
    registry.destroy(session);
    drop(registry);
    if printer.join().is_err() {
        log::error!("printer panicked");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_flag_uses_trail_names() {
        let cli = Cli::parse_from(["trailbot", "--trail", "Win"]);
        assert_eq!(cli.trail, Some(TrailKind::Win));
        assert!(Cli::try_parse_from(["trailbot", "--trail", "california"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["trailbot", "--trail", "fail", "--seed", "9", "--session", "-4"]);
        assert_eq!(cli.trail, Some(TrailKind::Fail));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.session, -4);
        assert_eq!(cli.config, PathBuf::from("trailbot.json"));
    }
}
