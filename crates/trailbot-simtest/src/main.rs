//! TrailBot Headless Simulation Harness
//!
//! Plays whole journeys in-process: no transport, no threads, no clock.
//! Scripted runs check the navigation contracts, random runs sweep seeds
//! looking for engine errors.
//!
//! Usage:
//!   cargo run -p trailbot-simtest
//!   cargo run -p trailbot-simtest -- --verbose --seeds 200

use std::sync::mpsc;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use trailbot_core::app::GameSimulationApp;
use trailbot_core::config::SimulationConfig;
use trailbot_core::error::Result;
use trailbot_core::form::FormId;
use trailbot_core::session::{SessionId, SessionRegistry};
use trailbot_core::simulation::Tick;
use trailbot_core::window::WindowId;
use trailbot_core::windows;
use trailbot_logic::trail::TrailKind;

#[derive(Parser, Debug)]
#[command(name = "trailbot-simtest", about = "Headless TrailBot playthroughs")]
struct Cli {
    /// Print passing checks too
    #[arg(long)]
    verbose: bool,

    /// Seeds per random sweep
    #[arg(long, default_value_t = 50)]
    seeds: u64,

    /// Steps per random playthrough
    #[arg(long, default_value_t = 2000)]
    steps: usize,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

const PULSE: Tick = Tick::Pulse { skip_day: false };

fn main() {
    let cli = Cli::parse();
    println!("=== TrailBot Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Trail construction
    results.extend(validate_trails(&cli));

    // 2. Window and form wiring
    results.extend(validate_form_registry());

    // 3. Scripted win trail
    results.extend(validate_win_playthrough(&cli));

    // 4. System ticks versus pulses
    results.extend(validate_tick_separation());

    // 5. Session registry
    results.extend(validate_registry());

    // 6. Random playthroughs
    results.extend(validate_random_playthroughs(&cli, TrailKind::Test));
    results.extend(validate_random_playthroughs(&cli, TrailKind::Oregon));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn new_app(trail: TrailKind, seed: u64) -> Result<GameSimulationApp> {
    let (tx, _rx) = mpsc::channel();
    let config = SimulationConfig {
        trail,
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    GameSimulationApp::new(SessionId(seed as i64), &config, tx)
}

fn current_form(app: &GameSimulationApp) -> Option<FormId> {
    app.windows.focused().and_then(|w| w.current_form())
}

fn send_all(app: &mut GameSimulationApp, lines: &[&str]) -> Result<()> {
    for line in lines {
        app.send_input(line)?;
    }
    Ok(())
}

/// Banker party of one, leaving in March, outfitted at the first store.
const OUTFIT: &[&str] = &[
    "1", "1", "Ann", "", "yes", "1", "ok", "", "Oxen", "10", "Food", "800", "Ammunition", "5", "Leave store", "ok",
];

// ── 1. Trails ───────────────────────────────────────────────────────────

fn validate_trails(cli: &Cli) -> Vec<TestResult> {
    println!("--- Trails ---");
    let mut results = Vec::new();

    for kind in [TrailKind::Oregon, TrailKind::Test, TrailKind::Win, TrailKind::Fail] {
        let mut bad = Vec::new();
        let mut lengths = Vec::new();
        for seed in 0..cli.seeds {
            let mut rng = StdRng::seed_from_u64(seed);
            let trail = kind.build(&mut rng);
            let Some(last) = trail.locations.last() else {
                bad.push(format!("seed {}: empty", seed));
                continue;
            };
            if last.total_distance != 0 {
                bad.push(format!("seed {}: last leg {} miles", seed, last.total_distance));
            }
            if trail.locations.len() > 1 && trail.distance_to_next <= 0 {
                bad.push(format!("seed {}: first leg is empty", seed));
            }
            lengths.push(trail.locations.len());
        }
        results.push(TestResult {
            name: format!("trail_{}_well_formed", kind),
            passed: bad.is_empty(),
            detail: if bad.is_empty() {
                format!(
                    "{} seeds, {}..{} stops",
                    cli.seeds,
                    lengths.iter().min().copied().unwrap_or(0),
                    lengths.iter().max().copied().unwrap_or(0)
                )
            } else {
                bad.join("; ")
            },
        });
    }

    results
}

// ── 2. Form registry ────────────────────────────────────────────────────

fn validate_form_registry() -> Vec<TestResult> {
    println!("--- Form Registry ---");
    let mut results = Vec::new();

    let verified = windows::verify_form_registry();
    results.push(TestResult {
        name: "every_form_has_its_parent".into(),
        passed: verified.is_ok(),
        detail: match verified {
            Ok(()) => "all forms constructible from their parent window".into(),
            Err(err) => err.to_string(),
        },
    });

    let stray = windows::form_exists(WindowId::MainMenu, FormId::Store);
    results.push(TestResult {
        name: "store_not_under_main_menu".into(),
        passed: !stray,
        detail: "forms stay with their own window".into(),
    });

    results
}

// ── 3. Win trail ────────────────────────────────────────────────────────

/// Drive an outfitted party to the end of the trail. Returns the number of
/// pulses it took.
fn drive_to_game_over(app: &mut GameSimulationApp, max_pulses: usize) -> Result<Option<usize>> {
    for pulse in 0..max_pulses {
        match app.windows.focused_id() {
            Some(WindowId::GameOver) => return Ok(Some(pulse)),
            Some(WindowId::RandomEvent) => {
                app.on_tick(PULSE)?;
                app.send_input("")?;
                continue;
            }
            _ => {}
        }
        match current_form(app) {
            None => app.send_input("Continue on trail")?,
            Some(FormId::ContinueOnTrail) => {
                app.on_tick(PULSE)?;
            }
            Some(_) => app.send_input("ok")?,
        }
    }
    Ok(None)
}

fn validate_win_playthrough(cli: &Cli) -> Vec<TestResult> {
    println!("--- Win Trail ---");
    let mut results = Vec::new();

    let mut finished = 0;
    let mut failures = Vec::new();
    let mut pulses = Vec::new();
    for seed in 0..cli.seeds {
        let outcome = new_app(TrailKind::Win, seed).and_then(|mut app| {
            send_all(&mut app, OUTFIT)?;
            let reached = drive_to_game_over(&mut app, 500)?;
            if reached.is_some() {
                app.send_input("")?;
                if app.windows.window_ids() != vec![WindowId::MainMenu] {
                    return Ok(None);
                }
            }
            Ok(reached)
        });
        match outcome {
            Ok(Some(n)) => {
                finished += 1;
                pulses.push(n);
            }
            Ok(None) => failures.push(format!("seed {} never finished", seed)),
            Err(err) => failures.push(format!("seed {}: {}", seed, err)),
        }
    }

    results.push(TestResult {
        name: "win_trail_reaches_game_over".into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            let mean = pulses.iter().sum::<usize>() as f64 / pulses.len().max(1) as f64;
            format!("{}/{} seeds, {:.1} steps on average", finished, cli.seeds, mean)
        } else {
            failures.join("; ")
        },
    });

    results
}

// ── 4. Ticks ────────────────────────────────────────────────────────────

fn validate_tick_separation() -> Vec<TestResult> {
    println!("--- Tick Separation ---");
    let mut results = Vec::new();

    let outcome = new_app(TrailKind::Win, 42).and_then(|mut app| {
        send_all(&mut app, OUTFIT)?;
        app.send_input("Continue on trail")?;
        let mut sent = 0;
        for _ in 0..1000 {
            if app.on_tick(Tick::System)? {
                sent += 1;
            }
        }
        let after_system = app.game.turns;
        app.on_tick(PULSE)?;
        Ok((after_system, app.game.turns, sent))
    });

    match outcome {
        Ok((after_system, after_pulse, sent)) => {
            results.push(TestResult {
                name: "system_ticks_take_no_turns".into(),
                passed: after_system == 0,
                detail: format!("{} turns after 1000 system ticks", after_system),
            });
            results.push(TestResult {
                name: "pulse_takes_one_turn".into(),
                passed: after_pulse == 1,
                detail: format!("{} turns after one pulse", after_pulse),
            });
            results.push(TestResult {
                name: "static_screen_sent_once".into(),
                passed: sent <= 1,
                detail: format!("{} updates over 1000 system ticks", sent),
            });
        }
        Err(err) => results.push(TestResult {
            name: "tick_separation".into(),
            passed: false,
            detail: err.to_string(),
        }),
    }

    results
}

// ── 5. Registry ─────────────────────────────────────────────────────────

fn validate_registry() -> Vec<TestResult> {
    println!("--- Session Registry ---");
    let mut results = Vec::new();

    let (tx, rx) = mpsc::channel();
    let config = SimulationConfig {
        trail: TrailKind::Win,
        seed: Some(5),
        ..SimulationConfig::default()
    };
    let registry = SessionRegistry::new(config, tx);

    let ids: Vec<SessionId> = (1..=8).map(SessionId).collect();
    let mut delivered = true;
    for id in &ids {
        delivered &= registry.deliver(*id, "").is_ok();
    }
    // Odd sessions start a game, even sessions read the rules.
    for id in &ids {
        let line = if id.0 % 2 == 1 { "1" } else { "2" };
        delivered &= registry.deliver(*id, line).is_ok();
    }
    registry.pump();

    results.push(TestResult {
        name: "registry_tracks_sessions".into(),
        passed: delivered && registry.session_ids() == ids,
        detail: format!("{} sessions", registry.len()),
    });

    let mut routed = true;
    for id in &ids {
        let expected = if id.0 % 2 == 1 {
            FormId::ProfessionSelector
        } else {
            FormId::RulesHelp
        };
        let form = registry.with_session(*id, |app| current_form(app)).flatten();
        routed &= form == Some(expected);
    }
    results.push(TestResult {
        name: "registry_routes_input".into(),
        passed: routed,
        detail: "each session sees only its own lines".into(),
    });

    let mut per_session: Vec<SessionId> = rx.try_iter().map(|u| u.session).collect();
    per_session.sort();
    per_session.dedup();
    results.push(TestResult {
        name: "registry_updates_tagged".into(),
        passed: per_session == ids,
        detail: format!("updates for {} sessions", per_session.len()),
    });

    for id in &ids {
        registry.destroy(*id);
    }
    results.push(TestResult {
        name: "registry_destroy".into(),
        passed: registry.is_empty(),
        detail: "all sessions removed".into(),
    });

    results
}

// ── 6. Random playthroughs ──────────────────────────────────────────────

const FREE_TEXT: &[&str] = &["Ann", "Bob", "Cy", "", "0", "1", "3", "5", "20", "yes", "no"];

/// One random step: always a tick, sometimes a line picked from the
/// current commands or from free text.
fn autopilot_step(app: &mut GameSimulationApp, rng: &mut StdRng) -> Result<()> {
    let tick = if rng.gen_bool(0.7) { PULSE } else { Tick::System };
    app.on_tick(tick)?;
    if rng.gen_bool(0.6) {
        return Ok(());
    }
    let commands = app.windows.focused().and_then(|w| w.menu_commands(&app.game));
    let line = match commands.as_deref().and_then(|c| c.choose(rng)) {
        Some(label) => label.clone(),
        None => FREE_TEXT.choose(rng).copied().unwrap_or_default().to_string(),
    };
    app.send_input(&line)
}

fn validate_random_playthroughs(cli: &Cli, kind: TrailKind) -> Vec<TestResult> {
    println!("--- Random Playthroughs ({}) ---", kind);
    let mut results = Vec::new();

    let mut errors = Vec::new();
    let mut empty_stack = Vec::new();
    let mut games_over = 0;
    let mut max_turns = 0;
    for seed in 0..cli.seeds {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x7261_696c);
        let mut app = match new_app(kind, seed) {
            Ok(app) => app,
            Err(err) => {
                errors.push(format!("seed {}: {}", seed, err));
                continue;
            }
        };
        for step in 0..cli.steps {
            if let Err(err) = autopilot_step(&mut app, &mut rng) {
                errors.push(format!("seed {} step {}: {}", seed, step, err));
                break;
            }
            if app.windows.is_empty() {
                empty_stack.push(seed);
                break;
            }
            if app.windows.focused_id() == Some(WindowId::GameOver) {
                games_over += 1;
            }
            max_turns = max_turns.max(app.game.turns);
        }
        app.destroy();
    }

    results.push(TestResult {
        name: format!("random_{}_no_engine_errors", kind),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!("{} seeds x {} steps, longest run {} turns", cli.seeds, cli.steps, max_turns)
        } else {
            errors.join("; ")
        },
    });
    results.push(TestResult {
        name: format!("random_{}_window_always_focused", kind),
        passed: empty_stack.is_empty(),
        detail: if empty_stack.is_empty() {
            format!("{} steps spent on the game over screen", games_over)
        } else {
            format!("stack emptied for seeds {:?}", empty_stack)
        },
    });

    results
}
