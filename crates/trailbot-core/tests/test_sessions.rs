//! The host-facing surface: session registry, pulse scheduling, screen
//! update de-duplication and config files.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use trailbot_core::config::SimulationConfig;
use trailbot_core::form::FormId;
use trailbot_core::scene_graph::ScreenUpdate;
use trailbot_core::session::{SessionId, SessionRegistry};
use trailbot_core::window::WindowId;
use trailbot_logic::trail::TrailKind;

// ── Helpers ────────────────────────────────────────────────────────────

fn registry() -> (SessionRegistry, Receiver<ScreenUpdate>) {
    let (tx, rx) = mpsc::channel();
    let config = SimulationConfig {
        trail: TrailKind::Win,
        seed: Some(11),
        ..SimulationConfig::default()
    };
    (SessionRegistry::new(config, tx), rx)
}

fn drain(rx: &Receiver<ScreenUpdate>) -> Vec<ScreenUpdate> {
    rx.try_iter().collect()
}

fn deliver_all(registry: &SessionRegistry, id: SessionId, lines: &[&str]) {
    for line in lines {
        registry.deliver(id, line).unwrap();
    }
}

fn form(registry: &SessionRegistry, id: SessionId) -> Option<FormId> {
    registry
        .with_session(id, |app| app.windows.focused().and_then(|w| w.current_form()))
        .flatten()
}

fn turns(registry: &SessionRegistry, id: SessionId) -> u64 {
    registry.with_session(id, |app| app.game.turns).unwrap()
}

/// Main menu, party setup, the first store and out onto the trail.
const TO_THE_TRAIL: &[&str] = &[
    "1",
    "1",
    "Ann",
    "",
    "yes",
    "1",
    "ok",
    "",
    "Oxen",
    "10",
    "Food",
    "500",
    "Leave store",
    "ok",
    "Continue on trail",
    "ok",
];

// ── Registry ───────────────────────────────────────────────────────────

#[test]
fn sessions_are_created_on_first_contact_and_listed_in_order() {
    let (registry, _rx) = registry();
    registry.deliver(SessionId(30), "").unwrap();
    registry.deliver(SessionId(-2), "").unwrap();
    registry.deliver(SessionId(30), "").unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.session_ids(), vec![SessionId(-2), SessionId(30)]);
}

#[test]
fn sessions_do_not_share_input() {
    let (registry, _rx) = registry();
    registry.deliver(SessionId(1), "1").unwrap();
    registry.deliver(SessionId(2), "2").unwrap();
    registry.pump();
    assert_eq!(form(&registry, SessionId(1)), Some(FormId::ProfessionSelector));
    assert_eq!(form(&registry, SessionId(2)), Some(FormId::RulesHelp));
}

#[test]
fn updates_are_tagged_with_their_session() {
    let (registry, rx) = registry();
    registry.deliver(SessionId(1), "").unwrap();
    registry.deliver(SessionId(2), "").unwrap();
    registry.pump();
    let mut sessions: Vec<SessionId> = drain(&rx).into_iter().map(|u| u.session).collect();
    sessions.sort();
    assert_eq!(sessions, vec![SessionId(1), SessionId(2)]);
}

#[test]
fn destroyed_session_starts_over_on_next_contact() {
    let (registry, _rx) = registry();
    registry.deliver(SessionId(4), "1").unwrap();
    registry.pump();
    assert_eq!(form(&registry, SessionId(4)), Some(FormId::ProfessionSelector));

    assert!(registry.destroy(SessionId(4)));
    assert_eq!(registry.with_session(SessionId(4), |_| ()), None);

    registry.deliver(SessionId(4), "").unwrap();
    registry.pump();
    let windows = registry.with_session(SessionId(4), |app| app.windows.window_ids());
    assert_eq!(windows, Some(vec![WindowId::MainMenu]));
    assert_eq!(form(&registry, SessionId(4)), None);
}

// ── Screen updates ─────────────────────────────────────────────────────

#[test]
fn unchanged_screen_is_sent_once() {
    let (registry, rx) = registry();
    registry.deliver(SessionId(9), "").unwrap();
    for _ in 0..10 {
        registry.pump();
    }
    let updates = drain(&rx);
    assert_eq!(updates.len(), 1);
    assert!(updates[0].content.contains("Travel the trail"));
    assert_eq!(
        updates[0].commands,
        Some(vec!["Travel the trail".to_string(), "Learn about the trail".to_string()])
    );
}

#[test]
fn new_screen_follows_navigation() {
    let (registry, rx) = registry();
    registry.deliver(SessionId(9), "").unwrap();
    registry.pump();
    drain(&rx);

    registry.deliver(SessionId(9), "1").unwrap();
    registry.pump();
    let updates = drain(&rx);
    assert_eq!(updates.len(), 1);
    assert!(updates[0].content.contains("banker from Boston"));
}

#[test]
fn invalid_choice_does_not_resend_the_screen() {
    let (registry, rx) = registry();
    registry.deliver(SessionId(9), "1").unwrap();
    registry.pump();
    drain(&rx);

    registry.deliver(SessionId(9), "seventeen").unwrap();
    registry.pump();
    assert!(drain(&rx).is_empty());
    assert_eq!(form(&registry, SessionId(9)), Some(FormId::ProfessionSelector));
}

// ── Pulses ─────────────────────────────────────────────────────────────

#[test]
fn pump_without_a_due_pulse_never_takes_a_turn() {
    let (registry, _rx) = registry();
    let id = SessionId(12);
    deliver_all(&registry, id, TO_THE_TRAIL);
    let now = Instant::now();
    registry.pump_at(now);
    assert_eq!(form(&registry, id), Some(FormId::ContinueOnTrail));

    for _ in 0..50 {
        registry.pump_at(now);
    }
    assert_eq!(turns(&registry, id), 0);
}

#[test]
fn due_pulse_advances_one_turn() {
    let (registry, _rx) = registry();
    let id = SessionId(12);
    deliver_all(&registry, id, TO_THE_TRAIL);
    let now = Instant::now();
    registry.pump_at(now);
    assert_eq!(turns(&registry, id), 0);

    let later = now + Duration::from_secs(2);
    registry.pump_at(later);
    assert_eq!(turns(&registry, id), 1);

    // The same instant again is not a new pulse.
    registry.pump_at(later);
    assert_eq!(turns(&registry, id), 1);
}

// ── Config ─────────────────────────────────────────────────────────────

#[test]
fn missing_config_file_is_written_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trailbot.json");
    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config, SimulationConfig::default());
    assert!(path.exists());
    assert_eq!(SimulationConfig::load(&path).unwrap(), config);
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trailbot.json");
    let config = SimulationConfig {
        pulse_interval_ms: 250,
        trail: TrailKind::Fail,
        seed: Some(99),
        asset_dir: Some(dir.path().join("assets")),
        ..SimulationConfig::default()
    };
    config.save(&path).unwrap();
    let loaded = SimulationConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.pulse_interval(), Duration::from_millis(250));
    assert_eq!(loaded.asset_path("river.png"), Some(dir.path().join("assets").join("river.png")));
}
