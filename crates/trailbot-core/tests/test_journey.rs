//! End-to-end navigation through the real windows.
//!
//! Every test drives a `GameSimulationApp` the way the host does: lines of
//! text in, system ticks and pulses on the clock, screen updates out.

use std::sync::mpsc::{self, Receiver};

use trailbot_core::app::GameSimulationApp;
use trailbot_core::config::SimulationConfig;
use trailbot_core::form::FormId;
use trailbot_core::scene_graph::ScreenUpdate;
use trailbot_core::session::SessionId;
use trailbot_core::simulation::Tick;
use trailbot_core::window::WindowId;
use trailbot_logic::climate::Climate;
use trailbot_logic::entities::Entities;
use trailbot_logic::events::EventKind;
use trailbot_logic::river::RiverOption;
use trailbot_logic::trail::{Location, LocationStatus, Trail, TrailKind};

// ── Helpers ────────────────────────────────────────────────────────────

const PULSE: Tick = Tick::Pulse { skip_day: false };

fn new_app(trail: TrailKind, seed: u64) -> (GameSimulationApp, Receiver<ScreenUpdate>) {
    let (tx, rx) = mpsc::channel();
    let config = SimulationConfig {
        trail,
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    let app = GameSimulationApp::new(SessionId(7), &config, tx).unwrap();
    (app, rx)
}

fn send(app: &mut GameSimulationApp, line: &str) {
    app.send_input(line).unwrap();
}

fn form(app: &GameSimulationApp) -> Option<FormId> {
    app.windows.focused().and_then(|w| w.current_form())
}

fn screen(app: &GameSimulationApp) -> String {
    app.windows.focused().map(|w| w.render(&app.game)).unwrap_or_default()
}

fn commands(app: &GameSimulationApp) -> Option<Vec<String>> {
    app.windows.focused().and_then(|w| w.menu_commands(&app.game))
}

/// Close any random event windows, pulsing through lost days.
fn dismiss_events(app: &mut GameSimulationApp) {
    for _ in 0..64 {
        if app.windows.focused_id() != Some(WindowId::RandomEvent) {
            return;
        }
        app.on_tick(PULSE).unwrap();
        send(app, "1");
    }
    panic!("random event window never closed");
}

/// Main menu to the first store, one banker named Ann leaving in March.
fn start_party(app: &mut GameSimulationApp) {
    send(app, "1");
    assert_eq!(form(app), Some(FormId::ProfessionSelector));
    send(app, "1");
    assert_eq!(form(app), Some(FormId::InputPlayerNames));
    send(app, "Ann");
    send(app, "");
    assert_eq!(form(app), Some(FormId::ConfirmPlayerNames));
    send(app, "yes");
    assert_eq!(form(app), Some(FormId::SelectStartingMonth));
    send(app, "1");
    assert_eq!(form(app), Some(FormId::NewGameSummary));
    send(app, "ok");
    assert_eq!(app.windows.window_ids(), vec![WindowId::Travel]);
    assert_eq!(form(app), Some(FormId::StoreWelcome));
}

/// Store run at the first town, then acknowledge the arrival.
fn outfit(app: &mut GameSimulationApp) {
    send(app, "");
    assert_eq!(form(app), Some(FormId::Store));
    send(app, "Oxen");
    assert_eq!(form(app), Some(FormId::StorePurchase));
    send(app, "10");
    send(app, "Food");
    send(app, "500");
    send(app, "Ammunition");
    send(app, "5");
    send(app, "Leave store");
    assert_eq!(form(app), Some(FormId::LocationArrive));
    send(app, "ok");
    assert_eq!(form(app), None);
}

fn travel_menu_app(trail: TrailKind, seed: u64) -> GameSimulationApp {
    let (mut app, _rx) = new_app(trail, seed);
    start_party(&mut app);
    outfit(&mut app);
    app
}

/// Swap in a trail whose first stop is an already-visited fork.
fn put_party_at_fork(app: &mut GameSimulationApp, choices: Vec<Location>) {
    let mut trail = Trail::new(
        vec![
            Location::fork("Split Rock", Climate::Moderate, choices),
            Location::settlement("Far Town", Climate::Moderate),
        ],
        50,
        100,
        &mut app.game.rng,
    );
    let here = trail.current_location_mut();
    here.status = LocationStatus::Arrived;
    here.arrival_flag = true;
    app.game.trail = trail;
}

// ── New game setup ─────────────────────────────────────────────────────

#[test]
fn party_setup_reaches_the_store() {
    let (mut app, _rx) = new_app(TrailKind::Win, 1);
    start_party(&mut app);
    assert_eq!(app.game.vehicle.passengers.len(), 1);
    assert_eq!(app.game.vehicle.balance(), 1600.0);
}

#[test]
fn yes_no_ignores_nonsense_and_honours_no() {
    let (mut app, _rx) = new_app(TrailKind::Win, 2);
    send(&mut app, "1");
    send(&mut app, "1");
    send(&mut app, "Ann");
    send(&mut app, "Bob");
    send(&mut app, "");
    assert_eq!(form(&app), Some(FormId::ConfirmPlayerNames));

    send(&mut app, "banana");
    assert_eq!(form(&app), Some(FormId::ConfirmPlayerNames));

    send(&mut app, "no");
    assert_eq!(form(&app), Some(FormId::InputPlayerNames));
    assert!(screen(&app).contains("wagon leader"));
}

#[test]
fn store_refuses_to_let_party_leave_without_oxen() {
    let (mut app, _rx) = new_app(TrailKind::Win, 3);
    start_party(&mut app);
    send(&mut app, "");
    send(&mut app, "Leave store");
    assert_eq!(form(&app), Some(FormId::MissingItem));
    send(&mut app, "ok");
    assert_eq!(form(&app), Some(FormId::Store));
    assert_eq!(app.game.vehicle.balance(), 1600.0);
}

#[test]
fn store_rejects_more_than_the_party_can_carry() {
    let (mut app, _rx) = new_app(TrailKind::Win, 4);
    start_party(&mut app);
    send(&mut app, "");
    send(&mut app, "Oxen");
    send(&mut app, "500");
    assert_eq!(form(&app), Some(FormId::Store));
    assert!(screen(&app).contains("Total bill: $0.00"));
}

#[test]
fn leaving_the_store_pays_the_bill() {
    let app = travel_menu_app(TrailKind::Win, 5);
    let inv = &app.game.vehicle.inventory;
    assert_eq!(inv[Entities::Animal].quantity, 10);
    assert_eq!(inv[Entities::Food].quantity, 500);
    assert_eq!(inv[Entities::Ammo].quantity, 5);
    // 10 oxen at $20, 500 lb food at $0.20, 5 boxes at $2
    assert_eq!(app.game.vehicle.balance(), 1600.0 - 200.0 - 100.0 - 10.0);
}

// ── Travel menu ────────────────────────────────────────────────────────

#[test]
fn settlement_menu_offers_talk_and_shopping() {
    let mut app = travel_menu_app(TrailKind::Win, 6);
    let labels = commands(&app).unwrap();
    assert_eq!(labels[0], "Continue on trail");
    assert!(labels.contains(&"Talk to people".to_string()));
    assert!(labels.contains(&"Buy supplies".to_string()));
    assert!(!labels.contains(&"Hunt for food".to_string()));

    send(&mut app, "Talk to people");
    assert_eq!(form(&app), Some(FormId::TalkToPeople));
    send(&mut app, "ok");
    assert_eq!(form(&app), None);

    send(&mut app, "Buy supplies");
    assert_eq!(form(&app), Some(FormId::Store));
}

#[test]
fn landmark_menu_offers_trade_but_no_talk() {
    let mut app = travel_menu_app(TrailKind::Win, 12);
    let mut trail = Trail::new(
        vec![
            Location::landmark("Chimney Rock", Climate::Dry),
            Location::settlement("Far Town", Climate::Moderate),
        ],
        50,
        100,
        &mut app.game.rng,
    );
    trail.current_location_mut().status = LocationStatus::Arrived;
    app.game.trail = trail;
    assert!(!app.game.trail.current_location().chatting_allowed());

    // Closing a form brings the party to the landmark.
    send(&mut app, "Check supplies");
    send(&mut app, "ok");
    assert_eq!(form(&app), Some(FormId::LocationArrive));
    assert!(screen(&app).contains("Chimney Rock"));
    send(&mut app, "ok");
    assert_eq!(form(&app), None);

    let labels = commands(&app).unwrap();
    assert!(labels.contains(&"Attempt to trade".to_string()));
    assert!(!labels.contains(&"Talk to people".to_string()));
    assert!(!labels.contains(&"Buy supplies".to_string()));

    send(&mut app, "Attempt to trade");
    assert_eq!(form(&app), Some(FormId::Trading));
}

#[test]
fn pace_and_rations_change_from_the_menu() {
    let mut app = travel_menu_app(TrailKind::Win, 7);
    send(&mut app, "Change pace");
    send(&mut app, "4");
    assert_eq!(form(&app), Some(FormId::PaceHelp));
    send(&mut app, "ok");
    send(&mut app, "grueling");
    assert_eq!(form(&app), None);
    assert!(screen(&app).contains("Pace: grueling"));

    send(&mut app, "Change food rations");
    send(&mut app, "3");
    assert_eq!(form(&app), None);
    assert!(screen(&app).contains("bare bones"));
}

// ── Ticks ──────────────────────────────────────────────────────────────

#[test]
fn system_ticks_never_advance_the_journey() {
    let mut app = travel_menu_app(TrailKind::Win, 8);
    send(&mut app, "Continue on trail");
    assert_eq!(form(&app), Some(FormId::LocationDepart));
    send(&mut app, "ok");
    assert_eq!(form(&app), Some(FormId::ContinueOnTrail));

    let date = app.game.calendar.date;
    let turns = app.game.turns;
    let odometer = app.game.vehicle.odometer;
    for _ in 0..50 {
        app.on_tick(Tick::System).unwrap();
    }
    assert_eq!(app.game.calendar.date, date);
    assert_eq!(app.game.turns, turns);
    assert_eq!(app.game.vehicle.odometer, odometer);
    assert!(!app.game.director.has_pending());

    app.on_tick(PULSE).unwrap();
    assert_eq!(app.game.turns, turns + 1);
    assert_ne!(app.game.calendar.date, date);
}

#[test]
fn win_trail_ends_in_a_score_and_a_fresh_main_menu() {
    let mut app = travel_menu_app(TrailKind::Win, 9);
    send(&mut app, "Continue on trail");
    send(&mut app, "ok");

    for _ in 0..200 {
        dismiss_events(&mut app);
        if app.windows.focused_id() == Some(WindowId::GameOver) || form(&app) == Some(FormId::LocationArrive) {
            break;
        }
        app.on_tick(PULSE).unwrap();
    }
    dismiss_events(&mut app);
    if form(&app) == Some(FormId::LocationArrive) {
        assert!(screen(&app).contains("End Of Test"));
        send(&mut app, "ok");
    }
    dismiss_events(&mut app);

    assert_eq!(app.windows.focused_id(), Some(WindowId::GameOver));
    let ending = form(&app).unwrap();
    assert!(ending == FormId::GameWin || ending == FormId::GameFail);
    if ending == FormId::GameWin {
        assert!(screen(&app).contains("Total score"));
    }

    send(&mut app, "ok");
    assert_eq!(app.windows.window_ids(), vec![WindowId::MainMenu]);
    assert!(app.game.vehicle.passengers.is_empty());
}

#[test]
fn stop_halts_the_wagon() {
    let mut app = travel_menu_app(TrailKind::Win, 10);
    send(&mut app, "Continue on trail");
    send(&mut app, "ok");
    app.on_tick(PULSE).unwrap();
    dismiss_events(&mut app);
    if form(&app) != Some(FormId::ContinueOnTrail) {
        return;
    }
    assert_eq!(commands(&app), Some(vec!["Stop".to_string()]));
    send(&mut app, "whatever was typed");
    assert_eq!(form(&app), None);
    assert!(commands(&app).unwrap().contains(&"Hunt for food".to_string()));
}

// ── Resting ────────────────────────────────────────────────────────────

#[test]
fn resting_survives_a_random_event_window() {
    let mut app = travel_menu_app(TrailKind::Win, 11);
    send(&mut app, "Stop to rest");
    assert_eq!(form(&app), Some(FormId::RestAmount));
    send(&mut app, "5");
    assert_eq!(form(&app), Some(FormId::Resting));

    app.on_tick(PULSE).unwrap();
    dismiss_events(&mut app);
    assert_eq!(form(&app), Some(FormId::Resting));
    assert!(screen(&app).contains("You rest for 1 day."));

    let game = &mut app.game;
    game.director.trigger(EventKind::BrokenArm, &mut game.vehicle, &mut game.rng);
    app.on_tick(Tick::System).unwrap();
    assert_eq!(
        app.windows.window_ids(),
        vec![WindowId::Travel, WindowId::RandomEvent]
    );

    let turns = app.game.turns;
    for _ in 0..3 {
        app.on_tick(PULSE).unwrap();
    }
    assert_eq!(app.game.turns, turns);
    send(&mut app, "Continue");

    assert_eq!(app.windows.focused_id(), Some(WindowId::Travel));
    assert_eq!(form(&app), Some(FormId::Resting));
    assert!(screen(&app).contains("You rest for 1 day."));
}

#[test]
fn lost_days_block_input_until_spent() {
    let mut app = travel_menu_app(TrailKind::Win, 12);
    let game = &mut app.game;
    game.director.trigger(EventKind::WrongTrail, &mut game.vehicle, &mut game.rng);
    app.on_tick(Tick::System).unwrap();
    assert_eq!(form(&app), Some(FormId::EventSkipDays));
    assert!(!app.windows.focused().unwrap().accepts_input());

    send(&mut app, "anything");
    assert_eq!(app.windows.focused_id(), Some(WindowId::RandomEvent));

    let date = app.game.calendar.date;
    for _ in 0..10 {
        app.on_tick(PULSE).unwrap();
    }
    assert_ne!(app.game.calendar.date, date);
    assert!(app.windows.focused().unwrap().accepts_input());
    send(&mut app, "");
    assert_eq!(app.windows.focused_id(), Some(WindowId::Travel));
}

// ── Forks and tolls ────────────────────────────────────────────────────

#[test]
fn toll_road_without_cash_returns_to_the_fork() {
    let mut app = travel_menu_app(TrailKind::Win, 13);
    put_party_at_fork(
        &mut app,
        vec![Location::toll_road("Barlow Road", Climate::Moderate)],
    );
    app.game.vehicle.inventory[Entities::Cash].quantity = 0;

    send(&mut app, "Continue on trail");
    assert_eq!(form(&app), Some(FormId::LocationFork));
    send(&mut app, "1");
    assert_eq!(form(&app), Some(FormId::TollRoadQuestion));
    assert_eq!(commands(&app), Some(vec!["Ok".to_string()]));
    assert!(screen(&app).contains("You don't have enough cash for the toll road."));

    send(&mut app, "yes");
    assert_eq!(form(&app), Some(FormId::LocationFork));
    assert_eq!(app.game.trail.locations.len(), 2);
    assert_eq!(app.game.vehicle.balance(), 0.0);
}

#[test]
fn paying_the_toll_splices_in_the_road() {
    let mut app = travel_menu_app(TrailKind::Win, 14);
    put_party_at_fork(
        &mut app,
        vec![Location::toll_road("Barlow Road", Climate::Moderate)],
    );
    app.game.vehicle.inventory[Entities::Cash].quantity = 100;

    send(&mut app, "Continue on trail");
    send(&mut app, "1");
    assert_eq!(commands(&app), Some(vec!["Yes".to_string(), "No".to_string()]));
    send(&mut app, "y");

    assert_eq!(form(&app), Some(FormId::LocationDepart));
    assert_eq!(app.game.trail.locations.len(), 3);
    assert_eq!(app.game.trail.locations[1].name, "Barlow Road");
    assert!(app.game.vehicle.balance() < 100.0);
    assert!(screen(&app).contains("to Barlow Road"));
}

#[test]
fn toll_question_follows_live_cash() {
    let mut app = travel_menu_app(TrailKind::Win, 16);
    put_party_at_fork(
        &mut app,
        vec![Location::toll_road("Barlow Road", Climate::Moderate)],
    );
    app.game.vehicle.inventory[Entities::Cash].quantity = 100;

    send(&mut app, "Continue on trail");
    send(&mut app, "1");
    assert_eq!(form(&app), Some(FormId::TollRoadQuestion));
    assert_eq!(commands(&app), Some(vec!["Yes".to_string(), "No".to_string()]));

    app.game.vehicle.inventory[Entities::Cash].quantity = 0;
    assert_eq!(commands(&app), Some(vec!["Ok".to_string()]));
    assert!(screen(&app).contains("You don't have enough cash for the toll road."));

    app.game.vehicle.inventory[Entities::Cash].quantity = 100;
    assert!(screen(&app).contains("Are you willing to do this?"));
    send(&mut app, "yes");
    assert_eq!(form(&app), Some(FormId::LocationDepart));
    assert_eq!(app.game.trail.locations[1].name, "Barlow Road");
}

#[test]
fn toll_cannot_be_paid_after_the_cash_is_gone() {
    let mut app = travel_menu_app(TrailKind::Win, 17);
    put_party_at_fork(
        &mut app,
        vec![Location::toll_road("Barlow Road", Climate::Moderate)],
    );
    app.game.vehicle.inventory[Entities::Cash].quantity = 100;

    send(&mut app, "Continue on trail");
    send(&mut app, "1");
    assert_eq!(commands(&app), Some(vec!["Yes".to_string(), "No".to_string()]));

    app.game.vehicle.inventory[Entities::Cash].quantity = 0;
    send(&mut app, "yes");
    assert_eq!(form(&app), Some(FormId::LocationFork));
    assert_eq!(app.game.trail.locations.len(), 2);
    assert_eq!(app.game.vehicle.balance(), 0.0);
}

#[test]
fn fork_choice_beyond_the_branches_shows_the_map() {
    let mut app = travel_menu_app(TrailKind::Win, 15);
    put_party_at_fork(
        &mut app,
        vec![Location::landmark("Soda Springs", Climate::Dry)],
    );
    send(&mut app, "Continue on trail");
    send(&mut app, "2");
    assert_eq!(form(&app), Some(FormId::LookAtMap));
    send(&mut app, "ok");
    assert_eq!(form(&app), Some(FormId::LocationFork));
    send(&mut app, "1");
    assert_eq!(form(&app), Some(FormId::LocationDepart));
    assert_eq!(app.game.trail.locations[1].name, "Soda Springs");
}

// ── Rivers ─────────────────────────────────────────────────────────────

#[test]
fn river_crossing_runs_to_the_far_bank() {
    let mut app = travel_menu_app(TrailKind::Win, 16);
    let mut trail = Trail::new(
        vec![
            Location::river("Big Blue River", Climate::Continental, RiverOption::FloatAndFord),
            Location::settlement("Far Town", Climate::Moderate),
        ],
        50,
        100,
        &mut app.game.rng,
    );
    trail.current_location_mut().status = LocationStatus::Arrived;
    trail.current_location_mut().arrival_flag = true;
    app.game.trail = trail;

    send(&mut app, "Continue on trail");
    assert_eq!(form(&app), Some(FormId::RiverCross));
    send(&mut app, "get more information");
    assert_eq!(form(&app), Some(FormId::FordRiverHelp));
    send(&mut app, "ok");
    send(&mut app, "ok");
    assert_eq!(form(&app), Some(FormId::RiverCross));

    send(&mut app, "caulk the wagon and float it across");
    assert_eq!(form(&app), Some(FormId::CrossingTick));
    assert!(!app.windows.focused().unwrap().accepts_input());

    for _ in 0..2000 {
        dismiss_events(&mut app);
        if app.windows.focused().unwrap().accepts_input() {
            break;
        }
        app.on_tick(PULSE).unwrap();
    }
    dismiss_events(&mut app);
    assert_eq!(form(&app), Some(FormId::CrossingTick));
    assert_eq!(commands(&app), Some(vec!["Finish crossing".to_string()]));

    send(&mut app, "");
    assert_eq!(form(&app), Some(FormId::CrossingResult));
    send(&mut app, "ok");
    dismiss_events(&mut app);
    assert_eq!(form(&app), Some(FormId::LocationDepart));
}
