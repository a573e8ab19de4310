//! Property tests over arbitrary player input and tick interleavings.

use std::sync::mpsc;

use proptest::prelude::*;
use trailbot_core::app::GameSimulationApp;
use trailbot_core::config::SimulationConfig;
use trailbot_core::form::{DialogResponse, DialogType};
use trailbot_core::session::SessionId;
use trailbot_core::simulation::Tick;
use trailbot_logic::trail::TrailKind;

#[derive(Debug, Clone)]
enum Step {
    Line(String),
    System,
    Pulse,
}

/// Words the windows actually react to, mixed with noise.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..12).prop_map(|n| n.to_string()),
        Just(String::new()),
        Just("yes".to_string()),
        Just("no".to_string()),
        Just("ok".to_string()),
        Just("Ann".to_string()),
        Just("Oxen".to_string()),
        Just("Food".to_string()),
        Just("Leave store".to_string()),
        Just("Continue on trail".to_string()),
        Just("Stop".to_string()),
        "[a-z ]{0,12}",
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => line().prop_map(Step::Line),
        2 => Just(Step::System),
        1 => Just(Step::Pulse),
    ]
}

fn app(seed: u64) -> GameSimulationApp {
    let (tx, _rx) = mpsc::channel();
    let config = SimulationConfig {
        trail: TrailKind::Win,
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    GameSimulationApp::new(SessionId(3), &config, tx).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_interleaving_keeps_a_window_focused(
        seed in 0u64..1000,
        steps in proptest::collection::vec(step(), 1..120)
    ) {
        let mut app = app(seed);
        for step in steps {
            let result = match step {
                Step::Line(text) => app.send_input(&text),
                Step::System => app.on_tick(Tick::System).map(|_| ()),
                Step::Pulse => app.on_tick(Tick::Pulse { skip_day: false }).map(|_| ()),
            };
            prop_assert!(result.is_ok());
            prop_assert!(!app.windows.is_empty());
        }
    }

    #[test]
    fn input_and_system_ticks_never_take_a_turn(
        seed in 0u64..1000,
        lines in proptest::collection::vec(line(), 1..80)
    ) {
        let mut app = app(seed);
        for text in lines {
            app.send_input(&text).unwrap();
            app.on_tick(Tick::System).unwrap();
            prop_assert_eq!(app.game.turns, 0);
        }
    }

    #[test]
    fn second_render_sends_nothing(
        seed in 0u64..1000,
        lines in proptest::collection::vec(line(), 0..40)
    ) {
        let mut app = app(seed);
        for text in lines {
            app.send_input(&text).unwrap();
        }
        app.on_tick(Tick::System).unwrap();
        prop_assert!(!app.on_tick(Tick::System).unwrap());
    }

    #[test]
    fn yes_no_accepts_only_yes_or_no(input in "\\PC{0,8}") {
        match DialogResponse::parse(DialogType::YesNo, &input) {
            Some(DialogResponse::Yes) => {
                prop_assert!(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"));
            }
            Some(DialogResponse::No) => {
                prop_assert!(matches!(input.trim().to_lowercase().as_str(), "n" | "no"));
            }
            Some(other) => prop_assert!(false, "unexpected response {:?}", other),
            None => {}
        }
    }

    #[test]
    fn prompt_accepts_anything(input in "\\PC{0,16}") {
        prop_assert_eq!(DialogResponse::parse(DialogType::Prompt, &input), Some(DialogResponse::Ok));
    }
}
