//! The game's windows and the registry tying every form to its window.

pub mod game_over;
pub mod main_menu;
pub mod random_event;
pub mod travel;

use crate::error::{EngineError, Result};
use crate::form::FormId;
use crate::simulation::GameState;
use crate::window::{Screen, Window, WindowHandle, WindowId};

use game_over::GameOver;
use main_menu::MainMenu;
use random_event::RandomEvent;
use travel::Travel;

/// Default window factory.
pub fn create_window(id: WindowId, game: &mut GameState) -> Result<Box<dyn WindowHandle>> {
    let window: Box<dyn WindowHandle> = match id {
        WindowId::MainMenu => Box::new(Window::<MainMenu>::create(game)?),
        WindowId::Travel => Box::new(Window::<Travel>::create(game)?),
        WindowId::RandomEvent => Box::new(Window::<RandomEvent>::create(game)?),
        WindowId::GameOver => Box::new(Window::<GameOver>::create(game)?),
    };
    Ok(window)
}

/// Whether `window` can build `form`.
pub fn form_exists(window: WindowId, form: FormId) -> bool {
    match window {
        WindowId::MainMenu => MainMenu::create_form(form).is_some(),
        WindowId::Travel => Travel::create_form(form).is_some(),
        WindowId::RandomEvent => RandomEvent::create_form(form).is_some(),
        WindowId::GameOver => GameOver::create_form(form).is_some(),
    }
}

/// Every form must be buildable by its parent window and by no other.
pub fn verify_form_registry() -> Result<()> {
    for form in FormId::ALL {
        for window in WindowId::ALL {
            if form_exists(window, form) != (form.parent() == window) {
                return Err(EngineError::FormConstruction { form, window });
            }
        }
    }
    Ok(())
}

/// Pick from a numbered list by 1-based number or case-insensitive label.
pub(crate) fn choose<S: AsRef<str>>(options: &[S], input: &str) -> Option<usize> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).filter(|&i| i < options.len());
    }
    options
        .iter()
        .position(|option| option.as_ref().eq_ignore_ascii_case(input))
}

/// "  1. first\n  2. second"
pub(crate) fn numbered<S: AsRef<str>>(options: &[S]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("  {}. {}", i + 1, option.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|option| option.to_string()).collect()
}
