//! Engine error type.
//!
//! Bad user input is never an error; forms drop it and re-render. Everything
//! here is fatal for the session that raised it.

use thiserror::Error;

use crate::form::FormId;
use crate::window::WindowId;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A form was attached while the game was in a state it cannot handle,
    /// e.g. the fork menu while the current location is not a fork.
    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    /// A dispatch over a closed set reached a branch that should not exist.
    #[error("Unreachable state: {0}")]
    Unreachable(String),

    #[error("Could not construct window {window:?}: {reason}")]
    WindowConstruction { window: WindowId, reason: String },

    #[error("Form {form:?} is not registered for window {window:?}")]
    FormConstruction { form: FormId, window: WindowId },

    /// `window` is `None` when the loop ran through the window stack itself.
    #[error("Navigation loop in {window:?} after {transitions} chained transitions")]
    NavigationLoop { window: Option<WindowId>, transitions: usize },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
