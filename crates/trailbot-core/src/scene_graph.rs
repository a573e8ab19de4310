//! Render diffing. Pulls text from the focused window and emits a
//! [`ScreenUpdate`] only when it changed.

use std::sync::mpsc::Sender;

use crate::session::SessionId;
use crate::simulation::GameState;
use crate::window_manager::WindowManager;

pub const NO_WINDOW_TEXT: &str = "[NO WINDOW ATTACHED]";
pub const DEFAULT_WINDOW_TEXT: &str = "[DEFAULT WINDOW TEXT]";

/// One change of screen for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenUpdate {
    pub session: SessionId,
    pub content: String,
    /// `None` or empty means free text.
    pub commands: Option<Vec<String>>,
    pub image: Option<String>,
}

pub struct SceneGraph {
    screen_buffer: String,
    sender: Sender<ScreenUpdate>,
}

impl SceneGraph {
    pub fn new(sender: Sender<ScreenUpdate>) -> Self {
        Self {
            screen_buffer: String::new(),
            sender,
        }
    }

    /// Last text rendered, whether or not it was sent.
    pub fn screen_buffer(&self) -> &str {
        &self.screen_buffer
    }

    pub fn clear(&mut self) {
        self.screen_buffer.clear();
    }

    /// Render the focused window. Returns true when an update was sent.
    pub fn render(&mut self, session: SessionId, windows: &WindowManager, game: &GameState) -> bool {
        let text = match windows.focused() {
            None => NO_WINDOW_TEXT.to_string(),
            Some(window) => {
                let text = window.render(game);
                if text.trim().is_empty() {
                    DEFAULT_WINDOW_TEXT.to_string()
                } else {
                    text
                }
            }
        };

        if text.to_lowercase() == self.screen_buffer.to_lowercase() {
            return false;
        }
        self.screen_buffer = text;

        let Some(window) = windows.focused() else {
            return false;
        };
        if !window.accepts_input() {
            return false;
        }

        let update = ScreenUpdate {
            session,
            content: self.screen_buffer.clone(),
            commands: window.menu_commands(game),
            image: window.image(),
        };
        if self.sender.send(update).is_err() {
            log::warn!("[{}] screen update dropped, nobody is listening", session);
        }
        true
    }
}
