//! Line buffering between the transport and the focused window.

use crate::error::Result;
use crate::simulation::GameState;
use crate::window_manager::WindowManager;

#[derive(Debug, Default)]
pub struct InputManager {
    buffer: String,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn add_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Send the buffered line, trimmed, to the focused window and empty the
    /// buffer. An empty line is still sent; it stands for ENTER.
    pub fn send_input_buffer_as_command(&mut self, windows: &mut WindowManager, game: &mut GameState) -> Result<()> {
        let line = self.buffer.trim().to_string();
        self.buffer.clear();
        windows.input(game, &line)
    }
}
