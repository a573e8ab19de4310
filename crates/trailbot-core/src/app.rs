//! One running game: simulation state plus the window stack, the scene graph
//! and the input buffer.

use std::sync::mpsc::Sender;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::input::InputManager;
use crate::scene_graph::{SceneGraph, ScreenUpdate};
use crate::session::SessionId;
use crate::simulation::{GameState, Tick};
use crate::window::WindowId;
use crate::window_manager::WindowManager;
use crate::windows;

pub struct GameSimulationApp {
    pub game: GameState,
    pub windows: WindowManager,
    pub scene: SceneGraph,
    pub input: InputManager,
}

impl GameSimulationApp {
    /// Start a session at the main menu.
    pub fn new(session: SessionId, config: &SimulationConfig, sender: Sender<ScreenUpdate>) -> Result<Self> {
        windows::verify_form_registry()?;
        let mut game = GameState::new(session, config.trail, config.seed);
        let mut windows = WindowManager::new();
        windows.add(WindowId::MainMenu, &mut game)?;
        log::info!("[{}] session started on the {} trail", session, config.trail);
        Ok(Self {
            game,
            windows,
            scene: SceneGraph::new(sender),
            input: InputManager::new(),
        })
    }

    pub fn session(&self) -> SessionId {
        self.game.session
    }

    /// Tick the focused window, then render. Returns true when a screen
    /// update went out.
    pub fn on_tick(&mut self, tick: Tick) -> Result<bool> {
        self.windows.tick(&mut self.game, tick)?;
        Ok(self.scene.render(self.game.session, &self.windows, &self.game))
    }

    /// Treat `line` as one completed line of input.
    pub fn send_input(&mut self, line: &str) -> Result<()> {
        self.input.add_str(line);
        self.input.send_input_buffer_as_command(&mut self.windows, &mut self.game)
    }

    pub fn destroy(&mut self) {
        self.windows.clear();
        self.input.clear_buffer();
        self.scene.clear();
        log::info!("[{}] session destroyed", self.game.session);
    }
}
