//! TrailBot Core - text adventure engine for chat transports
//!
//! Drives one Oregon Trail journey per chat session. Each session owns a
//! stack of windows; the focused window either shows its menu or hands
//! control to one modal form. Text from the transport goes to whatever is
//! focused, and a scene graph pushes a fresh screen back only when the
//! rendered text actually changed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`app`] | One running game: state, window stack, scene graph, input |
//! | [`config`] | JSON configuration for the host loop |
//! | [`error`] | Engine error type |
//! | [`form`] | Forms, dialogs, and the form context |
//! | [`input`] | Line buffer between the transport and the window stack |
//! | [`scene_graph`] | Render, diff, and publish screen updates |
//! | [`session`] | Session ids and the registry the host pumps |
//! | [`simulation`] | Game state and the logical turn |
//! | [`window`] | Window menus, the screen trait, and type-erased windows |
//! | [`window_manager`] | The per-session window stack |
//! | [`windows`] | The main menu, travel, random event, and game over windows |
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::mpsc;
//! use trailbot_core::config::SimulationConfig;
//! use trailbot_core::session::{SessionId, SessionRegistry};
//!
//! let (tx, rx) = mpsc::channel();
//! let registry = SessionRegistry::new(SimulationConfig::default(), tx);
//!
//! registry.deliver(SessionId(1), "1").unwrap();
//! loop {
//!     registry.pump();
//!     while let Ok(update) = rx.try_recv() {
//!         println!("{}", update.content);
//!     }
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod input;
pub mod scene_graph;
pub mod session;
pub mod simulation;
pub mod window;
pub mod window_manager;
pub mod windows;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::app::GameSimulationApp;
    pub use crate::config::SimulationConfig;
    pub use crate::error::{EngineError, Result};
    pub use crate::scene_graph::ScreenUpdate;
    pub use crate::session::{SessionId, SessionRegistry};
    pub use crate::simulation::{GameState, Tick};
    pub use crate::window::WindowId;
}
