//! Host-side session registry.
//!
//! Inbound text never touches a game directly: it is posted to the session's
//! mailbox and applied by the next [`SessionRegistry::pump`], which ticks
//! every session in turn while holding the registry lock.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::app::GameSimulationApp;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::scene_graph::ScreenUpdate;
use crate::simulation::Tick;

/// Transport-side conversation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Session {
    app: GameSimulationApp,
    inbox: Sender<String>,
    mailbox: Receiver<String>,
    last_pulse: Instant,
}

impl Session {
    fn new(app: GameSimulationApp) -> Self {
        let (inbox, mailbox) = mpsc::channel();
        Self {
            app,
            inbox,
            mailbox,
            last_pulse: Instant::now(),
        }
    }

    /// Drain the mailbox, run a system tick, and pulse when one is due.
    fn step(&mut self, now: Instant, pulse_interval: Duration) -> Result<()> {
        while let Ok(line) = self.mailbox.try_recv() {
            self.app.send_input(&line)?;
        }
        self.app.on_tick(Tick::System)?;
        if now.saturating_duration_since(self.last_pulse) >= pulse_interval {
            self.last_pulse = now;
            self.app.on_tick(Tick::Pulse { skip_day: false })?;
        }
        Ok(())
    }
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
    config: SimulationConfig,
    updates: Sender<ScreenUpdate>,
}

impl SessionRegistry {
    pub fn new(config: SimulationConfig, updates: Sender<ScreenUpdate>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
            updates,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Post a line to a session, starting the session on first contact.
    pub fn deliver(&self, id: SessionId, text: &str) -> Result<()> {
        let mut sessions = self.lock();
        let session = match sessions.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let app = GameSimulationApp::new(id, &self.config, self.updates.clone())?;
                entry.insert(Session::new(app))
            }
        };
        if session.inbox.send(text.to_string()).is_err() {
            log::warn!("[{}] mailbox closed, input dropped", id);
        }
        Ok(())
    }

    pub fn pump(&self) {
        self.pump_at(Instant::now());
    }

    /// One serial pass over every session. A session that fails is logged
    /// and destroyed.
    pub fn pump_at(&self, now: Instant) {
        let interval = self.config.pulse_interval();
        let mut sessions = self.lock();
        let mut failed = Vec::new();
        for (id, session) in sessions.iter_mut() {
            if let Err(err) = session.step(now, interval) {
                log::error!("[{}] {}", id, err);
                failed.push(*id);
            }
        }
        for id in failed {
            if let Some(mut session) = sessions.remove(&id) {
                session.app.destroy();
                log::warn!("[{}] session dropped after engine error", id);
            }
        }
    }

    /// Remove a session and tear down its windows.
    pub fn destroy(&self, id: SessionId) -> bool {
        match self.lock().remove(&id) {
            Some(mut session) => {
                session.app.destroy();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.lock().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Look at a session's app under the registry lock.
    pub fn with_session<R>(&self, id: SessionId, f: impl FnOnce(&mut GameSimulationApp) -> R) -> Option<R> {
        self.lock().get_mut(&id).map(|session| f(&mut session.app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailbot_logic::trail::TrailKind;

    fn registry() -> (SessionRegistry, Receiver<ScreenUpdate>) {
        let (tx, rx) = mpsc::channel();
        let config = SimulationConfig {
            trail: TrailKind::Win,
            seed: Some(3),
            ..SimulationConfig::default()
        };
        (SessionRegistry::new(config, tx), rx)
    }

    #[test]
    fn test_first_message_creates_session() {
        let (registry, rx) = registry();
        assert!(registry.is_empty());
        registry.deliver(SessionId(10), "hello").unwrap();
        assert_eq!(registry.session_ids(), vec![SessionId(10)]);

        registry.pump();
        let update = rx.try_recv().unwrap();
        assert_eq!(update.session, SessionId(10));
    }

    #[test]
    fn test_input_waits_for_pump() {
        let (registry, _rx) = registry();
        registry.deliver(SessionId(1), "1").unwrap();
        registry.deliver(SessionId(1), "1").unwrap();
        let before = registry.with_session(SessionId(1), |app| app.windows.focused().and_then(|w| w.current_form()));
        assert_eq!(before, Some(None));

        registry.pump();
        let after = registry.with_session(SessionId(1), |app| app.windows.focused().and_then(|w| w.current_form()));
        assert_eq!(after, Some(Some(crate::form::FormId::InputPlayerNames)));
    }

    #[test]
    fn test_destroy_removes_session() {
        let (registry, _rx) = registry();
        registry.deliver(SessionId(5), "").unwrap();
        assert!(registry.destroy(SessionId(5)));
        assert!(!registry.destroy(SessionId(5)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionId(-42).to_string(), "-42");
    }
}
