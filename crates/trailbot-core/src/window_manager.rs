//! The window stack. The top window has focus and receives every tick and
//! every line of input.

use std::collections::VecDeque;

use crate::error::{EngineError, Result};
use crate::simulation::{GameState, Tick};
use crate::window::{WindowHandle, WindowId, WindowRequest, MAX_CHAINED_TRANSITIONS};
use crate::windows;

/// Builds a window for an id.
pub type WindowFactory = fn(WindowId, &mut GameState) -> Result<Box<dyn WindowHandle>>;

pub struct WindowManager {
    stack: Vec<Box<dyn WindowHandle>>,
    factory: WindowFactory,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::with_factory(windows::create_window)
    }

    pub fn with_factory(factory: WindowFactory) -> Self {
        Self {
            stack: Vec::new(),
            factory,
        }
    }

    pub fn focused(&self) -> Option<&dyn WindowHandle> {
        self.stack.last().map(|window| window.as_ref())
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused().map(|window| window.id())
    }

    /// Bottom to top.
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.stack.iter().map(|window| window.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push a new window and give it focus.
    pub fn add(&mut self, id: WindowId, game: &mut GameState) -> Result<()> {
        let requests = self.push(id, game)?;
        self.apply(game, requests)
    }

    /// Pop the focused window and reactivate the one below.
    pub fn remove(&mut self, game: &mut GameState) -> Result<()> {
        let requests = self.pop(game)?;
        self.apply(game, requests)
    }

    pub fn tick(&mut self, game: &mut GameState, tick: Tick) -> Result<()> {
        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };
        let requests = top.tick(game, tick)?;
        self.apply(game, requests)
    }

    /// Hand a completed line to the focused window. Dropped when the window
    /// is not taking input.
    pub fn input(&mut self, game: &mut GameState, line: &str) -> Result<()> {
        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };
        if !top.accepts_input() {
            return Ok(());
        }
        let requests = top.input(game, line)?;
        self.apply(game, requests)
    }

    pub fn clear(&mut self) {
        if !self.stack.is_empty() {
            log::debug!("clearing {} windows", self.stack.len());
        }
        self.stack.clear();
    }

    fn push(&mut self, id: WindowId, game: &mut GameState) -> Result<Vec<WindowRequest>> {
        let window = (self.factory)(id, game)?;
        log::debug!("[{}] push {:?}", game.session, id);
        self.stack.push(window);

        let count = self.stack.len();
        let mut requests = self.stack[count - 1].post_create(game)?;
        if count >= 2 {
            requests.extend(self.stack[count - 2].window_added(game)?);
        }
        Ok(requests)
    }

    fn pop(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>> {
        if let Some(window) = self.stack.pop() {
            log::debug!("[{}] pop {:?}", game.session, window.id());
        }
        match self.stack.last_mut() {
            Some(top) => top.activate(game),
            None => Ok(Vec::new()),
        }
    }

    /// Run window requests in order, then surface any queued random events.
    fn apply(&mut self, game: &mut GameState, requests: Vec<WindowRequest>) -> Result<()> {
        let mut queue: VecDeque<WindowRequest> = requests.into();
        let mut transitions = 0;
        loop {
            while let Some(request) = queue.pop_front() {
                transitions += 1;
                if transitions > MAX_CHAINED_TRANSITIONS {
                    return Err(EngineError::NavigationLoop {
                        window: None,
                        transitions,
                    });
                }
                let more = match request {
                    WindowRequest::Add(id) => self.push(id, game)?,
                    WindowRequest::Close => self.pop(game)?,
                    WindowRequest::Reset => {
                        log::info!("[{}] restarting at the main menu", game.session);
                        self.clear();
                        game.restart();
                        self.push(WindowId::MainMenu, game)?
                    }
                };
                queue.extend(more);
            }

            let showing_event = self.focused_id() == Some(WindowId::RandomEvent);
            if self.is_empty() || showing_event || !game.director.has_pending() {
                return Ok(());
            }
            queue.push_back(WindowRequest::Add(WindowId::RandomEvent));
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Form, FormId};
    use crate::session::SessionId;
    use crate::window::{MenuCommand, Screen, Window, WindowCtx};
    use trailbot_logic::trail::TrailKind;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Push,
        Pop,
    }

    impl MenuCommand for Cmd {
        fn label(self) -> &'static str {
            match self {
                Cmd::Push => "push",
                Cmd::Pop => "pop",
            }
        }
    }

    /// Records its hooks in its own render text.
    struct Recorder<const N: usize>;

    impl<const N: usize> Recorder<N> {
        fn push(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.add_window(WindowId::ALL[(N + 1) % 4]);
            Ok(())
        }

        fn pop(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.close_window();
            Ok(())
        }

        fn note(ctx: &mut WindowCtx<'_, Self>, what: &str) {
            ctx.data.push(what.to_string());
            let text = ctx.data.join(",");
            ctx.set_header(text);
        }
    }

    impl<const N: usize> Screen for Recorder<N> {
        type Data = Vec<String>;
        type Command = Cmd;

        const ID: WindowId = WindowId::ALL[N];

        fn create(_game: &mut GameState) -> Result<(Self, Vec<String>)> {
            Ok((Recorder, Vec::new()))
        }

        fn create_form(_id: FormId) -> Option<Box<dyn Form<Vec<String>>>> {
            None
        }

        fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.add_command(Cmd::Push, Self::push);
            ctx.add_command(Cmd::Pop, Self::pop);
            Self::note(ctx, "created");
            Ok(())
        }

        fn on_activate(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            Self::note(ctx, "activated");
            Ok(())
        }

        fn on_window_added(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            Self::note(ctx, "covered");
            Ok(())
        }
    }

    fn factory(id: WindowId, game: &mut GameState) -> Result<Box<dyn WindowHandle>> {
        let window: Box<dyn WindowHandle> = match id {
            WindowId::MainMenu => Box::new(Window::<Recorder<0>>::create(game)?),
            WindowId::Travel => Box::new(Window::<Recorder<1>>::create(game)?),
            WindowId::RandomEvent => Box::new(Window::<Recorder<2>>::create(game)?),
            WindowId::GameOver => Box::new(Window::<Recorder<3>>::create(game)?),
        };
        Ok(window)
    }

    fn header(manager: &WindowManager, game: &GameState) -> String {
        let text = manager.focused().map(|w| w.render(game)).unwrap_or_default();
        text.lines().next().unwrap_or_default().to_string()
    }

    #[test]
    fn test_empty_has_no_focus() {
        let manager = WindowManager::with_factory(factory);
        assert!(manager.focused().is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_push_focuses_and_notifies_below() {
        let mut game = GameState::new(SessionId(1), TrailKind::Win, Some(1));
        let mut manager = WindowManager::with_factory(factory);
        manager.add(WindowId::MainMenu, &mut game).unwrap();
        manager.input(&mut game, "push").unwrap();
        assert_eq!(manager.window_ids(), vec![WindowId::MainMenu, WindowId::Travel]);
        assert_eq!(header(&manager, &game), "created");

        manager.input(&mut game, "pop").unwrap();
        assert_eq!(manager.focused_id(), Some(WindowId::MainMenu));
        assert_eq!(header(&manager, &game), "created,covered,activated");
    }

    #[test]
    fn test_remove_last_window_empties_stack() {
        let mut game = GameState::new(SessionId(1), TrailKind::Win, Some(1));
        let mut manager = WindowManager::with_factory(factory);
        manager.add(WindowId::GameOver, &mut game).unwrap();
        manager.remove(&mut game).unwrap();
        assert!(manager.focused().is_none());
        manager.tick(&mut game, Tick::System).unwrap();
        manager.input(&mut game, "push").unwrap();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_pending_event_pushes_event_window() {
        let mut game = GameState::new(SessionId(1), TrailKind::Win, Some(1));
        let mut manager = WindowManager::with_factory(factory);
        manager.add(WindowId::Travel, &mut game).unwrap();
        game.director
            .trigger(trailbot_logic::events::EventKind::LostTrail, &mut game.vehicle, &mut game.rng);
        manager.tick(&mut game, Tick::System).unwrap();
        assert_eq!(manager.window_ids(), vec![WindowId::Travel, WindowId::RandomEvent]);

        // The recorder never consumes the event, so it stays on top.
        manager.tick(&mut game, Tick::System).unwrap();
        assert_eq!(manager.len(), 2);
    }
}
