//! Windows: one screen of the game with a command menu, a data bag and at
//! most one active form.
//!
//! A concrete window implements [`Screen`]. [`Window`] wraps it with the menu
//! and form bookkeeping, and the window manager stores it type-erased as a
//! [`WindowHandle`].

use std::fmt;

use crate::error::{EngineError, Result};
use crate::form::{Form, FormCtx, FormId, FormView};
use crate::simulation::{GameState, Tick};

/// Most form or window transitions one dispatch may chain before it is
/// treated as a loop.
pub const MAX_CHAINED_TRANSITIONS: usize = 32;

/// Every window in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowId {
    MainMenu,
    Travel,
    RandomEvent,
    GameOver,
}

impl WindowId {
    pub const ALL: [WindowId; 4] = [
        WindowId::MainMenu,
        WindowId::Travel,
        WindowId::RandomEvent,
        WindowId::GameOver,
    ];
}

/// A closed set of menu entries for one window.
pub trait MenuCommand: Copy + Eq + Send + fmt::Debug + 'static {
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRequest {
    Set(FormId),
    Clear,
}

/// Window stack changes requested from inside a window or form hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    Add(WindowId),
    Close,
    /// Clear the stack and start over at the main menu.
    Reset,
}

/// Navigation queued by a hook. Applied once the hook returns.
#[derive(Debug, Default)]
pub struct Navigation {
    /// Last request wins.
    form: Option<FormRequest>,
    windows: Vec<WindowRequest>,
}

impl Navigation {
    pub(crate) fn set_form(&mut self, id: FormId) {
        self.form = Some(FormRequest::Set(id));
    }

    pub(crate) fn clear_form(&mut self) {
        self.form = Some(FormRequest::Clear);
    }

    pub(crate) fn push_window(&mut self, request: WindowRequest) {
        self.windows.push(request);
    }

    fn take_form(&mut self) -> Option<FormRequest> {
        self.form.take()
    }

    fn into_windows(self) -> Vec<WindowRequest> {
        self.windows
    }
}

/// Handler bound to a menu entry.
pub type CommandHandler<S> = fn(&mut S, &mut WindowCtx<'_, S>) -> Result<()>;

/// Header text plus the ordered command list shown when no form is active.
pub struct Menu<S: Screen> {
    header: String,
    commands: Vec<(S::Command, CommandHandler<S>)>,
}

impl<S: Screen> Menu<S> {
    fn new() -> Self {
        Self {
            header: String::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = S::Command> + '_ {
        self.commands.iter().map(|(cmd, _)| *cmd)
    }

    pub fn labels(&self) -> Vec<String> {
        self.commands().map(|cmd| cmd.label().to_string()).collect()
    }

    /// Match a line by 1-based number or case-insensitive label.
    fn find(&self, line: &str) -> Option<CommandHandler<S>> {
        let line = line.trim();
        if let Ok(n) = line.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.commands.get(i))
                .map(|(_, handler)| *handler);
        }
        self.commands
            .iter()
            .find(|(cmd, _)| cmd.label().eq_ignore_ascii_case(line))
            .map(|(_, handler)| *handler)
    }

    fn render(&self) -> String {
        let mut out = self.header.clone();
        if !self.commands.is_empty() {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            let lines: Vec<String> = self
                .commands
                .iter()
                .enumerate()
                .map(|(i, (cmd, _))| format!("  {}. {}", i + 1, cmd.label()))
                .collect();
            out.push_str(&lines.join("\n"));
        }
        out
    }
}

/// Mutable context for window hooks and command handlers.
pub struct WindowCtx<'a, S: Screen> {
    pub game: &'a mut GameState,
    pub data: &'a mut S::Data,
    menu: &'a mut Menu<S>,
    form: Option<FormId>,
    nav: &'a mut Navigation,
}

impl<'a, S: Screen> WindowCtx<'a, S> {
    /// Append a menu entry. Entries keep insertion order.
    pub fn add_command(&mut self, command: S::Command, handler: CommandHandler<S>) {
        self.menu.commands.push((command, handler));
    }

    pub fn clear_commands(&mut self) {
        self.menu.commands.clear();
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.menu.header = header.into();
    }

    /// Form active when the hook started. Requests made during the hook
    /// are not reflected until it returns.
    pub fn current_form(&self) -> Option<FormId> {
        self.form
    }

    pub fn has_form(&self) -> bool {
        self.form.is_some()
    }

    pub fn set_form(&mut self, id: FormId) {
        self.nav.set_form(id);
    }

    pub fn clear_form(&mut self) {
        self.nav.clear_form();
    }

    pub fn add_window(&mut self, id: WindowId) {
        self.nav.push_window(WindowRequest::Add(id));
    }

    pub fn close_window(&mut self) {
        self.nav.push_window(WindowRequest::Close);
    }

    pub fn restart(&mut self) {
        self.nav.push_window(WindowRequest::Reset);
    }
}

/// Behaviour of one concrete window.
pub trait Screen: Send + Sized + 'static {
    type Data: Send + 'static;
    type Command: MenuCommand;

    const ID: WindowId;

    /// Build the window and its data bag. Failing here is fatal.
    fn create(game: &mut GameState) -> Result<(Self, Self::Data)>;

    /// Form registry for this window. `None` for ids that belong elsewhere.
    fn create_form(id: FormId) -> Option<Box<dyn Form<Self::Data>>>;

    /// Runs once after the window is pushed. Build the menu here.
    fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()>;

    /// Runs each time the window becomes the top of the stack again.
    fn on_activate(&mut self, _ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        Ok(())
    }

    /// Runs when another window is pushed above this one.
    fn on_window_added(&mut self, _ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        Ok(())
    }

    /// Runs after every form set or clear.
    fn on_form_change(&mut self, _ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        Ok(())
    }

    /// Tick with no active form.
    fn on_tick(&mut self, _ctx: &mut WindowCtx<'_, Self>, _tick: Tick) -> Result<()> {
        Ok(())
    }

    fn image(&self) -> Option<String> {
        None
    }

    fn allow_input(&self) -> bool {
        true
    }
}

struct ActiveForm<D> {
    id: FormId,
    form: Box<dyn Form<D>>,
}

/// A screen plus its menu, data bag and active form.
pub struct Window<S: Screen> {
    screen: S,
    data: S::Data,
    menu: Menu<S>,
    form: Option<ActiveForm<S::Data>>,
}

impl<S: Screen> Window<S> {
    pub fn create(game: &mut GameState) -> Result<Self> {
        let (screen, data) = S::create(game)?;
        Ok(Self {
            screen,
            data,
            menu: Menu::new(),
            form: None,
        })
    }

    pub fn data(&self) -> &S::Data {
        &self.data
    }

    fn run_screen<F>(&mut self, game: &mut GameState, nav: &mut Navigation, f: F) -> Result<()>
    where
        F: FnOnce(&mut S, &mut WindowCtx<'_, S>) -> Result<()>,
    {
        let mut ctx = WindowCtx {
            game,
            data: &mut self.data,
            menu: &mut self.menu,
            form: self.form.as_ref().map(|active| active.id),
            nav,
        };
        f(&mut self.screen, &mut ctx)
    }

    fn run_form<F>(&mut self, game: &mut GameState, nav: &mut Navigation, f: F) -> Result<()>
    where
        F: FnOnce(&mut Box<dyn Form<S::Data>>, &mut FormCtx<'_, S::Data>) -> Result<()>,
    {
        let Some(active) = self.form.as_mut() else {
            return Ok(());
        };
        let mut ctx = FormCtx::new(game, &mut self.data, nav);
        f(&mut active.form, &mut ctx)
    }

    /// Apply queued form requests until none are left.
    fn settle(&mut self, game: &mut GameState, nav: &mut Navigation) -> Result<()> {
        let mut transitions = 0;
        while let Some(request) = nav.take_form() {
            transitions += 1;
            if transitions > MAX_CHAINED_TRANSITIONS {
                return Err(EngineError::NavigationLoop {
                    window: Some(S::ID),
                    transitions,
                });
            }
            match request {
                FormRequest::Set(id) => {
                    let form = S::create_form(id).ok_or(EngineError::FormConstruction { form: id, window: S::ID })?;
                    log::debug!("[{}] {:?} form -> {:?}", game.session, S::ID, id);
                    self.form = Some(ActiveForm { id, form });
                    self.run_form(game, nav, |form, ctx| form.on_post_create(ctx))?;
                }
                FormRequest::Clear => {
                    if self.form.take().is_some() {
                        log::debug!("[{}] {:?} form cleared", game.session, S::ID);
                    }
                }
            }
            self.run_screen(game, nav, |screen, ctx| screen.on_form_change(ctx))?;
        }
        Ok(())
    }

    fn dispatch<F>(&mut self, game: &mut GameState, f: F) -> Result<Vec<WindowRequest>>
    where
        F: FnOnce(&mut Self, &mut GameState, &mut Navigation) -> Result<()>,
    {
        let mut nav = Navigation::default();
        f(self, game, &mut nav)?;
        self.settle(game, &mut nav)?;
        Ok(nav.into_windows())
    }

    fn menu_input(&mut self, game: &mut GameState, nav: &mut Navigation, line: &str) -> Result<()> {
        match self.menu.find(line) {
            Some(handler) => self.run_screen(game, nav, |screen, ctx| handler(screen, ctx)),
            None => Ok(()),
        }
    }
}

/// Type-erased window as stored on the window stack.
pub trait WindowHandle: Send {
    fn id(&self) -> WindowId;

    fn current_form(&self) -> Option<FormId>;

    fn post_create(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>>;

    fn activate(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>>;

    fn window_added(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>>;

    fn tick(&mut self, game: &mut GameState, tick: Tick) -> Result<Vec<WindowRequest>>;

    fn input(&mut self, game: &mut GameState, line: &str) -> Result<Vec<WindowRequest>>;

    fn render(&self, game: &GameState) -> String;

    /// Discrete choices for the transport. `None` means free text.
    fn menu_commands(&self, game: &GameState) -> Option<Vec<String>>;

    fn accepts_input(&self) -> bool;

    fn image(&self) -> Option<String>;
}

impl<S: Screen> WindowHandle for Window<S> {
    fn id(&self) -> WindowId {
        S::ID
    }

    fn current_form(&self) -> Option<FormId> {
        self.form.as_ref().map(|active| active.id)
    }

    fn post_create(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>> {
        self.dispatch(game, |w, game, nav| {
            w.run_screen(game, nav, |screen, ctx| screen.on_post_create(ctx))
        })
    }

    fn activate(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>> {
        self.dispatch(game, |w, game, nav| {
            w.run_screen(game, nav, |screen, ctx| screen.on_activate(ctx))?;
            w.run_form(game, nav, |form, ctx| form.on_activate(ctx))
        })
    }

    fn window_added(&mut self, game: &mut GameState) -> Result<Vec<WindowRequest>> {
        self.dispatch(game, |w, game, nav| {
            w.run_screen(game, nav, |screen, ctx| screen.on_window_added(ctx))
        })
    }

    fn tick(&mut self, game: &mut GameState, tick: Tick) -> Result<Vec<WindowRequest>> {
        self.dispatch(game, |w, game, nav| {
            if w.form.is_some() {
                w.run_form(game, nav, |form, ctx| form.on_tick(ctx, tick))
            } else {
                w.run_screen(game, nav, |screen, ctx| screen.on_tick(ctx, tick))
            }
        })
    }

    fn input(&mut self, game: &mut GameState, line: &str) -> Result<Vec<WindowRequest>> {
        self.dispatch(game, |w, game, nav| {
            let gate = w
                .form
                .as_ref()
                .map(|active| (active.form.allow_input(), active.form.input_fills_buffer()));
            match gate {
                None => w.menu_input(game, nav, line),
                Some((false, _)) => Ok(()),
                Some((true, fills)) => {
                    let line = if fills { line } else { "" };
                    w.run_form(game, nav, |form, ctx| form.on_input(ctx, line))
                }
            }
        })
    }

    fn render(&self, game: &GameState) -> String {
        match &self.form {
            Some(active) => active.form.render(&FormView { game, data: &self.data }),
            None => self.menu.render(),
        }
    }

    fn menu_commands(&self, game: &GameState) -> Option<Vec<String>> {
        match &self.form {
            Some(active) => active.form.menu_commands(&FormView { game, data: &self.data }),
            None => {
                let labels = self.menu.labels();
                if labels.is_empty() {
                    None
                } else {
                    Some(labels)
                }
            }
        }
    }

    fn accepts_input(&self) -> bool {
        self.screen.allow_input() && self.form.as_ref().map_or(true, |active| active.form.allow_input())
    }

    fn image(&self) -> Option<String> {
        self.form
            .as_ref()
            .and_then(|active| active.form.image().map(str::to_string))
            .or_else(|| self.screen.image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{dialog, Dialog, DialogResponse, DialogType};
    use crate::session::SessionId;
    use trailbot_logic::trail::TrailKind;

    #[derive(Default)]
    struct ProbeData {
        log: Vec<String>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ProbeCommand {
        Ping,
        Open,
    }

    impl MenuCommand for ProbeCommand {
        fn label(self) -> &'static str {
            match self {
                ProbeCommand::Ping => "Ping",
                ProbeCommand::Open => "Open the counter",
            }
        }
    }

    struct Probe;

    impl Probe {
        fn ping(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.data.log.push("ping".to_string());
            Ok(())
        }

        fn open(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.set_form(FormId::RulesHelp);
            Ok(())
        }
    }

    /// Counts lines until told to move on.
    struct Counter {
        count: u32,
    }

    impl Form<ProbeData> for Counter {
        fn on_post_create(&mut self, ctx: &mut FormCtx<'_, ProbeData>) -> Result<()> {
            ctx.data.log.push("counter created".to_string());
            Ok(())
        }

        fn on_input(&mut self, ctx: &mut FormCtx<'_, ProbeData>, input: &str) -> Result<()> {
            match input {
                "next" => ctx.set_form(FormId::PointsAwardHelp),
                "done" => ctx.clear_form(),
                "again" => ctx.set_form(FormId::RulesHelp),
                "loop" => ctx.set_form(FormId::PointsMultiplierHelp),
                "stray" => ctx.set_form(FormId::Store),
                _ => self.count += 1,
            }
            Ok(())
        }

        fn render(&self, _view: &FormView<'_, ProbeData>) -> String {
            format!("count {}", self.count)
        }
    }

    struct Question;

    impl Dialog<ProbeData> for Question {
        fn dialog_type(&self, _view: &FormView<'_, ProbeData>) -> DialogType {
            DialogType::YesNo
        }

        fn prompt(&self, _view: &FormView<'_, ProbeData>) -> String {
            "Really?".to_string()
        }

        fn on_response(&mut self, ctx: &mut FormCtx<'_, ProbeData>, response: DialogResponse) -> Result<()> {
            ctx.data.log.push(format!("{:?}", response));
            Ok(())
        }
    }

    /// Immediately asks for itself again.
    struct Spinner;

    impl Form<ProbeData> for Spinner {
        fn on_post_create(&mut self, ctx: &mut FormCtx<'_, ProbeData>) -> Result<()> {
            ctx.set_form(FormId::PointsMultiplierHelp);
            Ok(())
        }

        fn on_input(&mut self, _ctx: &mut FormCtx<'_, ProbeData>, _input: &str) -> Result<()> {
            Ok(())
        }

        fn render(&self, _view: &FormView<'_, ProbeData>) -> String {
            String::new()
        }
    }

    impl Screen for Probe {
        type Data = ProbeData;
        type Command = ProbeCommand;

        const ID: WindowId = WindowId::MainMenu;

        fn create(_game: &mut GameState) -> Result<(Self, ProbeData)> {
            Ok((Probe, ProbeData::default()))
        }

        fn create_form(id: FormId) -> Option<Box<dyn Form<ProbeData>>> {
            match id {
                FormId::RulesHelp => Some(Box::new(Counter { count: 0 })),
                FormId::PointsAwardHelp => Some(dialog(Question)),
                FormId::PointsMultiplierHelp => Some(Box::new(Spinner)),
                _ => None,
            }
        }

        fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.set_header("Probe");
            ctx.add_command(ProbeCommand::Ping, Self::ping);
            ctx.add_command(ProbeCommand::Open, Self::open);
            Ok(())
        }

        fn on_form_change(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
            ctx.data.log.push("form change".to_string());
            Ok(())
        }
    }

    fn setup() -> (GameState, Window<Probe>) {
        let mut game = GameState::new(SessionId(1), TrailKind::Win, Some(3));
        let mut window = Window::<Probe>::create(&mut game).unwrap();
        window.post_create(&mut game).unwrap();
        (game, window)
    }

    #[test]
    fn test_menu_render_and_commands() {
        let (game, window) = setup();
        assert_eq!(window.render(&game), "Probe\n\n  1. Ping\n  2. Open the counter");
        assert_eq!(
            window.menu_commands(&game),
            Some(vec!["Ping".to_string(), "Open the counter".to_string()])
        );
    }

    #[test]
    fn test_menu_matches_number_and_label() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "1").unwrap();
        window.input(&mut game, "PING").unwrap();
        window.input(&mut game, "7").unwrap();
        window.input(&mut game, "pong").unwrap();
        assert_eq!(window.data().log, vec!["ping", "ping"]);
        assert_eq!(window.current_form(), None);
    }

    #[test]
    fn test_set_form_post_creates_once() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        assert_eq!(window.current_form(), Some(FormId::RulesHelp));
        window.input(&mut game, "x").unwrap();
        window.input(&mut game, "x").unwrap();
        assert_eq!(window.render(&game), "count 2");
        assert_eq!(window.data().log, vec!["counter created", "form change"]);
    }

    #[test]
    fn test_set_form_same_id_rebuilds() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        window.input(&mut game, "x").unwrap();
        window.input(&mut game, "again").unwrap();
        assert_eq!(window.render(&game), "count 0");
    }

    #[test]
    fn test_clear_form_returns_to_menu() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        window.input(&mut game, "done").unwrap();
        assert_eq!(window.current_form(), None);
        assert!(window.render(&game).starts_with("Probe"));
    }

    #[test]
    fn test_yes_no_dialog_drops_garbage() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        window.input(&mut game, "next").unwrap();
        assert_eq!(window.current_form(), Some(FormId::PointsAwardHelp));
        let before = window.data().log.len();

        window.input(&mut game, "banana").unwrap();
        assert_eq!(window.data().log.len(), before);
        assert_eq!(window.current_form(), Some(FormId::PointsAwardHelp));

        window.input(&mut game, "No").unwrap();
        assert_eq!(window.data().log.last().map(String::as_str), Some("No"));
        assert_eq!(
            window.menu_commands(&game),
            Some(vec!["Yes".to_string(), "No".to_string()])
        );
    }

    #[test]
    fn test_runaway_navigation_is_fatal() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        let err = window.input(&mut game, "loop").unwrap_err();
        assert!(matches!(err, EngineError::NavigationLoop { window: Some(WindowId::MainMenu), .. }));
    }

    #[test]
    fn test_unregistered_form_is_fatal() {
        let (mut game, mut window) = setup();
        window.input(&mut game, "2").unwrap();
        let err = window.input(&mut game, "stray").unwrap_err();
        assert!(matches!(err, EngineError::FormConstruction { form: FormId::Store, .. }));
    }
}
