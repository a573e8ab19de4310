//! Forms, the modal sub-states of a window, and the dialog capability.
//!
//! A window owns at most one active form. Forms never touch the window stack
//! directly; they queue navigation through [`FormCtx`] and the owning window
//! applies the requests once the hook returns.

use crate::error::Result;
use crate::simulation::{GameState, Tick};
use crate::window::{Navigation, WindowId, WindowRequest};

/// Every form in the game. Each one belongs to exactly one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    // Main menu
    ProfessionSelector,
    ProfessionHelp,
    InputPlayerNames,
    ConfirmPlayerNames,
    SelectStartingMonth,
    StartMonthHelp,
    RulesHelp,
    PointsAwardHelp,
    PointsMultiplierHelp,
    NewGameSummary,

    // Travel
    StoreWelcome,
    Store,
    StorePurchase,
    StoreDebtWarning,
    MissingItem,
    LocationArrive,
    LocationDepart,
    LocationFork,
    LookAtMap,
    ContinueOnTrail,
    UnableToContinue,
    ChangePace,
    PaceHelp,
    ChangeRations,
    CheckSupplies,
    RestAmount,
    Resting,
    TalkToPeople,
    Trading,
    HuntingPrompt,
    NoAmmo,
    Hunting,
    HuntingResult,
    TollRoadQuestion,
    RiverCross,
    FordRiverHelp,
    CaulkRiverHelp,
    FerryHelp,
    UseFerryConfirm,
    FerryNoMonies,
    IndianGuidePrompt,
    CrossingTick,
    CrossingResult,

    // Random event
    EventSkipDays,

    // Game over
    GameWin,
    GameFail,
}

impl FormId {
    pub const ALL: [FormId; 46] = [
        FormId::ProfessionSelector,
        FormId::ProfessionHelp,
        FormId::InputPlayerNames,
        FormId::ConfirmPlayerNames,
        FormId::SelectStartingMonth,
        FormId::StartMonthHelp,
        FormId::RulesHelp,
        FormId::PointsAwardHelp,
        FormId::PointsMultiplierHelp,
        FormId::NewGameSummary,
        FormId::StoreWelcome,
        FormId::Store,
        FormId::StorePurchase,
        FormId::StoreDebtWarning,
        FormId::MissingItem,
        FormId::LocationArrive,
        FormId::LocationDepart,
        FormId::LocationFork,
        FormId::LookAtMap,
        FormId::ContinueOnTrail,
        FormId::UnableToContinue,
        FormId::ChangePace,
        FormId::PaceHelp,
        FormId::ChangeRations,
        FormId::CheckSupplies,
        FormId::RestAmount,
        FormId::Resting,
        FormId::TalkToPeople,
        FormId::Trading,
        FormId::HuntingPrompt,
        FormId::NoAmmo,
        FormId::Hunting,
        FormId::HuntingResult,
        FormId::TollRoadQuestion,
        FormId::RiverCross,
        FormId::FordRiverHelp,
        FormId::CaulkRiverHelp,
        FormId::FerryHelp,
        FormId::UseFerryConfirm,
        FormId::FerryNoMonies,
        FormId::IndianGuidePrompt,
        FormId::CrossingTick,
        FormId::CrossingResult,
        FormId::EventSkipDays,
        FormId::GameWin,
        FormId::GameFail,
    ];

    /// The only window this form may be attached under.
    pub fn parent(self) -> WindowId {
        use FormId::*;
        match self {
            ProfessionSelector | ProfessionHelp | InputPlayerNames | ConfirmPlayerNames
            | SelectStartingMonth | StartMonthHelp | RulesHelp | PointsAwardHelp
            | PointsMultiplierHelp | NewGameSummary => WindowId::MainMenu,

            StoreWelcome | Store | StorePurchase | StoreDebtWarning | MissingItem | LocationArrive
            | LocationDepart | LocationFork | LookAtMap | ContinueOnTrail | UnableToContinue
            | ChangePace | PaceHelp | ChangeRations | CheckSupplies | RestAmount | Resting
            | TalkToPeople | Trading | HuntingPrompt | NoAmmo | Hunting | HuntingResult
            | TollRoadQuestion | RiverCross | FordRiverHelp | CaulkRiverHelp | FerryHelp
            | UseFerryConfirm | FerryNoMonies | IndianGuidePrompt | CrossingTick
            | CrossingResult => WindowId::Travel,

            EventSkipDays => WindowId::RandomEvent,

            GameWin | GameFail => WindowId::GameOver,
        }
    }
}

/// Read-only view handed to render and menu queries.
pub struct FormView<'a, D> {
    pub game: &'a GameState,
    pub data: &'a D,
}

/// Mutable context for form hooks: the game, the window's data bag, and the
/// navigation queue.
pub struct FormCtx<'a, D> {
    pub game: &'a mut GameState,
    pub data: &'a mut D,
    nav: &'a mut Navigation,
}

impl<'a, D> FormCtx<'a, D> {
    pub(crate) fn new(game: &'a mut GameState, data: &'a mut D, nav: &'a mut Navigation) -> Self {
        Self { game, data, nav }
    }

    pub fn view(&self) -> FormView<'_, D> {
        FormView {
            game: &*self.game,
            data: &*self.data,
        }
    }

    /// Replace the active form. Always builds a fresh instance, even when
    /// `id` is already active.
    pub fn set_form(&mut self, id: FormId) {
        self.nav.set_form(id);
    }

    /// Drop the active form and hand control back to the window menu.
    pub fn clear_form(&mut self) {
        self.nav.clear_form();
    }

    pub fn add_window(&mut self, id: WindowId) {
        self.nav.push_window(WindowRequest::Add(id));
    }

    pub fn close_window(&mut self) {
        self.nav.push_window(WindowRequest::Close);
    }

    /// Tear the session down to a fresh main menu.
    pub fn restart(&mut self) {
        self.nav.push_window(WindowRequest::Reset);
    }
}

/// One modal interaction inside a window.
///
/// `D` is the data bag of the owning window.
pub trait Form<D>: Send {
    /// Runs exactly once, right after construction.
    fn on_post_create(&mut self, _ctx: &mut FormCtx<'_, D>) -> Result<()> {
        Ok(())
    }

    /// Runs when the owning window regains focus. The form is not rebuilt.
    fn on_activate(&mut self, _ctx: &mut FormCtx<'_, D>) -> Result<()> {
        Ok(())
    }

    fn on_tick(&mut self, _ctx: &mut FormCtx<'_, D>, _tick: Tick) -> Result<()> {
        Ok(())
    }

    /// A completed line of text. Lines that mean nothing are ignored.
    fn on_input(&mut self, ctx: &mut FormCtx<'_, D>, input: &str) -> Result<()>;

    fn render(&self, view: &FormView<'_, D>) -> String;

    /// Discrete choices to offer. `None` means free text.
    fn menu_commands(&self, _view: &FormView<'_, D>) -> Option<Vec<String>> {
        None
    }

    /// When false, input is dropped and the screen is not pushed to the
    /// transport.
    fn allow_input(&self) -> bool {
        true
    }

    /// When false, the form receives an empty line no matter what was typed.
    fn input_fills_buffer(&self) -> bool {
        true
    }

    fn image(&self) -> Option<&str> {
        None
    }
}

/// How a dialog turns a line of text into a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    /// Any line acknowledges.
    Prompt,
    YesNo,
    /// The raw line is handed over.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    Ok,
    Yes,
    No,
    Custom(String),
}

impl DialogResponse {
    /// Parse `input` for a dialog of `dialog_type`. `None` means the line is
    /// not a valid answer and should be dropped.
    pub fn parse(dialog_type: DialogType, input: &str) -> Option<Self> {
        match dialog_type {
            DialogType::Prompt => Some(DialogResponse::Ok),
            DialogType::YesNo => match input.trim().to_lowercase().as_str() {
                "y" | "yes" => Some(DialogResponse::Yes),
                "n" | "no" => Some(DialogResponse::No),
                _ => None,
            },
            DialogType::Custom => Some(DialogResponse::Custom(input.trim().to_string())),
        }
    }
}

/// A form restricted to a fixed set of answers.
///
/// Wrap an implementation in [`DialogForm`] to attach it to a window.
pub trait Dialog<D>: Send {
    fn dialog_type(&self, _view: &FormView<'_, D>) -> DialogType {
        DialogType::Prompt
    }

    /// Prompt text, rebuilt on every render so it tracks live state.
    fn prompt(&self, view: &FormView<'_, D>) -> String;

    fn on_response(&mut self, ctx: &mut FormCtx<'_, D>, response: DialogResponse) -> Result<()>;

    fn on_post_create(&mut self, _ctx: &mut FormCtx<'_, D>) -> Result<()> {
        Ok(())
    }

    fn on_activate(&mut self, _ctx: &mut FormCtx<'_, D>) -> Result<()> {
        Ok(())
    }

    fn menu_commands(&self, view: &FormView<'_, D>) -> Option<Vec<String>> {
        match self.dialog_type(view) {
            DialogType::Prompt => Some(vec!["Ok".to_string()]),
            DialogType::YesNo => Some(vec!["Yes".to_string(), "No".to_string()]),
            DialogType::Custom => None,
        }
    }

    fn input_fills_buffer(&self) -> bool {
        true
    }

    fn image(&self) -> Option<&str> {
        None
    }
}

/// Adapts a [`Dialog`] into a [`Form`].
pub struct DialogForm<T>(pub T);

impl<D, T: Dialog<D>> Form<D> for DialogForm<T> {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, D>) -> Result<()> {
        self.0.on_post_create(ctx)
    }

    fn on_activate(&mut self, ctx: &mut FormCtx<'_, D>) -> Result<()> {
        self.0.on_activate(ctx)
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, D>, input: &str) -> Result<()> {
        let dialog_type = self.0.dialog_type(&ctx.view());
        match DialogResponse::parse(dialog_type, input) {
            Some(response) => self.0.on_response(ctx, response),
            None => Ok(()),
        }
    }

    fn render(&self, view: &FormView<'_, D>) -> String {
        self.0.prompt(view)
    }

    fn menu_commands(&self, view: &FormView<'_, D>) -> Option<Vec<String>> {
        self.0.menu_commands(view)
    }

    fn input_fills_buffer(&self) -> bool {
        self.0.input_fills_buffer()
    }

    fn image(&self) -> Option<&str> {
        self.0.image()
    }
}

/// Box a dialog as a form.
pub fn dialog<D, T>(inner: T) -> Box<dyn Form<D>>
where
    T: Dialog<D> + 'static,
    D: 'static,
{
    Box::new(DialogForm(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_yes_no_parsing() {
        let yn = DialogType::YesNo;
        assert_eq!(DialogResponse::parse(yn, "Y"), Some(DialogResponse::Yes));
        assert_eq!(DialogResponse::parse(yn, "yes"), Some(DialogResponse::Yes));
        assert_eq!(DialogResponse::parse(yn, " No "), Some(DialogResponse::No));
        assert_eq!(DialogResponse::parse(yn, "n"), Some(DialogResponse::No));
        assert_eq!(DialogResponse::parse(yn, "banana"), None);
        assert_eq!(DialogResponse::parse(yn, ""), None);
    }

    #[test]
    fn test_prompt_accepts_anything() {
        assert_eq!(DialogResponse::parse(DialogType::Prompt, ""), Some(DialogResponse::Ok));
        assert_eq!(DialogResponse::parse(DialogType::Prompt, "banana"), Some(DialogResponse::Ok));
    }

    #[test]
    fn test_custom_hands_over_text() {
        assert_eq!(
            DialogResponse::parse(DialogType::Custom, " 42 "),
            Some(DialogResponse::Custom("42".to_string()))
        );
    }

    #[test]
    fn test_form_ids_unique() {
        let set: HashSet<FormId> = FormId::ALL.iter().copied().collect();
        assert_eq!(set.len(), FormId::ALL.len());
    }
}
