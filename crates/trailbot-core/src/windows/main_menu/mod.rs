//! Title screen and new game setup.

mod help;
mod names;
mod profession;
mod start_month;
mod summary;

use trailbot_logic::calendar::StartingMonth;
use trailbot_logic::person::Profession;

use crate::error::Result;
use crate::form::{dialog, Form, FormId};
use crate::simulation::GameState;
use crate::window::{MenuCommand, Screen, WindowCtx, WindowId};

/// Choices collected while setting up a party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGameInfo {
    pub profession: Option<Profession>,
    /// Leader first
    pub player_names: Vec<String>,
    pub starting_month: Option<StartingMonth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuCommand {
    TravelTheTrail,
    LearnAboutTheTrail,
}

impl MenuCommand for MainMenuCommand {
    fn label(self) -> &'static str {
        match self {
            MainMenuCommand::TravelTheTrail => "Travel the trail",
            MainMenuCommand::LearnAboutTheTrail => "Learn about the trail",
        }
    }
}

pub struct MainMenu;

impl MainMenu {
    fn travel_the_trail(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        *ctx.data = NewGameInfo::default();
        ctx.set_form(FormId::ProfessionSelector);
        Ok(())
    }

    fn learn_about_the_trail(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::RulesHelp);
        Ok(())
    }
}

impl Screen for MainMenu {
    type Data = NewGameInfo;
    type Command = MainMenuCommand;

    const ID: WindowId = WindowId::MainMenu;

    fn create(_game: &mut GameState) -> Result<(Self, NewGameInfo)> {
        Ok((MainMenu, NewGameInfo::default()))
    }

    fn create_form(id: FormId) -> Option<Box<dyn Form<NewGameInfo>>> {
        match id {
            FormId::ProfessionSelector => Some(dialog(profession::ProfessionSelector)),
            FormId::ProfessionHelp => Some(dialog(profession::ProfessionHelp)),
            FormId::InputPlayerNames => Some(Box::new(names::InputPlayerNames)),
            FormId::ConfirmPlayerNames => Some(dialog(names::ConfirmPlayerNames)),
            FormId::SelectStartingMonth => Some(dialog(start_month::SelectStartingMonth)),
            FormId::StartMonthHelp => Some(dialog(start_month::StartMonthHelp)),
            FormId::RulesHelp => Some(dialog(help::RulesHelp)),
            FormId::PointsAwardHelp => Some(dialog(help::PointsAwardHelp)),
            FormId::PointsMultiplierHelp => Some(dialog(help::PointsMultiplierHelp)),
            FormId::NewGameSummary => Some(dialog(summary::NewGameSummary)),
            _ => None,
        }
    }

    fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_header("The Oregon Trail\n\nYou may:");
        ctx.add_command(MainMenuCommand::TravelTheTrail, Self::travel_the_trail);
        ctx.add_command(MainMenuCommand::LearnAboutTheTrail, Self::learn_about_the_trail);
        Ok(())
    }
}
