use trailbot_logic::calendar::StartingMonth;

use super::NewGameInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, FormCtx, FormId, FormView};
use crate::windows::{choose, numbered};

const ADVICE: &str = "Ask for advice";

fn options() -> Vec<&'static str> {
    StartingMonth::ALL
        .iter()
        .map(|m| m.name())
        .chain(std::iter::once(ADVICE))
        .collect()
}

pub struct SelectStartingMonth;

impl Dialog<NewGameInfo> for SelectStartingMonth {
    fn dialog_type(&self, _view: &FormView<'_, NewGameInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        format!(
            "It is 1848. Your jumping off place for Oregon is Independence, Missouri. \
             You must decide which month to leave Independence.\n\n{}",
            numbered(&options())
        )
    }

    fn menu_commands(&self, _view: &FormView<'_, NewGameInfo>) -> Option<Vec<String>> {
        Some(options().into_iter().map(str::to_string).collect())
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        match choose(&options(), &text) {
            Some(i) if i < StartingMonth::ALL.len() => {
                ctx.data.starting_month = Some(StartingMonth::ALL[i]);
                ctx.set_form(FormId::NewGameSummary);
            }
            Some(_) => ctx.set_form(FormId::StartMonthHelp),
            None => {}
        }
        Ok(())
    }
}

pub struct StartMonthHelp;

impl Dialog<NewGameInfo> for StartMonthHelp {
    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        "You attend a public meeting held for \"folks with the California - Oregon fever.\" \
         You're told:\n\n\
         If you leave too early, there won't be any grass for your oxen to eat. If you leave \
         too late, you may not get to Oregon before winter comes. If you leave at just the \
         right time, there will be green grass and the weather will still be cool."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::SelectStartingMonth);
        Ok(())
    }
}
