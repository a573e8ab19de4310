use trailbot_logic::person::MAX_PLAYERS;

use super::NewGameInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, Form, FormCtx, FormId, FormView};
use crate::windows::numbered;

/// Longest name kept for a party member.
const MAX_NAME_LENGTH: usize = 16;

/// Free text entry for the leader and up to three companions.
pub struct InputPlayerNames;

impl Form<NewGameInfo> for InputPlayerNames {
    fn on_input(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, input: &str) -> Result<()> {
        let name: String = input.trim().chars().take(MAX_NAME_LENGTH).collect();
        let names = &mut ctx.data.player_names;
        if name.is_empty() {
            if !names.is_empty() {
                ctx.set_form(FormId::ConfirmPlayerNames);
            }
            return Ok(());
        }
        names.push(name);
        if names.len() >= MAX_PLAYERS {
            ctx.set_form(FormId::ConfirmPlayerNames);
        }
        Ok(())
    }

    fn render(&self, view: &FormView<'_, NewGameInfo>) -> String {
        let names = &view.data.player_names;
        if names.is_empty() {
            return "What is the first name of the wagon leader?".to_string();
        }
        format!(
            "What are the first names of the other members in your party?\n\n{}\n\n\
             (Enter names or press ENTER when finished.)",
            numbered(names)
        )
    }
}

pub struct ConfirmPlayerNames;

impl Dialog<NewGameInfo> for ConfirmPlayerNames {
    fn dialog_type(&self, _view: &FormView<'_, NewGameInfo>) -> DialogType {
        DialogType::YesNo
    }

    fn prompt(&self, view: &FormView<'_, NewGameInfo>) -> String {
        format!("{}\n\nAre these names correct?", numbered(&view.data.player_names))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, response: DialogResponse) -> Result<()> {
        match response {
            DialogResponse::Yes => ctx.set_form(FormId::SelectStartingMonth),
            _ => {
                ctx.data.player_names.clear();
                ctx.set_form(FormId::InputPlayerNames);
            }
        }
        Ok(())
    }
}
