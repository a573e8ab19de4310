use trailbot_logic::person::Profession;

use super::NewGameInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, FormCtx, FormId, FormView};
use crate::windows::{choose, numbered, owned};

const OPTIONS: [&str; 4] = [
    "Be a banker from Boston",
    "Be a carpenter from Ohio",
    "Be a farmer from Illinois",
    "Find out the differences between these choices",
];

pub struct ProfessionSelector;

impl Dialog<NewGameInfo> for ProfessionSelector {
    fn dialog_type(&self, _view: &FormView<'_, NewGameInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        format!("Many kinds of people made the trip to Oregon.\n\nYou may:\n\n{}", numbered(&OPTIONS))
    }

    fn menu_commands(&self, _view: &FormView<'_, NewGameInfo>) -> Option<Vec<String>> {
        Some(owned(&OPTIONS))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        let choice = choose(&OPTIONS, &text)
            .or_else(|| Profession::parse(&text).and_then(|p| Profession::ALL.iter().position(|&q| q == p)));
        match choice {
            Some(3) => ctx.set_form(FormId::ProfessionHelp),
            Some(i) => {
                if let Some(&profession) = Profession::ALL.get(i) {
                    ctx.data.profession = Some(profession);
                    ctx.set_form(FormId::InputPlayerNames);
                }
            }
            None => {}
        }
        Ok(())
    }
}

pub struct ProfessionHelp;

impl Dialog<NewGameInfo> for ProfessionHelp {
    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        let lines: Vec<String> = Profession::ALL
            .iter()
            .map(|p| format!("  {} - ${} to start, score x{}", p.name(), p.starting_cash(), p.points_multiplier()))
            .collect();
        format!(
            "Traveling to Oregon isn't easy! But if you're a banker, you'll have more money for \
             supplies and services than a carpenter or a farmer.\n\n{}\n\n\
             The less money you start with, the more points you earn for arriving safely.",
            lines.join("\n")
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::ProfessionSelector);
        Ok(())
    }
}
