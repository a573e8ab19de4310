use super::NewGameInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, FormCtx, FormView};
use crate::window::WindowId;

/// Last look at the party before the Travel window takes over.
pub struct NewGameSummary;

impl Dialog<NewGameInfo> for NewGameSummary {
    fn prompt(&self, view: &FormView<'_, NewGameInfo>) -> String {
        let info = view.data;
        let profession = info.profession.map_or("Unknown", |p| p.name());
        let month = info.starting_month.map_or("Unknown", |m| m.name());
        let cash = info.profession.map_or(0, |p| p.starting_cash());
        format!(
            "Leader: {}\nParty: {}\nOccupation: {}\nLeaving: {} 1848\nCash: ${}\n\n\
             Before leaving Independence you should buy equipment and supplies.",
            info.player_names.first().map_or("", String::as_str),
            info.player_names.iter().skip(1).cloned().collect::<Vec<_>>().join(", "),
            profession,
            month,
            cash
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        let (Some(profession), Some(month)) = (ctx.data.profession, ctx.data.starting_month) else {
            return Err(EngineError::Unreachable(
                "new game summary without a profession or starting month".to_string(),
            ));
        };
        if ctx.data.player_names.is_empty() {
            return Err(EngineError::Unreachable("new game summary without a party".to_string()));
        }
        let names = ctx.data.player_names.clone();
        ctx.game.start_journey(profession, &names, month);
        ctx.close_window();
        ctx.add_window(WindowId::Travel);
        Ok(())
    }
}
