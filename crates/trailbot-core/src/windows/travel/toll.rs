use trailbot_logic::entities::Entities;
use trailbot_logic::trail::LocationStatus;

use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, DialogType, FormCtx, FormId, FormView};

/// Back to the fork if there is one, otherwise to the travel menu.
fn decline(ctx: &mut FormCtx<'_, TravelInfo>) {
    ctx.data.toll = None;
    let location = ctx.game.trail.current_location();
    if location.is_fork() && location.status == LocationStatus::Arrived {
        ctx.set_form(FormId::LocationFork);
    } else {
        ctx.clear_form();
    }
}

/// Offers the toll road for a price, or explains that the party can't pay.
#[derive(Default)]
pub struct TollRoadQuestion;

/// Checked against live cash on every render and response.
fn can_afford(view: &FormView<'_, TravelInfo>) -> bool {
    view.data
        .toll
        .as_ref()
        .map_or(false, |toll| view.game.vehicle.balance() >= toll.cost as f32)
}

impl Dialog<TravelInfo> for TollRoadQuestion {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        if ctx.data.toll.is_none() {
            return Err(EngineError::Unreachable("toll road question without a toll".to_string()));
        }
        Ok(())
    }

    fn dialog_type(&self, view: &FormView<'_, TravelInfo>) -> DialogType {
        if can_afford(view) {
            DialogType::YesNo
        } else {
            DialogType::Prompt
        }
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(toll) = view.data.toll.as_ref() else {
            return String::new();
        };
        let road = toll
            .road
            .as_ref()
            .map_or_else(|| view.game.trail.current_location().name.clone(), |r| r.name.clone());
        if can_afford(view) {
            format!(
                "You must pay ${} to travel the {}.\n\nAre you willing to do this?",
                toll.cost, road
            )
        } else {
            format!(
                "You must pay ${} to travel the {}.\n\nYou don't have enough cash for the toll road.",
                toll.cost, road
            )
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        if !can_afford(&ctx.view()) || response != DialogResponse::Yes {
            decline(ctx);
            return Ok(());
        }

        let Some(toll) = ctx.data.toll.take() else {
            return Ok(());
        };
        ctx.game.vehicle.inventory[Entities::Cash].reduce_quantity(toll.cost);
        if let Some(road) = toll.road {
            log::debug!("[{}] paid ${} for {}", ctx.game.session, toll.cost, road.name);
            ctx.game.trail.insert_location(road, &mut ctx.game.rng);
        }
        ctx.set_form(FormId::LocationDepart);
        Ok(())
    }
}
