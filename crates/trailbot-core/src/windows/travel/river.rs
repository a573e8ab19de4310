//! Choosing how to get across a river.

use trailbot_logic::entities::Entities;
use trailbot_logic::river::{RiverCrossChoice, RiverGenerator, RiverOption};
use trailbot_logic::vehicle::VehicleStatus;

use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, DialogType, FormCtx, FormId, FormView};
use crate::windows::{choose, numbered};

pub(super) fn river(data: &TravelInfo) -> Result<&RiverGenerator> {
    data.river
        .as_ref()
        .ok_or_else(|| EngineError::Unreachable("river form without a river".to_string()))
}

fn river_mut(data: &mut TravelInfo) -> Result<&mut RiverGenerator> {
    data.river
        .as_mut()
        .ok_or_else(|| EngineError::Unreachable("river form without a river".to_string()))
}

fn labels(river: &RiverGenerator) -> Vec<&'static str> {
    river.choices().into_iter().map(RiverCrossChoice::label).collect()
}

/// The crossing menu.
pub struct RiverCross;

impl Dialog<TravelInfo> for RiverCross {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let location = ctx.game.trail.current_location();
        let Some(option) = location.river_option() else {
            return Err(EngineError::InvalidNavigation(format!("{} is not a river", location.name)));
        };
        if ctx.data.river.is_none() {
            ctx.data.river = Some(RiverGenerator::new(option, &mut ctx.game.rng));
        }
        Ok(())
    }

    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(river) = view.data.river.as_ref() else {
            return String::new();
        };
        format!(
            "{}\n{}\n\nWeather: {}\nRiver width: {} feet\nRiver depth: {} feet\n\nYou may:\n\n{}\n\nWhat is your choice?",
            view.game.trail.current_location().name,
            view.game.calendar.date,
            view.game.trail.current_location().weather.description(),
            river.river_width,
            river.river_depth,
            numbered(&labels(river))
        )
    }

    fn menu_commands(&self, view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        let river = view.data.river.as_ref()?;
        Some(labels(river).into_iter().map(str::to_string).collect())
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        let river = river_mut(ctx.data)?;
        let choices = river.choices();
        let Some(choice) = choose(&labels(river), &text).map(|i| choices[i]) else {
            return Ok(());
        };

        match choice {
            RiverCrossChoice::Ford | RiverCrossChoice::Float => {
                river.crossing_type = choice;
                ctx.set_form(FormId::CrossingTick);
            }
            RiverCrossChoice::Ferry => {
                river.crossing_type = choice;
                ctx.set_form(FormId::UseFerryConfirm);
            }
            RiverCrossChoice::Indian => ctx.set_form(FormId::IndianGuidePrompt),
            RiverCrossChoice::WaitForWeather => {
                river.crossing_type = RiverCrossChoice::None;
                ctx.data.days_to_rest = 1;
                ctx.set_form(FormId::Resting);
            }
            RiverCrossChoice::GetMoreInformation => ctx.set_form(FormId::FordRiverHelp),
            RiverCrossChoice::None => {}
        }
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        Some("river.png")
    }
}

pub struct FordRiverHelp;

impl Dialog<TravelInfo> for FordRiverHelp {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "To ford a river means to pull your wagon across a shallow part of the river, with the \
         oxen still attached."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::CaulkRiverHelp);
        Ok(())
    }
}

pub struct CaulkRiverHelp;

impl Dialog<TravelInfo> for CaulkRiverHelp {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "To caulk the wagon means to seal it so that no water can get in. The wagon can then be \
         floated across like a boat."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        let ferry = ctx.data.river.as_ref().map(|r| r.option) == Some(RiverOption::FerryOperator);
        if ferry {
            ctx.set_form(FormId::FerryHelp);
        } else {
            ctx.set_form(FormId::RiverCross);
        }
        Ok(())
    }
}

pub struct FerryHelp;

impl Dialog<TravelInfo> for FerryHelp {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "To use a ferry means to put your wagon on top of a flat boat that belongs to someone \
         else. The owner of the ferry will take your wagon across the river."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::RiverCross);
        Ok(())
    }
}

pub struct UseFerryConfirm;

impl Dialog<TravelInfo> for UseFerryConfirm {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::YesNo
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(river) = view.data.river.as_ref() else {
            return String::new();
        };
        format!(
            "The ferry operator says that he will charge you ${:.2} and that you will have to wait \
             {} days. Are you willing to do this?",
            river.ferry_cost, river.ferry_delay_in_days
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let balance = ctx.game.vehicle.balance();
        let river = river_mut(ctx.data)?;
        if response != DialogResponse::Yes {
            river.crossing_type = RiverCrossChoice::None;
            ctx.set_form(FormId::RiverCross);
            return Ok(());
        }

        if river.ferry_cost >= balance {
            ctx.set_form(FormId::FerryNoMonies);
        } else if river.ferry_delay_in_days > 0 {
            let delay = river.ferry_delay_in_days as u32;
            ctx.game.vehicle.status = VehicleStatus::Stopped;
            ctx.data.days_to_rest = delay;
            ctx.set_form(FormId::Resting);
        } else {
            ctx.set_form(FormId::CrossingTick);
        }
        Ok(())
    }
}

pub struct FerryNoMonies;

impl Dialog<TravelInfo> for FerryNoMonies {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "You do not have enough money to take the ferry.".to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        if let Some(river) = ctx.data.river.as_mut() {
            river.crossing_type = RiverCrossChoice::None;
        }
        ctx.set_form(FormId::RiverCross);
        Ok(())
    }
}

/// A guide offers to take the wagon across for clothing.
pub struct IndianGuidePrompt;

impl IndianGuidePrompt {
    fn has_enough_clothing(view: &FormView<'_, TravelInfo>) -> bool {
        view.data
            .river
            .as_ref()
            .is_some_and(|r| view.game.vehicle.inventory[Entities::Clothes].quantity >= r.indian_cost)
    }
}

impl Dialog<TravelInfo> for IndianGuidePrompt {
    fn dialog_type(&self, view: &FormView<'_, TravelInfo>) -> DialogType {
        if Self::has_enough_clothing(view) {
            DialogType::YesNo
        } else {
            DialogType::Prompt
        }
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let cost = view.data.river.as_ref().map_or(0, |r| r.indian_cost);
        let offer = format!(
            "A Shoshoni guide says that he will take your wagon across the river in exchange for \
             {} sets of clothing.",
            cost
        );
        if Self::has_enough_clothing(view) {
            format!("{}\n\nWill you accept this offer?", offer)
        } else {
            format!("{}\n\nYou don't have {} sets of clothing.", offer, cost)
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let river = river_mut(ctx.data)?;
        if response == DialogResponse::Yes {
            river.crossing_type = RiverCrossChoice::Indian;
            ctx.set_form(FormId::CrossingTick);
        } else {
            river.crossing_type = RiverCrossChoice::None;
            ctx.set_form(FormId::RiverCross);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_river_lookup_without_generator() {
        let mut data = TravelInfo::default();
        assert!(matches!(river(&data), Err(EngineError::Unreachable(_))));
        assert!(river_mut(&mut data).is_err());
    }
}
