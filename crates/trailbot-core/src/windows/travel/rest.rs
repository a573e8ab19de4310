use trailbot_logic::river::RiverCrossChoice;
use trailbot_logic::vehicle::VehicleStatus;

use super::TravelInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, Form, FormCtx, FormId, FormView};
use crate::simulation::Tick;
use crate::windows::owned;

/// Longest rest that can be asked for at once.
const MAX_REST_DAYS: u32 = 9;

pub struct RestAmount;

impl Dialog<TravelInfo> for RestAmount {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        format!("How many days would you like to rest? (1-{}, 0 to cancel)", MAX_REST_DAYS)
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        match text.parse::<u32>() {
            Ok(0) => ctx.clear_form(),
            Ok(days) if days <= MAX_REST_DAYS => {
                ctx.data.days_to_rest = days;
                ctx.set_form(FormId::Resting);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Burns one day per pulse until the requested rest is over.
#[derive(Default)]
pub struct Resting {
    days_rested: u32,
}

impl Resting {
    /// Leave camp and go back to whatever the party was doing.
    fn stop_resting(ctx: &mut FormCtx<'_, TravelInfo>) {
        ctx.data.days_to_rest = 0;
        let at_river = ctx.game.trail.current_location().is_river();
        match ctx.data.river.as_ref() {
            Some(river) if at_river => {
                if river.crossing_type == RiverCrossChoice::Ferry && river.ferry_delay_in_days <= 0 {
                    ctx.set_form(FormId::CrossingTick);
                } else {
                    ctx.set_form(FormId::RiverCross);
                }
            }
            _ => ctx.clear_form(),
        }
    }
}

impl Form<TravelInfo> for Resting {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        if ctx.game.vehicle.status == VehicleStatus::Moving {
            ctx.game.vehicle.status = VehicleStatus::Stopped;
        }
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, tick: Tick) -> Result<()> {
        let Tick::Pulse { skip_day } = tick else {
            return Ok(());
        };
        if ctx.data.days_to_rest == 0 {
            return Ok(());
        }

        if ctx.game.trail.current_location().is_river() {
            if let Some(river) = ctx.data.river.as_mut() {
                if river.ferry_delay_in_days > 0 {
                    river.ferry_delay_in_days -= 1;
                }
            }
        }
        ctx.data.days_to_rest -= 1;
        self.days_rested += 1;
        ctx.game.take_turn(skip_day);
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _input: &str) -> Result<()> {
        if self.days_rested > 0 {
            Self::stop_resting(ctx);
        }
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        let place = if view.game.trail.current_location().is_river() {
            "You camp near the river"
        } else {
            "You rest"
        };
        let mut text = match self.days_rested {
            0 => "You stop to rest.".to_string(),
            1 => format!("{} for 1 day.", place),
            n => format!("{} for {} days.", place, n),
        };
        text.push_str(&format!("\n\n{}", view.game.calendar.date));
        if view.data.days_to_rest == 0 && self.days_rested > 0 {
            text.push_str("\n\nPress ENTER to continue.");
        }
        text
    }

    fn menu_commands(&self, view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        if view.data.days_to_rest == 0 {
            Some(owned(&["Ok"]))
        } else {
            Some(owned(&["Stop resting"]))
        }
    }

    fn input_fills_buffer(&self) -> bool {
        false
    }
}
