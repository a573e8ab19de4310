//! Forms behind the always-available travel menu entries.

use trailbot_logic::entities::Entities;
use trailbot_logic::trail::LocationStatus;
use trailbot_logic::vehicle::{Pace, Rations, VehicleStatus};

use super::{drive_status, TravelInfo};
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, Form, FormCtx, FormId, FormView};
use crate::simulation::Tick;
use crate::windows::{choose, numbered, owned};

/// The wagon rolls one turn per pulse until it reaches the next location or
/// the player stops it.
pub struct ContinueOnTrail;

impl Form<TravelInfo> for ContinueOnTrail {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let trail = &mut ctx.game.trail;
        if trail.current_location().status == LocationStatus::Arrived && trail.distance_to_next > 0 {
            trail.depart();
            log::debug!("[{}] departed {}", ctx.game.session, ctx.game.trail.current_location().name);
        }
        ctx.game.vehicle.status = VehicleStatus::Moving;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, tick: Tick) -> Result<()> {
        let Tick::Pulse { skip_day } = tick else {
            return Ok(());
        };

        ctx.game.vehicle.check_status();
        match ctx.game.vehicle.status {
            VehicleStatus::Stopped => return Ok(()),
            VehicleStatus::Disabled => {
                ctx.set_form(FormId::UnableToContinue);
                return Ok(());
            }
            VehicleStatus::Moving => ctx.game.take_turn(skip_day),
        }

        let arrived = ctx.game.trail.current_location().status == LocationStatus::Arrived;
        if arrived || ctx.game.vehicle.passengers_dead() {
            ctx.game.vehicle.status = VehicleStatus::Stopped;
            ctx.clear_form();
        }
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _input: &str) -> Result<()> {
        if ctx.game.vehicle.status == VehicleStatus::Moving {
            ctx.game.vehicle.status = VehicleStatus::Stopped;
        }
        ctx.clear_form();
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        format!("{}\n\nPress STOP to size up the situation.", drive_status(view.game))
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        Some(owned(&["Stop"]))
    }

    fn input_fills_buffer(&self) -> bool {
        false
    }

    fn image(&self) -> Option<&str> {
        Some("travel.gif")
    }
}

pub struct UnableToContinue;

impl Dialog<TravelInfo> for UnableToContinue {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        if view.game.vehicle.inventory[Entities::Animal].quantity <= 0 {
            "You are unable to continue your journey. You have no oxen to pull your wagon.".to_string()
        } else {
            "You are unable to continue your journey.".to_string()
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}

const PACE_HELP: &str = "find out what these different paces mean";

fn pace_options() -> Vec<&'static str> {
    Pace::ALL
        .iter()
        .map(|p| p.description())
        .chain(std::iter::once(PACE_HELP))
        .collect()
}

pub struct ChangePace;

impl Dialog<TravelInfo> for ChangePace {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        format!(
            "Change pace (currently \"{}\")\n\nThe pace at which you travel can change. Your choices are:\n\n{}\n\n\
             What is your choice?",
            view.game.vehicle.pace.description(),
            numbered(&pace_options())
        )
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        Some(owned(&pace_options()))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        match choose(&pace_options(), &text) {
            Some(i) if i < Pace::ALL.len() => {
                ctx.game.vehicle.pace = Pace::ALL[i];
                ctx.clear_form();
            }
            Some(_) => ctx.set_form(FormId::PaceHelp),
            None => {}
        }
        Ok(())
    }
}

pub struct PaceHelp;

impl Dialog<TravelInfo> for PaceHelp {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "steady - You travel about 8 hours a day, taking frequent rests. You take care not to \
         get too tired.\n\n\
         strenuous - You travel about 12 hours a day, starting just after sunrise and stopping \
         shortly before sunset. You stop to rest only when necessary. You finish each day \
         feeling very tired.\n\n\
         grueling - You travel about 16 hours a day, starting before sunrise and continuing \
         until dark. You almost never stop to rest. You do not get enough sleep at night. You \
         finish each day feeling absolutely exhausted, and your health suffers."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::ChangePace);
        Ok(())
    }
}

fn ration_options() -> Vec<&'static str> {
    Rations::ALL.iter().map(|r| r.description()).collect()
}

pub struct ChangeRations;

impl Dialog<TravelInfo> for ChangeRations {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let lines: Vec<String> = Rations::ALL
            .iter()
            .map(|r| format!("{} - {} pounds per person a day", r.description(), r.pounds_per_person()))
            .collect();
        format!(
            "Change food rations (currently \"{}\")\n\nThe amount of food the people in your party \
             eat each day can change. These amounts are:\n\n{}\n\nWhat is your choice?",
            view.game.vehicle.rations.description(),
            numbered(&lines)
        )
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        Some(owned(&ration_options()))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        if let Some(i) = choose(&ration_options(), &text) {
            ctx.game.vehicle.rations = Rations::ALL[i];
            ctx.clear_form();
        }
        Ok(())
    }
}

pub struct CheckSupplies;

impl Dialog<TravelInfo> for CheckSupplies {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let rows: Vec<String> = view
            .game
            .vehicle
            .inventory
            .iter()
            .map(|item| {
                if item.category == Entities::Cash {
                    format!("  {:<16} ${}", item.name, item.quantity)
                } else {
                    format!("  {:<16} {} {}", item.name, item.quantity, item.plural)
                }
            })
            .collect();
        format!("Your supplies\n\n{}", rows.join("\n"))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}
