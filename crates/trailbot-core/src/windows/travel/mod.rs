//! The journey itself: the travel menu and every form reachable from it.
//!
//! The window's data bag, [`TravelInfo`], owns the transient generators for
//! stores, rivers, toll roads, hunts and trades. Each is created when its
//! interaction starts and dropped when it ends.

mod command;
mod crossing;
mod hunt;
mod location;
mod rest;
mod river;
mod store;
mod talk;
mod toll;
mod trade;

use trailbot_logic::entities::Entities;
use trailbot_logic::hunt::HuntManager;
use trailbot_logic::river::RiverGenerator;
use trailbot_logic::store::StoreGenerator;
use trailbot_logic::toll::TollGenerator;
use trailbot_logic::trade::TradeOffer;
use trailbot_logic::trail::{LocationKind, LocationStatus};

use crate::error::Result;
use crate::form::{dialog, Form, FormId};
use crate::simulation::GameState;
use crate::window::{MenuCommand, Screen, WindowCtx, WindowId};

const RULE: &str = "--------------------------------";

/// Transient state for the travel window's forms.
#[derive(Debug, Default)]
pub struct TravelInfo {
    pub river: Option<RiverGenerator>,
    pub store: Option<StoreGenerator>,
    pub toll: Option<TollGenerator>,
    pub hunt: Option<HuntManager>,
    pub trade: Option<TradeOffer>,
    /// Days left in the current rest, counted down one per pulse
    pub days_to_rest: u32,
}

/// Status block shown while the wagon is rolling.
pub fn drive_status(game: &GameState) -> String {
    let food = game.vehicle.inventory[Entities::Food].total_weight();
    [
        RULE.to_string(),
        format!("Date: {}", game.calendar.date),
        format!("Weather: {}", game.trail.current_location().weather.description()),
        format!("Health: {}", game.vehicle.passenger_health_status()),
        format!("Food: {} pounds", food),
        format!("Next landmark: {} miles", game.trail.distance_to_next),
        format!("Miles traveled: {} miles", game.vehicle.odometer),
        RULE.to_string(),
    ]
    .join("\n")
}

/// Status block shown above the travel menu.
pub fn travel_status(game: &GameState) -> String {
    let location = game.trail.current_location();
    let place = if location.status == LocationStatus::Arrived {
        location.name.clone()
    } else {
        match game.trail.next_location() {
            Some(next) => format!("{} miles to {}", game.trail.distance_to_next, next.name),
            None => location.name.clone(),
        }
    };
    [
        RULE.to_string(),
        place,
        game.calendar.date.to_string(),
        RULE.to_string(),
        format!("Weather: {}", location.weather.description()),
        format!("Health: {}", game.vehicle.passenger_health_status()),
        format!("Pace: {}", game.vehicle.pace.description()),
        format!("Rations: {}", game.vehicle.rations.description()),
        RULE.to_string(),
    ]
    .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelCommand {
    ContinueOnTrail,
    CheckSupplies,
    LookAtMap,
    ChangePace,
    ChangeFoodRations,
    StopToRest,
    AttemptToTrade,
    TalkToPeople,
    BuySupplies,
    HuntForFood,
}

impl MenuCommand for TravelCommand {
    fn label(self) -> &'static str {
        match self {
            TravelCommand::ContinueOnTrail => "Continue on trail",
            TravelCommand::CheckSupplies => "Check supplies",
            TravelCommand::LookAtMap => "Look at map",
            TravelCommand::ChangePace => "Change pace",
            TravelCommand::ChangeFoodRations => "Change food rations",
            TravelCommand::StopToRest => "Stop to rest",
            TravelCommand::AttemptToTrade => "Attempt to trade",
            TravelCommand::TalkToPeople => "Talk to people",
            TravelCommand::BuySupplies => "Buy supplies",
            TravelCommand::HuntForFood => "Hunt for food",
        }
    }
}

pub struct Travel;

impl Travel {
    /// Rebuild the header and the location-dependent menu.
    fn update_location(ctx: &mut WindowCtx<'_, Self>) {
        let location = ctx.game.trail.current_location();
        let status = location.status;
        let chatting = location.chatting_allowed();
        let shopping = location.shopping_allowed();

        let header = format!("{}\nYou may:", travel_status(ctx.game));
        ctx.set_header(header);
        ctx.clear_commands();
        ctx.add_command(TravelCommand::ContinueOnTrail, Self::continue_on_trail);
        ctx.add_command(TravelCommand::CheckSupplies, Self::check_supplies);
        ctx.add_command(TravelCommand::LookAtMap, Self::look_at_map);
        ctx.add_command(TravelCommand::ChangePace, Self::change_pace);
        ctx.add_command(TravelCommand::ChangeFoodRations, Self::change_food_rations);
        ctx.add_command(TravelCommand::StopToRest, Self::stop_to_rest);

        match status {
            LocationStatus::Unreached => {}
            LocationStatus::Arrived => {
                ctx.add_command(TravelCommand::AttemptToTrade, Self::attempt_to_trade);
                if chatting {
                    ctx.add_command(TravelCommand::TalkToPeople, Self::talk_to_people);
                }
                if shopping {
                    ctx.add_command(TravelCommand::BuySupplies, Self::buy_supplies);
                }
            }
            LocationStatus::Departed => {
                ctx.add_command(TravelCommand::AttemptToTrade, Self::attempt_to_trade);
                ctx.add_command(TravelCommand::HuntForFood, Self::hunt_for_food);
            }
        }
    }

    /// Decide what the party sees now that nothing else is on screen.
    fn arrive_at_location(ctx: &mut WindowCtx<'_, Self>) {
        if ctx.has_form() {
            return;
        }
        if ctx.game.vehicle.passengers_dead() {
            ctx.add_window(WindowId::GameOver);
            return;
        }

        let last = ctx.game.trail.is_last_location();
        let location = ctx.game.trail.current_location_mut();
        if location.status == LocationStatus::Arrived {
            if !location.arrival_flag {
                location.arrival_flag = true;
                ctx.set_form(FormId::LocationArrive);
                return;
            }
            if last {
                ctx.add_window(WindowId::GameOver);
                return;
            }
        }
        Self::update_location(ctx);
    }

    fn continue_on_trail(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        let location = ctx.game.trail.current_location();
        if location.status == LocationStatus::Departed {
            ctx.set_form(FormId::ContinueOnTrail);
            return Ok(());
        }
        let next = match location.kind {
            LocationKind::Landmark | LocationKind::Settlement | LocationKind::TollRoad => FormId::LocationDepart,
            LocationKind::RiverCrossing(_) => FormId::RiverCross,
            LocationKind::ForkInRoad(_) => FormId::LocationFork,
        };
        ctx.set_form(next);
        Ok(())
    }

    fn check_supplies(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::CheckSupplies);
        Ok(())
    }

    fn look_at_map(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::LookAtMap);
        Ok(())
    }

    fn change_pace(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::ChangePace);
        Ok(())
    }

    fn change_food_rations(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::ChangeRations);
        Ok(())
    }

    fn stop_to_rest(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::RestAmount);
        Ok(())
    }

    fn attempt_to_trade(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::Trading);
        Ok(())
    }

    fn talk_to_people(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::TalkToPeople);
        Ok(())
    }

    fn buy_supplies(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_form(FormId::Store);
        Ok(())
    }

    fn hunt_for_food(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        if ctx.game.vehicle.inventory[Entities::Ammo].quantity > 0 {
            ctx.set_form(FormId::HuntingPrompt);
        } else {
            ctx.set_form(FormId::NoAmmo);
        }
        Ok(())
    }
}

impl Screen for Travel {
    type Data = TravelInfo;
    type Command = TravelCommand;

    const ID: WindowId = WindowId::Travel;

    fn create(_game: &mut GameState) -> Result<(Self, TravelInfo)> {
        Ok((Travel, TravelInfo::default()))
    }

    fn create_form(id: FormId) -> Option<Box<dyn Form<TravelInfo>>> {
        match id {
            FormId::StoreWelcome => Some(dialog(store::StoreWelcome)),
            FormId::Store => Some(dialog(store::Store)),
            FormId::StorePurchase => Some(Box::new(store::StorePurchase::default())),
            FormId::StoreDebtWarning => Some(dialog(store::StoreDebtWarning)),
            FormId::MissingItem => Some(dialog(store::MissingItem)),
            FormId::LocationArrive => Some(dialog(location::LocationArrive)),
            FormId::LocationDepart => Some(dialog(location::LocationDepart)),
            FormId::LocationFork => Some(Box::new(location::LocationFork::default())),
            FormId::LookAtMap => Some(dialog(location::LookAtMap)),
            FormId::ContinueOnTrail => Some(Box::new(command::ContinueOnTrail)),
            FormId::UnableToContinue => Some(dialog(command::UnableToContinue)),
            FormId::ChangePace => Some(dialog(command::ChangePace)),
            FormId::PaceHelp => Some(dialog(command::PaceHelp)),
            FormId::ChangeRations => Some(dialog(command::ChangeRations)),
            FormId::CheckSupplies => Some(dialog(command::CheckSupplies)),
            FormId::RestAmount => Some(dialog(rest::RestAmount)),
            FormId::Resting => Some(Box::new(rest::Resting::default())),
            FormId::TalkToPeople => Some(dialog(talk::TalkToPeople::default())),
            FormId::Trading => Some(dialog(trade::Trading)),
            FormId::HuntingPrompt => Some(dialog(hunt::HuntingPrompt)),
            FormId::NoAmmo => Some(dialog(hunt::NoAmmo)),
            FormId::Hunting => Some(Box::new(hunt::Hunting::default())),
            FormId::HuntingResult => Some(dialog(hunt::HuntingResult::default())),
            FormId::TollRoadQuestion => Some(dialog(toll::TollRoadQuestion::default())),
            FormId::RiverCross => Some(dialog(river::RiverCross)),
            FormId::FordRiverHelp => Some(dialog(river::FordRiverHelp)),
            FormId::CaulkRiverHelp => Some(dialog(river::CaulkRiverHelp)),
            FormId::FerryHelp => Some(dialog(river::FerryHelp)),
            FormId::UseFerryConfirm => Some(dialog(river::UseFerryConfirm)),
            FormId::FerryNoMonies => Some(dialog(river::FerryNoMonies)),
            FormId::IndianGuidePrompt => Some(dialog(river::IndianGuidePrompt)),
            FormId::CrossingTick => Some(Box::new(crossing::CrossingTick::default())),
            FormId::CrossingResult => Some(dialog(crossing::CrossingResult::default())),
            _ => None,
        }
    }

    fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        Self::update_location(ctx);
        let trail = &ctx.game.trail;
        if trail.is_first_location() && trail.current_location().status == LocationStatus::Unreached {
            ctx.set_form(FormId::StoreWelcome);
        }
        Ok(())
    }

    fn on_activate(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        Self::arrive_at_location(ctx);
        Ok(())
    }

    fn on_form_change(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        if ctx.has_form() {
            Self::update_location(ctx);
        } else {
            Self::arrive_at_location(ctx);
        }
        Ok(())
    }
}
