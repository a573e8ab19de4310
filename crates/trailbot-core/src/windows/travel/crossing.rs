//! The wagon in the water, a few feet further each pulse.

use rand::Rng;
use trailbot_logic::entities::Entities;
use trailbot_logic::events::{EventCategory, EventKind, RIVER_EVENT_CHANCE};
use trailbot_logic::river::RiverCrossChoice;
use trailbot_logic::vehicle::VehicleStatus;

use super::river::river;
use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, Form, FormCtx, FormId, FormView};
use crate::simulation::Tick;
use crate::windows::owned;

fn bad_crossing(choice: RiverCrossChoice) -> EngineError {
    EngineError::Unreachable(format!("cannot cross a river with choice {}", choice))
}

#[derive(Default)]
pub struct CrossingTick {
    /// Feet from the near bank
    crossed: i32,
    finished: bool,
}

impl Form<TravelInfo> for CrossingTick {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let choice = river(ctx.data)?.crossing_type;
        if !choice.is_crossing() {
            return Err(bad_crossing(choice));
        }
        ctx.game.vehicle.status = VehicleStatus::Stopped;

        let Some(river) = ctx.data.river.as_mut() else {
            return Ok(());
        };
        let inventory = &mut ctx.game.vehicle.inventory;
        if river.ferry_cost > 0.0 && inventory.cash() > river.ferry_cost {
            inventory[Entities::Cash].reduce_quantity(river.ferry_cost.ceil() as i32);
            river.ferry_cost = 0.0;
        }
        if river.indian_cost > 0 && inventory[Entities::Clothes].quantity >= river.indian_cost {
            inventory[Entities::Clothes].reduce_quantity(river.indian_cost);
            river.indian_cost = 0;
        }
        log::debug!("[{}] crossing river by {}", ctx.game.session, choice);
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, tick: Tick) -> Result<()> {
        if tick.is_system() || self.finished {
            return Ok(());
        }
        let Some(river) = ctx.data.river.as_mut() else {
            return Err(EngineError::Unreachable("crossing without a river".to_string()));
        };

        self.crossed += river.crossing_step(&mut ctx.game.rng);
        if self.crossed >= river.river_width {
            self.crossed = river.river_width;
            self.finished = true;
            return Ok(());
        }

        ctx.game.take_turn(true);

        let game = &mut *ctx.game;
        let halfway = self.crossed >= river.river_width / 2;
        let disaster = match river.crossing_type {
            RiverCrossChoice::Ford if river.river_depth > 3 && !river.disaster_happened && halfway => {
                Some(EventKind::VehicleWashOut)
            }
            RiverCrossChoice::Float
                if river.river_depth > 5 && !river.disaster_happened && halfway && game.rng.gen_bool(0.5) =>
            {
                Some(EventKind::VehicleFloods)
            }
            RiverCrossChoice::Ford | RiverCrossChoice::Float | RiverCrossChoice::Ferry | RiverCrossChoice::Indian => {
                None
            }
            other => return Err(bad_crossing(other)),
        };

        match disaster {
            Some(kind) => {
                river.disaster_happened = true;
                game.director.trigger(kind, &mut game.vehicle, &mut game.rng);
            }
            None => {
                if game.director.trigger_by_category(
                    EventCategory::RiverCross,
                    RIVER_EVENT_CHANCE,
                    &mut game.vehicle,
                    &mut game.rng,
                ) {
                    river.disaster_happened = true;
                }
            }
        }
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _input: &str) -> Result<()> {
        if self.finished {
            ctx.set_form(FormId::CrossingResult);
        }
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(river) = view.data.river.as_ref() else {
            return String::new();
        };
        let mut text = format!(
            "{}\n\nYour supplies: {} pounds of food, {} sets of clothing\n\nCrossed {} of {} feet.",
            view.game.trail.current_location().name,
            view.game.vehicle.inventory[Entities::Food].quantity,
            view.game.vehicle.inventory[Entities::Clothes].quantity,
            self.crossed,
            river.river_width
        );
        if self.finished {
            text.push_str("\n\nYou have reached the other side.");
        }
        text
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        self.finished.then(|| owned(&["Finish crossing"]))
    }

    fn allow_input(&self) -> bool {
        self.finished
    }

    fn input_fills_buffer(&self) -> bool {
        false
    }

    fn image(&self) -> Option<&str> {
        Some("river.png")
    }
}

/// How the crossing went. Fords can still leave the wagon stuck on the bank.
#[derive(Default)]
pub struct CrossingResult {
    text: String,
}

impl Dialog<TravelInfo> for CrossingResult {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let river = river(ctx.data)?;
        let disaster = river.disaster_happened;
        self.text = match river.crossing_type {
            RiverCrossChoice::Ford => {
                if ctx.game.rng.gen_bool(0.5) {
                    "It was a muddy crossing, but you did not get stuck.".to_string()
                } else {
                    let game = &mut *ctx.game;
                    game.director.trigger(EventKind::StuckInMud, &mut game.vehicle, &mut game.rng);
                    "The far bank is a mire of mud.".to_string()
                }
            }
            RiverCrossChoice::Float if disaster => {
                "Your party is relieved to reach the other side after trouble floating across.".to_string()
            }
            RiverCrossChoice::Float => "You had no trouble floating the wagon across.".to_string(),
            RiverCrossChoice::Ferry if disaster => "The ferry operator apologizes for the rough ride.".to_string(),
            RiverCrossChoice::Ferry => "The ferry got your party and wagon safely across.".to_string(),
            RiverCrossChoice::Indian if disaster => "The guide runs away as soon as you reach the shore.".to_string(),
            RiverCrossChoice::Indian => "The guide helped your wagon safely across.".to_string(),
            other => return Err(bad_crossing(other)),
        };
        Ok(())
    }

    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        self.text.clone()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.data.river = None;
        ctx.set_form(FormId::LocationDepart);
        Ok(())
    }
}
