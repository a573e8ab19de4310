//! Hunting trips: type the word on screen while the animal is in view.

use trailbot_logic::entities::Entities;
use trailbot_logic::hunt::{HuntManager, ShotResult, MAX_FOOD_CARRIED};

use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, DialogType, Form, FormCtx, FormId, FormView};
use crate::simulation::Tick;

pub struct HuntingPrompt;

impl Dialog<TravelInfo> for HuntingPrompt {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::YesNo
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        format!(
            "You have {} boxes of ammunition.\n\nWhen an animal comes into view, type the word shown \
             to take a shot. Each shot uses one box. You can carry at most {} pounds of meat back \
             to the wagon.\n\nDo you want to go hunting?",
            view.game.vehicle.inventory[Entities::Ammo].quantity,
            MAX_FOOD_CARRIED
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        match response {
            DialogResponse::Yes => ctx.set_form(FormId::Hunting),
            _ => ctx.clear_form(),
        }
        Ok(())
    }
}

pub struct NoAmmo;

impl Dialog<TravelInfo> for NoAmmo {
    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        "You don't have any ammunition to hunt with.".to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}

/// The hunt clock runs one second per pulse.
#[derive(Default)]
pub struct Hunting {
    last_shot: Option<ShotResult>,
}

impl Form<TravelInfo> for Hunting {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        if ctx.data.hunt.is_none() {
            ctx.data.hunt = Some(HuntManager::new(&mut ctx.game.rng));
        }
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, tick: Tick) -> Result<()> {
        if tick.is_system() {
            return Ok(());
        }
        let Some(hunt) = ctx.data.hunt.as_mut() else {
            return Err(EngineError::Unreachable("hunting without a hunt".to_string()));
        };
        hunt.tick(&mut ctx.game.rng);
        let finished = hunt.finished();
        ctx.game.take_turn(true);
        if finished {
            ctx.set_form(FormId::HuntingResult);
        }
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, input: &str) -> Result<()> {
        let Some(hunt) = ctx.data.hunt.as_mut() else {
            return Ok(());
        };
        let result = hunt.shoot(input, &mut ctx.game.rng);
        if matches!(result, ShotResult::NoTarget | ShotResult::WrongWord) {
            return Ok(());
        }
        self.last_shot = Some(result);

        let ammo = &mut ctx.game.vehicle.inventory[Entities::Ammo];
        ammo.reduce_quantity(1);
        if ammo.quantity <= 0 {
            ctx.set_form(FormId::HuntingResult);
        }
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(hunt) = view.data.hunt.as_ref() else {
            return String::new();
        };
        let mut lines = vec![
            format!("Time left: {} seconds", hunt.seconds_remaining.max(0)),
            format!("Ammunition: {} boxes", view.game.vehicle.inventory[Entities::Ammo].quantity),
            format!("Meat shot: {} pounds", hunt.killed_weight()),
            String::new(),
        ];
        match self.last_shot {
            Some(ShotResult::Hit(kind)) if kind.weight() > MAX_FOOD_CARRIED => {
                lines.push(format!("You shot a giant {}. Full bellies tonight!", kind.name()));
            }
            Some(ShotResult::Hit(kind)) => lines.push(format!("You shot a {}.", kind.name())),
            Some(ShotResult::Miss(kind)) => lines.push(format!("You missed! The {} got away.", kind.name())),
            _ => {}
        }
        match hunt.target {
            Some(prey) => lines.push(format!(
                "You see a {}! Type {} to shoot.",
                prey.kind.name(),
                hunt.shooting_word.to_uppercase()
            )),
            None => lines.push("You are searching for game...".to_string()),
        }
        lines.join("\n")
    }

    fn menu_commands(&self, view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        let hunt = view.data.hunt.as_ref()?;
        hunt.target.map(|_| vec![hunt.shooting_word.clone()])
    }
}

/// Tallies the hunt and loads the meat.
#[derive(Default)]
pub struct HuntingResult {
    shot: i32,
    carried: i32,
}

impl Dialog<TravelInfo> for HuntingResult {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let Some(hunt) = ctx.data.hunt.take() else {
            return Ok(());
        };
        self.shot = hunt.killed_weight();
        self.carried = hunt.food_carried();
        ctx.game.vehicle.inventory[Entities::Food].add_quantity(self.carried);
        log::debug!("[{}] hunt brought back {} pounds", ctx.game.session, self.carried);
        Ok(())
    }

    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        if self.shot == 0 {
            return "You were unable to shoot any food.".to_string();
        }
        if self.shot > self.carried {
            format!(
                "From the animals you shot, you got {} pounds of meat. However, you were only able \
                 to carry {} pounds back to the wagon.",
                self.shot, self.carried
            )
        } else {
            format!("From the animals you shot, you got {} pounds of meat.", self.shot)
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}
