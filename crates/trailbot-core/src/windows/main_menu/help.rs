//! "Learn about the trail" pages, shown in order.

use trailbot_logic::person::{HealthStatus, Profession};
use trailbot_logic::scoring::points_for_health;

use super::NewGameInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, FormCtx, FormId, FormView};

pub struct RulesHelp;

impl Dialog<NewGameInfo> for RulesHelp {
    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        "Try taking a journey by covered wagon across 2000 miles of plains, rivers, and \
         mountains. Try! On the plains, will you slosh your oxen through mud and water-filled \
         ruts or will you plod through dust six inches deep?\n\n\
         You can buy supplies in towns along the way, trade with people you meet, hunt for \
         food, and rest when your party is tired."
            .to_string()
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::PointsAwardHelp);
        Ok(())
    }
}

pub struct PointsAwardHelp;

impl Dialog<NewGameInfo> for PointsAwardHelp {
    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        let bands = [HealthStatus::Good, HealthStatus::Fair, HealthStatus::Poor, HealthStatus::VeryPoor];
        let people: Vec<String> = bands
            .iter()
            .map(|&status| format!("  {:<10} {}", status.description(), points_for_health(status)))
            .collect();
        format!(
            "On arriving in Oregon, your most valuable assets are the people in your party. \
             You receive points for each arriving person, based on their health:\n\n{}\n\n\
             You also receive 50 points for the wagon, and points for each ox, spare part, \
             set of clothing, box of ammunition and pound of food you still have.",
            people.join("\n")
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::PointsMultiplierHelp);
        Ok(())
    }
}

pub struct PointsMultiplierHelp;

impl Dialog<NewGameInfo> for PointsMultiplierHelp {
    fn prompt(&self, _view: &FormView<'_, NewGameInfo>) -> String {
        let rows: Vec<String> = Profession::ALL
            .iter()
            .map(|p| format!("  {} - points x{}", p.name(), p.points_multiplier()))
            .collect();
        format!(
            "After your points are added up, they are multiplied by a bonus for the occupation \
             of your leader:\n\n{}",
            rows.join("\n")
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, NewGameInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}
