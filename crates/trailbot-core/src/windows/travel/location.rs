use trailbot_logic::toll::TollGenerator;
use trailbot_logic::trail::{Location, LocationKind, LocationStatus};

use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, Form, FormCtx, FormId, FormView};
use crate::windows::numbered;

pub struct LocationArrive;

impl Dialog<TravelInfo> for LocationArrive {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let trail = &view.game.trail;
        let location = trail.current_location();
        let mut text = format!("You are now at {}.", location.name);
        if trail.is_last_location() {
            text.push_str("\n\nCongratulations! You have made it to the end of the trail.");
        } else {
            match location.kind {
                LocationKind::RiverCrossing(_) => {
                    text.push_str("\n\nYou must cross the river in order to continue.");
                }
                LocationKind::ForkInRoad(_) => {
                    text.push_str("\n\nThe trail divides here. You will have to choose a way.");
                }
                _ => {}
            }
        }
        text
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}

pub struct LocationDepart;

impl Dialog<TravelInfo> for LocationDepart {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let trail = &view.game.trail;
        match trail.next_location() {
            Some(next) => format!(
                "From {} it is {} miles to {}.",
                trail.current_location().name,
                trail.distance_to_next,
                next.name
            ),
            None => format!("{} is the end of the trail.", trail.current_location().name),
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        if ctx.game.trail.next_location().is_some() {
            ctx.set_form(FormId::ContinueOnTrail);
        } else {
            ctx.clear_form();
        }
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        Some("travel.gif")
    }
}

/// Choose one of the branches at a fork, or look at the map first.
#[derive(Default)]
pub struct LocationFork {
    choices: Vec<Location>,
}

impl Form<TravelInfo> for LocationFork {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let location = ctx.game.trail.current_location();
        let Some(choices) = location.skip_choices() else {
            return Err(EngineError::InvalidNavigation(format!(
                "{} is not a fork in the road",
                location.name
            )));
        };
        self.choices = choices.to_vec();
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, input: &str) -> Result<()> {
        let Ok(pick) = input.trim().parse::<usize>() else {
            return Ok(());
        };
        if pick == 0 {
            return Ok(());
        }
        let Some(choice) = self.choices.get(pick - 1).cloned() else {
            ctx.set_form(FormId::LookAtMap);
            return Ok(());
        };

        if choice.is_toll_road() {
            ctx.data.toll = Some(TollGenerator::new(Some(choice), &mut ctx.game.rng));
            ctx.set_form(FormId::TollRoadQuestion);
        } else {
            log::debug!("[{}] taking {}", ctx.game.session, choice.name);
            ctx.game.trail.insert_location(choice, &mut ctx.game.rng);
            ctx.set_form(FormId::LocationDepart);
        }
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        let options: Vec<String> = self
            .choices
            .iter()
            .map(|c| format!("head for {}", c.name))
            .chain(std::iter::once("see the map".to_string()))
            .collect();
        format!(
            "The trail divides at {}. You may:\n\n{}\n\nWhat is your choice?",
            view.game.trail.current_location().name,
            numbered(&options)
        )
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        Some((1..=self.choices.len() + 1).map(|n| n.to_string()).collect())
    }
}

/// How far along the trail the party is.
pub struct LookAtMap;

impl Dialog<TravelInfo> for LookAtMap {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let locations = &view.game.trail.locations;
        let visited = locations
            .iter()
            .filter(|l| l.status != LocationStatus::Unreached)
            .count();
        let percent = if locations.is_empty() {
            0
        } else {
            visited * 100 / locations.len()
        };
        let stops: Vec<String> = locations
            .iter()
            .map(|l| {
                let mark = match l.status {
                    LocationStatus::Departed => 'x',
                    LocationStatus::Arrived => '*',
                    LocationStatus::Unreached => ' ',
                };
                format!("[{}] {}", mark, l.name)
            })
            .collect();
        format!("Trail progress: {}%\n\n{}", percent, stops.join("\n"))
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        let location = ctx.game.trail.current_location();
        if location.is_fork() && location.status == LocationStatus::Arrived {
            ctx.set_form(FormId::LocationFork);
        } else {
            ctx.clear_form();
        }
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        Some("map.jpg")
    }
}
