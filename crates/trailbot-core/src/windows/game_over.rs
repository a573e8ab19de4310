//! End of the journey, either way. Acknowledging it resets the session.

use trailbot_logic::scoring::{score, Score};

use crate::error::Result;
use crate::form::{dialog, Dialog, DialogResponse, Form, FormCtx, FormId, FormView};
use crate::simulation::GameState;
use crate::window::{MenuCommand, Screen, WindowCtx, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCommand {
    PlayAgain,
}

impl MenuCommand for GameOverCommand {
    fn label(self) -> &'static str {
        match self {
            GameOverCommand::PlayAgain => "Play again",
        }
    }
}

pub struct GameOver;

impl GameOver {
    fn play_again(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.restart();
        Ok(())
    }
}

impl Screen for GameOver {
    /// Final score, kept only when the party made it
    type Data = Option<Score>;
    type Command = GameOverCommand;

    const ID: WindowId = WindowId::GameOver;

    fn create(game: &mut GameState) -> Result<(Self, Option<Score>)> {
        let result = if game.vehicle.passengers_dead() {
            None
        } else {
            Some(score(&game.vehicle))
        };
        log::info!(
            "[{}] game over after {} turns: {}",
            game.session,
            game.turns,
            result.as_ref().map_or("party lost".to_string(), |s| format!("{} points", s.total()))
        );
        Ok((GameOver, result))
    }

    fn create_form(id: FormId) -> Option<Box<dyn Form<Option<Score>>>> {
        match id {
            FormId::GameWin => Some(dialog(GameWin)),
            FormId::GameFail => Some(dialog(GameFail)),
            _ => None,
        }
    }

    fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.set_header("Your journey is over.");
        ctx.add_command(GameOverCommand::PlayAgain, Self::play_again);
        if ctx.data.is_some() {
            ctx.set_form(FormId::GameWin);
        } else {
            ctx.set_form(FormId::GameFail);
        }
        Ok(())
    }
}

pub struct GameWin;

impl Dialog<Option<Score>> for GameWin {
    fn prompt(&self, view: &FormView<'_, Option<Score>>) -> String {
        let Some(score) = view.data else {
            return String::new();
        };
        let survivors: Vec<String> = view
            .game
            .vehicle
            .passengers
            .iter()
            .filter(|p| !p.is_dead())
            .map(|p| format!("  {} ({})", p.name, p.status().description()))
            .collect();
        format!(
            "Congratulations! You have made it to Oregon on {}.\n\n\
             Survivors:\n{}\n\n\
             People:   {}\nWagon:    {}\nSupplies: {}\nCash:     {}\n\
             Subtotal: {}\nBonus:    x{}\n\nTotal score: {}",
            view.game.calendar.date,
            survivors.join("\n"),
            score.people,
            score.wagon,
            score.supplies,
            score.cash,
            score.subtotal(),
            score.multiplier,
            score.total()
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, Option<Score>>, _response: DialogResponse) -> Result<()> {
        ctx.restart();
        Ok(())
    }
}

pub struct GameFail;

impl Dialog<Option<Score>> for GameFail {
    fn prompt(&self, view: &FormView<'_, Option<Score>>) -> String {
        let names: Vec<&str> = view.game.vehicle.passengers.iter().map(|p| p.name.as_str()).collect();
        format!(
            "Everyone in your party has died.\n\nHere lie {}, {} on the trail to Oregon.",
            names.join(", "),
            view.game.calendar.date
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, Option<Score>>, _response: DialogResponse) -> Result<()> {
        ctx.restart();
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        Some("tombstone.png")
    }
}
