//! Pushed over whatever is on screen when the event director has something
//! to report. One window per event.

use trailbot_logic::events::EventOutcome;

use crate::error::{EngineError, Result};
use crate::form::{Form, FormCtx, FormId, FormView};
use crate::simulation::{GameState, Tick};
use crate::window::{MenuCommand, Screen, WindowCtx, WindowId};
use crate::windows::owned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomEventCommand {
    Continue,
}

impl MenuCommand for RandomEventCommand {
    fn label(self) -> &'static str {
        match self {
            RandomEventCommand::Continue => "Continue",
        }
    }
}

pub struct RandomEvent {
    image: Option<&'static str>,
}

impl RandomEvent {
    fn continue_on(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        ctx.close_window();
        Ok(())
    }
}

impl Screen for RandomEvent {
    type Data = EventOutcome;
    type Command = RandomEventCommand;

    const ID: WindowId = WindowId::RandomEvent;

    fn create(game: &mut GameState) -> Result<(Self, EventOutcome)> {
        let outcome = game.director.take_pending().ok_or_else(|| EngineError::WindowConstruction {
            window: WindowId::RandomEvent,
            reason: "no pending event".to_string(),
        })?;
        log::info!("[{}] event: {:?}", game.session, outcome.kind);
        let image = outcome.kind.image();
        Ok((RandomEvent { image }, outcome))
    }

    fn create_form(id: FormId) -> Option<Box<dyn Form<EventOutcome>>> {
        match id {
            FormId::EventSkipDays => Some(Box::new(EventSkipDays::default())),
            _ => None,
        }
    }

    fn on_post_create(&mut self, ctx: &mut WindowCtx<'_, Self>) -> Result<()> {
        let header = ctx.data.text.clone();
        ctx.set_header(header);
        if ctx.data.days_to_skip > 0 {
            ctx.set_form(FormId::EventSkipDays);
        } else {
            ctx.add_command(RandomEventCommand::Continue, Self::continue_on);
        }
        Ok(())
    }

    fn image(&self) -> Option<String> {
        self.image.map(str::to_string)
    }
}

/// Days lost to the event, one per pulse. Input is ignored until they are
/// all gone.
#[derive(Default)]
pub struct EventSkipDays {
    remaining: u32,
    lost: u32,
}

impl Form<EventOutcome> for EventSkipDays {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, EventOutcome>) -> Result<()> {
        self.remaining = ctx.data.days_to_skip;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FormCtx<'_, EventOutcome>, tick: Tick) -> Result<()> {
        if tick.is_system() || self.remaining == 0 {
            return Ok(());
        }
        ctx.game.lose_day();
        self.remaining -= 1;
        self.lost += 1;
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, EventOutcome>, _input: &str) -> Result<()> {
        ctx.close_window();
        Ok(())
    }

    fn render(&self, view: &FormView<'_, EventOutcome>) -> String {
        let mut text = view.data.text.clone();
        match self.lost {
            0 => {}
            1 => text.push_str("\n\nYou lose 1 day."),
            n => text.push_str(&format!("\n\nYou lose {} days.", n)),
        }
        if self.remaining == 0 {
            text.push_str("\n\nPress ENTER to continue.");
        }
        text
    }

    fn menu_commands(&self, _view: &FormView<'_, EventOutcome>) -> Option<Vec<String>> {
        (self.remaining == 0).then(|| owned(&["Continue"]))
    }

    fn allow_input(&self) -> bool {
        self.remaining == 0
    }

    fn input_fills_buffer(&self) -> bool {
        false
    }
}
