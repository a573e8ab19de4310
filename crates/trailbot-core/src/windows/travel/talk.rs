use rand::seq::SliceRandom;
use trailbot_logic::trail::LocationKind;

use super::TravelInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, FormCtx, FormView};

/// Who said it and what they said.
type Advice = (&'static str, &'static str);

const TUTORIAL: &[Advice] = &[
    (
        "A trader named Jed",
        "Better take extra sets of clothing. Trade 'em to the Indians for food and such.",
    ),
    (
        "Miss Ellen Hume",
        "Don't skimp on oxen. When one of them takes sick or wanders off you'll want a spare.",
    ),
    (
        "A man in a store",
        "Spare wheels, axles and tongues are worth their weight. Breakdowns come when you least expect them.",
    ),
];

const SETTLEMENT: &[Advice] = &[
    (
        "A blacksmith",
        "I hear there's cholera further up the trail. Keep your water clean and your rations full.",
    ),
    (
        "A soldier at the fort",
        "Folks who push their oxen too hard end up walking the rest of the way.",
    ),
];

const LANDMARK: &[Advice] = &[
    (
        "A weary traveler",
        "I'd give a week's wages for a hot bath and a real bed. Still a long way to go.",
    ),
    (
        "A young girl",
        "Papa carved our names in the rock. Everybody does it, so folks behind us know we made it this far.",
    ),
];

const RIVER: &[Advice] = &[
    (
        "A ferry operator",
        "River's running high this season. Don't try to ford it if it's deeper than three feet.",
    ),
    (
        "A settler waiting to cross",
        "Caulk the wagon and float it if you must, but tie everything down first.",
    ),
];

const MOUNTAIN: &[Advice] = &[
    (
        "A mountain man",
        "Snow comes early up high. Get over the pass before the weather turns.",
    ),
    (
        "A guide",
        "The shortcut saves miles but there's no water on it. Fill every barrel you've got.",
    ),
];

const DEFAULT_ADVICE: &str = "Nobody here has anything to say.";

/// A randomly chosen bit of local wisdom.
#[derive(Default)]
pub struct TalkToPeople {
    advice: Option<Advice>,
}

impl Dialog<TravelInfo> for TalkToPeople {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let trail = &ctx.game.trail;
        let pool = if trail.is_first_location() {
            TUTORIAL
        } else {
            match trail.current_location().kind {
                LocationKind::ForkInRoad(_) => MOUNTAIN,
                LocationKind::Landmark => LANDMARK,
                LocationKind::Settlement => SETTLEMENT,
                LocationKind::RiverCrossing(_) => RIVER,
                LocationKind::TollRoad => MOUNTAIN,
            }
        };
        self.advice = pool.choose(&mut ctx.game.rng).copied();
        Ok(())
    }

    fn prompt(&self, _view: &FormView<'_, TravelInfo>) -> String {
        match self.advice {
            Some((who, quote)) => format!("{} tells you:\n\n\"{}\"", who, quote),
            None => DEFAULT_ADVICE.to_string(),
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.clear_form();
        Ok(())
    }
}
