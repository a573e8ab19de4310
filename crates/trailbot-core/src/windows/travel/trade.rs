use trailbot_logic::trade::TradeOffer;

use super::TravelInfo;
use crate::error::Result;
use crate::form::{Dialog, DialogResponse, DialogType, FormCtx, FormView};

/// An offer worth making: the two sides want different things.
fn worthwhile(offer: &TradeOffer) -> bool {
    offer.wanted.category != offer.offered.category
}

pub struct Trading;

impl Dialog<TravelInfo> for Trading {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        ctx.data.trade = Some(TradeOffer::new(&mut ctx.game.rng));
        Ok(())
    }

    fn dialog_type(&self, view: &FormView<'_, TravelInfo>) -> DialogType {
        match &view.data.trade {
            Some(offer) if worthwhile(offer) && offer.affordable(&view.game.vehicle.inventory) => DialogType::YesNo,
            _ => DialogType::Prompt,
        }
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(offer) = view.data.trade.as_ref().filter(|o| worthwhile(o)) else {
            return "Nobody here wants to trade with you.".to_string();
        };
        let ask = format!(
            "You meet another emigrant who wants {} {}. They offer {} {} in exchange.",
            offer.wanted.quantity, offer.wanted.plural, offer.offered.quantity, offer.offered.plural
        );
        if offer.affordable(&view.game.vehicle.inventory) {
            format!("{}\n\nAre you willing to trade?", ask)
        } else {
            format!("{}\n\nYou don't have enough {} to trade.", ask, offer.wanted.plural)
        }
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        if response == DialogResponse::Yes {
            if let Some(offer) = ctx.data.trade.as_ref() {
                if offer.accept(&mut ctx.game.vehicle.inventory) {
                    log::debug!(
                        "[{}] traded {} {} for {} {}",
                        ctx.game.session,
                        offer.wanted.quantity,
                        offer.wanted.plural,
                        offer.offered.quantity,
                        offer.offered.plural
                    );
                }
            }
        }
        ctx.data.trade = None;
        ctx.clear_form();
        Ok(())
    }
}
