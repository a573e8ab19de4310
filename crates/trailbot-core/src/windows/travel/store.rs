//! The general store. At the first town purchases wait in a cart until the
//! party leaves; everywhere else they are paid for on the spot.

use trailbot_logic::entities::{Entities, SimItem};
use trailbot_logic::store::StoreGenerator;
use trailbot_logic::trail::LocationStatus;

use super::TravelInfo;
use crate::error::{EngineError, Result};
use crate::form::{Dialog, DialogResponse, DialogType, Form, FormCtx, FormId, FormView};
use crate::simulation::GameState;
use crate::windows::choose;

const LEAVE_STORE: &str = "Leave store";

/// Purchases go into the cart instead of the wagon until the first town is
/// left behind.
fn buying_on_credit(game: &GameState) -> bool {
    game.trail.is_first_location() && game.trail.current_location().status == LocationStatus::Unreached
}

fn store_name(game: &GameState) -> String {
    format!("{} General Store", game.trail.current_location().name)
}

pub struct StoreWelcome;

impl Dialog<TravelInfo> for StoreWelcome {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        format!(
            "Before leaving {} you should buy equipment and supplies. You have ${:.2} in cash, \
             but you don't have to spend it all now.\n\n\
             You can buy whatever you need at {}.",
            view.game.trail.current_location().name,
            view.game.vehicle.balance(),
            store_name(view.game)
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::Store);
        Ok(())
    }

    fn input_fills_buffer(&self) -> bool {
        false
    }
}

/// Store menu: every item with what is in the cart, then the bill.
pub struct Store;

impl Store {
    fn options() -> Vec<String> {
        Entities::STORE
            .iter()
            .map(|&e| SimItem::catalogue(e).name.to_string())
            .chain(std::iter::once(LEAVE_STORE.to_string()))
            .collect()
    }

    fn leave(ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let on_credit = buying_on_credit(ctx.game);
        let Some(store) = ctx.data.store.as_mut() else {
            ctx.clear_form();
            return Ok(());
        };
        if !on_credit {
            ctx.data.store = None;
            ctx.clear_form();
            return Ok(());
        }

        if store.missing_important_items(true) {
            store.selected = Some(Entities::Animal);
            ctx.set_form(FormId::MissingItem);
            return Ok(());
        }
        if store.total_transaction_cost() > ctx.game.vehicle.balance() {
            ctx.set_form(FormId::StoreDebtWarning);
            return Ok(());
        }

        store.purchase_items(&mut ctx.game.vehicle);
        ctx.data.store = None;
        ctx.game.trail.current_location_mut().status = LocationStatus::Arrived;
        log::info!(
            "[{}] outfitted with ${:.2} left",
            ctx.game.session,
            ctx.game.vehicle.balance()
        );
        ctx.clear_form();
        Ok(())
    }
}

impl Dialog<TravelInfo> for Store {
    fn dialog_type(&self, _view: &FormView<'_, TravelInfo>) -> DialogType {
        DialogType::Custom
    }

    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let game = view.game;
        let mut lines = vec![
            store_name(game),
            game.calendar.date.to_string(),
            "--------------------------------".to_string(),
        ];
        for (i, &category) in Entities::STORE.iter().enumerate() {
            let item = view
                .data
                .store
                .as_ref()
                .and_then(|s| s.transaction(category))
                .cloned()
                .unwrap_or_else(|| SimItem::catalogue(category));
            lines.push(format!("  {}. {:<24} ${:.2}", i + 1, item.name, item.total_value()));
        }
        lines.push(format!("  {}. {}", Entities::STORE.len() + 1, LEAVE_STORE));
        lines.push("--------------------------------".to_string());

        let bill = view.data.store.as_ref().map_or(0.0, StoreGenerator::total_transaction_cost);
        if buying_on_credit(game) {
            lines.push(format!("Total bill: ${:.2}", bill));
        }
        lines.push(format!("Amount you have: ${:.2}", game.vehicle.balance()));
        lines.push(String::new());
        lines.push("Which item would you like to buy?".to_string());
        lines.join("\n")
    }

    fn menu_commands(&self, _view: &FormView<'_, TravelInfo>) -> Option<Vec<String>> {
        Some(Self::options())
    }

    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let store = ctx.data.store.get_or_insert_with(StoreGenerator::new);
        store.selected = None;
        Ok(())
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, response: DialogResponse) -> Result<()> {
        let DialogResponse::Custom(text) = response else {
            return Ok(());
        };
        match choose(&Self::options(), &text) {
            Some(i) if i < Entities::STORE.len() => {
                let store = ctx.data.store.get_or_insert_with(StoreGenerator::new);
                store.selected = Some(Entities::STORE[i]);
                ctx.set_form(FormId::StorePurchase);
                Ok(())
            }
            Some(_) => Self::leave(ctx),
            None => Ok(()),
        }
    }

    fn image(&self) -> Option<&str> {
        Some("store.png")
    }
}

/// Asks how many of the selected item to buy.
#[derive(Default)]
pub struct StorePurchase {
    /// Most the party can afford and carry
    limit: i32,
}

impl StorePurchase {
    fn selected(data: &TravelInfo) -> Result<Entities> {
        data.store
            .as_ref()
            .and_then(|s| s.selected)
            .ok_or_else(|| EngineError::Unreachable("store purchase without a selected item".to_string()))
    }

    fn back_to_store(ctx: &mut FormCtx<'_, TravelInfo>) {
        if let Some(store) = ctx.data.store.as_mut() {
            store.selected = None;
        }
        ctx.set_form(FormId::Store);
    }
}

impl Form<TravelInfo> for StorePurchase {
    fn on_post_create(&mut self, ctx: &mut FormCtx<'_, TravelInfo>) -> Result<()> {
        let category = Self::selected(ctx.data)?;
        let Some(store) = ctx.data.store.as_ref() else {
            return Ok(());
        };
        let item = SimItem::catalogue(category);
        let already = store.transaction(category).map_or(0.0, SimItem::total_value);
        let spendable = ctx.game.vehicle.balance() - (store.total_transaction_cost() - already);
        let affordable = if item.cost > 0.0 {
            (spendable / item.cost).floor() as i32
        } else {
            0
        };
        self.limit = affordable.min(store.max_purchasable(&ctx.game.vehicle, category)).max(0);
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, input: &str) -> Result<()> {
        let category = Self::selected(ctx.data)?;
        let amount = input.trim().parse::<i32>().unwrap_or(0);
        let on_credit = buying_on_credit(ctx.game);
        let Some(store) = ctx.data.store.as_mut() else {
            return Ok(());
        };

        if amount <= 0 || amount > self.limit {
            store.remove_item(category);
            Self::back_to_store(ctx);
            return Ok(());
        }

        store.add_item(category, amount);
        if !on_credit {
            store.purchase_items(&mut ctx.game.vehicle);
        }
        if store.total_transaction_cost() > ctx.game.vehicle.balance() {
            ctx.set_form(FormId::StoreDebtWarning);
            return Ok(());
        }
        Self::back_to_store(ctx);
        Ok(())
    }

    fn render(&self, view: &FormView<'_, TravelInfo>) -> String {
        let Some(category) = view.data.store.as_ref().and_then(|s| s.selected) else {
            return String::new();
        };
        let item = SimItem::catalogue(category);
        format!(
            "{} cost ${:.2} per {}.\n\nYou can afford {} {}.\n\nHow many {} would you like to buy?",
            item.plural, item.cost, item.delineating_unit, self.limit, item.plural, item.plural
        )
    }
}

pub struct StoreDebtWarning;

impl Dialog<TravelInfo> for StoreDebtWarning {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let bill = view.data.store.as_ref().map_or(0.0, StoreGenerator::total_transaction_cost);
        format!(
            "Whoa there partner! I see you got a total bill of ${:.2}, but you only have ${:.2}. \
             Put something back before you leave.",
            bill,
            view.game.vehicle.balance()
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        ctx.set_form(FormId::Store);
        Ok(())
    }
}

pub struct MissingItem;

impl Dialog<TravelInfo> for MissingItem {
    fn prompt(&self, view: &FormView<'_, TravelInfo>) -> String {
        let category = view
            .data
            .store
            .as_ref()
            .and_then(|s| s.selected)
            .unwrap_or(Entities::Animal);
        let item = SimItem::catalogue(category);
        format!(
            "Don't forget, you'll need {} to pull your wagon. \
             You need at least one {} before you leave.",
            item.plural.to_lowercase(),
            item.delineating_unit
        )
    }

    fn on_response(&mut self, ctx: &mut FormCtx<'_, TravelInfo>, _response: DialogResponse) -> Result<()> {
        if let Some(store) = ctx.data.store.as_mut() {
            store.selected = None;
        }
        ctx.set_form(FormId::Store);
        Ok(())
    }
}
