//! Pending store transactions before the party pays.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::{Entities, SimItem};
use crate::vehicle::Vehicle;

/// The shopping cart for the store at the current settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreGenerator {
    transactions: BTreeMap<Entities, SimItem>,
    /// Item picked on the store menu and waiting for a quantity.
    pub selected: Option<Entities>,
}

impl StoreGenerator {
    pub fn new() -> Self {
        let mut store = Self {
            transactions: BTreeMap::new(),
            selected: None,
        };
        store.reset();
        store
    }

    fn reset(&mut self) {
        self.transactions = Entities::STORE
            .iter()
            .map(|&e| (e, SimItem::catalogue(e)))
            .collect();
    }

    pub fn transactions(&self) -> impl Iterator<Item = &SimItem> {
        self.transactions.values()
    }

    pub fn transaction(&self, category: Entities) -> Option<&SimItem> {
        self.transactions.get(&category)
    }

    /// Dollars owed for everything in the cart.
    pub fn total_transaction_cost(&self) -> f32 {
        self.transactions.values().map(SimItem::total_value).sum()
    }

    /// Most of `category` the wagon can still take on top of what it has.
    pub fn max_purchasable(&self, vehicle: &Vehicle, category: Entities) -> i32 {
        let item = &vehicle.inventory[category];
        (item.max_quantity - item.quantity).max(0)
    }

    /// Put `amount` of `category` in the cart, replacing any earlier amount.
    pub fn add_item(&mut self, category: Entities, amount: i32) {
        let item = SimItem::catalogue(category).with_quantity(amount.max(0));
        self.transactions.insert(category, item);
    }

    pub fn remove_item(&mut self, category: Entities) {
        if let Some(item) = self.transactions.get_mut(&category) {
            item.reset();
        }
    }

    /// No oxen bought yet for a party that has not left the first town.
    pub fn missing_important_items(&self, at_start: bool) -> bool {
        at_start
            && self
                .transactions
                .get(&Entities::Animal)
                .map_or(true, |oxen| oxen.quantity <= 0)
    }

    /// Load the cart into the wagon, pay for it, and empty the cart.
    pub fn purchase_items(&mut self, vehicle: &mut Vehicle) {
        for item in self.transactions.values() {
            vehicle.purchase(item);
        }
        self.reset();
    }
}

impl Default for StoreGenerator {
    fn default() -> Self {
        Self::new()
    }
}
