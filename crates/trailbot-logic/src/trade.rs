//! Trade offers from other emigrants.

use rand::Rng;
use serde::Serialize;

use crate::entities::{Inventory, SimItem};

/// Someone on the trail wants one thing and offers another for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeOffer {
    pub wanted: SimItem,
    pub offered: SimItem,
}

impl TradeOffer {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            wanted: Inventory::create_random_item(rng),
            offered: Inventory::create_random_item(rng),
        }
    }

    /// Whether `inventory` holds enough of the wanted item.
    pub fn affordable(&self, inventory: &Inventory) -> bool {
        inventory[self.wanted.category].quantity >= self.wanted.quantity
    }

    /// Swap the goods. Returns false and changes nothing if unaffordable.
    pub fn accept(&self, inventory: &mut Inventory) -> bool {
        if !self.affordable(inventory) {
            return false;
        }
        inventory[self.wanted.category].reduce_quantity(self.wanted.quantity);
        inventory[self.offered.category].add_quantity(self.offered.quantity);
        true
    }
}
