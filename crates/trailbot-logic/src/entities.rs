//! Inventory items the party can buy, carry, trade or lose.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Category of an inventory item. Ordering is the store listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Entities {
    Animal,
    Food,
    Clothes,
    Ammo,
    Wheel,
    Axle,
    Tongue,
    Cash,
}

impl Entities {
    /// Items sold in the store, in menu order.
    pub const STORE: [Entities; 7] = [
        Entities::Animal,
        Entities::Food,
        Entities::Clothes,
        Entities::Ammo,
        Entities::Wheel,
        Entities::Axle,
        Entities::Tongue,
    ];
}

/// A stack of one kind of item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimItem {
    pub category: Entities,
    pub name: &'static str,
    pub plural: &'static str,
    /// Unit used when asking for "at least a single ..."
    pub delineating_unit: &'static str,
    /// Price of one unit in dollars.
    pub cost: f32,
    pub quantity: i32,
    pub max_quantity: i32,
    /// Pounds per unit.
    pub weight: i32,
}

impl SimItem {
    fn new(
        category: Entities,
        name: &'static str,
        plural: &'static str,
        delineating_unit: &'static str,
        cost: f32,
        max_quantity: i32,
        weight: i32,
    ) -> Self {
        Self {
            category,
            name,
            plural,
            delineating_unit,
            cost,
            quantity: 0,
            max_quantity,
            weight,
        }
    }

    /// Catalogue entry for `category` with a zero quantity.
    pub fn catalogue(category: Entities) -> Self {
        match category {
            Entities::Animal => Self::new(category, "Oxen", "oxen", "ox", 20.0, 20, 1),
            Entities::Food => Self::new(category, "Food", "pounds", "pound", 0.20, 2000, 1),
            Entities::Clothes => Self::new(category, "Clothing", "sets", "set", 10.0, 50, 1),
            Entities::Ammo => Self::new(category, "Ammunition", "boxes", "box", 2.0, 99, 1),
            Entities::Wheel => Self::new(category, "Wagon Wheel", "wheels", "wheel", 10.0, 3, 1),
            Entities::Axle => Self::new(category, "Wagon Axle", "axles", "axle", 10.0, 3, 1),
            Entities::Tongue => Self::new(category, "Wagon Tongue", "tongues", "tongue", 10.0, 3, 1),
            Entities::Cash => Self::new(category, "Cash", "dollars", "dollar", 1.0, i32::MAX, 0),
        }
    }

    /// Same item with a different quantity.
    pub fn with_quantity(&self, quantity: i32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    pub fn total_value(&self) -> f32 {
        self.cost * self.quantity as f32
    }

    pub fn total_weight(&self) -> i32 {
        self.weight * self.quantity
    }

    pub fn add_quantity(&mut self, amount: i32) {
        self.quantity = (self.quantity + amount).clamp(0, self.max_quantity);
    }

    /// Remove up to `amount`; quantity never drops below zero.
    pub fn reduce_quantity(&mut self, amount: i32) {
        self.quantity = (self.quantity - amount).max(0);
    }

    pub fn reset(&mut self) {
        self.quantity = 0;
    }
}

/// Every item category with its current stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    items: BTreeMap<Entities, SimItem>,
}

impl Inventory {
    /// Empty inventory with one zero-quantity stack per category.
    pub fn empty() -> Self {
        let items = Entities::STORE
            .iter()
            .chain(std::iter::once(&Entities::Cash))
            .map(|&e| (e, SimItem::catalogue(e)))
            .collect();
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimItem> {
        self.items.values()
    }

    pub fn cash(&self) -> f32 {
        self[Entities::Cash].quantity as f32
    }

    /// Pick a random non-cash category and build a small stack of it.
    pub fn create_random_item(rng: &mut impl Rng) -> SimItem {
        let category = Entities::STORE[rng.gen_range(0..Entities::STORE.len())];
        let item = SimItem::catalogue(category);
        let quantity = match category {
            Entities::Food => rng.gen_range(20..=100),
            Entities::Ammo => rng.gen_range(1..=5),
            Entities::Clothes => rng.gen_range(1..=4),
            _ => 1,
        };
        item.with_quantity(quantity)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<Entities> for Inventory {
    type Output = SimItem;

    fn index(&self, category: Entities) -> &SimItem {
        // Every category is populated in `empty()` and never removed.
        &self.items[&category]
    }
}

impl IndexMut<Entities> for Inventory {
    fn index_mut(&mut self, category: Entities) -> &mut SimItem {
        self.items
            .entry(category)
            .or_insert_with(|| SimItem::catalogue(category))
    }
}
