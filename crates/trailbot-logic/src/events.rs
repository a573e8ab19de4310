//! Random events: the catalogue, what each one does to the wagon, and the
//! director that decides when they happen.
//!
//! Events execute the moment they are triggered. The resulting
//! [`EventOutcome`] waits in the director's pending queue until the front end
//! shows it.

use std::collections::VecDeque;
use std::fmt::Write as _;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{Entities, Inventory};
use crate::vehicle::Vehicle;

/// Chance out of 100 that a day of travel rolls an event.
pub const DAILY_EVENT_CHANCE: u32 = 8;

/// Chance out of 100 that a river crossing tick rolls a river event.
pub const RIVER_EVENT_CHANCE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Animal,
    Person,
    RiverCross,
    Vehicle,
    Weather,
    Wild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BuffaloStampede,
    BrokenArm,
    Cholera,
    VehicleFloods,
    VehicleWashOut,
    LostTrail,
    OxenDied,
    WrongTrail,
    HailStorm,
    SevereWeather,
    AbandonedVehicle,
    BanditsAttack,
    StuckInMud,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::BuffaloStampede,
        EventKind::BrokenArm,
        EventKind::Cholera,
        EventKind::VehicleFloods,
        EventKind::VehicleWashOut,
        EventKind::LostTrail,
        EventKind::OxenDied,
        EventKind::WrongTrail,
        EventKind::HailStorm,
        EventKind::SevereWeather,
        EventKind::AbandonedVehicle,
        EventKind::BanditsAttack,
        EventKind::StuckInMud,
    ];

    pub fn category(self) -> EventCategory {
        match self {
            EventKind::BuffaloStampede => EventCategory::Animal,
            EventKind::BrokenArm | EventKind::Cholera => EventCategory::Person,
            EventKind::VehicleFloods | EventKind::VehicleWashOut | EventKind::StuckInMud => {
                EventCategory::RiverCross
            }
            EventKind::LostTrail | EventKind::OxenDied | EventKind::WrongTrail => EventCategory::Vehicle,
            EventKind::HailStorm | EventKind::SevereWeather => EventCategory::Weather,
            EventKind::AbandonedVehicle | EventKind::BanditsAttack => EventCategory::Wild,
        }
    }

    /// Manual events never come from the daily roll; something in the game
    /// has to trigger them by name or by category.
    pub fn manual_only(self) -> bool {
        matches!(
            self,
            EventKind::VehicleFloods
                | EventKind::VehicleWashOut
                | EventKind::HailStorm
                | EventKind::SevereWeather
                | EventKind::StuckInMud
        )
    }

    /// Asset shown with the event, if any.
    pub fn image(self) -> Option<&'static str> {
        match self {
            EventKind::VehicleWashOut => Some("washout.gif"),
            _ => None,
        }
    }
}

/// The result of running an event against the wagon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub text: String,
    /// Days the party loses; handled by the lost-time screen.
    pub days_to_skip: u32,
}

/// Run `kind` against `vehicle` and describe what happened.
pub fn execute(kind: EventKind, vehicle: &mut Vehicle, rng: &mut impl Rng) -> EventOutcome {
    let mut days_to_skip = 0;
    let text = match kind {
        EventKind::BuffaloStampede => {
            let lost = destroy_items(vehicle, rng);
            let post = if lost.is_empty() {
                "no loss of items.".to_string()
            } else {
                try_kill_passengers("trampled", vehicle, rng)
            };
            format!("Buffalo stampede!\nResulting in {}{}", list_items(&lost), post)
        }
        EventKind::BrokenArm => injure(vehicle, rng, |name| format!("{name} has broken their arm.")),
        EventKind::Cholera => infect(vehicle, rng, |name| format!("{name} has cholera.")),
        EventKind::VehicleFloods | EventKind::VehicleWashOut => {
            let lost = destroy_items(vehicle, rng);
            let post = if lost.is_empty() {
                "no loss of items.".to_string()
            } else {
                try_kill_passengers("drowned", vehicle, rng)
            };
            let r: f64 = rng.gen();
            vehicle.reduce_mileage(20.0 - 20.0 * r);
            let pre = if kind == EventKind::VehicleFloods {
                "Vehicle floods\nwhile crossing the\nriver results in "
            } else {
                "Vehicle was washed\nout when attempting to\nford the river results in "
            };
            format!("{pre}{}{post}", list_items(&lost))
        }
        EventKind::LostTrail => {
            days_to_skip = rng.gen_range(1..3);
            "Lost trail.".to_string()
        }
        EventKind::WrongTrail => {
            days_to_skip = rng.gen_range(3..8);
            "Wrong trail.".to_string()
        }
        EventKind::StuckInMud => {
            days_to_skip = 1;
            "Stuck in the mud on the far shore.".to_string()
        }
        EventKind::OxenDied => {
            vehicle.inventory[Entities::Animal].reduce_quantity(1);
            vehicle.reduce_mileage(25.0);
            "ox injures leg---you have to put it down".to_string()
        }
        EventKind::HailStorm => {
            let lost = destroy_items(vehicle, rng);
            let warm = vehicle.inventory[Entities::Clothes].quantity >= vehicle.passenger_living_count() as i32 * 2;
            let post = if warm && lost.is_empty() {
                "no loss of items.".to_string()
            } else {
                try_kill_passengers("frozen", vehicle, rng)
            };
            let r: f64 = rng.gen();
            let mileage = vehicle.mileage as f64;
            vehicle.reduce_mileage(mileage - 5.0 - r * 10.0);
            format!("Severe hail storm\nresults in {}{}", list_items(&lost), post)
        }
        EventKind::SevereWeather => {
            let lost = destroy_items(vehicle, rng);
            let post = if lost.is_empty() {
                "no items lost.".to_string()
            } else {
                format!("time and supplies lost:\n{}", list_items(&lost))
            };
            format!("heavy rains---{post}")
        }
        EventKind::AbandonedVehicle => {
            let found = create_items(vehicle, rng);
            if found.is_empty() {
                "You find an abandoned wagon,\nbut it is empty".to_string()
            } else {
                format!("You find an abandoned wagon,\nand find:\n{}", list_items(&found))
            }
        }
        EventKind::BanditsAttack => {
            let lost = destroy_items(vehicle, rng);
            vehicle.inventory[Entities::Ammo].reduce_quantity(rng.gen_range(3..15));
            let post = if lost.is_empty() {
                "no loss of items. You drove them off!".to_string()
            } else {
                try_kill_passengers("murdered", vehicle, rng)
            };
            format!("Bandits attack!\nResulting in {}{}", list_items(&lost), post)
        }
    };

    EventOutcome {
        kind,
        text,
        days_to_skip,
    }
}

/// Knock out a random share of a few random supplies. Cash is never lost.
fn destroy_items(vehicle: &mut Vehicle, rng: &mut impl Rng) -> Vec<(Entities, i32)> {
    let mut lost = Vec::new();
    for category in Entities::STORE {
        let item = &mut vehicle.inventory[category];
        if item.quantity <= 0 || !rng.gen_ratio(1, 3) {
            continue;
        }
        let amount = rng.gen_range(1..=item.quantity.max(1) / 4 + 1).min(item.quantity);
        item.reduce_quantity(amount);
        lost.push((category, amount));
    }
    lost
}

fn create_items(vehicle: &mut Vehicle, rng: &mut impl Rng) -> Vec<(Entities, i32)> {
    if rng.gen_ratio(1, 4) {
        return Vec::new();
    }
    let count = rng.gen_range(1..=3);
    let mut found: Vec<(Entities, i32)> = Vec::new();
    for _ in 0..count {
        let item = Inventory::create_random_item(rng);
        vehicle.inventory[item.category].add_quantity(item.quantity);
        match found.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, n)) => *n += item.quantity,
            None => found.push((item.category, item.quantity)),
        }
    }
    found
}

fn list_items(items: &[(Entities, i32)]) -> String {
    let mut text = String::new();
    for (category, amount) in items {
        let item = crate::entities::SimItem::catalogue(*category);
        let _ = writeln!(text, "{amount} {}", item.plural);
    }
    text
}

/// One living passenger may die, named with `verb`.
fn try_kill_passengers(verb: &str, vehicle: &mut Vehicle, rng: &mut impl Rng) -> String {
    if !rng.gen_ratio(1, 5) {
        return format!("no one was {verb}.");
    }
    match vehicle.random_living_passenger(rng) {
        Some(person) => {
            person.kill();
            format!("{} was {verb}.", person.name)
        }
        None => format!("no one was {verb}."),
    }
}

fn injure(vehicle: &mut Vehicle, rng: &mut impl Rng, text: impl Fn(&str) -> String) -> String {
    if let Some(person) = vehicle.random_living_passenger(rng) {
        if person.injure() {
            return text(&person.name);
        }
    }
    "Everyone is lucky today.".to_string()
}

fn infect(vehicle: &mut Vehicle, rng: &mut impl Rng, text: impl Fn(&str) -> String) -> String {
    if let Some(person) = vehicle.random_living_passenger(rng) {
        if person.infect() {
            return text(&person.name);
        }
    }
    "Everyone is lucky today.".to_string()
}

/// Decides when events fire and holds executed ones until they are shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDirector {
    pending: VecDeque<EventOutcome>,
}

impl EventDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Oldest executed event not yet shown.
    pub fn take_pending(&mut self) -> Option<EventOutcome> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Execute `kind` now and queue its outcome.
    pub fn trigger(&mut self, kind: EventKind, vehicle: &mut Vehicle, rng: &mut impl Rng) {
        let outcome = execute(kind, vehicle, rng);
        self.pending.push_back(outcome);
    }

    /// Maybe fire a random event from `category`, manual ones included.
    pub fn trigger_by_category(
        &mut self,
        category: EventCategory,
        chance: u32,
        vehicle: &mut Vehicle,
        rng: &mut impl Rng,
    ) -> bool {
        if !rng.gen_ratio(chance.min(100), 100) {
            return false;
        }
        let kinds: Vec<EventKind> = EventKind::ALL
            .into_iter()
            .filter(|k| k.category() == category)
            .collect();
        if kinds.is_empty() {
            return false;
        }
        let kind = kinds[rng.gen_range(0..kinds.len())];
        self.trigger(kind, vehicle, rng);
        true
    }

    /// Daily roll for one day of travel. Manual-only events are excluded and
    /// nothing new fires while an earlier event is still waiting.
    pub fn roll_daily(&mut self, vehicle: &mut Vehicle, rng: &mut impl Rng) -> Option<EventKind> {
        if self.has_pending() || !rng.gen_ratio(DAILY_EVENT_CHANCE, 100) {
            return None;
        }
        let kinds: Vec<EventKind> = EventKind::ALL
            .into_iter()
            .filter(|k| !k.manual_only())
            .collect();
        let kind = kinds[rng.gen_range(0..kinds.len())];
        self.trigger(kind, vehicle, rng);
        Some(kind)
    }
}
