//! The wagon: passengers, supplies, pace, rations, mileage and the odometer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{Entities, Inventory, SimItem};
use crate::person::{HealthStatus, Person, Profession};

/// How hard the party pushes the oxen each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pace {
    Steady,
    Strenuous,
    Grueling,
}

impl Pace {
    pub const ALL: [Pace; 3] = [Pace::Steady, Pace::Strenuous, Pace::Grueling];

    pub fn description(self) -> &'static str {
        match self {
            Pace::Steady => "steady",
            Pace::Strenuous => "strenuous",
            Pace::Grueling => "grueling",
        }
    }

    /// Miles per day before oxen and luck are added.
    fn base_mileage(self) -> i32 {
        match self {
            Pace::Steady => 12,
            Pace::Strenuous => 16,
            Pace::Grueling => 20,
        }
    }
}

/// How much food each person eats per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rations {
    Filling,
    Meager,
    BareBones,
}

impl Rations {
    pub const ALL: [Rations; 3] = [Rations::Filling, Rations::Meager, Rations::BareBones];

    pub fn description(self) -> &'static str {
        match self {
            Rations::Filling => "filling",
            Rations::Meager => "meager",
            Rations::BareBones => "bare bones",
        }
    }

    /// Pounds eaten per living person per day.
    pub fn pounds_per_person(self) -> i32 {
        match self {
            Rations::Filling => 3,
            Rations::Meager => 2,
            Rations::BareBones => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    Stopped,
    Moving,
    Disabled,
}

/// Damage dealt to every living passenger for a day without food.
const STARVATION_DAMAGE: i32 = 5;

/// The party's wagon and everything in it.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub inventory: Inventory,
    pub passengers: Vec<Person>,
    pub pace: Pace,
    pub rations: Rations,
    /// Miles the wagon will cover on its next day of travel.
    pub mileage: i32,
    /// Total miles travelled since departure.
    pub odometer: i32,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn new() -> Self {
        Self {
            inventory: Inventory::empty(),
            passengers: Vec::new(),
            pace: Pace::Steady,
            rations: Rations::Filling,
            mileage: 0,
            odometer: 0,
            status: VehicleStatus::Stopped,
        }
    }

    /// Load the party into an empty wagon. The first name is the leader.
    pub fn board(&mut self, names: &[String], profession: Profession) {
        self.passengers = names
            .iter()
            .enumerate()
            .map(|(i, name)| Person::new(name.clone(), profession, i == 0))
            .collect();
        self.inventory = Inventory::empty();
        self.inventory[Entities::Cash].quantity = profession.starting_cash();
        self.mileage = 0;
        self.odometer = 0;
        self.status = VehicleStatus::Stopped;
    }

    pub fn leader(&self) -> Option<&Person> {
        self.passengers.iter().find(|p| p.leader)
    }

    pub fn passenger_living_count(&self) -> usize {
        self.passengers.iter().filter(|p| !p.is_dead()).count()
    }

    pub fn passengers_dead(&self) -> bool {
        self.passenger_living_count() == 0
    }

    /// Average health band of everyone still alive.
    pub fn passenger_health_status(&self) -> HealthStatus {
        let living: Vec<&Person> = self.passengers.iter().filter(|p| !p.is_dead()).collect();
        if living.is_empty() {
            return HealthStatus::Dead;
        }
        let total: i32 = living.iter().map(|p| p.health).sum();
        HealthStatus::from_health(total / living.len() as i32)
    }

    pub fn balance(&self) -> f32 {
        self.inventory.cash()
    }

    /// Disable the wagon when it has nothing left to pull it.
    pub fn check_status(&mut self) {
        if self.inventory[Entities::Animal].quantity <= 0 || self.passengers_dead() {
            self.status = VehicleStatus::Disabled;
        } else if self.status == VehicleStatus::Disabled {
            self.status = VehicleStatus::Stopped;
        }
    }

    /// Roll how far the wagon goes today.
    pub fn random_mileage(&mut self, rng: &mut impl Rng) -> i32 {
        let oxen = self.inventory[Entities::Animal].quantity;
        self.mileage = if oxen <= 0 {
            0
        } else {
            self.pace.base_mileage() + oxen.min(10) / 2 + rng.gen_range(0..=5)
        };
        self.mileage
    }

    /// Subtract `amount` from today's mileage.
    ///
    /// `amount` is applied as given, so a negative amount increases the
    /// mileage. The result never drops below zero.
    pub fn reduce_mileage(&mut self, amount: f64) {
        let reduced = self.mileage as f64 - amount;
        self.mileage = reduced.max(0.0).round() as i32;
    }

    /// Eat one day of food. Returns false when the wagon ran out.
    pub fn consume_food(&mut self) -> bool {
        let eaten = self.rations.pounds_per_person() * self.passenger_living_count() as i32;
        let food = &mut self.inventory[Entities::Food];
        let had_enough = food.quantity >= eaten;
        food.reduce_quantity(eaten);
        if !had_enough {
            for person in self.passengers.iter_mut().filter(|p| !p.is_dead()) {
                person.damage(STARVATION_DAMAGE);
            }
        }
        had_enough
    }

    /// Advance everyone's health by one day.
    pub fn tick_passengers(&mut self, rng: &mut impl Rng) {
        let moving = self.status == VehicleStatus::Moving;
        for person in self.passengers.iter_mut() {
            person.tick(self.rations, self.pace, moving, rng);
        }
    }

    /// Roll mileage and add it to the odometer. Returns the miles covered.
    pub fn move_forward(&mut self, rng: &mut impl Rng) -> i32 {
        self.random_mileage(rng);
        self.drive()
    }

    /// Put today's mileage, after any event penalties, on the odometer.
    pub fn drive(&mut self) -> i32 {
        self.odometer += self.mileage;
        self.mileage
    }

    /// Pay for and load a store transaction.
    pub fn purchase(&mut self, item: &SimItem) {
        if item.quantity <= 0 || item.category == Entities::Cash {
            return;
        }
        // Whole dollars, rounded up from the nearest cent.
        let cents = (item.total_value() * 100.0).round() as i32;
        let cost = (cents + 99) / 100;
        self.inventory[Entities::Cash].reduce_quantity(cost);
        self.inventory[item.category].add_quantity(item.quantity);
    }

    pub fn create_random_item(&self, rng: &mut impl Rng) -> SimItem {
        Inventory::create_random_item(rng)
    }

    /// Pick a living passenger at random.
    pub fn random_living_passenger(&mut self, rng: &mut impl Rng) -> Option<&mut Person> {
        let living: Vec<usize> = (0..self.passengers.len())
            .filter(|&i| !self.passengers[i].is_dead())
            .collect();
        if living.is_empty() {
            return None;
        }
        let pick = living[rng.gen_range(0..living.len())];
        self.passengers.get_mut(pick)
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}
