//! Points awarded for reaching the end of the trail.

use serde::{Deserialize, Serialize};

use crate::entities::Entities;
use crate::person::HealthStatus;
use crate::vehicle::Vehicle;

/// Breakdown of the final score before the profession multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub people: i32,
    pub wagon: i32,
    pub supplies: i32,
    pub cash: i32,
    pub multiplier: i32,
}

impl Score {
    pub fn subtotal(&self) -> i32 {
        self.people + self.wagon + self.supplies + self.cash
    }

    pub fn total(&self) -> i32 {
        self.subtotal() * self.multiplier
    }
}

/// Points for one surviving person in the given health band.
pub fn points_for_health(status: HealthStatus) -> i32 {
    match status {
        HealthStatus::Good => 500,
        HealthStatus::Fair => 400,
        HealthStatus::Poor => 300,
        HealthStatus::VeryPoor => 200,
        HealthStatus::Dead => 0,
    }
}

/// Score the party as it arrives.
pub fn score(vehicle: &Vehicle) -> Score {
    let people = vehicle
        .passengers
        .iter()
        .map(|p| points_for_health(p.status()))
        .sum();

    let inv = &vehicle.inventory;
    let supplies = inv[Entities::Animal].quantity * 4
        + (inv[Entities::Wheel].quantity + inv[Entities::Axle].quantity + inv[Entities::Tongue].quantity) * 2
        + inv[Entities::Clothes].quantity * 2
        + inv[Entities::Ammo].quantity / 2
        + inv[Entities::Food].quantity / 25;

    let multiplier = vehicle
        .leader()
        .map_or(1, |leader| leader.profession.points_multiplier());

    Score {
        people,
        wagon: 50,
        supplies,
        cash: inv[Entities::Cash].quantity / 5,
        multiplier,
    }
}
