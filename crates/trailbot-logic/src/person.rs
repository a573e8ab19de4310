//! Party members: professions, health, injury and infection.
//!
//! Health is an integer pool from 0 to 100. A day on the trail nudges it up or
//! down depending on rations, pace and whether the person is sick or hurt.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vehicle::{Pace, Rations};

/// Largest party the main menu will accept, leader included.
pub const MAX_PLAYERS: usize = 4;

/// Full health.
pub const MAX_HEALTH: i32 = 100;

/// Leader's occupation. Decides starting money and the final score bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Banker,
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Profession; 3] = [Profession::Banker, Profession::Carpenter, Profession::Farmer];

    pub fn name(self) -> &'static str {
        match self {
            Profession::Banker => "Banker from Boston",
            Profession::Carpenter => "Carpenter from Ohio",
            Profession::Farmer => "Farmer from Illinois",
        }
    }

    /// Dollars in the wagon on departure.
    pub fn starting_cash(self) -> i32 {
        match self {
            Profession::Banker => 1600,
            Profession::Carpenter => 800,
            Profession::Farmer => 400,
        }
    }

    /// Multiplier applied to the final score.
    pub fn points_multiplier(self) -> i32 {
        match self {
            Profession::Banker => 1,
            Profession::Carpenter => 2,
            Profession::Farmer => 3,
        }
    }

    /// Parse a menu selection ("1".."3") or a profession keyword.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim().to_lowercase();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().to_lowercase().starts_with(&trimmed) && !trimmed.is_empty())
    }
}

/// Coarse health band shown on status screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Dead,
    VeryPoor,
    Poor,
    Fair,
    Good,
}

impl HealthStatus {
    pub fn from_health(health: i32) -> Self {
        match health {
            h if h <= 0 => HealthStatus::Dead,
            1..=29 => HealthStatus::VeryPoor,
            30..=49 => HealthStatus::Poor,
            50..=69 => HealthStatus::Fair,
            _ => HealthStatus::Good,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HealthStatus::Good => "good",
            HealthStatus::Fair => "fair",
            HealthStatus::Poor => "poor",
            HealthStatus::VeryPoor => "very poor",
            HealthStatus::Dead => "dead",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One member of the party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub profession: Profession,
    pub leader: bool,
    pub health: i32,
    pub infected: bool,
    pub injured: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, profession: Profession, leader: bool) -> Self {
        Self {
            name: name.into(),
            profession,
            leader,
            health: MAX_HEALTH,
            infected: false,
            injured: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn status(&self) -> HealthStatus {
        HealthStatus::from_health(self.health)
    }

    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        if !self.is_dead() {
            self.health = (self.health + amount).min(MAX_HEALTH);
        }
    }

    pub fn kill(&mut self) {
        self.health = 0;
        self.infected = false;
        self.injured = false;
    }

    /// Returns true if the person was healthy enough to be hurt.
    pub fn injure(&mut self) -> bool {
        if self.is_dead() || self.injured {
            return false;
        }
        self.injured = true;
        self.damage(10);
        true
    }

    pub fn infect(&mut self) -> bool {
        if self.is_dead() || self.infected {
            return false;
        }
        self.infected = true;
        self.damage(10);
        true
    }

    /// Apply one day of travel or rest.
    ///
    /// `moving` is false while resting, which lets people recover faster.
    pub fn tick(&mut self, rations: Rations, pace: Pace, moving: bool, rng: &mut impl Rng) {
        if self.is_dead() {
            return;
        }

        let mut delta = match rations {
            Rations::Filling => 2,
            Rations::Meager => 0,
            Rations::BareBones => -3,
        };
        if moving {
            delta -= match pace {
                Pace::Steady => 0,
                Pace::Strenuous => 2,
                Pace::Grueling => 4,
            };
        } else {
            delta += 3;
        }

        if self.infected {
            delta -= rng.gen_range(2..=6);
            if rng.gen_ratio(1, 10) {
                self.infected = false;
            }
        }
        if self.injured {
            delta -= rng.gen_range(1..=3);
            if rng.gen_ratio(1, 8) {
                self.injured = false;
            }
        }

        if delta >= 0 {
            self.heal(delta);
        } else {
            self.damage(-delta);
        }
    }
}
