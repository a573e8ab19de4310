//! River crossings: what a river offers and the state of one crossing.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Crossing services a river location offers besides fording and floating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiverOption {
    FloatAndFord,
    FerryOperator,
    IndianGuide,
}

/// How the party decided to get across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiverCrossChoice {
    None,
    Ford,
    Float,
    Ferry,
    Indian,
    WaitForWeather,
    GetMoreInformation,
}

impl RiverCrossChoice {
    pub fn label(self) -> &'static str {
        match self {
            RiverCrossChoice::None => "none",
            RiverCrossChoice::Ford => "attempt to ford the river",
            RiverCrossChoice::Float => "caulk the wagon and float it across",
            RiverCrossChoice::Ferry => "take a ferry across",
            RiverCrossChoice::Indian => "hire an Indian to help",
            RiverCrossChoice::WaitForWeather => "wait to see if conditions improve",
            RiverCrossChoice::GetMoreInformation => "get more information",
        }
    }

    /// Whether this choice actually puts the wagon in the water.
    pub fn is_crossing(self) -> bool {
        matches!(
            self,
            RiverCrossChoice::Ford | RiverCrossChoice::Float | RiverCrossChoice::Ferry | RiverCrossChoice::Indian
        )
    }
}

impl fmt::Display for RiverCrossChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiverCrossChoice::None => "None",
            RiverCrossChoice::Ford => "Ford",
            RiverCrossChoice::Float => "Float",
            RiverCrossChoice::Ferry => "Ferry",
            RiverCrossChoice::Indian => "Indian",
            RiverCrossChoice::WaitForWeather => "Wait",
            RiverCrossChoice::GetMoreInformation => "Information",
        };
        f.write_str(name)
    }
}

/// One river crossing in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverGenerator {
    pub option: RiverOption,
    /// Feet from bank to bank.
    pub river_width: i32,
    /// Feet at the deepest point.
    pub river_depth: i32,
    /// Dollars the ferry operator wants, zero when paid or not offered.
    pub ferry_cost: f32,
    /// Days until the ferry can take the wagon.
    pub ferry_delay_in_days: i32,
    /// Sets of clothing the guide wants, zero when paid or not offered.
    pub indian_cost: i32,
    pub crossing_type: RiverCrossChoice,
    pub disaster_happened: bool,
}

impl RiverGenerator {
    pub fn new(option: RiverOption, rng: &mut impl Rng) -> Self {
        let (ferry_cost, ferry_delay_in_days) = match option {
            RiverOption::FerryOperator => (rng.gen_range(3..=8) as f32, rng.gen_range(1..=10)),
            _ => (0.0, 0),
        };
        let indian_cost = match option {
            RiverOption::IndianGuide => rng.gen_range(3..=8),
            _ => 0,
        };
        Self {
            option,
            river_width: rng.gen_range(100..=1500),
            river_depth: rng.gen_range(1..=20),
            ferry_cost,
            ferry_delay_in_days,
            indian_cost,
            crossing_type: RiverCrossChoice::None,
            disaster_happened: false,
        }
    }

    /// Choices shown on the crossing menu, in order.
    pub fn choices(&self) -> Vec<RiverCrossChoice> {
        let mut choices = vec![RiverCrossChoice::Ford, RiverCrossChoice::Float];
        match self.option {
            RiverOption::FloatAndFord => {}
            RiverOption::FerryOperator => choices.push(RiverCrossChoice::Ferry),
            RiverOption::IndianGuide => choices.push(RiverCrossChoice::Indian),
        }
        choices.push(RiverCrossChoice::WaitForWeather);
        choices.push(RiverCrossChoice::GetMoreInformation);
        choices
    }

    /// Feet gained on one tick of the crossing.
    pub fn crossing_step(&self, rng: &mut impl Rng) -> i32 {
        rng.gen_range(1..(self.river_width / 4).max(2))
    }
}
