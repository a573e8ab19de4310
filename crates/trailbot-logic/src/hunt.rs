//! Hunting: prey that wanders into view and the word you type to shoot it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pulses a hunt lasts.
pub const HUNTING_TIME: i32 = 30;

/// Most pounds of meat the party can carry back to the wagon.
pub const MAX_FOOD_CARRIED: i32 = 100;

/// Words the hunter must type to fire.
const SHOOTING_WORDS: [&str; 5] = ["bang", "blam", "pow", "wham", "boom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreyKind {
    Squirrel,
    Rabbit,
    Duck,
    Deer,
    Bear,
    Buffalo,
}

impl PreyKind {
    pub const ALL: [PreyKind; 6] = [
        PreyKind::Squirrel,
        PreyKind::Rabbit,
        PreyKind::Duck,
        PreyKind::Deer,
        PreyKind::Bear,
        PreyKind::Buffalo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PreyKind::Squirrel => "squirrel",
            PreyKind::Rabbit => "rabbit",
            PreyKind::Duck => "duck",
            PreyKind::Deer => "deer",
            PreyKind::Bear => "bear",
            PreyKind::Buffalo => "buffalo",
        }
    }

    /// Pounds of meat a kill yields.
    pub fn weight(self) -> i32 {
        match self {
            PreyKind::Squirrel => 1,
            PreyKind::Rabbit => 2,
            PreyKind::Duck => 3,
            PreyKind::Deer => 50,
            PreyKind::Bear => 100,
            PreyKind::Buffalo => 350,
        }
    }
}

/// An animal currently in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prey {
    pub kind: PreyKind,
    /// Pulses left before it runs off.
    pub lifetime: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    NoTarget,
    WrongWord,
    Miss(PreyKind),
    Hit(PreyKind),
}

/// State of one hunting trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntManager {
    pub seconds_remaining: i32,
    pub target: Option<Prey>,
    pub shooting_word: String,
    pub killed: Vec<PreyKind>,
    pub escaped: u32,
}

impl HuntManager {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            seconds_remaining: HUNTING_TIME,
            target: None,
            shooting_word: pick_word(rng),
            killed: Vec::new(),
            escaped: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.seconds_remaining <= 0
    }

    /// One pulse of hunting time.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.finished() {
            return;
        }
        self.seconds_remaining -= 1;

        match &mut self.target {
            Some(prey) => {
                prey.lifetime -= 1;
                if prey.lifetime <= 0 {
                    self.target = None;
                    self.escaped += 1;
                }
            }
            None => {
                if rng.gen_ratio(1, 3) {
                    let kind = PreyKind::ALL[rng.gen_range(0..PreyKind::ALL.len())];
                    self.target = Some(Prey {
                        kind,
                        lifetime: rng.gen_range(2..=5),
                    });
                    self.shooting_word = pick_word(rng);
                }
            }
        }
    }

    /// Fire at the current target. Every call except `NoTarget` and
    /// `WrongWord` spends one box of ammunition, which the caller deducts.
    pub fn shoot(&mut self, word: &str, rng: &mut impl Rng) -> ShotResult {
        let Some(prey) = self.target else {
            return ShotResult::NoTarget;
        };
        if !word.trim().eq_ignore_ascii_case(&self.shooting_word) {
            return ShotResult::WrongWord;
        }
        self.target = None;
        if rng.gen_ratio(3, 4) {
            self.killed.push(prey.kind);
            ShotResult::Hit(prey.kind)
        } else {
            self.escaped += 1;
            ShotResult::Miss(prey.kind)
        }
    }

    pub fn killed_weight(&self) -> i32 {
        self.killed.iter().map(|k| k.weight()).sum()
    }

    /// Meat that makes it back to the wagon.
    pub fn food_carried(&self) -> i32 {
        self.killed_weight().min(MAX_FOOD_CARRIED)
    }
}

fn pick_word(rng: &mut impl Rng) -> String {
    SHOOTING_WORDS[rng.gen_range(0..SHOOTING_WORDS.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hunt_runs_out_of_time() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hunt = HuntManager::new(&mut rng);
        for _ in 0..HUNTING_TIME + 5 {
            hunt.tick(&mut rng);
        }
        assert!(hunt.finished());
        assert_eq!(hunt.seconds_remaining, 0);
    }

    #[test]
    fn test_shoot_without_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hunt = HuntManager::new(&mut rng);
        hunt.target = None;
        assert_eq!(hunt.shoot("bang", &mut rng), ShotResult::NoTarget);
    }

    #[test]
    fn test_wrong_word_keeps_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hunt = HuntManager::new(&mut rng);
        hunt.target = Some(Prey { kind: PreyKind::Deer, lifetime: 3 });
        hunt.shooting_word = "pow".to_string();
        assert_eq!(hunt.shoot("bang", &mut rng), ShotResult::WrongWord);
        assert!(hunt.target.is_some());
        let shot = hunt.shoot("POW", &mut rng);
        assert!(matches!(shot, ShotResult::Hit(PreyKind::Deer) | ShotResult::Miss(PreyKind::Deer)));
        assert!(hunt.target.is_none());
    }

    #[test]
    fn test_food_carried_is_capped() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hunt = HuntManager::new(&mut rng);
        hunt.killed = vec![PreyKind::Buffalo, PreyKind::Rabbit];
        assert_eq!(hunt.killed_weight(), 352);
        assert_eq!(hunt.food_carried(), MAX_FOOD_CARRIED);
    }
}
