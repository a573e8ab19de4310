//! Per-session simulation state and the logical turn.

use rand::rngs::StdRng;
use rand::SeedableRng;
use trailbot_logic::calendar::{Calendar, StartingMonth};
use trailbot_logic::climate::Weather;
use trailbot_logic::events::{EventDirector, EventKind};
use trailbot_logic::person::Profession;
use trailbot_logic::trail::{Trail, TrailKind};
use trailbot_logic::vehicle::{Vehicle, VehicleStatus};

use crate::session::SessionId;

/// What drove a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Host poll. Renders and diffs only; never advances the simulation.
    System,
    /// Logical pulse. Forms that run the clock turn this into a turn.
    Pulse { skip_day: bool },
}

impl Tick {
    pub fn is_system(self) -> bool {
        matches!(self, Tick::System)
    }
}

/// Everything one session's journey needs.
pub struct GameState {
    pub session: SessionId,
    pub rng: StdRng,
    pub calendar: Calendar,
    pub trail: Trail,
    pub trail_kind: TrailKind,
    pub vehicle: Vehicle,
    pub director: EventDirector,
    /// Logical turns taken since the journey began
    pub turns: u64,
}

impl GameState {
    /// A seeded state is offset by the session id so sessions sharing a
    /// config still diverge.
    pub fn new(session: SessionId, trail_kind: TrailKind, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(session.0 as u64)),
            None => StdRng::from_entropy(),
        };
        let trail = trail_kind.build(&mut rng);
        Self {
            session,
            rng,
            calendar: Calendar::default(),
            trail,
            trail_kind,
            vehicle: Vehicle::new(),
            director: EventDirector::new(),
            turns: 0,
        }
    }

    /// Throw the journey away. The random stream carries on.
    pub fn restart(&mut self) {
        self.calendar = Calendar::default();
        self.trail = self.trail_kind.build(&mut self.rng);
        self.vehicle = Vehicle::new();
        self.director.clear();
        self.turns = 0;
    }

    pub fn start_journey(&mut self, profession: Profession, names: &[String], month: StartingMonth) {
        self.vehicle.board(names, profession);
        self.calendar = Calendar::new(month);
        log::info!(
            "[{}] {} leaves in {} with {} aboard",
            self.session,
            profession.name(),
            month.name(),
            names.len()
        );
    }

    /// Advance one logical turn.
    ///
    /// With `skip_day` only the party's health moves; the date, food, wagon
    /// and random events stand still.
    pub fn take_turn(&mut self, skip_day: bool) {
        self.turns += 1;
        self.vehicle.tick_passengers(&mut self.rng);
        self.vehicle.check_status();
        if skip_day {
            return;
        }

        self.calendar.advance_day();
        let month = self.calendar.date.month;
        self.trail.current_location_mut().roll_weather(month, &mut self.rng);
        self.vehicle.consume_food();

        let moving = self.vehicle.status == VehicleStatus::Moving;
        if moving {
            self.vehicle.random_mileage(&mut self.rng);
        }

        // Event mileage penalties apply to the move below.
        let weather = self.trail.current_location().weather;
        if weather.is_severe() && !self.director.has_pending() {
            let kind = match weather {
                Weather::Hail => EventKind::HailStorm,
                _ => EventKind::SevereWeather,
            };
            self.director.trigger(kind, &mut self.vehicle, &mut self.rng);
        }
        if let Some(kind) = self.director.roll_daily(&mut self.vehicle, &mut self.rng) {
            log::debug!("[{}] random event {:?}", self.session, kind);
        }

        if moving {
            let miles = self.vehicle.drive();
            if self.trail.travel(miles) {
                log::info!(
                    "[{}] arrived at {} on {}",
                    self.session,
                    self.trail.current_location().name,
                    self.calendar.date
                );
            }
        }
    }

    /// A day spent waiting: the date, food and health move but the wagon
    /// does not, and nothing random happens.
    pub fn lose_day(&mut self) {
        self.turns += 1;
        self.calendar.advance_day();
        self.vehicle.consume_food();
        self.vehicle.tick_passengers(&mut self.rng);
        self.vehicle.check_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailbot_logic::entities::Entities;

    fn started() -> GameState {
        let mut game = GameState::new(SessionId(9), TrailKind::Win, Some(1));
        game.start_journey(Profession::Banker, &["Ada".to_string()], StartingMonth::April);
        game.vehicle.inventory[Entities::Food].quantity = 500;
        game.vehicle.inventory[Entities::Animal].quantity = 4;
        game
    }

    #[test]
    fn test_skip_day_keeps_date() {
        let mut game = started();
        let date = game.calendar.date;
        game.take_turn(true);
        assert_eq!(game.calendar.date, date);
        assert_eq!(game.turns, 1);
        assert_eq!(game.vehicle.inventory[Entities::Food].quantity, 500);
    }

    #[test]
    fn test_full_turn_advances_date_and_eats() {
        let mut game = started();
        game.take_turn(false);
        assert_eq!(game.calendar.total_days, 1);
        if !game.director.has_pending() {
            assert_eq!(game.vehicle.inventory[Entities::Food].quantity, 497);
        }
    }

    #[test]
    fn test_moving_wagon_covers_ground() {
        let mut game = started();
        game.trail.depart();
        game.vehicle.status = VehicleStatus::Moving;
        let before = game.trail.distance_to_next;
        game.take_turn(false);
        assert!(game.vehicle.odometer > 0);
        assert!(game.trail.distance_to_next < before || game.trail.current == 1);
    }

    #[test]
    fn test_event_mileage_loss_reaches_the_odometer() {
        let mut hits = 0;
        for seed in 0..5000 {
            let mut game = GameState::new(SessionId(0), TrailKind::Oregon, Some(seed));
            game.start_journey(Profession::Banker, &["Ada".to_string()], StartingMonth::April);
            game.vehicle.inventory[Entities::Food].quantity = 500;
            game.vehicle.inventory[Entities::Animal].quantity = 6;
            game.trail.depart();
            game.vehicle.status = VehicleStatus::Moving;
            let before = game.trail.distance_to_next;
            game.take_turn(false);

            let oxen_died = game
                .director
                .take_pending()
                .map_or(false, |outcome| outcome.kind == EventKind::OxenDied);
            if !oxen_died {
                continue;
            }
            hits += 1;
            // 6 oxen never pull 25 miles in a day, so the loss eats it all.
            assert_eq!(game.vehicle.mileage, 0, "seed {seed}");
            assert_eq!(game.vehicle.odometer, 0, "seed {seed}");
            assert_eq!(game.trail.distance_to_next, before, "seed {seed}");
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_lose_day_stays_put() {
        let mut game = started();
        game.trail.depart();
        game.lose_day();
        assert_eq!(game.calendar.total_days, 1);
        assert_eq!(game.vehicle.odometer, 0);
        assert!(!game.director.has_pending());
    }

    #[test]
    fn test_restart_resets_journey() {
        let mut game = started();
        game.take_turn(false);
        game.restart();
        assert_eq!(game.turns, 0);
        assert!(game.vehicle.passengers.is_empty());
        assert_eq!(game.trail.current, 0);
    }

    #[test]
    fn test_same_seed_same_trail() {
        let a = GameState::new(SessionId(1), TrailKind::Oregon, Some(5));
        let b = GameState::new(SessionId(1), TrailKind::Oregon, Some(5));
        assert_eq!(a.trail.distance_to_next, b.trail.distance_to_next);
    }
}
