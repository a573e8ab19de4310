//! Trail locations, the trail registries, and distance bookkeeping.
//!
//! A [`Trail`] is an ordered list of [`Location`]s. Each location carries the
//! distance from itself to the one after it; the last location has none. The
//! party sits at `current` and counts down `distance_to_next` while moving.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::{roll_weather, Climate, Weather};
use crate::river::RiverOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationStatus {
    Unreached,
    Arrived,
    Departed,
}

/// What kind of stop a location is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationKind {
    Settlement,
    Landmark,
    RiverCrossing(RiverOption),
    /// A split in the trail. The choices are spliced in after the fork.
    ForkInRoad(Vec<Location>),
    TollRoad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub climate: Climate,
    pub kind: LocationKind,
    pub status: LocationStatus,
    /// Set once the arrival screen has been shown for this location.
    pub arrival_flag: bool,
    pub weather: Weather,
    /// Miles from here to the next location.
    pub total_distance: i32,
}

impl Location {
    fn new(name: &str, climate: Climate, kind: LocationKind) -> Self {
        Self {
            name: name.to_string(),
            climate,
            kind,
            status: LocationStatus::Unreached,
            arrival_flag: false,
            weather: Weather::Clear,
            total_distance: 0,
        }
    }

    pub fn settlement(name: &str, climate: Climate) -> Self {
        Self::new(name, climate, LocationKind::Settlement)
    }

    pub fn landmark(name: &str, climate: Climate) -> Self {
        Self::new(name, climate, LocationKind::Landmark)
    }

    pub fn river(name: &str, climate: Climate, option: RiverOption) -> Self {
        Self::new(name, climate, LocationKind::RiverCrossing(option))
    }

    pub fn fork(name: &str, climate: Climate, choices: Vec<Location>) -> Self {
        Self::new(name, climate, LocationKind::ForkInRoad(choices))
    }

    pub fn toll_road(name: &str, climate: Climate) -> Self {
        Self::new(name, climate, LocationKind::TollRoad)
    }

    pub fn chatting_allowed(&self) -> bool {
        matches!(self.kind, LocationKind::Settlement | LocationKind::ForkInRoad(_))
    }

    pub fn shopping_allowed(&self) -> bool {
        matches!(self.kind, LocationKind::Settlement)
    }

    pub fn is_river(&self) -> bool {
        matches!(self.kind, LocationKind::RiverCrossing(_))
    }

    pub fn is_fork(&self) -> bool {
        matches!(self.kind, LocationKind::ForkInRoad(_))
    }

    pub fn is_toll_road(&self) -> bool {
        matches!(self.kind, LocationKind::TollRoad)
    }

    pub fn river_option(&self) -> Option<RiverOption> {
        match self.kind {
            LocationKind::RiverCrossing(option) => Some(option),
            _ => None,
        }
    }

    pub fn skip_choices(&self) -> Option<&[Location]> {
        match &self.kind {
            LocationKind::ForkInRoad(choices) => Some(choices),
            _ => None,
        }
    }

    pub fn roll_weather(&mut self, month: u32, rng: &mut impl Rng) {
        self.weather = roll_weather(self.climate, month, rng);
    }
}

/// Which trail a new game is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailKind {
    #[default]
    Oregon,
    /// Every location type in a short run.
    Test,
    /// Two settlements; reaching the second wins.
    Win,
    /// A chain of rivers meant to wear the party down.
    Fail,
}

impl fmt::Display for TrailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrailKind {
    type Err = String;

    /// Case-insensitive match on [`TrailKind::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TrailKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown trail '{}'", s.trim()))
    }
}

impl TrailKind {
    pub const ALL: [TrailKind; 4] = [TrailKind::Oregon, TrailKind::Test, TrailKind::Win, TrailKind::Fail];

    pub fn name(self) -> &'static str {
        match self {
            TrailKind::Oregon => "oregon",
            TrailKind::Test => "test",
            TrailKind::Win => "win",
            TrailKind::Fail => "fail",
        }
    }

    pub fn build(self, rng: &mut impl Rng) -> Trail {
        match self {
            TrailKind::Oregon => oregon_trail(rng),
            TrailKind::Test => test_trail(rng),
            TrailKind::Win => win_trail(rng),
            TrailKind::Fail => fail_trail(rng),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    pub locations: Vec<Location>,
    pub current: usize,
    /// Miles left until the next location.
    pub distance_to_next: i32,
    min_length: i32,
    max_length: i32,
}

impl Trail {
    /// Build a trail and roll the leg lengths between `min_length` and
    /// `max_length` miles.
    pub fn new(mut locations: Vec<Location>, min_length: i32, max_length: i32, rng: &mut impl Rng) -> Self {
        let count = locations.len();
        for (i, location) in locations.iter_mut().enumerate() {
            location.total_distance = if i + 1 == count {
                0
            } else {
                rng.gen_range(min_length..=max_length)
            };
        }
        let distance_to_next = locations.first().map_or(0, |l| l.total_distance);
        Self {
            locations,
            current: 0,
            distance_to_next,
            min_length,
            max_length,
        }
    }

    pub fn current_location(&self) -> &Location {
        &self.locations[self.current]
    }

    pub fn current_location_mut(&mut self) -> &mut Location {
        &mut self.locations[self.current]
    }

    pub fn next_location(&self) -> Option<&Location> {
        self.locations.get(self.current + 1)
    }

    pub fn is_first_location(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_location(&self) -> bool {
        self.current + 1 >= self.locations.len()
    }

    /// Sum of every leg from the start to the end of the trail.
    pub fn length(&self) -> i32 {
        self.locations.iter().map(|l| l.total_distance).sum()
    }

    /// Splice `location` in directly after the current one.
    pub fn insert_location(&mut self, mut location: Location, rng: &mut impl Rng) {
        location.status = LocationStatus::Unreached;
        location.arrival_flag = false;
        location.total_distance = if self.is_last_location() {
            0
        } else {
            rng.gen_range(self.min_length..=self.max_length)
        };
        self.locations.insert(self.current + 1, location);
    }

    /// Mark the current location as left behind.
    pub fn depart(&mut self) {
        self.current_location_mut().status = LocationStatus::Departed;
    }

    /// Move `miles` closer to the next location.
    ///
    /// Returns true when the move reaches it, which makes it the current
    /// location with status `Arrived`.
    pub fn travel(&mut self, miles: i32) -> bool {
        if self.current_location().status != LocationStatus::Departed || self.is_last_location() {
            return false;
        }
        self.distance_to_next -= miles;
        if self.distance_to_next > 0 {
            return false;
        }
        self.current += 1;
        let location = &mut self.locations[self.current];
        location.status = LocationStatus::Arrived;
        self.distance_to_next = location.total_distance;
        true
    }
}

fn oregon_trail(rng: &mut impl Rng) -> Trail {
    use Climate::*;
    let locations = vec![
        Location::settlement("Independence", Moderate),
        Location::river("Kansas River Crossing", Continental, RiverOption::FerryOperator),
        Location::river("Big Blue River Crossing", Continental, RiverOption::FloatAndFord),
        Location::settlement("Fort Kearney", Continental),
        Location::landmark("Chimney Rock", Moderate),
        Location::settlement("Fort Laramie", Moderate),
        Location::landmark("Independence Rock", Moderate),
        Location::fork(
            "South Pass",
            Dry,
            vec![
                Location::settlement("Fort Bridger", Dry),
                Location::landmark("Green River Shortcut", Dry),
            ],
        ),
        Location::river("Green River Crossing", Dry, RiverOption::FloatAndFord),
        Location::landmark("Soda Springs", Dry),
        Location::settlement("Fort Hall", Moderate),
        Location::river("Snake River Crossing", Moderate, RiverOption::IndianGuide),
        Location::settlement("Fort Boise", Polar),
        Location::fork(
            "Blue Mountains",
            Polar,
            vec![
                Location::settlement("Fort Walla Walla", Polar),
                Location::fork(
                    "The Dalles",
                    Polar,
                    vec![
                        Location::river("Columbia River", Moderate, RiverOption::FloatAndFord),
                        Location::toll_road("Barlow Toll Road", Moderate),
                    ],
                ),
            ],
        ),
        Location::settlement("Oregon City", Moderate),
    ];
    Trail::new(locations, 32, 164, rng)
}

fn test_trail(rng: &mut impl Rng) -> Trail {
    use Climate::*;
    let locations = vec![
        Location::settlement("Start Settlement", Moderate),
        Location::fork(
            "Fork In Road",
            Polar,
            vec![
                Location::settlement("Inserted Settlement", Polar),
                Location::fork(
                    "Inserted Fork In Road",
                    Polar,
                    vec![
                        Location::river("Inserted River Crossing", Moderate, RiverOption::FloatAndFord),
                        Location::toll_road("Inserted Toll Road", Moderate),
                    ],
                ),
            ],
        ),
        Location::landmark("Landmark", Dry),
        Location::toll_road("Toll Road", Moderate),
        Location::river("River Crossing (with ferry)", Continental, RiverOption::FerryOperator),
        Location::river("River Crossing (with guide)", Continental, RiverOption::IndianGuide),
        Location::settlement("End Settlement", Moderate),
    ];
    Trail::new(locations, 50, 100, rng)
}

fn win_trail(rng: &mut impl Rng) -> Trail {
    let locations = vec![
        Location::settlement("Start Of Test", Climate::Moderate),
        Location::settlement("End Of Test", Climate::Dry),
    ];
    Trail::new(locations, 50, 100, rng)
}

fn fail_trail(rng: &mut impl Rng) -> Trail {
    use Climate::*;
    let locations = vec![
        Location::settlement("Start Of Test", Moderate),
        Location::river("Wolf River Crossing", Continental, RiverOption::IndianGuide),
        Location::river("Fox River Crossing", Moderate, RiverOption::IndianGuide),
        Location::river("Otter River Crossing", Tropical, RiverOption::FerryOperator),
        Location::river("Coyote River Crossing", Polar, RiverOption::FloatAndFord),
        Location::river("Deer River Crossing", Continental, RiverOption::FloatAndFord),
        Location::river("End Of Test", Dry, RiverOption::FloatAndFord),
    ];
    Trail::new(locations, 50, 100, rng)
}
