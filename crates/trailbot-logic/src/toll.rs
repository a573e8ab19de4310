//! Toll road pricing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::trail::Location;

/// Price of passage for one toll road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollGenerator {
    /// The road being paid for. `None` when the toll belongs to the current
    /// location instead of a fork choice.
    pub road: Option<Location>,
    pub cost: i32,
}

impl TollGenerator {
    pub fn new(road: Option<Location>, rng: &mut impl Rng) -> Self {
        Self {
            road,
            cost: rng.gen_range(1..13),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::Climate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cost_range() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let toll = TollGenerator::new(None, &mut rng);
            assert!((1..13).contains(&toll.cost));
        }
    }

    #[test]
    fn test_keeps_road() {
        let mut rng = StdRng::seed_from_u64(8);
        let road = Location::toll_road("Barlow Toll Road", Climate::Moderate);
        let toll = TollGenerator::new(Some(road), &mut rng);
        assert_eq!(toll.road.map(|r| r.name), Some("Barlow Toll Road".to_string()));
    }
}
