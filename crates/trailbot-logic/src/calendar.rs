//! Trail calendar: the in-game date and how a logical turn moves it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Year every journey departs in.
pub const STARTING_YEAR: u32 = 1848;

/// Months a party may choose to leave Independence in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartingMonth {
    March = 1,
    April = 2,
    May = 3,
    June = 4,
    July = 5,
}

impl StartingMonth {
    pub const ALL: [StartingMonth; 5] = [
        StartingMonth::March,
        StartingMonth::April,
        StartingMonth::May,
        StartingMonth::June,
        StartingMonth::July,
    ];

    /// Calendar month number (1 = January).
    pub fn month_number(self) -> u32 {
        self as u32 + 2
    }

    pub fn name(self) -> &'static str {
        month_name(self.month_number())
    }

    /// Parse a menu selection ("1".."5") or a month name.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 31,
    }
}

/// A calendar date on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(year: u32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Move the date forward one day, rolling months and years.
    pub fn advance_day(&mut self) {
        self.day += 1;
        if self.day > days_in_month(self.month, self.year) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year += 1;
            }
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", month_name(self.month), self.day, self.year)
    }
}

/// Elapsed time for one journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub date: Date,
    /// Days that have passed since departure.
    pub total_days: u32,
}

impl Calendar {
    pub fn new(start: StartingMonth) -> Self {
        Self {
            date: Date::new(STARTING_YEAR, start.month_number(), 1),
            total_days: 0,
        }
    }

    pub fn advance_day(&mut self) {
        self.date.advance_day();
        self.total_days += 1;
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(StartingMonth::March)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_month_numbers() {
        assert_eq!(StartingMonth::March.month_number(), 3);
        assert_eq!(StartingMonth::July.month_number(), 7);
        assert_eq!(StartingMonth::May.name(), "May");
    }

    #[test]
    fn test_parse_starting_month() {
        assert_eq!(StartingMonth::parse("1"), Some(StartingMonth::March));
        assert_eq!(StartingMonth::parse(" 5 "), Some(StartingMonth::July));
        assert_eq!(StartingMonth::parse("june"), Some(StartingMonth::June));
        assert_eq!(StartingMonth::parse("0"), None);
        assert_eq!(StartingMonth::parse("6"), None);
        assert_eq!(StartingMonth::parse("banana"), None);
    }

    #[test]
    fn test_advance_rolls_month() {
        let mut date = Date::new(1848, 3, 31);
        date.advance_day();
        assert_eq!(date, Date::new(1848, 4, 1));

        let mut date = Date::new(1848, 12, 31);
        date.advance_day();
        assert_eq!(date, Date::new(1849, 1, 1));
    }

    #[test]
    fn test_leap_year_february() {
        // 1848 is a leap year
        let mut date = Date::new(1848, 2, 28);
        date.advance_day();
        assert_eq!(date, Date::new(1848, 2, 29));
    }

    #[test]
    fn test_calendar_counts_days() {
        let mut cal = Calendar::new(StartingMonth::April);
        assert_eq!(cal.date.to_string(), "April 1, 1848");
        for _ in 0..30 {
            cal.advance_day();
        }
        assert_eq!(cal.total_days, 30);
        assert_eq!(cal.date.to_string(), "May 1, 1848");
    }
}
