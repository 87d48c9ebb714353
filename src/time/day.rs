//! Weekday codes used throughout the engine.

use std::fmt;
use std::str::FromStr;

use super::error::TimeParseError;

/// Day of the week, indexed Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Day {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl Day {
    /// Number of days in the fixed weekly domain.
    pub const COUNT: usize = 7;

    /// Number of weekdays (Monday to Friday).
    pub const WEEKDAYS: usize = 5;

    /// All days, Monday first.
    pub const ALL: [Day; 7] = [Day::Mo, Day::Tu, Day::We, Day::Th, Day::Fr, Day::Sa, Day::Su];

    /// Zero-based index of the day (Monday = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-letter code, e.g. `"Mo"`.
    pub const fn code(self) -> &'static str {
        match self {
            Day::Mo => "Mo",
            Day::Tu => "Tu",
            Day::We => "We",
            Day::Th => "Th",
            Day::Fr => "Fr",
            Day::Sa => "Sa",
            Day::Su => "Su",
        }
    }

    /// Splits a run of concatenated codes such as `"MoWeFr"`.
    pub fn parse_run(days: &str) -> Result<Vec<Day>, TimeParseError> {
        if days.len() % 2 != 0 || !days.is_ascii() {
            return Err(TimeParseError::UnknownDay(days.to_string()));
        }
        days.as_bytes()
            .chunks_exact(2)
            .map(|pair| {
                let code = std::str::from_utf8(pair)
                    .map_err(|_| TimeParseError::UnknownDay(days.to_string()))?;
                code.parse()
            })
            .collect()
    }
}

impl FromStr for Day {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mo" => Ok(Day::Mo),
            "Tu" => Ok(Day::Tu),
            "We" => Ok(Day::We),
            "Th" => Ok(Day::Th),
            "Fr" => Ok(Day::Fr),
            "Sa" => Ok(Day::Sa),
            "Su" => Ok(Day::Su),
            other => Err(TimeParseError::UnknownDay(other.to_string())),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
