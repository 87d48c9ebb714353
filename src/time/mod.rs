//! Weekly time model: parsing meeting strings into per-day intervals and
//! deciding whether two such layouts collide.
//!
//! A [`TimeDict`] stores, for each day of the week, a flattened sequence of
//! minute offsets `[s0, e0, s1, e1, ...]`. Every pair is one meeting on that
//! day. Two layouts conflict only when some pair of meetings on the same day
//! overlaps by a positive amount: a meeting ending at 10:50 and another
//! starting at 10:50 can both be taken.

mod day;
mod error;
mod parse;


pub use day::Day;
pub use error::TimeParseError;
pub use parse::{
    hr12_to_minutes, hr24_to_minutes, minutes_to_hr24, parse_time_all, to_12hr, to_24hr,
};

/// Minutes since midnight.
pub type Minute = u16;

/// Overlap between blocks `[a, b]` and `[c, d]`.
///
/// Returns `-1` when the blocks are disjoint, `0` when only their end points
/// touch, and the length of the shared region otherwise.
pub fn overlap(a: Minute, b: Minute, c: Minute, d: Minute) -> i32 {
    if c > b || a > d {
        return -1;
    }
    i32::from(b.min(d)) - i32::from(a.max(c))
}

/// Union of blocks `[a, b]` and `[c, d]`, or `None` if they do not touch.
pub fn block_union(a: Minute, b: Minute, c: Minute, d: Minute) -> Option<(Minute, Minute)> {
    if a <= c && d <= b {
        Some((a, b))
    } else if c <= a && b <= d {
        Some((c, d))
    } else if a <= c && c <= b {
        Some((a, d))
    } else if a <= d && d <= b {
        Some((c, b))
    } else {
        None
    }
}

/// Per-weekday meeting intervals of one entity (section, event or time filter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDict {
    days: [Vec<Minute>; Day::COUNT],
}

impl TimeDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single meeting string such as `"MoWeFr 10:00AM - 11:00AM"`.
    pub fn parse(time: &str) -> Result<Self, TimeParseError> {
        let (days, (start, end)) = parse_time_all(time)?;
        let mut dict = Self::new();
        for day in days {
            dict.push(day, start, end)?;
        }
        Ok(dict)
    }

    /// Appends the block `[start, end]` to `day`.
    pub fn push(&mut self, day: Day, start: Minute, end: Minute) -> Result<(), TimeParseError> {
        if end < start {
            return Err(TimeParseError::Reversed(format!(
                "{} - {}",
                minutes_to_hr24(start),
                minutes_to_hr24(end)
            )));
        }
        let blocks = &mut self.days[day.index()];
        blocks.push(start);
        blocks.push(end);
        Ok(())
    }

    /// Flattened `[start, end, ...]` sequence of `day`.
    pub fn day(&self, day: Day) -> &[Minute] {
        &self.days[day.index()]
    }

    /// Blocks of `day` as `(start, end)` pairs.
    pub fn blocks(&self, day: Day) -> impl Iterator<Item = (Minute, Minute)> + '_ {
        self.days[day.index()]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }

    /// Total number of blocks across the week.
    pub fn len(&self) -> usize {
        self.days.iter().map(|d| d.len() / 2).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Returns true if there is at least one block on `day`.
    pub fn meets_on(&self, day: Day) -> bool {
        !self.days[day.index()].is_empty()
    }

    /// Returns true if any block of `self` overlaps any block of `other` on the
    /// same day by a positive amount.
    pub fn conflicts_with(&self, other: &TimeDict) -> bool {
        for (mine, theirs) in self.days.iter().zip(other.days.iter()) {
            if mine.is_empty() || theirs.is_empty() {
                continue;
            }
            for a in mine.chunks_exact(2) {
                for b in theirs.chunks_exact(2) {
                    if overlap(a[0], a[1], b[0], b[1]) > 0 {
                        return true;
                    }
                }
            }
        }
        false
    }
}
