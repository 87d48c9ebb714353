//! Conflict-checkable alternatives for a single course.

use crate::time::{Day, TimeDict};

use super::buildings::BuildingId;

/// Resolved building of every block, aligned with the blocks of a [`TimeDict`].
pub type Rooms = [Vec<Option<BuildingId>>; Day::COUNT];

/// One selectable choice for a course: one or more sections sharing a weekly
/// meeting pattern.
///
/// `sections` lists the section indices that are taken if this option is
/// chosen. `rooms[d][i]` is the building of the `i`-th block of day `d`.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOption {
    key: String,
    sections: Vec<usize>,
    time: TimeDict,
    rooms: Rooms,
}

impl CourseOption {
    pub fn new(key: impl Into<String>, sections: Vec<usize>, time: TimeDict, rooms: Rooms) -> Self {
        debug_assert!(
            Day::ALL
                .iter()
                .all(|&d| rooms[d.index()].len() * 2 == time.day(d).len()),
            "rooms must be aligned with time blocks"
        );
        Self {
            key: key.into(),
            sections,
            time,
            rooms,
        }
    }

    /// Option without building information; every block is unresolved.
    pub fn without_rooms(key: impl Into<String>, sections: Vec<usize>, time: TimeDict) -> Self {
        let mut rooms: Rooms = Default::default();
        for day in Day::ALL {
            rooms[day.index()] = vec![None; time.day(day).len() / 2];
        }
        Self::new(key, sections, time, rooms)
    }

    /// Key of the course this option belongs to.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sections(&self) -> &[usize] {
        &self.sections
    }

    pub fn time(&self) -> &TimeDict {
        &self.time
    }

    pub fn rooms(&self, day: Day) -> &[Option<BuildingId>] {
        &self.rooms[day.index()]
    }

    /// Whether the meetings of both options overlap.
    pub fn conflicts_with(&self, other: &CourseOption) -> bool {
        self.time.conflicts_with(&other.time)
    }

    /// Copy of this option restricted to `sections`.
    pub fn with_sections(&self, sections: Vec<usize>) -> Self {
        Self {
            key: self.key.clone(),
            sections,
            time: self.time.clone(),
            rooms: self.rooms.clone(),
        }
    }
}
