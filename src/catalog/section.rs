//! Sections and their meetings.

use std::fmt;

use crate::time::{block_union, overlap, parse_time_all, Day, Minute, TimeDict};

use super::buildings::{BuildingId, BuildingLookup};
use super::option::Rooms;

/// Enrollment status of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionStatus {
    Open,
    Closed,
    #[cfg_attr(feature = "serde", serde(rename = "Wait List"))]
    WaitList,
    #[cfg_attr(feature = "serde", serde(rename = "TBA"))]
    Tba,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionStatus::Open => "Open",
            SectionStatus::Closed => "Closed",
            SectionStatus::WaitList => "Wait List",
            SectionStatus::Tba => "TBA",
        };
        f.write_str(s)
    }
}

/// One weekly meeting pattern of a section, e.g. `"MoWe 10:00AM - 10:50AM"` in `"Rice Hall 130"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meeting {
    pub days: String,
    pub room: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructor: String,
}

impl Meeting {
    pub fn new(days: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            days: days.into(),
            room: room.into(),
            instructor: String::new(),
        }
    }
}

/// A single section of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Index of this section within its course.
    pub sid: usize,
    /// Human-facing section label, e.g. `"001"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    pub status: SectionStatus,
    /// Date range the section runs, e.g. `"08/27/2019 - 12/17/2019"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dates: String,
    pub meetings: Vec<Meeting>,
}

impl Section {
    pub fn new(sid: usize, status: SectionStatus, meetings: Vec<Meeting>) -> Self {
        Self {
            sid,
            label: format!("{:03}", sid + 1),
            status,
            dates: String::new(),
            meetings,
        }
    }

    /// Key shared by every section meeting at exactly the same times on the same dates.
    pub fn combined_time(&self) -> String {
        self.meetings
            .iter()
            .fold(self.dates.clone(), |acc, m| acc + "|" + &m.days)
    }

    /// Weekly layout of this section with the building of every block.
    ///
    /// Meetings with an empty day string are skipped. If any meeting cannot be
    /// parsed (e.g. `"TBA"`), the whole section is treated as having no fixed
    /// time and an empty layout is returned. Meetings of the section that
    /// overlap on the same day are merged into one block, which keeps the
    /// building of the earlier meeting.
    pub fn time_room(&self, buildings: &dyn BuildingLookup) -> (TimeDict, Rooms) {
        let mut layout: [Vec<(Minute, Minute, Option<BuildingId>)>; Day::COUNT] = Default::default();

        for meeting in &self.meetings {
            if meeting.days.trim().is_empty() {
                continue;
            }
            let Ok((days, (start, end))) = parse_time_all(&meeting.days) else {
                return (TimeDict::new(), Default::default());
            };
            let building: Option<BuildingId> = buildings.resolve(&meeting.room);
            if building.is_none() && !meeting.room.is_empty() {
                log::debug!("no building matches room {:?}", meeting.room);
            }
            for day in days {
                let blocks = &mut layout[day.index()];
                let mut block = (start, end, building);
                while let Some(pos) = blocks
                    .iter()
                    .position(|&(s, e, _)| overlap(s, e, block.0, block.1) > 0)
                {
                    let (s, e, room) = blocks.remove(pos);
                    log::debug!(
                        "section {} meets twice on {} ({}-{} and {}-{}), merging",
                        self.label,
                        day,
                        s,
                        e,
                        block.0,
                        block.1
                    );
                    if let Some((s, e)) = block_union(s, e, block.0, block.1) {
                        block = (s, e, room);
                    }
                }
                blocks.push(block);
            }
        }

        let mut time = TimeDict::new();
        let mut rooms: Rooms = Default::default();
        for day in Day::ALL {
            for &(start, end, building) in &layout[day.index()] {
                if time.push(day, start, end).is_err() {
                    return (TimeDict::new(), Default::default());
                }
                rooms[day.index()].push(building);
            }
        }
        (time, rooms)
    }
}
