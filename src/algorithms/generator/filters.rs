//! Pre-search filtering of course options.

use crate::catalog::{CourseOption, CourseRecord, SectionStatus};
use crate::time::{Day, TimeDict};

/// Constraints every chosen section must satisfy.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Filter {
    /// Sections with any of these statuses are never chosen.
    pub excluded_statuses: Vec<SectionStatus>,
    /// Blocked time windows; options overlapping any of them are dropped.
    pub time_slots: Vec<TimeDict>,
    /// Options meeting on any of these days are dropped.
    pub excluded_days: Vec<Day>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_status(mut self, status: SectionStatus) -> Self {
        self.excluded_statuses.push(status);
        self
    }

    pub fn block_time(mut self, slot: TimeDict) -> Self {
        self.time_slots.push(slot);
        self
    }

    pub fn exclude_day(mut self, day: Day) -> Self {
        self.excluded_days.push(day);
        self
    }

    fn admits_time(&self, time: &TimeDict, events: &[&TimeDict]) -> bool {
        let on_excluded_day = self.excluded_days.iter().any(|&d| time.meets_on(d));
        let blocked = self
            .time_slots
            .iter()
            .chain(events.iter().copied())
            .any(|slot| slot.conflicts_with(time));
        !on_excluded_day && !blocked
    }

    /// Drops options that meet on an excluded day or overlap a blocked window
    /// or event, and removes sections with an excluded status from the rest.
    /// Options left without sections are dropped too.
    pub fn apply(
        &self,
        record: &CourseRecord<'_>,
        options: Vec<CourseOption>,
        events: &[&TimeDict],
    ) -> Vec<CourseOption> {
        options
            .into_iter()
            .filter(|option| self.admits_time(option.time(), events))
            .filter_map(|option| {
                let sections: Vec<usize> = option
                    .sections()
                    .iter()
                    .copied()
                    .filter(|&sid| {
                        record
                            .section(sid)
                            .is_some_and(|s| !self.excluded_statuses.contains(&s.status))
                    })
                    .collect();
                match sections.len() {
                    0 => None,
                    n if n == option.sections().len() => Some(option),
                    _ => Some(option.with_sections(sections)),
                }
            })
            .collect()
    }
}
