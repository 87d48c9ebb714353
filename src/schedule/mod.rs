//! User-facing result of schedule generation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::catalog::CourseOption;

mod event;

pub use event::Event;

/// A generated schedule: the chosen sections of every course, plus the events
/// it was generated around.
///
/// # Examples
///
/// ```
/// use coursegen::catalog::CourseOption;
/// use coursegen::schedule::Schedule;
/// use coursegen::time::TimeDict;
/// use std::sync::Arc;
///
/// let lecture = Arc::new(CourseOption::without_rooms(
///     "cs21501",
///     vec![0, 3],
///     TimeDict::parse("MoWe 10:00AM - 10:50AM").unwrap(),
/// ));
/// let schedule = Schedule::from_options(&[lecture], Vec::new());
///
/// assert_eq!(schedule.len(), 1);
/// assert!(schedule.sections("cs21501").unwrap().contains(&3));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    courses: BTreeMap<String, BTreeSet<usize>>,
    events: Vec<Event>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a schedule from the options picked for each course.
    pub fn from_options(options: &[Arc<CourseOption>], events: Vec<Event>) -> Self {
        let mut courses: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        for option in options {
            courses
                .entry(option.key().to_string())
                .or_default()
                .extend(option.sections().iter().copied());
        }
        Self { courses, events }
    }

    /// Number of courses in the schedule.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Sections chosen for the course `key`.
    pub fn sections(&self, key: &str) -> Option<&BTreeSet<usize>> {
        self.courses.get(key)
    }

    /// Iterates over `(course key, chosen sections)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.courses.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Day, TimeDict};

    fn option(key: &str, sections: Vec<usize>) -> Arc<CourseOption> {
        Arc::new(CourseOption::without_rooms(key, sections, TimeDict::new()))
    }

    #[test]
    fn test_from_options_groups_by_course() {
        let schedule = Schedule::from_options(
            &[option("cs21501", vec![0, 1]), option("math31001", vec![4])],
            Vec::new(),
        );
        assert_eq!(schedule.len(), 2);
        let keys: Vec<&str> = schedule.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["cs21501", "math31001"]);
        assert_eq!(schedule.sections("math31001").unwrap().len(), 1);
        assert!(schedule.sections("phys1425").is_none());
    }

    #[test]
    fn test_events_are_carried() {
        let event = Event::new("MoFr 1:00PM - 2:00PM", "Work").unwrap();
        let schedule = Schedule::from_options(&[], vec![event.clone()]);
        assert!(schedule.is_empty());
        assert_eq!(schedule.events(), &[event]);
    }

    #[test]
    fn test_event_time() {
        let event = Event::new("TuTh 6:00PM - 7:30PM", "Club").unwrap();
        assert_eq!(event.time().day(Day::Tu), &[1080, 1170]);
        assert_eq!(event.days(), "TuTh 6:00PM - 7:30PM");
        assert_eq!(event.title(), "Club");
        assert!(Event::new("whenever", "Nap").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_json_is_parsed() {
        let event: Event = serde_json::from_str(r#"{"days":"We 9:00AM - 9:30AM"}"#).unwrap();
        assert_eq!(event.time().day(Day::We), &[540, 570]);
        let bad: std::result::Result<Event, _> = serde_json::from_str(r#"{"days":"nope"}"#);
        assert!(bad.is_err());
    }
}
