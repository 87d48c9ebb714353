//! Read-only course catalog and the options it exposes to the generator.
//!
//! The catalog is built elsewhere (fetched, parsed and cached by the caller).
//! The engine only asks it two things: the sections of a course, optionally
//! restricted to a subset chosen by the user ([`Catalog::get_course`]), and
//! the conflict-checkable options those sections collapse to
//! ([`CourseRecord::combined_options`]). Sections meeting at exactly the same
//! times are merged into one option, which keeps the search tree narrow.

mod buildings;
mod option;
mod section;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};

use crate::error::{EngineError, Result};

pub use buildings::{BuildingId, BuildingList, BuildingLookup, DistanceMatrix};
pub use option::{CourseOption, Rooms};
pub use section::{Meeting, Section, SectionStatus};

/// A course and all of its sections.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// Unique key, e.g. `"cs21501"` (department, number and type).
    pub key: String,
    pub department: String,
    pub number: u32,
    /// Course type, e.g. `"Lecture"`.
    pub kind: String,
    /// Credits; usually a number but may be a range such as `"1 - 12"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub sections: Vec<Section>,
}

impl Course {
    /// Display name such as `"CS 2150 Lecture"`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.department, self.number, self.kind)
    }
}

/// Which sections of a course the user picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionFilter {
    /// Any section may be used.
    #[default]
    All,
    /// Only these section indices. An empty set means any section.
    Only(BTreeSet<usize>),
}

impl SectionFilter {
    fn admits(&self, sid: usize) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Only(sids) => sids.is_empty() || sids.contains(&sid),
        }
    }
}

/// Courses indexed by key.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Course>", into = "Vec<Course>"))]
pub struct Catalog {
    courses: HashMap<String, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, replacing any previous course with the same key.
    pub fn insert(&mut self, course: Course) {
        self.courses.insert(course.key.clone(), course);
    }

    pub fn get(&self, key: &str) -> Option<&Course> {
        self.courses.get(key)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The sections of `key` admitted by `filter`.
    pub fn get_course(&self, key: &str, filter: &SectionFilter) -> Result<CourseRecord<'_>> {
        let course = self
            .get(key)
            .ok_or_else(|| EngineError::UnknownCourse(key.to_string()))?;
        let sections = course
            .sections
            .iter()
            .filter(|s| filter.admits(s.sid))
            .collect();
        Ok(CourseRecord { course, sections })
    }
}

impl From<Vec<Course>> for Catalog {
    fn from(courses: Vec<Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.insert(course);
        }
        catalog
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        let mut courses: Vec<Course> = catalog.courses.into_values().collect();
        courses.sort_by(|a, b| a.key.cmp(&b.key));
        courses
    }
}

/// A course restricted to a subset of its sections.
#[derive(Debug, Clone)]
pub struct CourseRecord<'a> {
    course: &'a Course,
    sections: Vec<&'a Section>,
}

impl<'a> CourseRecord<'a> {
    pub fn course(&self) -> &'a Course {
        self.course
    }

    pub fn key(&self) -> &'a str {
        &self.course.key
    }

    pub fn sections(&self) -> &[&'a Section] {
        &self.sections
    }

    /// Looks up a contained section by its index within the course.
    pub fn section(&self, sid: usize) -> Option<&'a Section> {
        self.sections.iter().copied().find(|s| s.sid == sid)
    }

    /// Groups the contained sections by identical meeting pattern, in order of
    /// first appearance.
    pub fn combined(&self) -> Vec<Vec<&'a Section>> {
        let mut groups: Vec<Vec<&'a Section>> = Vec::new();
        let mut by_time: HashMap<String, usize> = HashMap::new();
        for &section in &self.sections {
            let time = section.combined_time();
            match by_time.get(&time) {
                Some(&idx) => groups[idx].push(section),
                None => {
                    by_time.insert(time, groups.len());
                    groups.push(vec![section]);
                }
            }
        }
        groups
    }

    /// One [`CourseOption`] per group of sections sharing a meeting pattern,
    /// or one per section when `combine` is false.
    ///
    /// Time and rooms are taken from the first section of each group. Sections
    /// in a group share their times but not necessarily their rooms.
    pub fn combined_options(
        &self,
        combine: bool,
        buildings: &dyn BuildingLookup,
    ) -> Vec<CourseOption> {
        let groups = if combine {
            self.combined()
        } else {
            self.sections.iter().map(|&s| vec![s]).collect()
        };
        groups
            .into_iter()
            .map(|group| {
                let (time, rooms) = group[0].time_room(buildings);
                let sids = group.iter().map(|s| s.sid).collect();
                CourseOption::new(self.key(), sids, time, rooms)
            })
            .collect()
    }
}
