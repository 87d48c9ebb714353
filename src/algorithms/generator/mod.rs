//! Schedule generation: turning the user's course selection into every
//! conflict-free combination of sections.
//!
//! Generation happens in two phases:
//!
//! 1. **Bootstrapping**: every selected course is looked up in the catalog,
//!    its sections are collapsed into options (see
//!    [`CourseRecord::combined_options`](crate::catalog::CourseRecord::combined_options)),
//!    and the options are filtered by status, blocked time and excluded days.
//!    A course with no surviving option is a configuration error. The
//!    per-course option lists are then sorted by ascending length so that the
//!    most constrained courses are decided first.
//! 2. **Search**: [`search`] walks the combinations with an explicit stack and
//!    streams each conflict-free candidate into a [`ScheduleEvaluator`], which
//!    is sorted once the search ends.
//!
//! Exhausting the search space without a single candidate is not an error: it
//! is reported as [`Outcome::NoSchedule`] with an empty evaluator. Likewise,
//! hitting the result cap yields a usable [`Outcome::Truncated`] result.

mod filters;
mod search;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{BuildingLookup, Catalog, CourseOption, DistanceMatrix, SectionFilter};
use crate::config::{EvaluatorConfig, GeneratorConfig};
use crate::error::{EngineError, Result};
use crate::evaluator::{ScheduleEvaluator, SortOptions};
use crate::schedule::Event;
use crate::time::TimeDict;

pub use filters::Filter;
pub use search::{search, SearchStatus};

/// The courses (and optionally the sections) a user picked, plus their events.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Selection {
    pub courses: BTreeMap<String, SectionFilter>,
    pub events: Vec<Event>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course with every section allowed.
    pub fn with_course(mut self, key: impl Into<String>) -> Self {
        self.courses.insert(key.into(), SectionFilter::All);
        self
    }

    /// Adds a course restricted to `sections`.
    pub fn with_sections(
        mut self,
        key: impl Into<String>,
        sections: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.courses
            .insert(key.into(), SectionFilter::Only(sections.into_iter().collect()));
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }
}

/// How a generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The whole search space was explored.
    Complete { count: usize },
    /// The search stopped at the result cap; the schedules found are still valid.
    Truncated { count: usize, cap: usize },
    /// No combination of the selected courses is free of time conflicts.
    NoSchedule,
}

impl Outcome {
    /// Whether at least one schedule was generated.
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Complete { count } | Outcome::Truncated { count, .. } => *count > 0,
            Outcome::NoSchedule => false,
        }
    }

    /// Message suitable for showing to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Complete { count } => write!(f, "{} schedules generated", count),
            Outcome::Truncated { count, cap } => write!(
                f,
                "{} schedules generated (stopped at the cap of {})",
                count, cap
            ),
            Outcome::NoSchedule => {
                write!(f, "no conflict-free schedule exists for the given filters")
            }
        }
    }
}

/// Result of [`ScheduleGenerator::get_schedules`].
#[derive(Debug)]
pub struct Generated {
    pub evaluator: ScheduleEvaluator,
    pub outcome: Outcome,
}

/// Entry point of the engine.
///
/// Holds the read-only inputs (catalog, building lookup, distance matrix) and
/// the user's configuration. Every call to
/// [`get_schedules`](Self::get_schedules) starts from scratch and owns all of
/// its state.
pub struct ScheduleGenerator<'a> {
    catalog: &'a Catalog,
    buildings: &'a dyn BuildingLookup,
    distances: Arc<DistanceMatrix>,
    filter: Filter,
    sort_options: SortOptions,
    config: GeneratorConfig,
    evaluator_config: EvaluatorConfig,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(
        catalog: &'a Catalog,
        buildings: &'a dyn BuildingLookup,
        distances: Arc<DistanceMatrix>,
    ) -> Self {
        Self {
            catalog,
            buildings,
            distances,
            filter: Filter::default(),
            sort_options: SortOptions::default(),
            config: GeneratorConfig::default(),
            evaluator_config: EvaluatorConfig::default(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort_options(mut self, options: SortOptions) -> Self {
        self.sort_options = options;
        self
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_evaluator_config(mut self, config: EvaluatorConfig) -> Self {
        self.evaluator_config = config;
        self
    }

    /// Builds the per-course option lists, filtered and sorted by ascending
    /// number of options.
    pub fn class_list(&self, selection: &Selection) -> Result<Vec<Vec<Arc<CourseOption>>>> {
        if selection.courses.is_empty() {
            return Err(EngineError::NoCourses);
        }

        let events: Vec<&TimeDict> = selection.events.iter().map(Event::time).collect();
        let mut class_list = Vec::with_capacity(selection.courses.len());

        for (key, sections) in &selection.courses {
            let record = self.catalog.get_course(key, sections)?;
            let options = record.combined_options(self.config.combine_sections, self.buildings);
            let options = self.filter.apply(&record, options, &events);
            if options.is_empty() {
                return Err(EngineError::NoSectionsAfterFilter(
                    record.course().display_name(),
                ));
            }
            class_list.push(options.into_iter().map(Arc::new).collect::<Vec<_>>());
        }

        class_list.sort_by_key(Vec::len);
        Ok(class_list)
    }

    /// Generates, scores and sorts every conflict-free schedule for `selection`.
    pub fn get_schedules(&self, selection: &Selection) -> Result<Generated> {
        let started = Instant::now();
        let class_list = self.class_list(selection)?;
        log::debug!(
            "bootstrapped {} courses ({} options) in {:?}",
            class_list.len(),
            class_list.iter().map(Vec::len).sum::<usize>(),
            started.elapsed()
        );

        let started = Instant::now();
        let mut evaluator = ScheduleEvaluator::new(
            self.sort_options.clone(),
            self.evaluator_config.clone(),
            Arc::clone(&self.distances),
            selection.events.clone(),
        );
        let status = search(&class_list, &mut evaluator, self.config.max_results);
        log::debug!(
            "search found {} schedules ({:?}) in {:?}",
            evaluator.len(),
            status,
            started.elapsed()
        );

        let count = evaluator.len();
        let outcome = match status {
            SearchStatus::CapReached => Outcome::Truncated {
                count,
                cap: self.config.max_results,
            },
            SearchStatus::Exhausted if count == 0 => Outcome::NoSchedule,
            SearchStatus::Exhausted => Outcome::Complete { count },
        };
        if !evaluator.is_empty() {
            evaluator.sort();
        }
        Ok(Generated { evaluator, outcome })
    }
}
