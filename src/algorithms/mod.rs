pub mod generator;

pub use generator::{
    search, Filter, Generated, Outcome, ScheduleGenerator, SearchStatus, Selection,
};

use std::sync::Arc;

use crate::catalog::CourseOption;

/// Receiver of the conflict-free combinations found by [`search`].
///
/// The search hands over every candidate as soon as it is complete and never
/// materializes the full candidate list itself. It consults [`len`](Self::len)
/// after each hand-over to enforce its result cap.
pub trait ScheduleSink {
    /// Accepts one candidate: exactly one option per course, in class-list order.
    fn add(&mut self, schedule: &[Arc<CourseOption>]);

    /// Number of candidates stored so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects candidates verbatim.
impl ScheduleSink for Vec<Vec<Arc<CourseOption>>> {
    fn add(&mut self, schedule: &[Arc<CourseOption>]) {
        self.push(schedule.to_vec());
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
