//! Iterative backtracking over one option per course.

use std::sync::Arc;

use crate::algorithms::ScheduleSink;
use crate::catalog::CourseOption;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every combination was explored.
    Exhausted,
    /// The sink reached the result cap before the search space was exhausted.
    CapReached,
}

/// Backtracking state: the partial candidate and, for every course, the option
/// index to resume from when the search returns to it.
struct SearchState {
    path_memory: Vec<usize>,
    time_table: Vec<Arc<CourseOption>>,
}

impl SearchState {
    fn new(num_courses: usize) -> Self {
        Self {
            path_memory: vec![0; num_courses],
            time_table: Vec::with_capacity(num_courses),
        }
    }

    fn fits(&self, candidate: &CourseOption) -> bool {
        !self
            .time_table
            .iter()
            .any(|placed| placed.conflicts_with(candidate))
    }

    /// Places `candidate` for course `class_num` and remembers where to resume.
    fn push(&mut self, class_num: usize, choice_num: usize, candidate: &Arc<CourseOption>) {
        self.time_table.push(Arc::clone(candidate));
        self.path_memory[class_num] = choice_num + 1;
    }

    /// Removes the option placed for course `class_num` and returns the choice
    /// index to resume from.
    fn pop(&mut self, class_num: usize) -> usize {
        self.time_table.pop();
        debug_assert_eq!(self.time_table.len(), class_num);
        self.path_memory[class_num]
    }

    /// Forgets the trial history of every course after `class_num`.
    fn reset_after(&mut self, class_num: usize) {
        self.path_memory[class_num + 1..].fill(0);
    }
}

/// Enumerates every conflict-free combination of one option per course and
/// hands each to `sink`, stopping once the sink holds `max_results` candidates.
///
/// Courses are decided in `class_list` order and the options of each course in
/// their listed order, so identical input always yields candidates in the same
/// order. Callers sort `class_list` by ascending length first so the most
/// constrained courses prune the tree earliest.
pub fn search<S: ScheduleSink>(
    class_list: &[Vec<Arc<CourseOption>>],
    sink: &mut S,
    max_results: usize,
) -> SearchStatus {
    let num_courses = class_list.len();
    if num_courses == 0 {
        return SearchStatus::Exhausted;
    }
    if sink.len() >= max_results {
        return SearchStatus::CapReached;
    }

    let mut state = SearchState::new(num_courses);
    let mut class_num = 0;
    let mut choice_num = 0;

    loop {
        if class_num == num_courses {
            sink.add(&state.time_table);
            if sink.len() >= max_results {
                return SearchStatus::CapReached;
            }
            class_num -= 1;
            choice_num = state.pop(class_num);
        }

        while choice_num >= class_list[class_num].len() {
            if class_num == 0 {
                return SearchStatus::Exhausted;
            }
            class_num -= 1;
            choice_num = state.pop(class_num);
            state.reset_after(class_num);
        }

        let candidate = &class_list[class_num][choice_num];
        if state.fits(candidate) {
            state.push(class_num, choice_num, candidate);
            class_num += 1;
            choice_num = 0;
        } else {
            choice_num += 1;
        }
    }
}
