//! Stored candidate schedules and their per-day block layout.

use std::sync::Arc;

use crate::catalog::{BuildingId, CourseOption};
use crate::time::{Day, Minute};

/// Every meeting of a candidate, grouped by day and ordered by start time.
///
/// `times` is flattened as `[s0, e0, s1, e1, ...]` and `rooms[i]` is the
/// building of the block starting at `times[2 * i]`. The blocks of day `d`
/// occupy block indices `bounds[d]..bounds[d + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedBlocks {
    bounds: [usize; Day::COUNT + 1],
    times: Vec<Minute>,
    rooms: Vec<Option<BuildingId>>,
}

impl OrderedBlocks {
    /// Merges the meetings of `options` day by day with an insertion sort.
    ///
    /// Blocks with equal start times keep the order of the options they came
    /// from.
    pub fn from_options(options: &[Arc<CourseOption>]) -> Self {
        let total: usize = options.iter().map(|o| o.time().len()).sum();
        let mut times = Vec::with_capacity(total * 2);
        let mut rooms = Vec::with_capacity(total);
        let mut bounds = [0; Day::COUNT + 1];

        for day in Day::ALL {
            let first = rooms.len();
            bounds[day.index()] = first;
            for option in options {
                for ((start, end), &room) in option.time().blocks(day).zip(option.rooms(day)) {
                    let count = rooms.len();
                    let pos = (first..count)
                        .find(|&k| start < times[2 * k])
                        .unwrap_or(count);
                    times.insert(2 * pos, end);
                    times.insert(2 * pos, start);
                    rooms.insert(pos, room);
                }
            }
        }
        bounds[Day::COUNT] = rooms.len();

        Self {
            bounds,
            times,
            rooms,
        }
    }

    /// Flattened `[start, end, ...]` of `day`, ascending by start.
    pub fn times(&self, day: Day) -> &[Minute] {
        let i = day.index();
        &self.times[2 * self.bounds[i]..2 * self.bounds[i + 1]]
    }

    pub fn rooms(&self, day: Day) -> &[Option<BuildingId>] {
        let i = day.index();
        &self.rooms[self.bounds[i]..self.bounds[i + 1]]
    }

    /// `(start, end, building)` of every block of `day`, ascending by start.
    pub fn blocks(&self, day: Day) -> impl Iterator<Item = (Minute, Minute, Option<BuildingId>)> + '_ {
        self.times(day)
            .chunks_exact(2)
            .zip(self.rooms(day))
            .map(|(pair, &room)| (pair[0], pair[1], room))
    }

    /// Total number of blocks in the week.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// A candidate held by the evaluator.
///
/// Everything but `coeff` is fixed once the candidate is added. `index` is the
/// insertion position, used to look up cached scores and to break ties.
#[derive(Debug, Clone)]
pub struct CmpSchedule {
    options: Vec<Arc<CourseOption>>,
    blocks: OrderedBlocks,
    index: usize,
    pub(crate) coeff: f32,
}

impl CmpSchedule {
    pub fn new(options: &[Arc<CourseOption>], index: usize) -> Self {
        Self {
            blocks: OrderedBlocks::from_options(options),
            options: options.to_vec(),
            index,
            coeff: 0.0,
        }
    }

    /// The chosen option of every course.
    pub fn options(&self) -> &[Arc<CourseOption>] {
        &self.options
    }

    pub fn blocks(&self) -> &OrderedBlocks {
        &self.blocks
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Sort coefficient written by the last coefficient computation.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}
