//! Scoring criteria.
//!
//! Every criterion maps a candidate to an `f32` where lower is better. The
//! functions here are pure; randomness and external data reach them through
//! their arguments.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::DistanceMatrix;
use crate::error::EngineError;
use crate::schedule::Schedule;
use crate::time::{overlap, Day, Minute};

use super::cmp_schedule::{CmpSchedule, OrderedBlocks};

/// Start and end of the lunch window, 11:00 to 14:00.
pub const LUNCH_WINDOW: (Minute, Minute) = (660, 840);

/// Lunch overlap of a day is ignored up to this many minutes.
pub const LUNCH_TOLERANCE: i32 = 60;

/// Classes starting before this time (12:00) are penalized by `noEarly`.
pub const NO_EARLY_REFERENCE: Minute = 720;

/// The closed set of sort criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ScoreKind {
    /// Imbalance of class time across the weekdays.
    Variance,
    /// Idle time between consecutive classes.
    Compactness,
    /// Classes overlapping the lunch window.
    LunchTime,
    /// Classes starting before noon.
    NoEarly,
    /// Walking time between consecutive classes.
    Distance,
    /// Sections shared with a reference schedule.
    Similarity,
    /// Random order.
    IamFeelingLucky,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 7] = [
        ScoreKind::Variance,
        ScoreKind::Compactness,
        ScoreKind::LunchTime,
        ScoreKind::NoEarly,
        ScoreKind::Distance,
        ScoreKind::Similarity,
        ScoreKind::IamFeelingLucky,
    ];

    /// Name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            ScoreKind::Variance => "variance",
            ScoreKind::Compactness => "compactness",
            ScoreKind::LunchTime => "lunchTime",
            ScoreKind::NoEarly => "noEarly",
            ScoreKind::Distance => "distance",
            ScoreKind::Similarity => "similarity",
            ScoreKind::IamFeelingLucky => "IamFeelingLucky",
        }
    }

    pub const fn is_random(self) -> bool {
        matches!(self, ScoreKind::IamFeelingLucky)
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EngineError::UnknownCriterion(s.to_string()))
    }
}

impl TryFrom<String> for ScoreKind {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScoreKind> for String {
    fn from(kind: ScoreKind) -> Self {
        kind.name().to_string()
    }
}

/// Data some criteria read besides the candidate itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub distances: &'a DistanceMatrix,
    /// Consecutive classes at least this far apart add no distance.
    pub gap_limit: Option<Minute>,
    /// Schedule compared against by `similarity`.
    pub reference: Option<&'a Schedule>,
}

/// Scores `schedule` under `kind`.
pub fn evaluate(
    kind: ScoreKind,
    schedule: &CmpSchedule,
    ctx: &ScoreContext<'_>,
    rng: &mut StdRng,
) -> f32 {
    let blocks = schedule.blocks();
    match kind {
        ScoreKind::Variance => variance(blocks),
        ScoreKind::Compactness => compactness(blocks),
        ScoreKind::LunchTime => lunch_time(blocks),
        ScoreKind::NoEarly => no_early(blocks),
        ScoreKind::Distance => distance(blocks, ctx.distances, ctx.gap_limit),
        ScoreKind::Similarity => ctx
            .reference
            .map_or(0.0, |reference| similarity(schedule, reference)),
        ScoreKind::IamFeelingLucky => rng.gen(),
    }
}

/// Population variance of the class minutes of each weekday.
pub fn variance(blocks: &OrderedBlocks) -> f32 {
    let days = &Day::ALL[..Day::WEEKDAYS];
    let totals: Vec<f64> = days
        .iter()
        .map(|&day| {
            blocks
                .blocks(day)
                .map(|(start, end, _)| f64::from(end.saturating_sub(start)))
                .sum()
        })
        .collect();
    let n = Day::WEEKDAYS as f64;
    let mean = totals.iter().sum::<f64>() / n;
    (totals.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n) as f32
}

/// Sum of the gaps between consecutive classes of each day.
pub fn compactness(blocks: &OrderedBlocks) -> f32 {
    let gaps: i64 = Day::ALL
        .iter()
        .map(|&day| {
            blocks
                .times(day)
                .windows(4)
                .step_by(2)
                .map(|w| i64::from(w[2]) - i64::from(w[1]))
                .sum::<i64>()
        })
        .sum();
    gaps as f32
}

/// Overlap of classes with the lunch window, for days where it exceeds the
/// tolerance.
pub fn lunch_time(blocks: &OrderedBlocks) -> f32 {
    let (lunch_start, lunch_end) = LUNCH_WINDOW;
    let total: i32 = Day::ALL
        .iter()
        .map(|&day| {
            blocks
                .blocks(day)
                .map(|(start, end, _)| overlap(lunch_start, lunch_end, start, end).max(0))
                .sum::<i32>()
        })
        .filter(|&day_overlap| day_overlap > LUNCH_TOLERANCE)
        .sum();
    total as f32
}

/// Squared minutes between the first class of each day and noon, for days
/// starting before noon.
pub fn no_early(blocks: &OrderedBlocks) -> f32 {
    let total: i64 = Day::ALL
        .iter()
        .filter_map(|&day| blocks.times(day).first())
        .map(|&first| {
            let early = i64::from(NO_EARLY_REFERENCE) - i64::from(first);
            early.max(0).pow(2)
        })
        .sum();
    total as f32
}

/// Walking time between consecutive classes of each day.
///
/// Pairs with an unresolved building add nothing, as do pairs separated by at
/// least `gap_limit` minutes.
pub fn distance(blocks: &OrderedBlocks, matrix: &DistanceMatrix, gap_limit: Option<Minute>) -> f32 {
    let mut total = 0.0;
    for day in Day::ALL {
        let day_blocks: Vec<_> = blocks.blocks(day).collect();
        for pair in day_blocks.windows(2) {
            let (_, end, from) = pair[0];
            let (start, _, to) = pair[1];
            if gap_limit.is_some_and(|limit| start.saturating_sub(end) >= limit) {
                continue;
            }
            if let (Some(from), Some(to)) = (from, to) {
                total += matrix.get(from, to).unwrap_or(0.0);
            }
        }
    }
    total
}

/// Negated number of sections `schedule` shares with `reference`.
pub fn similarity(schedule: &CmpSchedule, reference: &Schedule) -> f32 {
    let shared: usize = schedule
        .options()
        .iter()
        .filter_map(|option| {
            reference.sections(option.key()).map(|chosen| {
                option
                    .sections()
                    .iter()
                    .filter(|sid| chosen.contains(sid))
                    .count()
            })
        })
        .sum();
    0.0 - shared as f32
}
