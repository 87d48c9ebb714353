//! Scoring and ranking of generated schedules.
//!
//! The [`ScheduleEvaluator`] receives candidates from the search one at a
//! time and keeps them in insertion order. Ranking happens in [`sort`]:
//!
//! - with `IamFeelingLucky` enabled the candidates are shuffled,
//! - with a single criterion its raw score is the sort key,
//! - in [`SortMode::Combined`] every enabled criterion is normalized to
//!   `0..=100` over the population, squared, weighted and summed,
//! - in [`SortMode::Fallback`] criteria are compared lexicographically.
//!
//! Scores are cached per criterion, so re-sorting after toggling a criterion
//! only computes the criteria that were never computed before. Every order
//! breaks remaining ties by insertion index.
//!
//! [`sort`]: ScheduleEvaluator::sort

mod cmp_schedule;
mod options;
pub mod score;
mod sort;


use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithms::ScheduleSink;
use crate::catalog::{CourseOption, DistanceMatrix};
use crate::config::EvaluatorConfig;
use crate::schedule::{Event, Schedule};

pub use cmp_schedule::{CmpSchedule, OrderedBlocks};
pub use options::{SortMode, SortOption, SortOptions};
pub use score::{ScoreContext, ScoreKind};
pub use sort::{partial_sort, shuffle};

/// How the last [`ScheduleEvaluator::sort`] ordered the schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    Shuffle,
    Full,
    /// Only the first `k` ranks are exact.
    Partial { k: usize },
}

/// One key of a rank comparison.
struct SortKey<'a> {
    values: &'a [f32],
    reverse: bool,
}

fn compare_ranks(keys: &[SortKey<'_>], a: usize, b: usize) -> Ordering {
    for key in keys {
        let ord = key.values[a].total_cmp(&key.values[b]);
        let ord = if key.reverse { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.cmp(&b)
}

/// Stores, scores and ranks candidate schedules.
#[derive(Debug)]
pub struct ScheduleEvaluator {
    options: SortOptions,
    config: EvaluatorConfig,
    distances: Arc<DistanceMatrix>,
    events: Vec<Event>,
    reference: Option<Schedule>,
    /// Candidates in insertion order; `schedules[i].index() == i`.
    schedules: Vec<CmpSchedule>,
    /// Insertion indices in rank order.
    order: Vec<usize>,
    cache: HashMap<ScoreKind, Vec<f32>>,
    rng: StdRng,
}

impl ScheduleEvaluator {
    pub fn new(
        options: SortOptions,
        config: EvaluatorConfig,
        distances: Arc<DistanceMatrix>,
        events: Vec<Event>,
    ) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            options,
            config,
            distances,
            events,
            reference: None,
            schedules: Vec::new(),
            order: Vec::new(),
            cache: HashMap::new(),
            rng,
        }
    }

    /// Stores a candidate. Cached scores are dropped since they no longer
    /// cover every candidate.
    pub fn add(&mut self, schedule: &[Arc<CourseOption>]) {
        let index = self.schedules.len();
        self.schedules.push(CmpSchedule::new(schedule, index));
        self.order.push(index);
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Replaces the sort configuration. Cached scores are kept.
    pub fn set_options(&mut self, options: SortOptions) {
        self.options = options;
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Sets the schedule `similarity` compares against.
    pub fn set_reference(&mut self, reference: Option<Schedule>) {
        self.reference = reference;
        self.cache.remove(&ScoreKind::Similarity);
    }

    /// Candidates in insertion order.
    pub fn schedules(&self) -> &[CmpSchedule] {
        &self.schedules
    }

    /// Scores of `kind` for every candidate, computed once and cached.
    ///
    /// With `assign` the scores are also written to each candidate's
    /// coefficient.
    pub fn compute_coeff_for(&mut self, kind: ScoreKind, assign: bool) -> &[f32] {
        let values = match self.cache.entry(kind) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let started = Instant::now();
                let ctx = ScoreContext {
                    distances: &self.distances,
                    gap_limit: self.config.distance_gap_limit,
                    reference: self.reference.as_ref(),
                };
                let rng = &mut self.rng;
                let values: Vec<f32> = self
                    .schedules
                    .iter()
                    .map(|schedule| score::evaluate(kind, schedule, &ctx, rng))
                    .collect();
                log::debug!(
                    "computed {} for {} schedules in {:?}",
                    kind,
                    values.len(),
                    started.elapsed()
                );
                entry.insert(values)
            }
        };
        if assign {
            for (schedule, &value) in self.schedules.iter_mut().zip(values.iter()) {
                schedule.coeff = value;
            }
        }
        values
    }

    /// Computes what the active sort configuration needs.
    ///
    /// A single criterion is written to the coefficients as is. In combined
    /// mode the coefficients hold the normalized sum. In fallback mode only
    /// the per-criterion caches are filled. Nothing happens when shuffling.
    pub fn compute_coeff(&mut self) {
        if self.options.is_random() || self.schedules.is_empty() {
            return;
        }
        let enabled: Vec<SortOption> = self.options.enabled().copied().collect();

        match enabled.as_slice() {
            [] => {}
            [only] => {
                self.compute_coeff_for(only.kind, true);
            }
            _ if self.options.mode() == SortMode::Fallback => {
                for option in &enabled {
                    self.compute_coeff_for(option.kind, false);
                }
            }
            _ => {
                let started = Instant::now();
                let mut coeffs = vec![0.0f32; self.schedules.len()];
                for option in &enabled {
                    let values = self.compute_coeff_for(option.kind, false);
                    let (min, max) = values
                        .iter()
                        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                            (lo.min(v), hi.max(v))
                        });
                    let range = max - min;
                    if !(range.is_finite() && range > 0.0) {
                        log::warn!(
                            "skipping {}: every schedule scores {} (range {})",
                            option.kind,
                            min,
                            range
                        );
                        continue;
                    }

                    let ratio = range / 100.0;
                    for (coeff, &value) in coeffs.iter_mut().zip(values) {
                        let delta = if option.reverse { max - value } else { value - min };
                        *coeff += option.weight * (delta / ratio).powi(2);
                    }
                }
                for (schedule, coeff) in self.schedules.iter_mut().zip(coeffs) {
                    schedule.coeff = coeff;
                }
                log::debug!("normalized coefficients in {:?}", started.elapsed());
            }
        }
    }

    /// Ranks the candidates under the active sort configuration.
    ///
    /// Ranking always starts from insertion order, so the result does not
    /// depend on earlier sorts.
    pub fn sort(&mut self) -> SortStrategy {
        let started = Instant::now();
        self.order = (0..self.schedules.len()).collect();

        if self.options.is_random() {
            shuffle(&mut self.order, &mut self.rng);
            log::debug!("shuffled {} schedules in {:?}", self.order.len(), started.elapsed());
            return SortStrategy::Shuffle;
        }

        self.compute_coeff();

        let enabled: Vec<&SortOption> = self.options.enabled().collect();
        let coeffs: Vec<f32> = self.schedules.iter().map(CmpSchedule::coeff).collect();
        let keys: Vec<SortKey<'_>> = match enabled.as_slice() {
            [only] => vec![SortKey {
                values: &coeffs,
                reverse: only.reverse,
            }],
            _ if self.options.mode() == SortMode::Fallback => enabled
                .iter()
                .filter_map(|option| {
                    self.cache.get(&option.kind).map(|values| SortKey {
                        values,
                        reverse: option.reverse,
                    })
                })
                .collect(),
            _ => vec![SortKey {
                values: &coeffs,
                reverse: false,
            }],
        };
        let compare = |a: &usize, b: &usize| compare_ranks(&keys, *a, *b);

        let len = self.order.len();
        let strategy = if self.config.use_partial_sort(len) {
            let k = self.config.partial_sort_k.min(len);
            partial_sort(&mut self.order, k, compare);
            if k.saturating_mul(2) >= len {
                SortStrategy::Full
            } else {
                SortStrategy::Partial { k }
            }
        } else {
            self.order.sort_by(compare);
            SortStrategy::Full
        };
        log::debug!(
            "sorted {} schedules ({:?}) in {:?}",
            len,
            strategy,
            started.elapsed()
        );
        strategy
    }

    /// Replaces the sort configuration and re-sorts.
    pub fn sort_with(&mut self, options: SortOptions) -> SortStrategy {
        self.set_options(options);
        self.sort()
    }

    /// Candidate at `rank`.
    pub fn get(&self, rank: usize) -> Option<&CmpSchedule> {
        self.order.get(rank).and_then(|&i| self.schedules.get(i))
    }

    /// User-facing schedule at `rank`, carrying the evaluator's events.
    pub fn get_schedule(&self, rank: usize) -> Option<Schedule> {
        self.get(rank)
            .map(|cmp| Schedule::from_options(cmp.options(), self.events.clone()))
    }

    /// Candidates in rank order.
    pub fn ranked(&self) -> impl Iterator<Item = &CmpSchedule> + '_ {
        self.order.iter().filter_map(|&i| self.schedules.get(i))
    }

    /// Drops every candidate, cached score and event.
    pub fn clear(&mut self) {
        self.schedules.clear();
        self.order.clear();
        self.cache.clear();
        self.events.clear();
    }
}

impl ScheduleSink for ScheduleEvaluator {
    fn add(&mut self, schedule: &[Arc<CourseOption>]) {
        ScheduleEvaluator::add(self, schedule);
    }

    fn len(&self) -> usize {
        ScheduleEvaluator::len(self)
    }
}
