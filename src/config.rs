//! Tunables for schedule generation and evaluation.

use crate::time::Minute;

/// Configuration of the backtracking search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Hard cap on stored schedules. The search stops as soon as it is reached.
    pub max_results: usize,
    /// Merge sections of a course that meet at identical times into one option.
    pub combine_sections: bool,
}

impl GeneratorConfig {
    pub const DEFAULT_MAX_RESULTS: usize = 200_000;

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_combine_sections(mut self, combine: bool) -> Self {
        self.combine_sections = combine;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_results: Self::DEFAULT_MAX_RESULTS,
            combine_sections: true,
        }
    }
}

/// Configuration of scoring and sorting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluatorConfig {
    /// Populations larger than this are ranked with a partial sort.
    pub quick_threshold: usize,
    /// Number of leading schedules kept exactly ordered by a partial sort.
    pub partial_sort_k: usize,
    /// Always use the partial sort, regardless of population size.
    pub force_quick: bool,
    /// Consecutive classes separated by at least this many minutes add no
    /// walking distance. `None` counts every consecutive pair.
    pub distance_gap_limit: Option<Minute>,
    /// Seed for the random criterion and shuffle. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl EvaluatorConfig {
    pub const DEFAULT_QUICK_THRESHOLD: usize = 50_000;
    pub const DEFAULT_PARTIAL_SORT_K: usize = 1000;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_quick_threshold(mut self, threshold: usize) -> Self {
        self.quick_threshold = threshold;
        self
    }

    pub fn with_partial_sort_k(mut self, k: usize) -> Self {
        self.partial_sort_k = k;
        self
    }

    pub fn with_force_quick(mut self, force: bool) -> Self {
        self.force_quick = force;
        self
    }

    pub fn with_distance_gap_limit(mut self, limit: Option<Minute>) -> Self {
        self.distance_gap_limit = limit;
        self
    }

    /// Whether a population of `len` schedules should use the partial sort.
    pub fn use_partial_sort(&self, len: usize) -> bool {
        self.force_quick || len > self.quick_threshold
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            quick_threshold: Self::DEFAULT_QUICK_THRESHOLD,
            partial_sort_k: Self::DEFAULT_PARTIAL_SORT_K,
            force_quick: false,
            distance_gap_limit: None,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_generator_config() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.max_results, 200_000);
        assert!(cfg.combine_sections);
    }

    #[test]
    fn default_evaluator_config() {
        let cfg = EvaluatorConfig::default();
        assert_eq!(cfg.quick_threshold, 50_000);
        assert_eq!(cfg.partial_sort_k, 1000);
        assert!(!cfg.force_quick);
        assert!(cfg.distance_gap_limit.is_none());
    }

    #[test]
    fn partial_sort_threshold() {
        let cfg = EvaluatorConfig::default();
        assert!(!cfg.use_partial_sort(50_000));
        assert!(cfg.use_partial_sort(50_001));
        assert!(cfg.clone().with_force_quick(true).use_partial_sort(10));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn evaluator_config_from_partial_json() {
        let cfg: EvaluatorConfig =
            serde_json::from_str(r#"{"partial_sort_k": 50, "seed": 7}"#).unwrap();
        assert_eq!(cfg.partial_sort_k, 50);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.quick_threshold, 50_000);
    }
}
