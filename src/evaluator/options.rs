//! Sort configuration: which criteria rank the schedules and how they combine.

use crate::error::{EngineError, Result};

use super::score::ScoreKind;

/// One criterion in the sort configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortOption {
    pub kind: ScoreKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enabled: bool,
    /// Prefer higher scores instead of lower ones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reverse: bool,
    /// Multiplier of this criterion's share in combined mode.
    #[cfg_attr(feature = "serde", serde(default = "SortOption::default_weight"))]
    pub weight: f32,
}

impl SortOption {
    pub const DEFAULT_WEIGHT: f32 = 1.0;

    /// Disabled, ascending, default weight.
    pub fn new(kind: ScoreKind) -> Self {
        Self {
            kind,
            enabled: false,
            reverse: false,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    #[cfg(feature = "serde")]
    fn default_weight() -> f32 {
        Self::DEFAULT_WEIGHT
    }
}

/// How several enabled criteria are merged into one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortMode {
    /// Lexicographic: later criteria only break ties of earlier ones.
    Fallback,
    /// Sum of squared, range-normalized scores.
    #[default]
    Combined,
}

/// Validated, ordered list of criteria plus the combination mode.
///
/// The position of a criterion in the list is its priority in fallback mode.
/// At least one criterion is always enabled, and `IamFeelingLucky` is never
/// enabled together with another one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSortOptions"))]
pub struct SortOptions {
    sort_by: Vec<SortOption>,
    mode: SortMode,
}

impl SortOptions {
    pub fn new(sort_by: Vec<SortOption>, mode: SortMode) -> Result<Self> {
        let options = Self { sort_by, mode };
        options.validate()?;
        Ok(options)
    }

    /// Every known criterion in default order, with exactly `names` enabled.
    pub fn with_enabled(names: &[&str], mode: SortMode) -> Result<Self> {
        let enabled = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<ScoreKind>>>()?;
        let sort_by = ScoreKind::ALL
            .into_iter()
            .map(|kind| SortOption::new(kind).enabled(enabled.contains(&kind)))
            .collect();
        Self::new(sort_by, mode)
    }

    fn validate(&self) -> Result<()> {
        for (i, option) in self.sort_by.iter().enumerate() {
            if self.sort_by[..i].iter().any(|o| o.kind == option.kind) {
                return Err(EngineError::DuplicateCriterion(option.kind.to_string()));
            }
            if !option.weight.is_finite() || option.weight < 0.0 {
                return Err(EngineError::InvalidWeight {
                    name: option.kind.to_string(),
                    weight: option.weight,
                });
            }
        }
        match self.enabled().count() {
            0 => Err(EngineError::NoCriterionEnabled),
            n if n > 1 && self.is_random() => Err(EngineError::LuckyNotExclusive),
            _ => Ok(()),
        }
    }

    /// All criteria, in priority order.
    pub fn sort_by(&self) -> &[SortOption] {
        &self.sort_by
    }

    /// Enabled criteria, in priority order.
    pub fn enabled(&self) -> impl Iterator<Item = &SortOption> + '_ {
        self.sort_by.iter().filter(|o| o.enabled)
    }

    pub fn get(&self, kind: ScoreKind) -> Option<&SortOption> {
        self.sort_by.iter().find(|o| o.kind == kind)
    }

    /// Whether schedules are shuffled instead of sorted.
    pub fn is_random(&self) -> bool {
        self.sort_by.iter().any(|o| o.enabled && o.kind.is_random())
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SortMode) {
        self.mode = mode;
    }

    fn entry(&mut self, kind: ScoreKind) -> &mut SortOption {
        let pos = match self.sort_by.iter().position(|o| o.kind == kind) {
            Some(pos) => pos,
            None => {
                self.sort_by.push(SortOption::new(kind));
                self.sort_by.len() - 1
            }
        };
        &mut self.sort_by[pos]
    }

    /// Enables `kind`, disabling whatever it cannot be combined with.
    pub fn enable(&mut self, kind: ScoreKind) {
        for option in &mut self.sort_by {
            if option.kind != kind && (kind.is_random() || option.kind.is_random()) {
                option.enabled = false;
            }
        }
        self.entry(kind).enabled = true;
    }

    /// Disables `kind`. Disabling the last enabled criterion is refused.
    pub fn disable(&mut self, kind: ScoreKind) -> Result<()> {
        if self.enabled().all(|o| o.kind == kind) {
            return Err(EngineError::NoCriterionEnabled);
        }
        self.entry(kind).enabled = false;
        Ok(())
    }

    pub fn set_reverse(&mut self, kind: ScoreKind, reverse: bool) {
        self.entry(kind).reverse = reverse;
    }

    pub fn set_weight(&mut self, kind: ScoreKind, weight: f32) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(EngineError::InvalidWeight {
                name: kind.to_string(),
                weight,
            });
        }
        self.entry(kind).weight = weight;
        Ok(())
    }

    /// Moves `kind` to `position` in the priority order, shifting the others.
    pub fn move_to(&mut self, kind: ScoreKind, position: usize) {
        if let Some(from) = self.sort_by.iter().position(|o| o.kind == kind) {
            let option = self.sort_by.remove(from);
            let to = position.min(self.sort_by.len());
            self.sort_by.insert(to, option);
        }
    }
}

impl Default for SortOptions {
    /// Every criterion listed; `variance` and `lunchTime` enabled in combined mode.
    fn default() -> Self {
        let sort_by = ScoreKind::ALL
            .into_iter()
            .map(|kind| {
                SortOption::new(kind)
                    .enabled(matches!(kind, ScoreKind::Variance | ScoreKind::LunchTime))
            })
            .collect();
        Self {
            sort_by,
            mode: SortMode::Combined,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSortOptions {
    sort_by: Vec<SortOption>,
    #[serde(default)]
    mode: SortMode,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSortOptions> for SortOptions {
    type Error = EngineError;

    fn try_from(raw: RawSortOptions) -> Result<Self> {
        Self::new(raw.sort_by, raw.mode)
    }
}
