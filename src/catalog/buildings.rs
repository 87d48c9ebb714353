//! Building resolution and the walking-distance matrix.

use crate::error::{EngineError, Result};

/// Index of a known building, row/column of the [`DistanceMatrix`].
pub type BuildingId = usize;

/// Maps a free-text room name to a known building.
pub trait BuildingLookup {
    /// Returns the building a room belongs to, or `None` if it cannot be resolved.
    fn resolve(&self, room: &str) -> Option<BuildingId>;
}

/// Known building names, matched fuzzily against room strings.
///
/// A room resolves to the building whose name has the highest Sørensen–Dice
/// similarity with it, provided that similarity reaches the threshold.
#[derive(Debug, Clone)]
pub struct BuildingList {
    names: Vec<String>,
    threshold: f64,
}

impl BuildingList {
    pub const DEFAULT_THRESHOLD: f64 = 0.4;

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(|n| n.into().to_lowercase()).collect(),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Best matching building and its similarity rating.
    pub fn best_match(&self, room: &str) -> Option<(BuildingId, f64)> {
        let room = room.to_lowercase();
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx, strsim::sorensen_dice(&room, name)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl Default for BuildingList {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl BuildingLookup for BuildingList {
    fn resolve(&self, room: &str) -> Option<BuildingId> {
        if room.trim().is_empty() {
            return None;
        }
        self.best_match(room)
            .filter(|&(_, rating)| rating >= self.threshold)
            .map(|(idx, _)| idx)
    }
}

/// Square, row-major matrix of walking times between buildings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f32>,
}

impl DistanceMatrix {
    /// Wraps a flattened `B×B` matrix, indexed as `data[i * B + j]`.
    pub fn new(data: Vec<f32>) -> Result<Self> {
        let size = (data.len() as f64).sqrt().round() as usize;
        if size * size != data.len() {
            return Err(EngineError::DistanceMatrixNotSquare(data.len()));
        }
        let matrix = Self { size, data };
        if !matrix.is_symmetric() {
            log::warn!("distance matrix of {} buildings is not symmetric", size);
        }
        Ok(matrix)
    }

    /// Matrix with no buildings; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of buildings `B`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Walking time from building `from` to building `to`.
    pub fn get(&self, from: BuildingId, to: BuildingId) -> Option<f32> {
        if from >= self.size || to >= self.size {
            return None;
        }
        Some(self.data[from * self.size + to])
    }

    fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| self.data[i * self.size + j] == self.data[j * self.size + i])
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DistanceMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            data: Vec<f32>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.data).map_err(serde::de::Error::custom)
    }
}
