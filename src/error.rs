use thiserror::Error;

use crate::time::TimeParseError;

/// Configuration errors raised before any search or scoring runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown sort criterion: {0}")]
    UnknownCriterion(String),

    #[error("Sort criterion listed more than once: {0}")]
    DuplicateCriterion(String),

    #[error("At least one sort criterion must be enabled")]
    NoCriterionEnabled,

    #[error("IamFeelingLucky cannot be combined with other sort criteria")]
    LuckyNotExclusive,

    #[error("Invalid weight {weight} for sort criterion {name}")]
    InvalidWeight { name: String, weight: f32 },

    #[error("No courses selected")]
    NoCourses,

    #[error("Course not found in catalog: {0}")]
    UnknownCourse(String),

    #[error("No sections of {0} satisfy your filters and do not conflict with your events")]
    NoSectionsAfterFilter(String),

    #[error("Distance matrix of length {0} is not square")]
    DistanceMatrixNotSquare(usize),

    #[error(transparent)]
    Time(#[from] TimeParseError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_criterion_display() {
        let e = EngineError::UnknownCriterion("beauty".to_string());
        assert_eq!(e.to_string(), "Unknown sort criterion: beauty");
    }

    #[test]
    fn no_sections_display() {
        let e = EngineError::NoSectionsAfterFilter("CS 2150 Lecture".to_string());
        assert_eq!(
            e.to_string(),
            "No sections of CS 2150 Lecture satisfy your filters and do not conflict with your events"
        );
    }

    #[test]
    fn time_error_is_transparent() {
        let e: EngineError = TimeParseError::UnknownDay("Xy".to_string()).into();
        assert_eq!(e.to_string(), "Unknown day code: Xy");
    }

    #[test]
    fn error_equality() {
        assert_eq!(EngineError::NoCourses, EngineError::NoCourses);
        assert_ne!(EngineError::NoCourses, EngineError::NoCriterionEnabled);
    }
}
