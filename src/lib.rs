//! coursegen - course schedule generation and ranking
//!
//! Given a catalog of courses, a user's course selection and a few filters,
//! the engine enumerates every combination of sections whose meetings do not
//! overlap, then ranks the combinations by configurable quality criteria such
//! as balance across the week, idle time between classes or walking distance.
//!
//! ```
//! use std::sync::Arc;
//! use coursegen::algorithms::{Outcome, ScheduleGenerator, Selection};
//! use coursegen::catalog::{BuildingList, Catalog, Course, DistanceMatrix, Meeting, Section, SectionStatus};
//!
//! let course = |key: &str, number: u32, times: [&str; 2]| Course {
//!     key: key.to_string(),
//!     department: "CS".to_string(),
//!     number,
//!     kind: "Lecture".to_string(),
//!     units: "3".to_string(),
//!     title: String::new(),
//!     description: String::new(),
//!     sections: times
//!         .iter()
//!         .enumerate()
//!         .map(|(sid, t)| Section::new(sid, SectionStatus::Open, vec![Meeting::new(*t, "")]))
//!         .collect(),
//! };
//! let catalog = Catalog::from(vec![
//!     course("cs21501", 2150, ["MoWe 10:00AM - 10:50AM", "TuTh 2:00PM - 3:15PM"]),
//!     course("cs31021", 3102, ["MoWe 10:30AM - 11:45AM", "TuTh 9:30AM - 10:45AM"]),
//! ]);
//! let buildings = BuildingList::default();
//!
//! let generated = ScheduleGenerator::new(&catalog, &buildings, Arc::new(DistanceMatrix::empty()))
//!     .get_schedules(&Selection::new().with_course("cs21501").with_course("cs31021"))
//!     .unwrap();
//!
//! assert_eq!(generated.outcome, Outcome::Complete { count: 3 });
//! let best = generated.evaluator.get_schedule(0).unwrap();
//! assert_eq!(best.len(), 2);
//! ```

pub mod algorithms;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod schedule;
pub mod time;

pub use algorithms::{Generated, Outcome, ScheduleGenerator, Selection};
pub use config::{EvaluatorConfig, GeneratorConfig};
pub use error::{EngineError, Result};
pub use evaluator::{ScheduleEvaluator, SortMode, SortOptions};
pub use schedule::{Event, Schedule};
