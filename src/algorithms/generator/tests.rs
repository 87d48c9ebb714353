//! Tests for bootstrapping and the backtracking search.

use super::*;
use crate::algorithms::ScheduleSink;
use crate::catalog::{BuildingList, Course, Meeting, Section, SectionStatus};
use crate::time::Day;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn section(sid: usize, status: SectionStatus, days: &str) -> Section {
    Section::new(sid, status, vec![Meeting::new(days, "")])
}

fn course(key: &str, department: &str, number: u32, sections: Vec<Section>) -> Course {
    Course {
        key: key.to_string(),
        department: department.to_string(),
        number,
        kind: "Lecture".to_string(),
        units: "3".to_string(),
        title: String::new(),
        description: String::new(),
        sections,
    }
}

fn catalog() -> Catalog {
    use SectionStatus::*;
    Catalog::from(vec![
        course(
            "cs21501",
            "CS",
            2150,
            vec![
                section(0, Open, "MoWe 10:00AM - 10:50AM"),
                section(1, Closed, "TuTh 2:00PM - 3:15PM"),
            ],
        ),
        course(
            "math31001",
            "MATH",
            3100,
            vec![
                section(0, Open, "MoWe 12:00PM - 12:50PM"),
                section(1, WaitList, "TuTh 9:30AM - 10:45AM"),
            ],
        ),
        course(
            "phys14251",
            "PHYS",
            1425,
            vec![
                section(0, Open, "MoWe 10:00AM - 11:00AM"),
                section(1, Open, "TuTh 2:00PM - 3:00PM"),
            ],
        ),
        course(
            "chem14101",
            "CHEM",
            1410,
            vec![
                section(0, Open, "MoTuWeTh 10:30AM - 3:00PM"),
                section(1, Open, "MoTuWeTh 10:15AM - 2:30PM"),
            ],
        ),
        course(
            "stat21201",
            "STAT",
            2120,
            vec![section(0, Open, "MoWe 10:50AM - 11:40AM")],
        ),
        course(
            "engl10101",
            "ENGL",
            1010,
            vec![
                section(0, Open, "Fr 9:00AM - 9:50AM"),
                section(1, Open, "Fr 9:00AM - 9:50AM"),
                section(2, Open, "Fr 1:00PM - 1:50PM"),
            ],
        ),
    ])
}

fn generate(
    catalog: &Catalog,
    selection: &Selection,
    f: impl FnOnce(ScheduleGenerator<'_>) -> ScheduleGenerator<'_>,
) -> Result<Generated> {
    let buildings = BuildingList::default();
    let generator = ScheduleGenerator::new(catalog, &buildings, Arc::new(DistanceMatrix::empty()))
        .with_evaluator_config(EvaluatorConfig::default().with_seed(1));
    f(generator).get_schedules(selection)
}

fn two_courses() -> Selection {
    Selection::new().with_course("cs21501").with_course("math31001")
}

/// Random class list where every option meets once or twice on weekdays.
fn random_class_list(rng: &mut StdRng, courses: usize) -> Vec<Vec<Arc<CourseOption>>> {
    (0..courses)
        .map(|c| {
            let count = rng.gen_range(1..=5);
            (0..count)
                .map(|o| {
                    let mut time = TimeDict::new();
                    for _ in 0..rng.gen_range(1..=2) {
                        let day = Day::ALL[rng.gen_range(0..Day::WEEKDAYS)];
                        let start: u16 = rng.gen_range(96..=216) * 5;
                        let length: u16 = rng.gen_range(10..=24) * 5;
                        time.push(day, start, start + length).unwrap();
                    }
                    Arc::new(CourseOption::without_rooms(format!("c{}", c), vec![o], time))
                })
                .collect()
        })
        .collect()
}

fn brute_force_count(
    class_list: &[Vec<Arc<CourseOption>>],
    placed: &mut Vec<Arc<CourseOption>>,
) -> usize {
    let Some((first, rest)) = class_list.split_first() else {
        return 1;
    };
    let mut count = 0;
    for option in first {
        if placed.iter().any(|p| p.conflicts_with(option)) {
            continue;
        }
        placed.push(Arc::clone(option));
        count += brute_force_count(rest, placed);
        placed.pop();
    }
    count
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn test_independent_courses_give_every_combination() {
        let catalog = catalog();
        let generated = generate(&catalog, &two_courses(), |g| g).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 4 });
        assert_eq!(generated.evaluator.len(), 4);
        assert_eq!(generated.outcome.message(), "4 schedules generated");
        assert!(generated.evaluator.get_schedule(0).is_some());
    }

    #[test]
    fn test_all_conflicting_gives_no_schedule() {
        let catalog = catalog();
        let selection = Selection::new().with_course("phys14251").with_course("chem14101");
        let generated = generate(&catalog, &selection, |g| g).unwrap();
        assert_eq!(generated.outcome, Outcome::NoSchedule);
        assert!(!generated.outcome.is_success());
        assert!(generated.evaluator.is_empty());
        assert_eq!(
            generated.outcome.message(),
            "no conflict-free schedule exists for the given filters"
        );
    }

    #[test]
    fn test_touching_meetings_do_not_conflict() {
        let catalog = catalog();
        let selection = Selection::new()
            .with_sections("cs21501", [0])
            .with_course("stat21201");
        let generated = generate(&catalog, &selection, |g| g).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 1 });
    }

    #[test]
    fn test_cap_truncates() {
        let catalog = catalog();
        let generated = generate(&catalog, &two_courses(), |g| {
            g.with_config(GeneratorConfig::default().with_max_results(3))
        })
        .unwrap();
        assert_eq!(generated.outcome, Outcome::Truncated { count: 3, cap: 3 });
        assert_eq!(generated.evaluator.len(), 3);
        assert_eq!(
            generated.outcome.message(),
            "3 schedules generated (stopped at the cap of 3)"
        );
    }

    #[test]
    fn test_zero_cap_stores_nothing() {
        let catalog = catalog();
        let generated = generate(&catalog, &two_courses(), |g| {
            g.with_config(GeneratorConfig::default().with_max_results(0))
        })
        .unwrap();
        assert_eq!(generated.outcome, Outcome::Truncated { count: 0, cap: 0 });
        assert!(!generated.outcome.is_success());
        assert!(generated.evaluator.is_empty());
    }

    #[test]
    fn test_ranked_by_coefficient() {
        let catalog = catalog();
        let selection = two_courses().with_course("engl10101");
        let generated = generate(&catalog, &selection, |g| g).unwrap();
        let coeffs: Vec<f32> = generated.evaluator.ranked().map(|s| s.coeff()).collect();
        assert_eq!(coeffs.len(), 8);
        assert!(coeffs.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[cfg(test)]
mod bootstrapping {
    use super::*;

    #[test]
    fn test_no_courses() {
        let catalog = catalog();
        let err = generate(&catalog, &Selection::new(), |g| g).unwrap_err();
        assert_eq!(err, EngineError::NoCourses);
    }

    #[test]
    fn test_unknown_course() {
        let catalog = catalog();
        let selection = Selection::new().with_course("hist1000");
        let err = generate(&catalog, &selection, |g| g).unwrap_err();
        assert_eq!(err, EngineError::UnknownCourse("hist1000".to_string()));
    }

    #[test]
    fn test_status_filter_can_empty_a_course() {
        let catalog = catalog();
        let selection = Selection::new().with_sections("cs21501", [1]);
        let filter = Filter::new().exclude_status(SectionStatus::Closed);
        let err = generate(&catalog, &selection, |g| g.with_filter(filter)).unwrap_err();
        assert_eq!(
            err,
            EngineError::NoSectionsAfterFilter("CS 2150 Lecture".to_string())
        );
    }

    #[test]
    fn test_status_filter_drops_sections() {
        let catalog = catalog();
        let filter = Filter::new()
            .exclude_status(SectionStatus::Closed)
            .exclude_status(SectionStatus::WaitList);
        let generated = generate(&catalog, &two_courses(), |g| g.with_filter(filter)).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 1 });
        let schedule = generated.evaluator.get_schedule(0).unwrap();
        assert!(schedule.sections("cs21501").unwrap().contains(&0));
        assert!(schedule.sections("math31001").unwrap().contains(&0));
    }

    #[test]
    fn test_events_block_time_and_are_carried() {
        let catalog = catalog();
        let event = Event::new("Mo 10:30AM - 11:00AM", "Office hours").unwrap();
        let selection = two_courses().with_event(event.clone());
        let generated = generate(&catalog, &selection, |g| g).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 2 });
        for rank in 0..2 {
            let schedule = generated.evaluator.get_schedule(rank).unwrap();
            assert!(schedule.sections("cs21501").unwrap().contains(&1));
            assert_eq!(schedule.events(), &[event.clone()]);
        }
    }

    #[test]
    fn test_excluded_day_and_blocked_slot() {
        let catalog = catalog();
        let filter = Filter::new().exclude_day(Day::Tu);
        let generated = generate(&catalog, &two_courses(), |g| g.with_filter(filter)).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 1 });

        let slot = TimeDict::parse("MoTuWeThFr 12:30PM - 1:00PM").unwrap();
        let filter = Filter::new().block_time(slot);
        let generated = generate(&catalog, &two_courses(), |g| g.with_filter(filter)).unwrap();
        assert_eq!(generated.outcome, Outcome::Complete { count: 2 });
    }

    #[test]
    fn test_class_list_sorted_by_length() {
        let catalog = catalog();
        let buildings = BuildingList::default();
        let generator =
            ScheduleGenerator::new(&catalog, &buildings, Arc::new(DistanceMatrix::empty()));
        let selection = Selection::new()
            .with_course("engl10101")
            .with_course("stat21201")
            .with_course("cs21501");
        let lengths: Vec<usize> = generator
            .class_list(&selection)
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(lengths, vec![1, 2, 2]);
    }

    #[test]
    fn test_combine_sections_toggle() {
        let catalog = catalog();
        let selection = Selection::new().with_course("engl10101");
        let combined = generate(&catalog, &selection, |g| g).unwrap();
        assert_eq!(combined.outcome, Outcome::Complete { count: 2 });

        let separate = generate(&catalog, &selection, |g| {
            g.with_config(GeneratorConfig::default().with_combine_sections(false))
        })
        .unwrap();
        assert_eq!(separate.outcome, Outcome::Complete { count: 3 });
    }
}

#[cfg(test)]
mod backtracking {
    use super::*;

    #[test]
    fn test_no_conflicts_and_complete() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..30 {
            let mut class_list = random_class_list(&mut rng, 4);
            class_list.sort_by_key(Vec::len);

            let mut found: Vec<Vec<Arc<CourseOption>>> = Vec::new();
            let status = search(&class_list, &mut found, usize::MAX);
            assert_eq!(status, SearchStatus::Exhausted);

            for candidate in &found {
                assert_eq!(candidate.len(), class_list.len());
                for (i, a) in candidate.iter().enumerate() {
                    for b in &candidate[i + 1..] {
                        assert!(!a.conflicts_with(b));
                    }
                }
            }
            assert_eq!(found.len(), brute_force_count(&class_list, &mut Vec::new()));
        }
    }

    #[test]
    fn test_deterministic_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let class_list = random_class_list(&mut rng, 5);

        let run = || {
            let mut found: Vec<Vec<Arc<CourseOption>>> = Vec::new();
            search(&class_list, &mut found, usize::MAX);
            found
                .iter()
                .map(|c| c.iter().map(|o| o.sections()[0]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_enumeration_order() {
        let option = |key: &str, sid: usize, day: Day| {
            let mut time = TimeDict::new();
            time.push(day, 600, 650).unwrap();
            Arc::new(CourseOption::without_rooms(key, vec![sid], time))
        };
        let class_list = vec![
            vec![option("a", 0, Day::Mo), option("a", 1, Day::Tu)],
            vec![option("b", 0, Day::Mo), option("b", 1, Day::We)],
        ];
        let mut found: Vec<Vec<Arc<CourseOption>>> = Vec::new();
        search(&class_list, &mut found, usize::MAX);
        let picks: Vec<Vec<usize>> = found
            .iter()
            .map(|c| c.iter().map(|o| o.sections()[0]).collect())
            .collect();
        assert_eq!(picks, vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_cap_respected() {
        let mut rng = StdRng::seed_from_u64(99);
        let class_list = random_class_list(&mut rng, 3);
        let total = brute_force_count(&class_list, &mut Vec::new());

        for cap in 0..=total {
            let mut found: Vec<Vec<Arc<CourseOption>>> = Vec::new();
            let status = search(&class_list, &mut found, cap);
            assert_eq!(found.len(), cap);
            if cap < total || cap == 0 {
                assert_eq!(status, SearchStatus::CapReached);
            }
        }
    }

    #[test]
    fn test_empty_class_list() {
        let mut found: Vec<Vec<Arc<CourseOption>>> = Vec::new();
        assert_eq!(search(&[], &mut found, 10), SearchStatus::Exhausted);
        assert!(ScheduleSink::is_empty(&found));
    }
}
