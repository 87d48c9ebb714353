//! Example generating and ranking schedules for a small catalog.
//!
//! Run with: `cargo run --example generate_schedules`

use std::sync::Arc;

use coursegen::algorithms::{Filter, ScheduleGenerator, Selection};
use coursegen::catalog::{
    BuildingList, Catalog, Course, DistanceMatrix, Meeting, Section, SectionStatus,
};
use coursegen::evaluator::{ScoreKind, SortMode, SortOptions};
use coursegen::schedule::Event;
use coursegen::EngineError;

fn course(key: &str, department: &str, number: u32, sections: &[(&str, &str)]) -> Course {
    Course {
        key: key.to_string(),
        department: department.to_string(),
        number,
        kind: "Lecture".to_string(),
        units: "3".to_string(),
        title: String::new(),
        description: String::new(),
        sections: sections
            .iter()
            .enumerate()
            .map(|(sid, (days, room))| {
                Section::new(sid, SectionStatus::Open, vec![Meeting::new(*days, *room)])
            })
            .collect(),
    }
}

fn main() -> Result<(), EngineError> {
    println!("=== Schedule Generation Example ===\n");

    let catalog = Catalog::from(vec![
        course(
            "cs21501",
            "CS",
            2150,
            &[
                ("MoWe 10:00AM - 10:50AM", "Rice Hall 130"),
                ("MoWe 2:00PM - 2:50PM", "Olsson Hall 120"),
                ("TuTh 11:00AM - 12:15PM", "Rice Hall 130"),
            ],
        ),
        course(
            "math31001",
            "MATH",
            3100,
            &[
                ("MoWeFr 9:00AM - 9:50AM", "Kerchof Hall 317"),
                ("TuTh 12:30PM - 1:45PM", "Kerchof Hall 326"),
            ],
        ),
        course(
            "phys14251",
            "PHYS",
            1425,
            &[
                ("MoWeFr 11:00AM - 11:50AM", "Physics Building 203"),
                ("TuTh 9:30AM - 10:45AM", "Physics Building 204"),
            ],
        ),
    ]);

    let buildings = BuildingList::new([
        "Rice Hall",
        "Olsson Hall",
        "Kerchof Hall",
        "Physics Building",
    ]);
    let distances = DistanceMatrix::new(vec![
        0.0, 2.0, 6.0, 7.0, //
        2.0, 0.0, 5.0, 6.0, //
        6.0, 5.0, 0.0, 3.0, //
        7.0, 6.0, 3.0, 0.0,
    ])?;

    let selection = Selection::new()
        .with_course("cs21501")
        .with_course("math31001")
        .with_course("phys14251")
        .with_event(Event::new("Fr 9:00AM - 10:00AM", "Lab shift")?);

    let mut options = SortOptions::with_enabled(&["distance", "compactness"], SortMode::Combined)?;
    options.set_weight(ScoreKind::Distance, 2.0)?;

    let generator = ScheduleGenerator::new(&catalog, &buildings, Arc::new(distances))
        .with_filter(Filter::new().exclude_status(SectionStatus::Closed))
        .with_sort_options(options);

    let generated = generator.get_schedules(&selection)?;
    println!("{}\n", generated.outcome.message());

    println!("--- Ranked Schedules ---");
    for rank in 0..generated.evaluator.len() {
        let Some(schedule) = generated.evaluator.get_schedule(rank) else {
            break;
        };
        let coeff = generated.evaluator.get(rank).map_or(0.0, |s| s.coeff());
        let picks: Vec<String> = schedule
            .iter()
            .map(|(key, sections)| format!("{} {:?}", key, sections))
            .collect();
        println!("#{} (score {:.1}): {}", rank + 1, coeff, picks.join(", "));
    }

    println!("\n--- Fallback: fewest early classes first ---");
    let mut evaluator = generated.evaluator;
    let fallback = SortOptions::with_enabled(&["noEarly", "variance"], SortMode::Fallback)?;
    evaluator.sort_with(fallback);
    if let Some(best) = evaluator.get_schedule(0) {
        for (key, sections) in best.iter() {
            println!("{}: sections {:?}", key, sections);
        }
    }

    Ok(())
}
