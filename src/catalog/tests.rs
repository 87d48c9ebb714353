//! Tests for catalog lookup and option combination.

use super::*;
use crate::time::Day;

fn section(sid: usize, status: SectionStatus, days: &str, room: &str) -> Section {
    Section::new(sid, status, vec![Meeting::new(days, room)])
}

fn sample_course() -> Course {
    Course {
        key: "cs21501".to_string(),
        department: "CS".to_string(),
        number: 2150,
        kind: "Lecture".to_string(),
        units: "3".to_string(),
        title: "Program and Data Representation".to_string(),
        description: String::new(),
        sections: vec![
            section(0, SectionStatus::Open, "MoWe 10:00AM - 10:50AM", "Rice Hall 130"),
            section(1, SectionStatus::Closed, "MoWe 10:00AM - 10:50AM", "Thornton Hall E316"),
            section(2, SectionStatus::Open, "TuTh 2:00PM - 3:15PM", "Rice Hall 130"),
            section(3, SectionStatus::WaitList, "MoWe 10:00AM - 10:50AM", "Rice Hall 130"),
        ],
    }
}

fn catalog() -> Catalog {
    Catalog::from(vec![sample_course()])
}

#[cfg(test)]
mod lookup {
    use super::*;

    #[test]
    fn test_get_course_all_sections() {
        let catalog = catalog();
        let record = catalog.get_course("cs21501", &SectionFilter::All).unwrap();
        assert_eq!(record.sections().len(), 4);
        assert_eq!(record.course().display_name(), "CS 2150 Lecture");
    }

    #[test]
    fn test_get_course_subset() {
        let catalog = catalog();
        let filter = SectionFilter::Only([0, 2].into_iter().collect());
        let record = catalog.get_course("cs21501", &filter).unwrap();
        let sids: Vec<usize> = record.sections().iter().map(|s| s.sid).collect();
        assert_eq!(sids, vec![0, 2]);
        assert!(record.section(2).is_some());
        assert!(record.section(1).is_none());
    }

    #[test]
    fn test_empty_subset_means_all() {
        let catalog = catalog();
        let filter = SectionFilter::Only(Default::default());
        let record = catalog.get_course("cs21501", &filter).unwrap();
        assert_eq!(record.sections().len(), 4);
    }

    #[test]
    fn test_unknown_course() {
        let catalog = catalog();
        let err = catalog.get_course("math1000", &SectionFilter::All).unwrap_err();
        assert_eq!(err, EngineError::UnknownCourse("math1000".to_string()));
    }
}

#[cfg(test)]
mod combination {
    use super::*;

    #[test]
    fn test_sections_with_same_time_are_combined() {
        let catalog = catalog();
        let record = catalog.get_course("cs21501", &SectionFilter::All).unwrap();
        let groups = record.combined();
        assert_eq!(groups.len(), 2);
        let first: Vec<usize> = groups[0].iter().map(|s| s.sid).collect();
        assert_eq!(first, vec![0, 1, 3]);
        assert_eq!(groups[1][0].sid, 2);
    }

    #[test]
    fn test_combined_options_carry_time_and_rooms() {
        let catalog = catalog();
        let buildings = BuildingList::new(["Rice Hall", "Thornton Hall"]);
        let record = catalog.get_course("cs21501", &SectionFilter::All).unwrap();
        let options = record.combined_options(true, &buildings);
        assert_eq!(options.len(), 2);

        let mowe = &options[0];
        assert_eq!(mowe.key(), "cs21501");
        assert_eq!(mowe.sections(), &[0, 1, 3]);
        assert_eq!(mowe.time().day(Day::Mo), &[600, 650]);
        assert_eq!(mowe.rooms(Day::Mo), &[Some(0)]);
        assert_eq!(mowe.rooms(Day::We), &[Some(0)]);
        assert!(mowe.rooms(Day::Tu).is_empty());
    }

    #[test]
    fn test_uncombined_options() {
        let catalog = catalog();
        let record = catalog.get_course("cs21501", &SectionFilter::All).unwrap();
        let options = record.combined_options(false, &BuildingList::default());
        assert_eq!(options.len(), 4);
        assert_eq!(options[1].sections(), &[1]);
        assert_eq!(options[1].rooms(Day::Mo), &[None]);
    }

    #[test]
    fn test_dates_split_groups() {
        let mut course = sample_course();
        course.sections[1].dates = "10/15/2019 - 12/17/2019".to_string();
        let catalog = Catalog::from(vec![course]);
        let record = catalog.get_course("cs21501", &SectionFilter::All).unwrap();
        assert_eq!(record.combined().len(), 3);
    }

    #[test]
    fn test_tba_section_has_empty_time() {
        let mut course = sample_course();
        course.sections.push(section(4, SectionStatus::Tba, "TBA", "TBA"));
        let catalog = Catalog::from(vec![course]);
        let filter = SectionFilter::Only([4].into_iter().collect());
        let record = catalog.get_course("cs21501", &filter).unwrap();
        let options = record.combined_options(true, &BuildingList::default());
        assert_eq!(options.len(), 1);
        assert!(options[0].time().is_empty());
    }

    #[test]
    fn test_overlapping_meetings_are_merged() {
        let mut s = section(0, SectionStatus::Open, "Mo 10:00AM - 11:00AM", "Rice Hall 130");
        s.meetings.push(Meeting::new("MoWe 10:30AM - 11:30AM", "Thornton Hall E316"));
        s.meetings.push(Meeting::new("Mo 11:30AM - 12:00PM", "Thornton Hall E316"));
        let buildings = BuildingList::new(["Rice Hall", "Thornton Hall"]);
        let (time, rooms) = s.time_room(&buildings);

        assert_eq!(time.day(Day::Mo), &[600, 690, 690, 720]);
        assert_eq!(rooms[Day::Mo.index()], vec![Some(0), Some(1)]);
        assert_eq!(time.day(Day::We), &[630, 690]);
        assert_eq!(rooms[Day::We.index()], vec![Some(1)]);
    }

    #[test]
    fn test_meeting_bridging_two_blocks_merges_all() {
        let mut s = section(0, SectionStatus::Open, "Tu 9:00AM - 10:00AM", "");
        s.meetings.push(Meeting::new("Tu 11:00AM - 12:00PM", ""));
        s.meetings.push(Meeting::new("Tu 9:30AM - 11:30AM", ""));
        let (time, rooms) = s.time_room(&BuildingList::default());
        assert_eq!(time.day(Day::Tu), &[540, 720]);
        assert_eq!(rooms[Day::Tu.index()], vec![None]);
    }

    #[test]
    fn test_empty_meeting_strings_are_skipped() {
        let mut s = section(0, SectionStatus::Open, "Fr 1:00PM - 2:00PM", "");
        s.meetings.insert(0, Meeting::new("", ""));
        let (time, rooms) = s.time_room(&BuildingList::default());
        assert_eq!(time.day(Day::Fr), &[780, 840]);
        assert_eq!(rooms[Day::Fr.index()], vec![None]);
    }
}

#[cfg(feature = "serde")]
#[cfg(test)]
mod serde_support {
    use super::*;

    #[test]
    fn test_catalog_json_round_trip() {
        let json = serde_json::to_string(&catalog()).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.get("cs21501"), Some(&sample_course()));
    }

    #[test]
    fn test_wait_list_status_name() {
        let status: SectionStatus = serde_json::from_str(r#""Wait List""#).unwrap();
        assert_eq!(status, SectionStatus::WaitList);
    }
}
