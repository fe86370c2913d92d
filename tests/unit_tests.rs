// Unit tests for Gomach

use gomach::core::{
    deadline::{quick_date_options, short_date_label, DeadlineWindow},
    filters::{area_relation, is_visible, AreaRelation},
    proximity::ProximityGroups,
    tags::{derive_tags, parse_clock, TimeSlotPolicy},
};
use gomach::models::{
    CompanionRequest, ExperienceLevel, LevelPreference, Match, MatchTag, RequestError,
};
use chrono::{NaiveDate, NaiveTime};

fn create_candidate(gym: &str, time: &str, category: &str) -> Match {
    Match {
        id: "1".to_string(),
        name: "ユーザーA".to_string(),
        compatibility: 92,
        gym: gym.to_string(),
        time: time.to_string(),
        category: category.to_string(),
        mode: "誘われ待ち".to_string(),
        style: "入口から一緒に入れたらOK".to_string(),
        is_in_common_goal: Some(true),
        experience_level: ExperienceLevel::Intermediate,
        level_preference: LevelPreference::Same,
    }
}

fn shibuya_groups() -> ProximityGroups {
    let mut groups = ProximityGroups::default();
    groups.insert(
        "渋谷",
        ["渋谷", "恵比寿", "表参道", "原宿"].iter().map(|s| s.to_string()).collect(),
    );
    groups
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_visibility_matches_group_membership() {
    let groups = shibuya_groups();
    let group = groups.group_for("渋谷");

    for station in ["渋谷", "恵比寿", "表参道", "原宿"] {
        assert!(is_visible(&group, &create_candidate(station, "19:00", "胸")), "{}", station);
    }
    for station in ["新宿", "池袋", ""] {
        assert!(!is_visible(&group, &create_candidate(station, "19:00", "胸")), "{}", station);
    }
}

#[test]
fn test_area_relation_exact_beats_near() {
    let groups = shibuya_groups();
    let group = groups.group_for("渋谷");

    assert_eq!(area_relation(&group, &create_candidate("渋谷", "19:00", "胸")), Some(AreaRelation::Exact));
    assert_eq!(area_relation(&group, &create_candidate("原宿", "19:00", "胸")), Some(AreaRelation::Near));
}

#[test]
fn test_tags_stable_across_calls() {
    let groups = shibuya_groups();
    let group = groups.group_for("渋谷");
    let candidate = create_candidate("恵比寿", "19:00", "背中");
    let categories = vec!["胸".to_string(), "背中".to_string()];

    let first = derive_tags(&group, &candidate, &categories, Some("19:00"), TimeSlotPolicy::Always);
    for _ in 0..10 {
        let again = derive_tags(&group, &candidate, &categories, Some("19:00"), TimeSlotPolicy::Always);
        assert_eq!(again, first);
    }
    assert_eq!(
        first,
        vec![MatchTag::NearArea, MatchTag::SameTimeSlot, MatchTag::Category("背中".to_string())]
    );
}

#[test]
fn test_duplicate_categories_tag_once() {
    let groups = shibuya_groups();
    let group = groups.group_for("渋谷");
    let candidate = create_candidate("渋谷", "19:00", "脚");
    let categories = vec!["脚".to_string(), "脚".to_string()];

    let tags = derive_tags(&group, &candidate, &categories, None, TimeSlotPolicy::Always);
    assert_eq!(tags.len(), 3);
}

#[test]
fn test_proximity_time_policy() {
    let groups = shibuya_groups();
    let group = groups.group_for("渋谷");
    let policy = TimeSlotPolicy::Proximity {
        same_window_minutes: 30,
        near_window_minutes: 90,
    };

    let same = derive_tags(&group, &create_candidate("渋谷", "19:30", "脚"), &[], Some("19:00"), policy);
    assert!(same.contains(&MatchTag::SameTimeSlot));

    let near = derive_tags(&group, &create_candidate("渋谷", "20:15", "脚"), &[], Some("19:00"), policy);
    assert!(near.contains(&MatchTag::NearTimeSlot));

    let far = derive_tags(&group, &create_candidate("渋谷", "07:00", "脚"), &[], Some("19:00"), policy);
    assert_eq!(far, vec![MatchTag::ExactArea]);
}

#[test]
fn test_parse_clock() {
    assert_eq!(parse_clock("9:05"), Some(time(9, 5)));
    assert_eq!(parse_clock(" 18:30 "), Some(time(18, 30)));
    assert_eq!(parse_clock("夜"), None);
}

#[test]
fn test_tag_labels_round_trip() {
    for tag in [MatchTag::ExactArea, MatchTag::NearArea, MatchTag::SameTimeSlot, MatchTag::NearTimeSlot] {
        assert_eq!(MatchTag::from_label(tag.label()), tag);
    }
    assert_eq!(MatchTag::from_label("胸"), MatchTag::Category("胸".to_string()));
}

#[test]
fn test_level_tables_cover_every_variant() {
    for level in ExperienceLevel::ALL {
        assert!(!level.info().label.is_empty());
    }
    for pref in LevelPreference::ALL {
        assert!(!pref.info().emoji.is_empty());
    }
}

#[test]
fn test_quick_dates() {
    let options = quick_date_options(date(2026, 10, 16));
    assert_eq!(options.len(), 7);
    assert_eq!(options[0].label, "今日");
    assert_eq!(options[2].label, "明後日");
    assert_eq!(options[3].label, short_date_label(date(2026, 10, 19)));
    assert_eq!(options[3].label, "10/19 (月)");
}

#[test]
fn test_deadline_missing_time_rejected() {
    let window = DeadlineWindow::new(date(2026, 10, 16), Some(date(2026, 10, 18)), Some(time(19, 0)));
    let mut request = CompanionRequest::new("1");
    request.deadline_date = Some(date(2026, 10, 17));

    let err = window
        .validate(&request, date(2026, 10, 16).and_time(time(12, 0)))
        .unwrap_err();
    assert!(matches!(err, RequestError::MissingRequiredSelection { .. }));
}

#[test]
fn test_deadline_after_match_rejected() {
    let window = DeadlineWindow::new(date(2026, 10, 16), Some(date(2026, 10, 18)), Some(time(19, 0)));
    let now = date(2026, 10, 16).and_time(time(12, 0));

    let late = CompanionRequest::new("1").with_deadline(date(2026, 10, 18), time(20, 0));
    assert!(matches!(
        window.validate(&late, now),
        Err(RequestError::DeadlineOutOfRange { .. })
    ));

    let ok = CompanionRequest::new("1").with_deadline(date(2026, 10, 18), time(18, 30));
    assert_eq!(window.validate(&ok, now), Ok(date(2026, 10, 18).and_time(time(18, 30))));
}
