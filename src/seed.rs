//! Fixed reference data standing in for the matching backend

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::core::proximity::ProximityGroups;
use crate::models::{
    CommonGoal, ExperienceLevel, LevelPreference, Match, MatchedUser, ScheduledWorkout,
    WorkoutStatus,
};

/// Training categories offered by the status and profile forms
pub const CATEGORIES: [&str; 5] = ["脚", "背中", "胸", "上半身", "有酸素"];

/// Companion styles offered by the status form
pub const COMPANION_STYLES: [&str; 3] = [
    "入口から一緒に入れたらOK",
    "同じ時間帯だけ一緒",
    "近いメニューで軽く合わせる",
];

/// Canned chat lines grouped by topic
pub const QUICK_MESSAGES: [(&str, [&str; 3]); 5] = [
    ("挨拶", ["よろしくお願いします", "楽しみにしています", "はじめまして"]),
    ("合流場所", ["入口前で合流", "中で合流", "受付前で合流"]),
    ("トレーニング", ["今日は軽めで", "しっかり追い込みましょう", "同じメニューでやりましょう"]),
    ("時間調整", ["少し遅れます", "予定通り行けます", "早めに着きそうです"]),
    ("その他", ["ありがとうございます", "また次回！", "今回は見送ります"]),
];

/// Optional one-liners attached to a companion request
pub const REQUEST_MESSAGES: [&str; 4] = [
    "よろしくお願いします！",
    "一緒に頑張りましょう！",
    "楽しみにしています！",
    "入口で合流しましょう",
];

/// Match ids favorited before the user has touched the list
pub const DEFAULT_FAVORITES: [&str; 2] = ["1", "3"];

pub fn proximity_groups() -> ProximityGroups {
    let table: [(&str, &[&str]); 6] = [
        ("渋谷", &["渋谷", "恵比寿", "表参道", "原宿", "代官山"]),
        ("恵比寿", &["渋谷", "恵比寿", "表参道", "代官山"]),
        ("表参道", &["渋谷", "恵比寿", "表参道", "原宿", "青山一丁目"]),
        ("新宿", &["新宿", "新宿三丁目", "代々木", "新大久保"]),
        ("池袋", &["池袋", "要町", "東池袋"]),
        ("原宿", &["渋谷", "表参道", "原宿", "明治神宮前"]),
    ];

    let groups: HashMap<String, Vec<String>> = table
        .iter()
        .map(|(station, nearby)| {
            (
                station.to_string(),
                nearby.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();
    ProximityGroups::new(groups)
}

#[allow(clippy::too_many_arguments)]
fn candidate(
    id: &str,
    name: &str,
    compatibility: u8,
    gym: &str,
    time: &str,
    category: &str,
    mode: &str,
    style: &str,
    is_in_common_goal: Option<bool>,
    experience_level: ExperienceLevel,
    level_preference: LevelPreference,
) -> Match {
    Match {
        id: id.to_string(),
        name: name.to_string(),
        compatibility,
        gym: gym.to_string(),
        time: time.to_string(),
        category: category.to_string(),
        mode: mode.to_string(),
        style: style.to_string(),
        is_in_common_goal,
        experience_level,
        level_preference,
    }
}

pub fn match_pool() -> Vec<Match> {
    use ExperienceLevel::*;
    use LevelPreference::*;

    vec![
        candidate("1", "ユーザーA", 92, "渋谷", "19:00", "背中", "誘われ待ち", COMPANION_STYLES[0], Some(true), Intermediate, Same),
        candidate("2", "ユーザーB", 85, "渋谷", "20:00", "上半身", "誘う側 OK", COMPANION_STYLES[1], Some(true), Advanced, Teach),
        candidate("3", "ユーザーC", 78, "新宿", "18:30", "背中", "誘われ待ち", COMPANION_STYLES[2], None, Beginner, Learn),
        candidate("4", "ユーザーD", 72, "恵比寿", "17:00", "脚", "誘われ待ち", COMPANION_STYLES[0], None, Expert, Same),
        candidate("5", "ユーザーE", 88, "表参道", "18:00", "胸", "誘われ待ち", COMPANION_STYLES[1], Some(false), Intermediate, Same),
    ]
}

pub fn scheduled_workouts(today: NaiveDate) -> Vec<ScheduledWorkout> {
    vec![
        ScheduledWorkout {
            id: "1".to_string(),
            date: today,
            gym: "渋谷エニタイム".to_string(),
            time: "夜".to_string(),
            category: "背中".to_string(),
            status: WorkoutStatus::Matched,
            matched_user: Some(MatchedUser {
                name: "ユーザーA".to_string(),
                compatibility: 92,
                experience_level: ExperienceLevel::Intermediate,
                level_preference: LevelPreference::Same,
            }),
        },
        ScheduledWorkout {
            id: "2".to_string(),
            date: today + Duration::days(1),
            gym: "新宿ゴールドジム".to_string(),
            time: "夕方".to_string(),
            category: "胸".to_string(),
            status: WorkoutStatus::Pending,
            matched_user: None,
        },
        ScheduledWorkout {
            id: "3".to_string(),
            date: today + Duration::days(3),
            gym: "渋谷エニタイム".to_string(),
            time: "夜".to_string(),
            category: "脚".to_string(),
            status: WorkoutStatus::Matched,
            matched_user: Some(MatchedUser {
                name: "ユーザーB".to_string(),
                compatibility: 85,
                experience_level: ExperienceLevel::Advanced,
                level_preference: LevelPreference::Teach,
            }),
        },
        ScheduledWorkout {
            id: "4".to_string(),
            date: today + Duration::days(5),
            gym: "恵比寿24h".to_string(),
            time: "夕方".to_string(),
            category: "上半身".to_string(),
            status: WorkoutStatus::Pending,
            matched_user: None,
        },
    ]
}

pub fn common_goals() -> Vec<CommonGoal> {
    [
        ("1", "週2ジム習慣", 184, true),
        ("2", "毎朝筋トレ", 92, false),
        ("3", "月間20回チャレンジ", 156, true),
        ("4", "ベンチプレス100kg", 67, false),
    ]
    .into_iter()
    .map(|(id, title, participants, joined)| CommonGoal {
        id: id.to_string(),
        title: title.to_string(),
        participants,
        joined,
    })
    .collect()
}
