use chrono::{NaiveTime, Timelike};

use crate::core::filters::{area_relation, AreaRelation};
use crate::core::proximity::NearbyGroup;
use crate::models::{CompatibilityBreakdown, Match, MatchPoint, MatchTag};

/// How the time-slot tag is assigned to visible candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeSlotPolicy {
    /// Every visible candidate is tagged "same time slot"
    #[default]
    Always,
    /// Compare the candidate's time with the user's requested start time
    Proximity {
        same_window_minutes: u32,
        near_window_minutes: u32,
    },
}

/// Parse an `H:MM` or `HH:MM` clock time
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Clock distance in minutes, wrapping at midnight
fn minutes_apart(a: NaiveTime, b: NaiveTime) -> u32 {
    let a = a.hour() * 60 + a.minute();
    let b = b.hour() * 60 + b.minute();
    let gap = a.abs_diff(b);
    gap.min(MINUTES_PER_DAY - gap)
}

/// Time-slot tag for a candidate, or `None` when the times are too far apart
fn time_slot_tag(policy: TimeSlotPolicy, user_time: Option<&str>, candidate_time: &str) -> Option<MatchTag> {
    match policy {
        TimeSlotPolicy::Always => Some(MatchTag::SameTimeSlot),
        TimeSlotPolicy::Proximity {
            same_window_minutes,
            near_window_minutes,
        } => {
            let (Some(user), Some(theirs)) = (user_time.and_then(parse_clock), parse_clock(candidate_time)) else {
                // Nothing to compare against
                return Some(MatchTag::SameTimeSlot);
            };
            let gap = minutes_apart(user, theirs);
            if gap <= same_window_minutes {
                Some(MatchTag::SameTimeSlot)
            } else if gap <= near_window_minutes {
                Some(MatchTag::NearTimeSlot)
            } else {
                None
            }
        }
    }
}

/// Derive the ordered, deduplicated tag list for one candidate
///
/// Order: area tag, time-slot tag, then every selected category equal to the
/// candidate's category, labelled with the category name.
pub fn derive_tags(
    group: &NearbyGroup<'_>,
    candidate: &Match,
    user_categories: &[String],
    user_time: Option<&str>,
    policy: TimeSlotPolicy,
) -> Vec<MatchTag> {
    let mut tags = Vec::with_capacity(3);

    match area_relation(group, candidate) {
        Some(AreaRelation::Exact) => tags.push(MatchTag::ExactArea),
        Some(AreaRelation::Near) => tags.push(MatchTag::NearArea),
        None => {}
    }

    if let Some(tag) = time_slot_tag(policy, user_time, &candidate.time) {
        tags.push(tag);
    }

    for category in user_categories {
        if *category == candidate.category {
            let tag = MatchTag::Category(category.clone());
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    tags
}

/// Compatibility detail for the match modal
pub fn compatibility_breakdown(candidate: &Match, tags: &[MatchTag]) -> CompatibilityBreakdown {
    let has = |wanted: &MatchTag| tags.contains(wanted);
    let category_match = tags.iter().any(|t| matches!(t, MatchTag::Category(_)));

    CompatibilityBreakdown {
        score: candidate.compatibility.min(100),
        matched: vec![
            MatchPoint { label: "同時間帯一致", matched: has(&MatchTag::SameTimeSlot) },
            MatchPoint { label: "同エリア", matched: has(&MatchTag::ExactArea) },
            MatchPoint { label: "カテゴリ一致", matched: category_match },
        ],
        near: vec![
            MatchPoint { label: "近い時間帯", matched: has(&MatchTag::NearTimeSlot) },
            MatchPoint { label: "近いエリア", matched: has(&MatchTag::NearArea) },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proximity::ProximityGroups;
    use crate::models::{ExperienceLevel, LevelPreference};

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

    fn groups() -> ProximityGroups {
        let mut groups = ProximityGroups::default();
        groups.insert("渋谷", vec!["渋谷".into(), "恵比寿".into()]);
        groups
    }

    #[test]
    fn test_exact_area_tags() {
        let groups = groups();
        let group = groups.group_for("渋谷");
        let candidate = create_candidate("渋谷", "19:00", "背中");
        let categories = vec!["背中".to_string(), "胸".to_string()];

        let tags = derive_tags(&group, &candidate, &categories, None, TimeSlotPolicy::Always);
        assert_eq!(
            tags,
            vec![MatchTag::ExactArea, MatchTag::SameTimeSlot, MatchTag::Category("背中".to_string())]
        );
    }

    #[test]
    fn test_duplicate_categories_deduplicated() {
        let groups = groups();
        let group = groups.group_for("渋谷");
        let candidate = create_candidate("恵比寿", "19:00", "胸");
        let categories = vec!["胸".to_string(), "胸".to_string()];

        let tags = derive_tags(&group, &candidate, &categories, None, TimeSlotPolicy::Always);
        assert_eq!(
            tags,
            vec![MatchTag::NearArea, MatchTag::SameTimeSlot, MatchTag::Category("胸".to_string())]
        );
    }

    #[test]
    fn test_proximity_time_policy() {
        let groups = groups();
        let group = groups.group_for("渋谷");
        let policy = TimeSlotPolicy::Proximity {
            same_window_minutes: 30,
            near_window_minutes: 90,
        };

        let same = derive_tags(&group, &create_candidate("渋谷", "19:30", "脚"), &[], Some("19:00"), policy);
        assert!(same.contains(&MatchTag::SameTimeSlot));

        let near = derive_tags(&group, &create_candidate("渋谷", "20:30", "脚"), &[], Some("19:00"), policy);
        assert!(near.contains(&MatchTag::NearTimeSlot));

        let far = derive_tags(&group, &create_candidate("渋谷", "7:00", "脚"), &[], Some("19:00"), policy);
        assert_eq!(far, vec![MatchTag::ExactArea]);

        // Missing user time falls back to the placeholder behaviour
        let unknown = derive_tags(&group, &create_candidate("渋谷", "7:00", "脚"), &[], None, policy);
        assert!(unknown.contains(&MatchTag::SameTimeSlot));
    }

    #[test]
    fn test_time_gap_wraps_at_midnight() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(minutes_apart(at(23, 30), at(0, 15)), 45);
        assert_eq!(minutes_apart(at(0, 0), at(12, 0)), 720);

        let groups = groups();
        let group = groups.group_for("渋谷");
        let policy = TimeSlotPolicy::Proximity {
            same_window_minutes: 30,
            near_window_minutes: 90,
        };
        let late = derive_tags(&group, &create_candidate("渋谷", "0:15", "脚"), &[], Some("23:30"), policy);
        assert!(late.contains(&MatchTag::NearTimeSlot));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("9:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_clock("19:00"), NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(parse_clock("夜"), None);
    }

    #[test]
    fn test_breakdown() {
        let candidate = create_candidate("恵比寿", "19:00", "背中");
        let tags = vec![MatchTag::NearArea, MatchTag::SameTimeSlot, MatchTag::Category("背中".to_string())];

        let breakdown = compatibility_breakdown(&candidate, &tags);
        assert_eq!(breakdown.score, 92);
        assert_eq!(breakdown.matched_count(), 2);
        assert!(breakdown.near.iter().any(|p| p.label == "近いエリア" && p.matched));
    }
}
