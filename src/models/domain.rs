use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::labels::{
    ExperienceLevel, ExpertiseType, GenderPreference, LevelPreference, TrainingType,
};
use super::requests::not_blank;

/// Profile of the signed-in user, persisted whole on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Home station
    pub area: String,
    #[serde(default)]
    pub nearby_stations: Vec<String>,
    pub experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub companion_style: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub gender_preference: GenderPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_days: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_gyms: Vec<String>,
    #[serde(default)]
    pub sns_accounts: Vec<SnsAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsAccount {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Search intent for one training session
///
/// A status is only persisted once complete; see [`UserStatus::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub gyms: Vec<String>,
    /// Start time, `HH:MM`
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub training_type: Option<TrainingType>,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub style: String,
    #[validate(required)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[validate(required)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub level_preference: Option<LevelPreference>,
    #[validate(required)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gender_preference: Option<GenderPreference>,
    #[serde(default)]
    pub expertise_type: ExpertiseType,
    #[serde(default)]
    pub teach_expertise: Vec<String>,
    #[serde(default)]
    pub learn_expertise: Vec<String>,
    #[serde(default)]
    pub training_days: Vec<String>,
}

impl UserStatus {
    /// Empty form for the given day
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            gyms: vec![],
            time: String::new(),
            duration: String::new(),
            category: vec![],
            training_type: None,
            style: String::new(),
            experience_level: None,
            level_preference: None,
            gender_preference: None,
            expertise_type: ExpertiseType::Both,
            teach_expertise: vec![],
            learn_expertise: vec![],
            training_days: vec![],
        }
    }
}

/// Candidate surfaced by the matching backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub name: String,
    /// 0-100
    pub compatibility: u8,
    /// Station the candidate trains at
    pub gym: String,
    pub time: String,
    pub category: String,
    pub mode: String,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_common_goal: Option<bool>,
    pub experience_level: ExperienceLevel,
    pub level_preference: LevelPreference,
}

impl Match {
    /// Helper to get is_in_common_goal as a bool, defaulting to false
    pub fn in_common_goal(&self) -> bool {
        self.is_in_common_goal.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Partner,
}

/// One chat line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Pending,
    Matched,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub name: String,
    pub compatibility: u8,
    pub experience_level: ExperienceLevel,
    pub level_preference: LevelPreference,
}

/// Workout on the user's calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledWorkout {
    pub id: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub gym: String,
    /// Coarse time label such as 夜 or 夕方
    pub time: String,
    pub category: String,
    pub status: WorkoutStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_user: Option<MatchedUser>,
}

/// Shared habit goal users can join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonGoal {
    pub id: String,
    pub title: String,
    pub participants: u32,
    pub joined: bool,
}

/// Reads an optional enum that the form layer may have stored as `""`
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    use serde::de::IntoDeserializer;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let de: serde::de::value::StringDeserializer<D::Error> = s.into_deserializer();
            T::deserialize(de).map(Some)
        }
    }
}

/// Calendar days stored as ISO-8601 text
///
/// Writes `YYYY-MM-DD`. Reads that form or a full RFC 3339 datetime, which is
/// what the browser build wrote, keeping the UTC calendar day.
pub mod iso_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc().date())
            .map_err(|e| format!("invalid date '{}': {}", raw, e))
    }
}
