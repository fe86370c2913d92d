use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use super::domain::{SnsAccount, UserProfile};
use super::labels::{ExperienceLevel, GenderPreference};

/// Prompt shown when the status form is submitted incomplete
pub const STATUS_INCOMPLETE_PROMPT: &str = "必須項目を選択してください";
/// Prompt shown when onboarding is attempted without a name
pub const NAME_REQUIRED_PROMPT: &str = "名前を入力してください";
/// Prompt shown when a companion request has no reply deadline
pub const DEADLINE_REQUIRED_PROMPT: &str = "返信期限（日付と時刻）を選択してください";

/// User-facing input errors
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{prompt} (missing: {})", .fields.join(", "))]
    MissingRequiredSelection {
        prompt: &'static str,
        fields: Vec<String>,
    },

    #[error("Deadline {date} {time} is outside the selectable window")]
    DeadlineOutOfRange { date: NaiveDate, time: NaiveTime },
}

impl RequestError {
    /// Collect the failing field names of a validator run under one prompt
    pub fn missing(prompt: &'static str, errors: &ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        RequestError::MissingRequiredSelection { prompt, fields }
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request to train together with a surfaced match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRequest {
    pub match_id: String,
    #[serde(default)]
    pub deadline_date: Option<NaiveDate>,
    #[serde(default)]
    pub deadline_time: Option<NaiveTime>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CompanionRequest {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            deadline_date: None,
            deadline_time: None,
            message: None,
        }
    }

    pub fn with_deadline(mut self, date: NaiveDate, time: NaiveTime) -> Self {
        self.deadline_date = Some(date);
        self.deadline_time = Some(time);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Partial profile edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub area: Option<String>,
    pub nearby_stations: Option<Vec<String>>,
    pub experience_level: Option<ExperienceLevel>,
    pub preferred_categories: Option<Vec<String>>,
    pub companion_style: Option<String>,
    pub gender: Option<String>,
    pub gender_preference: Option<GenderPreference>,
    pub preferred_days: Option<Vec<String>>,
    pub preferred_gyms: Option<Vec<String>>,
    pub sns_accounts: Option<Vec<SnsAccount>>,
}

impl ProfileUpdate {
    /// Merge into an existing profile, returning the updated copy
    pub fn apply(self, profile: &UserProfile) -> UserProfile {
        let mut updated = profile.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(area) = self.area {
            updated.area = area;
        }
        if let Some(stations) = self.nearby_stations {
            updated.nearby_stations = stations;
        }
        if let Some(level) = self.experience_level {
            updated.experience_level = level;
        }
        if let Some(categories) = self.preferred_categories {
            updated.preferred_categories = categories;
        }
        if let Some(style) = self.companion_style {
            updated.companion_style = style;
        }
        if let Some(gender) = self.gender {
            updated.gender = gender;
        }
        if let Some(pref) = self.gender_preference {
            updated.gender_preference = pref;
        }
        if let Some(days) = self.preferred_days {
            updated.preferred_days = Some(days);
        }
        if let Some(gyms) = self.preferred_gyms {
            updated.preferred_gyms = gyms;
        }
        if let Some(accounts) = self.sns_accounts {
            updated.sns_accounts = accounts;
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("ユーザー").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_missing_selection_message() {
        let err = RequestError::MissingRequiredSelection {
            prompt: DEADLINE_REQUIRED_PROMPT,
            fields: vec!["deadline_time".to_string()],
        };
        let text = err.to_string();
        assert!(text.starts_with(DEADLINE_REQUIRED_PROMPT));
        assert!(text.contains("deadline_time"));
    }

    #[test]
    fn test_companion_request_builder() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let time = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        let req = CompanionRequest::new("1")
            .with_deadline(date, time)
            .with_message(crate::seed::REQUEST_MESSAGES[0]);

        assert_eq!(req.deadline_date, Some(date));
        assert_eq!(req.deadline_time, Some(time));
        assert_eq!(req.message.as_deref(), Some("よろしくお願いします！"));
    }
}
