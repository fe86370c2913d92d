use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::models::requests::{CompanionRequest, RequestError, DEADLINE_REQUIRED_PROMPT};

/// How far ahead a deadline may be set when the match day is unknown
const DEFAULT_HORIZON_DAYS: i64 = 30;
/// Deadline slots are offered on the half hour
const SLOT_MINUTES: u32 = 30;
const LAST_SLOT_MINUTE: u32 = 23 * 60 + 30;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Quick-pick date shown above the deadline calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOption {
    pub date: NaiveDate,
    pub label: String,
}

/// Short `M/D (曜)` label
pub fn short_date_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}/{} ({})", date.month(), date.day(), weekday)
}

/// Today plus the following six days
pub fn quick_date_options(today: NaiveDate) -> Vec<DateOption> {
    (0..7)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let label = match offset {
                0 => "今日".to_string(),
                1 => "明日".to_string(),
                2 => "明後日".to_string(),
                _ => short_date_label(date),
            };
            DateOption { date, label }
        })
        .collect()
}

/// Range of reply deadlines a companion request may carry
///
/// Dates run from today through the match day, or through a fixed horizon
/// when the match day is unknown. On the match day slots stop at the match
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    today: NaiveDate,
    last_day: NaiveDate,
    match_day: Option<NaiveDate>,
    match_time: Option<NaiveTime>,
}

impl DeadlineWindow {
    pub fn new(today: NaiveDate, match_day: Option<NaiveDate>, match_time: Option<NaiveTime>) -> Self {
        let last_day = match_day.unwrap_or(today + Duration::days(DEFAULT_HORIZON_DAYS));
        Self {
            today,
            last_day,
            match_day,
            match_time,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.today && date <= self.last_day
    }

    /// Half-hour slots available on `date` given the current wall-clock time
    pub fn time_slots(&self, date: NaiveDate, now: NaiveTime) -> Vec<NaiveTime> {
        if !self.is_selectable(date) {
            return vec![];
        }

        let start = if date == self.today {
            let minute = now.hour() * 60 + now.minute();
            // Next half hour strictly after now
            (minute / SLOT_MINUTES + 1) * SLOT_MINUTES
        } else {
            0
        };

        let end = match (self.match_day, self.match_time) {
            (Some(day), Some(time)) if day == date => time.hour() * 60 + time.minute(),
            _ => LAST_SLOT_MINUTE,
        };

        (start..=end)
            .step_by(SLOT_MINUTES as usize)
            .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
            .collect()
    }

    /// Check a request's deadline against the window
    pub fn validate(&self, request: &CompanionRequest, now: NaiveDateTime) -> Result<NaiveDateTime, RequestError> {
        let (date, time) = match (request.deadline_date, request.deadline_time) {
            (Some(date), Some(time)) => (date, time),
            (date, time) => {
                let mut fields = Vec::new();
                if date.is_none() {
                    fields.push("deadline_date".to_string());
                }
                if time.is_none() {
                    fields.push("deadline_time".to_string());
                }
                return Err(RequestError::MissingRequiredSelection {
                    prompt: DEADLINE_REQUIRED_PROMPT,
                    fields,
                });
            }
        };

        if !self.time_slots(date, now.time()).contains(&time) {
            tracing::debug!("Rejecting deadline {} {} for match {}", date, time, request.match_id);
            return Err(RequestError::DeadlineOutOfRange { date, time });
        }

        Ok(date.and_time(time))
    }
}
