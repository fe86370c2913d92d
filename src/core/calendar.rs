use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{ScheduledWorkout, WorkoutStatus};

/// Workouts scheduled on `date`, in list order
pub fn workouts_on(schedules: &[ScheduledWorkout], date: NaiveDate) -> Vec<&ScheduledWorkout> {
    schedules.iter().filter(|w| w.date == date).collect()
}

/// Days that carry at least one workout, for calendar markers
pub fn scheduled_dates(schedules: &[ScheduledWorkout]) -> BTreeSet<NaiveDate> {
    schedules.iter().map(|w| w.date).collect()
}

/// Upcoming workouts (today onward) sorted by date
pub fn upcoming(schedules: &[ScheduledWorkout], today: NaiveDate) -> Vec<&ScheduledWorkout> {
    let mut out: Vec<&ScheduledWorkout> = schedules.iter().filter(|w| w.date >= today).collect();
    out.sort_by_key(|w| w.date);
    out
}

/// Count of workouts per status
pub fn count_by_status(schedules: &[ScheduledWorkout], status: WorkoutStatus) -> usize {
    schedules.iter().filter(|w| w.status == status).count()
}
