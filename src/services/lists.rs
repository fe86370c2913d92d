//! Favorites, common goals and scheduled workouts kept in the profile store

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{CommonGoal, ScheduledWorkout};
use crate::seed;
use crate::services::store::{ProfileStore, StorageKey};

fn persist<T: serde::Serialize + ?Sized>(store: &ProfileStore, key: StorageKey, value: &T) {
    if let Err(e) = store.set(key, value) {
        warn!("{:?} kept in memory only: {}", key, e);
    }
}

/// Favorited match ids, seeded until the user first edits the list
pub fn favorites(store: &ProfileStore) -> Vec<String> {
    store
        .get(StorageKey::Favorites)
        .unwrap_or_else(|| seed::DEFAULT_FAVORITES.iter().map(|id| id.to_string()).collect())
}

pub fn is_favorite(store: &ProfileStore, match_id: &str) -> bool {
    favorites(store).iter().any(|id| id == match_id)
}

/// Add or remove a match from the favorites; returns whether it is now a favorite
pub fn toggle_favorite(store: &ProfileStore, match_id: &str) -> bool {
    let mut ids = favorites(store);
    let now_favorite = match ids.iter().position(|id| id == match_id) {
        Some(index) => {
            ids.remove(index);
            false
        }
        None => {
            ids.push(match_id.to_string());
            true
        }
    };

    persist(store, StorageKey::Favorites, &ids);
    debug!("Favorite {} -> {}", match_id, now_favorite);
    now_favorite
}

pub fn common_goals(store: &ProfileStore) -> Vec<CommonGoal> {
    store.get(StorageKey::Goals).unwrap_or_else(seed::common_goals)
}

/// Join or leave a common goal
///
/// Returns the updated goal, or `None` for an unknown id.
pub fn toggle_goal(store: &ProfileStore, goal_id: &str) -> Option<CommonGoal> {
    let mut goals = common_goals(store);
    let goal = goals.iter_mut().find(|g| g.id == goal_id)?;
    goal.joined = !goal.joined;
    let updated = goal.clone();

    persist(store, StorageKey::Goals, &goals);
    debug!("Goal {} joined={}", goal_id, updated.joined);
    Some(updated)
}

pub fn schedules(store: &ProfileStore, today: NaiveDate) -> Vec<ScheduledWorkout> {
    store
        .get(StorageKey::Schedules)
        .unwrap_or_else(|| seed::scheduled_workouts(today))
}

pub fn save_schedules(store: &ProfileStore, schedules: &[ScheduledWorkout]) {
    persist(store, StorageKey::Schedules, schedules);
}
