use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use crate::core::proximity::ProximityGroups;
use crate::models::requests::{NAME_REQUIRED_PROMPT, STATUS_INCOMPLETE_PROMPT};
use crate::models::{
    ExperienceLevel, GenderPreference, ProfileUpdate, RequestError, UserProfile, UserStatus,
};
use crate::seed::COMPANION_STYLES;
use crate::services::store::{ProfileStore, StorageKey};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("No signed-in user")]
    NotAuthenticated,

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Signed-in user and current search intent, mirrored to the store
///
/// Holds the profile and status in memory after `bootstrap`; every mutation
/// writes through. A rejected write is logged and the in-memory value kept.
#[derive(Debug)]
pub struct Session {
    store: Arc<ProfileStore>,
    user: Option<UserProfile>,
    status: Option<UserStatus>,
}

impl Session {
    /// Restore profile and status from the store
    pub fn bootstrap(store: Arc<ProfileStore>) -> Self {
        let user: Option<UserProfile> = store.get(StorageKey::Profile);
        let status: Option<UserStatus> = store.get(StorageKey::Status);

        match &user {
            Some(profile) => info!("Restored session for {} ({})", profile.name, profile.area),
            None => info!("No stored profile, starting signed out"),
        }

        Self { store, user, status }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn status(&self) -> Option<&UserStatus> {
        self.status.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn store(&self) -> &Arc<ProfileStore> {
        &self.store
    }

    /// Sign in with a complete profile
    pub fn login(&mut self, profile: UserProfile) -> Result<&UserProfile, SessionError> {
        profile
            .validate()
            .map_err(|e| RequestError::missing(NAME_REQUIRED_PROMPT, &e))?;

        self.persist(StorageKey::Profile, &profile);
        info!("Signed in as {}", profile.name);
        Ok(self.user.insert(profile))
    }

    /// Build the first-run profile for `name` at `area` and sign in
    pub fn onboard(
        &mut self,
        name: &str,
        area: &str,
        groups: &ProximityGroups,
    ) -> Result<&UserProfile, SessionError> {
        let nearby_stations = groups
            .group_for(area)
            .stations()
            .into_iter()
            .map(str::to_string)
            .collect();

        let profile = UserProfile {
            name: name.trim().to_string(),
            area: area.to_string(),
            nearby_stations,
            experience_level: ExperienceLevel::Beginner,
            preferred_time: Some("午後 (18:00-21:00)".to_string()),
            preferred_categories: vec!["背中".to_string(), "胸".to_string()],
            companion_style: COMPANION_STYLES[0].to_string(),
            gender: "未設定".to_string(),
            gender_preference: GenderPreference::All,
            preferred_days: None,
            preferred_gyms: vec![],
            sns_accounts: vec![],
        };

        self.login(profile)
    }

    /// Merge a partial edit into the signed-in profile
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&UserProfile, SessionError> {
        let current = self.user.as_ref().ok_or(SessionError::NotAuthenticated)?;
        let updated = update.apply(current);
        updated
            .validate()
            .map_err(|e| RequestError::missing(NAME_REQUIRED_PROMPT, &e))?;

        self.persist(StorageKey::Profile, &updated);
        Ok(self.user.insert(updated))
    }

    /// Save a completed status form
    pub fn submit_status(&mut self, status: UserStatus) -> Result<&UserStatus, SessionError> {
        status
            .validate()
            .map_err(|e| RequestError::missing(STATUS_INCOMPLETE_PROMPT, &e))?;

        self.persist(StorageKey::Status, &status);
        info!("Status saved for {} at {}", status.date, status.gyms.join(", "));
        Ok(self.status.insert(status))
    }

    /// Clear profile and status, in memory and in the store
    pub fn logout(&mut self) {
        self.user = None;
        self.status = None;

        for key in [StorageKey::Profile, StorageKey::Status] {
            if let Err(e) = self.store.clear(key) {
                warn!("Failed to clear {:?}: {}", key, e);
            }
        }
        info!("Signed out");
    }

    fn persist<T: serde::Serialize>(&self, key: StorageKey, value: &T) {
        if let Err(e) = self.store.set(key, value) {
            warn!("{:?} kept in memory only: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LevelPreference, TrainingType};
    use crate::seed;
    use chrono::NaiveDate;

    fn complete_status() -> UserStatus {
        let mut status = UserStatus::blank(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        status.gyms = vec!["渋谷".to_string()];
        status.time = "19:00".to_string();
        status.category = vec!["背中".to_string()];
        status.training_type = Some(TrainingType::Weight);
        status.style = COMPANION_STYLES[0].to_string();
        status.experience_level = Some(ExperienceLevel::Intermediate);
        status.level_preference = Some(LevelPreference::Same);
        status.gender_preference = Some(GenderPreference::All);
        status
    }

    #[test]
    fn test_onboard_persists_default_profile() {
        let store = Arc::new(ProfileStore::in_memory());
        let mut session = Session::bootstrap(Arc::clone(&store));
        assert!(!session.is_authenticated());

        let profile = session.onboard("たろう", "恵比寿", &seed::proximity_groups()).unwrap();
        assert_eq!(profile.experience_level, ExperienceLevel::Beginner);
        assert_eq!(profile.preferred_categories, vec!["背中", "胸"]);
        assert_eq!(profile.nearby_stations, vec!["渋谷", "恵比寿", "表参道", "代官山"]);

        let restored = Session::bootstrap(store);
        assert_eq!(restored.user().map(|u| u.name.as_str()), Some("たろう"));
    }

    #[test]
    fn test_onboard_requires_name() {
        let mut session = Session::bootstrap(Arc::new(ProfileStore::in_memory()));
        let err = session.onboard("  ", "渋谷", &seed::proximity_groups()).unwrap_err();

        assert_eq!(
            err,
            SessionError::Request(RequestError::MissingRequiredSelection {
                prompt: NAME_REQUIRED_PROMPT,
                fields: vec!["name".to_string()],
            })
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_update_requires_login() {
        let mut session = Session::bootstrap(Arc::new(ProfileStore::in_memory()));
        let err = session.update_profile(ProfileUpdate::default()).unwrap_err();
        assert_eq!(err, SessionError::NotAuthenticated);
    }

    #[test]
    fn test_update_profile_merges() {
        let mut session = Session::bootstrap(Arc::new(ProfileStore::in_memory()));
        session.onboard("たろう", "渋谷", &seed::proximity_groups()).unwrap();

        let updated = session
            .update_profile(ProfileUpdate {
                area: Some("新宿".to_string()),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.area, "新宿");
        assert_eq!(updated.name, "たろう");
    }

    #[test]
    fn test_incomplete_status_rejected() {
        let mut session = Session::bootstrap(Arc::new(ProfileStore::in_memory()));
        let mut status = complete_status();
        status.gyms.clear();
        status.level_preference = None;

        match session.submit_status(status).unwrap_err() {
            SessionError::Request(RequestError::MissingRequiredSelection { prompt, fields }) => {
                assert_eq!(prompt, STATUS_INCOMPLETE_PROMPT);
                assert_eq!(fields, vec!["gyms", "level_preference"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(session.status().is_none());
    }

    #[test]
    fn test_logout_clears_store() {
        let store = Arc::new(ProfileStore::in_memory());
        let mut session = Session::bootstrap(Arc::clone(&store));
        session.onboard("たろう", "渋谷", &seed::proximity_groups()).unwrap();
        session.submit_status(complete_status()).unwrap();

        session.logout();
        assert!(session.user().is_none());
        assert_eq!(store.get::<UserProfile>(StorageKey::Profile), None);
        assert_eq!(store.get::<UserStatus>(StorageKey::Status), None);
    }
}
