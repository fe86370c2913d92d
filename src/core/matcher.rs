use crate::config::MatchingSettings;
use crate::core::{
    filters::is_visible,
    proximity::ProximityGroups,
    tags::{compatibility_breakdown, derive_tags, TimeSlotPolicy},
};
use crate::models::{CompatibilityBreakdown, Match, TaggedMatch, UserProfile, UserStatus};
use crate::seed;
use crate::services::store::{ProfileStore, StorageKey};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<TaggedMatch>,
    pub total_candidates: usize,
}

/// Filters a candidate pool down to the user's station group and tags each survivor
///
/// # Pipeline Stages
/// 1. Visibility: station in the user's proximity group or equal to the home area
/// 2. Tagging: area, time slot, shared categories
///
/// Pool order is kept; nothing is ranked or truncated.
#[derive(Debug, Clone)]
pub struct CompatibilityFilter {
    groups: ProximityGroups,
    time_policy: TimeSlotPolicy,
    default_area: String,
}

impl CompatibilityFilter {
    pub fn new(groups: ProximityGroups, time_policy: TimeSlotPolicy, default_area: impl Into<String>) -> Self {
        Self {
            groups,
            time_policy,
            default_area: default_area.into(),
        }
    }

    /// Seeded station groups with the configured policy and fallback area
    pub fn from_settings(settings: &MatchingSettings) -> Self {
        Self::new(
            seed::proximity_groups(),
            settings.time_slot_policy(),
            settings.default_area.clone(),
        )
    }

    pub fn groups(&self) -> &ProximityGroups {
        &self.groups
    }

    pub fn default_area(&self) -> &str {
        &self.default_area
    }

    /// Find the visible candidates for a user at `area`
    ///
    /// # Arguments
    /// * `area` - The user's home station
    /// * `status` - Current search intent; supplies categories and start time
    /// * `pool` - Candidates from the matching backend
    pub fn find_matches(&self, area: &str, status: Option<&UserStatus>, pool: &[Match]) -> MatchResult {
        let group = self.groups.group_for(area);
        let categories: &[String] = status.map(|s| s.category.as_slice()).unwrap_or(&[]);
        let user_time = status.map(|s| s.time.as_str());

        let matches: Vec<TaggedMatch> = pool
            .iter()
            // Stage 1: Station group
            .filter(|candidate| is_visible(&group, candidate))
            // Stage 2: Tags
            .map(|candidate| TaggedMatch {
                common_tags: derive_tags(&group, candidate, categories, user_time, self.time_policy),
                candidate: candidate.clone(),
            })
            .collect();

        tracing::debug!(
            "{} of {} candidates visible from {}",
            matches.len(),
            pool.len(),
            area
        );

        MatchResult {
            matches,
            total_candidates: pool.len(),
        }
    }

    /// Find matches using the profile and status saved in `store`
    ///
    /// Without a saved profile the configured default area is used.
    pub fn find_matches_from_store(&self, store: &ProfileStore, pool: &[Match]) -> MatchResult {
        let profile: Option<UserProfile> = store.get(StorageKey::Profile);
        let status: Option<UserStatus> = store.get(StorageKey::Status);

        let area = profile
            .as_ref()
            .map(|p| p.area.as_str())
            .unwrap_or(&self.default_area);

        self.find_matches(area, status.as_ref(), pool)
    }

    /// Detail view for one tagged match
    pub fn breakdown(&self, tagged: &TaggedMatch) -> CompatibilityBreakdown {
        compatibility_breakdown(&tagged.candidate, &tagged.common_tags)
    }
}

impl Default for CompatibilityFilter {
    fn default() -> Self {
        Self::from_settings(&MatchingSettings::default())
    }
}
