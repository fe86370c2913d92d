use crate::core::proximity::NearbyGroup;
use crate::models::Match;

/// How a candidate's station relates to the acting user's home area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaRelation {
    Exact,
    Near,
}

/// Classify a candidate's station against the user's proximity group
///
/// Returns `None` when the station is outside the group.
#[inline]
pub fn area_relation(group: &NearbyGroup<'_>, candidate: &Match) -> Option<AreaRelation> {
    if candidate.gym == group.area() {
        Some(AreaRelation::Exact)
    } else if group.contains(&candidate.gym) {
        Some(AreaRelation::Near)
    } else {
        None
    }
}

/// Check if a candidate is visible to the user
///
/// A candidate passes iff its station is in the user's nearby group or is
/// the home area itself.
#[inline]
pub fn is_visible(group: &NearbyGroup<'_>, candidate: &Match) -> bool {
    area_relation(group, candidate).is_some()
}

/// Keep only visible candidates, preserving pool order
pub fn visible_candidates<'m>(group: &NearbyGroup<'_>, pool: &'m [Match]) -> Vec<&'m Match> {
    pool.iter().filter(|c| is_visible(group, c)).collect()
}
