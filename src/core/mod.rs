// Core algorithm exports
pub mod calendar;
pub mod deadline;
pub mod filters;
pub mod matcher;
pub mod proximity;
pub mod tags;

pub use deadline::{quick_date_options, DateOption, DeadlineWindow};
pub use filters::{area_relation, is_visible, visible_candidates, AreaRelation};
pub use matcher::{CompatibilityFilter, MatchResult};
pub use proximity::{NearbyGroup, ProximityGroups};
pub use tags::{compatibility_breakdown, derive_tags, TimeSlotPolicy};
