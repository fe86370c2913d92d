// Model exports
pub mod domain;
pub mod labels;
pub mod requests;
pub mod responses;

pub use domain::{
    CommonGoal, Match, MatchedUser, Message, ScheduledWorkout, Sender, SnsAccount, UserProfile,
    UserStatus, WorkoutStatus,
};
pub use labels::{
    ExperienceLevel, ExpertiseType, GenderPreference, LabelInfo, LevelPreference, TrainingType,
};
pub use requests::{CompanionRequest, ProfileUpdate, RequestError};
pub use responses::{CompatibilityBreakdown, MatchPoint, MatchTag, TaggedMatch};
