//! Gomach - matching core for the Gomach gym companion app
//!
//! This library provides station-group matching, the local profile store and
//! the simulated companion chat used by the app. The UI layer sits on top of it.

pub mod config;
pub mod core;
pub mod models;
pub mod seed;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CompatibilityFilter, MatchResult, ProximityGroups, TimeSlotPolicy};
pub use crate::models::{Match, MatchTag, Message, Sender, TaggedMatch, UserProfile, UserStatus};
pub use crate::services::{ChatSimulator, ProfileStore, Session, StorageKey};
