use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::tags::TimeSlotPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_read_tier_capacity")]
    pub read_tier_capacity: u64,
    /// Byte quota for the in-memory backend, unlimited when absent
    pub memory_quota_bytes: Option<usize>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            dir: default_data_dir(),
            key_prefix: default_key_prefix(),
            read_tier_capacity: default_read_tier_capacity(),
            memory_quota_bytes: None,
        }
    }
}

fn default_backend() -> BackendKind { BackendKind::File }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_key_prefix() -> String { "gomach_".to_string() }
fn default_read_tier_capacity() -> u64 { 64 }

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_opener")]
    pub opener: String,
    #[serde(default = "default_acknowledgement")]
    pub acknowledgement: String,
    #[serde(default = "default_decline_sentinel")]
    pub decline_sentinel: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            opener: default_opener(),
            acknowledgement: default_acknowledgement(),
            decline_sentinel: default_decline_sentinel(),
        }
    }
}

impl ChatSettings {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

fn default_reply_delay_ms() -> u64 { 1000 }
fn default_opener() -> String { "合流の調整をお願いします！".to_string() }
fn default_acknowledgement() -> String { "了解です！".to_string() }
fn default_decline_sentinel() -> String { "今回は見送りします".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_area")]
    pub default_area: String,
    /// `always` or `proximity`
    #[serde(default = "default_time_slot_policy")]
    pub time_slot_policy: String,
    #[serde(default = "default_same_slot_window")]
    pub same_slot_window_minutes: u32,
    #[serde(default = "default_near_slot_window")]
    pub near_slot_window_minutes: u32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_area: default_area(),
            time_slot_policy: default_time_slot_policy(),
            same_slot_window_minutes: default_same_slot_window(),
            near_slot_window_minutes: default_near_slot_window(),
        }
    }
}

impl MatchingSettings {
    pub fn time_slot_policy(&self) -> TimeSlotPolicy {
        match self.time_slot_policy.as_str() {
            "proximity" => TimeSlotPolicy::Proximity {
                same_window_minutes: self.same_slot_window_minutes,
                near_window_minutes: self.near_slot_window_minutes,
            },
            "always" => TimeSlotPolicy::Always,
            other => {
                tracing::warn!("Unknown time slot policy '{}', using 'always'", other);
                TimeSlotPolicy::Always
            }
        }
    }
}

fn default_area() -> String { "渋谷".to_string() }
fn default_time_slot_policy() -> String { "always".to_string() }
fn default_same_slot_window() -> u32 { 30 }
fn default_near_slot_window() -> u32 { 90 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GOMACH__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GOMACH__CHAT__REPLY_DELAY_MS -> chat.reply_delay_ms
            .add_source(
                Environment::with_prefix("GOMACH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GOMACH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional `GOMACH_DATA_DIR` override to the storage directory
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(dir) = std::env::var("GOMACH_DATA_DIR") {
        builder = builder.set_override("storage.dir", dir)?;
    }

    builder.build()
}
