use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{BackendKind, StorageSettings};
use crate::services::backend::{BackendError, FileBackend, MemoryBackend, StorageBackend};

/// Errors that can occur with profile store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] BackendError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored record '{key}' does not match the expected shape: {source}")]
    DeserializationMismatch {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Logical record names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Profile,
    Status,
    Matches,
    Messages,
    Schedules,
    Favorites,
    Goals,
}

impl StorageKey {
    pub const ALL: [StorageKey; 7] = [
        StorageKey::Profile,
        StorageKey::Status,
        StorageKey::Matches,
        StorageKey::Messages,
        StorageKey::Schedules,
        StorageKey::Favorites,
        StorageKey::Goals,
    ];

    /// Physical key without the namespace prefix
    pub fn suffix(self) -> &'static str {
        match self {
            StorageKey::Profile => "user_profile",
            StorageKey::Status => "user_status",
            StorageKey::Matches => "matches",
            StorageKey::Messages => "messages",
            StorageKey::Schedules => "schedules",
            StorageKey::Favorites => "go_members",
            StorageKey::Goals => "common_goals",
        }
    }
}

/// Typed key-value store over a durable backend
///
/// Reads go through an in-process read tier (moka) before the backend.
/// A write lands in the read tier first, so when the backend rejects it the
/// value stays readable for the rest of the process and the caller only has
/// to log the returned `StorageUnavailable`.
pub struct ProfileStore {
    backend: Arc<dyn StorageBackend>,
    read_tier: moka::sync::Cache<String, String>,
    prefix: String,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn StorageBackend>, prefix: impl Into<String>, read_tier_capacity: u64) -> Self {
        let read_tier = moka::sync::Cache::builder()
            .max_capacity(read_tier_capacity)
            .build();

        Self {
            backend,
            read_tier,
            prefix: prefix.into(),
        }
    }

    /// Store backed by a fresh in-memory backend with the default prefix
    pub fn in_memory() -> Self {
        let settings = StorageSettings::default();
        Self::new(
            Arc::new(MemoryBackend::new()),
            settings.key_prefix,
            settings.read_tier_capacity,
        )
    }

    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StoreError> {
        let backend: Arc<dyn StorageBackend> = match settings.backend {
            BackendKind::Memory => match settings.memory_quota_bytes {
                Some(quota) => Arc::new(MemoryBackend::with_quota(quota)),
                None => Arc::new(MemoryBackend::new()),
            },
            BackendKind::File => Arc::new(FileBackend::new(&settings.dir)?),
        };

        tracing::info!(
            "Profile store initialized ({:?} backend, prefix '{}')",
            settings.backend,
            settings.key_prefix
        );
        Ok(Self::new(backend, settings.key_prefix.clone(), settings.read_tier_capacity))
    }

    /// Namespaced key as written to the backend
    pub fn physical_key(&self, key: StorageKey) -> String {
        format!("{}{}", self.prefix, key.suffix())
    }

    fn read_raw(&self, physical: &str) -> Result<Option<String>, StoreError> {
        if let Some(raw) = self.read_tier.get(physical) {
            tracing::trace!("Read tier hit: {}", physical);
            return Ok(Some(raw));
        }

        let raw = self.backend.get_item(physical)?;
        if let Some(ref raw) = raw {
            self.read_tier.insert(physical.to_string(), raw.clone());
        }
        Ok(raw)
    }

    /// Load a record, surfacing every failure
    pub fn try_get<T>(&self, key: StorageKey) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let physical = self.physical_key(key);
        let Some(raw) = self.read_raw(&physical)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::DeserializationMismatch { key: physical, source })
    }

    /// Load a record, treating unreadable or mismatched data as absent
    pub fn get<T>(&self, key: StorageKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Treating {:?} as absent: {}", key, e);
                None
            }
        }
    }

    /// Serialize and overwrite a record
    pub fn set<T>(&self, key: StorageKey, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        let physical = self.physical_key(key);

        self.read_tier.insert(physical.clone(), json.clone());
        self.backend.set_item(&physical, &json)?;

        tracing::trace!("Store set: {}", physical);
        Ok(())
    }

    /// Remove a record; absent afterward
    pub fn clear(&self, key: StorageKey) -> Result<(), StoreError> {
        let physical = self.physical_key(key);
        self.read_tier.invalidate(physical.as_str());
        self.backend.remove_item(&physical)?;

        tracing::trace!("Store clear: {}", physical);
        Ok(())
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("prefix", &self.prefix)
            .field("read_tier_entries", &self.read_tier.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store_over(backend: Arc<MemoryBackend>) -> ProfileStore {
        ProfileStore::new(backend, "gomach_", 16)
    }

    #[test]
    fn test_physical_keys() {
        let store = ProfileStore::in_memory();
        assert_eq!(store.physical_key(StorageKey::Profile), "gomach_user_profile");
        assert_eq!(store.physical_key(StorageKey::Status), "gomach_user_status");
        assert_eq!(store.physical_key(StorageKey::Messages), "gomach_messages");
        assert_eq!(store.physical_key(StorageKey::Favorites), "gomach_go_members");
        assert_eq!(store.physical_key(StorageKey::Goals), "gomach_common_goals");
    }

    #[test]
    fn test_set_get_clear() {
        let store = ProfileStore::in_memory();
        let value: BTreeMap<String, Vec<u32>> = [("a".to_string(), vec![1, 2])].into_iter().collect();

        assert_eq!(store.get::<BTreeMap<String, Vec<u32>>>(StorageKey::Matches), None);
        store.set(StorageKey::Matches, &value).unwrap();
        assert_eq!(store.get(StorageKey::Matches), Some(value));

        store.clear(StorageKey::Matches).unwrap();
        store.clear(StorageKey::Matches).unwrap();
        assert_eq!(store.get::<BTreeMap<String, Vec<u32>>>(StorageKey::Matches), None);
    }

    #[test]
    fn test_reads_value_written_by_another_handle() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item("gomach_common_goals", "[1,2,3]").unwrap();

        let store = store_over(backend);
        assert_eq!(store.get::<Vec<u8>>(StorageKey::Goals), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_shape_mismatch_is_absent() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item("gomach_common_goals", "{\"not\":\"a list\"}").unwrap();
        let store = store_over(backend);

        assert!(matches!(
            store.try_get::<Vec<u8>>(StorageKey::Goals),
            Err(StoreError::DeserializationMismatch { .. })
        ));
        assert_eq!(store.get::<Vec<u8>>(StorageKey::Goals), None);
    }

    #[test]
    fn test_failed_write_stays_readable_in_process() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(Arc::clone(&backend));
        backend.set_disabled(true);

        let err = store.set(StorageKey::Favorites, &vec!["1".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(BackendError::Disabled)));
        assert_eq!(store.get::<Vec<String>>(StorageKey::Favorites), Some(vec!["1".to_string()]));
        assert!(backend.is_empty());
    }
}
