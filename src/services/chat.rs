use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::ChatSettings;
use crate::models::{Message, Sender};
use crate::services::store::{ProfileStore, StorageKey};

/// Ordered messages of one conversation
pub type Thread = Vec<Message>;

/// Persisted layout of the messages record
type Threads = BTreeMap<String, Thread>;

const OPENER_ID: &str = "initial";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message text is empty")]
    EmptyMessage,
}

/// Canned lines and timing of the simulated partner
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub reply_delay: Duration,
    pub opener: String,
    pub acknowledgement: String,
    pub decline_sentinel: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig::from(&ChatSettings::default())
    }
}

impl From<&ChatSettings> for ChatConfig {
    fn from(settings: &ChatSettings) -> Self {
        Self {
            reply_delay: settings.reply_delay(),
            opener: settings.opener.clone(),
            acknowledgement: settings.acknowledgement.clone(),
            decline_sentinel: settings.decline_sentinel.clone(),
        }
    }
}

/// Deferred replies not yet delivered, by thread id then ticket
type PendingReplies = HashMap<String, HashMap<u64, JoinHandle<()>>>;

struct ChatInner {
    store: Arc<ProfileStore>,
    config: ChatConfig,
    // Opener timestamp shared by every seeded thread
    opened_at: DateTime<Utc>,
    // Held across every read-modify-write of the messages record
    pending: Mutex<PendingReplies>,
    next_ticket: AtomicU64,
}

/// Append-only chat threads with a simulated partner
///
/// A user message schedules one partner acknowledgement after
/// `reply_delay`, unless it is the decline sentinel. Deleting a thread
/// cancels its undelivered replies.
#[derive(Clone)]
pub struct ChatSimulator {
    inner: Arc<ChatInner>,
    runtime: Handle,
}

impl ChatSimulator {
    pub fn new(store: Arc<ProfileStore>, config: ChatConfig, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(ChatInner {
                store,
                config,
                opened_at: Utc::now(),
                pending: Mutex::new(HashMap::new()),
                next_ticket: AtomicU64::new(0),
            }),
            runtime,
        }
    }

    /// Current thread, or the seeded opener when nothing is stored
    pub fn thread(&self, thread_id: &str) -> Thread {
        let _pending = self.inner.lock_pending();
        self.inner
            .load_threads()
            .remove(thread_id)
            .unwrap_or_else(|| vec![self.inner.opener()])
    }

    /// Append a message and persist the thread
    ///
    /// Returns the thread as it stands after the append.
    pub fn send(&self, thread_id: &str, text: &str, sender: Sender) -> Result<Thread, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let mut pending = self.inner.lock_pending();
        let thread = self.inner.append_locked(thread_id, new_message(text, sender));

        if sender == Sender::User && text != self.inner.config.decline_sentinel {
            let ticket = self.inner.next_ticket.fetch_add(1, Ordering::Relaxed);
            let inner = Arc::clone(&self.inner);
            let id = thread_id.to_string();

            let handle = self.runtime.spawn(async move {
                tokio::time::sleep(inner.config.reply_delay).await;
                inner.deliver_reply(&id, ticket);
            });

            pending
                .entry(thread_id.to_string())
                .or_default()
                .insert(ticket, handle);
            debug!("Scheduled reply {} for thread {}", ticket, thread_id);
        } else {
            debug!("No reply scheduled for thread {}", thread_id);
        }

        Ok(thread)
    }

    /// Remove a thread and cancel its pending replies
    pub fn delete_thread(&self, thread_id: &str) {
        let mut pending = self.inner.lock_pending();
        if let Some(replies) = pending.remove(thread_id) {
            debug!("Cancelling {} pending replies for thread {}", replies.len(), thread_id);
            for handle in replies.into_values() {
                handle.abort();
            }
        }

        let mut threads = self.inner.load_threads();
        if threads.remove(thread_id).is_some() {
            self.inner.persist(&threads);
        }
    }

    /// Drop every thread and pending reply
    pub fn clear_all(&self) {
        let mut pending = self.inner.lock_pending();
        for handle in pending.drain().flat_map(|(_, replies)| replies.into_values()) {
            handle.abort();
        }
        if let Err(e) = self.inner.store.clear(StorageKey::Messages) {
            warn!("Failed to clear messages: {}", e);
        }
    }

    /// Replies scheduled for a thread and not yet delivered
    pub fn pending_replies(&self, thread_id: &str) -> usize {
        self.inner
            .lock_pending()
            .get(thread_id)
            .map_or(0, HashMap::len)
    }
}

impl ChatInner {
    fn lock_pending(&self) -> MutexGuard<'_, PendingReplies> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn opener(&self) -> Message {
        Message {
            id: OPENER_ID.to_string(),
            text: self.config.opener.clone(),
            sender: Sender::Partner,
            timestamp: self.opened_at,
        }
    }

    fn load_threads(&self) -> Threads {
        self.store.get(StorageKey::Messages).unwrap_or_default()
    }

    fn persist(&self, threads: &Threads) {
        if let Err(e) = self.store.set(StorageKey::Messages, threads) {
            warn!("Messages kept in memory only: {}", e);
        }
    }

    /// Read the latest stored threads, append, write back. Caller holds `pending`.
    fn append_locked(&self, thread_id: &str, message: Message) -> Thread {
        let mut threads = self.load_threads();
        let thread = threads
            .entry(thread_id.to_string())
            .or_insert_with(|| vec![self.opener()]);
        thread.push(message);
        let snapshot = thread.clone();

        self.persist(&threads);
        snapshot
    }

    fn deliver_reply(&self, thread_id: &str, ticket: u64) {
        let mut pending = self.lock_pending();

        let registered = match pending.get_mut(thread_id) {
            Some(replies) => {
                let found = replies.remove(&ticket).is_some();
                if replies.is_empty() {
                    pending.remove(thread_id);
                }
                found
            }
            None => false,
        };

        if !registered {
            debug!("Reply {} for thread {} was cancelled", ticket, thread_id);
            return;
        }

        // Removed from the store directly while the reply was pending
        let mut threads = self.load_threads();
        let Some(thread) = threads.get_mut(thread_id) else {
            debug!("Thread {} is gone, dropping reply {}", thread_id, ticket);
            return;
        };

        thread.push(new_message(&self.config.acknowledgement, Sender::Partner));
        self.persist(&threads);
        debug!("Delivered reply {} to thread {}", ticket, thread_id);
    }
}

fn new_message(text: &str, sender: Sender) -> Message {
    Message {
        id: uuid::Uuid::new_v4().to_string(),
        text: text.to_string(),
        sender,
        timestamp: Utc::now(),
    }
}
