//! The realtime database handle: tree storage plus live child queries.

use crate::error::StoreError;
use crate::events::ChildEvent;
use crate::path::StorePath;
use crate::push_id::PushIdGenerator;
use crate::query::ChildQuery;
use crate::tree::Node;
use chrono::Utc;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Handle to the in-process realtime store.
///
/// Cloning is cheap; every clone shares the same tree and watcher
/// registry. The handle is opened once at startup and injected wherever
/// store access is needed.
///
/// Mutations and the notifications they produce happen under one lock, so
/// the events observed for any single key arrive in mutation order. No
/// ordering is promised across different keys.
#[derive(Clone, Default)]
pub struct RealtimeDb {
    inner: Arc<Mutex<DbInner>>,
}

#[derive(Default)]
struct DbInner {
    root: Node,
    watchers: Vec<Watcher>,
    next_watcher_id: u64,
    keygen: PushIdGenerator,
    closed: bool,
}

struct Watcher {
    id: u64,
    query: ChildQuery,
    tx: mpsc::UnboundedSender<ChildEvent>,
}

impl RealtimeDb {
    /// Open a fresh, empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DbInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Request a new store-assigned child key.
    ///
    /// Keys are unique and lexicographically/temporally increasing; the
    /// caller never computes one locally.
    pub async fn create_key(&self) -> Result<String, StoreError> {
        let now = Utc::now().timestamp_millis();
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }
        Ok(inner.keygen.next_id(now))
    }

    /// Materialize the value at `path`, if any.
    ///
    /// A `null` leaf is a tombstone and reads as absent.
    pub async fn get(&self, path: &StorePath) -> Option<Value> {
        let inner = self.lock();
        inner
            .root
            .get(path.segments())
            .map(Node::value)
            .filter(|value| !value.is_null())
    }

    /// Whether any data is stored at or below `path`
    pub async fn exists(&self, path: &StorePath) -> bool {
        self.lock().root.exists(path.segments())
    }

    /// Write `value` at `path`, overwriting whatever was there.
    ///
    /// Last write wins on concurrent calls. Watchers of the parent path
    /// are notified according to their query range.
    pub async fn set(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        if path.is_root() {
            return Err(StoreError::InvalidPath(
                "cannot write a value to the root".to_string(),
            ));
        }
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }
        let old = inner.root.get(path.segments()).map(Node::value);
        inner.root.set(path.segments(), value.clone());
        inner.notify_write(path, old.as_ref(), Some(&value));
        Ok(())
    }

    /// Hard-delete the node at `path`; removing an absent path is a no-op
    pub async fn remove(&self, path: &StorePath) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }
        if let Some(node) = inner.root.remove(path.segments()) {
            let old = node.value();
            inner.notify_write(path, Some(&old), None);
        }
        Ok(())
    }

    /// Establish a live subscription to `query`.
    ///
    /// The matching children (query order, range-bounded, snapshot capped
    /// at the query limit) are queued as [`ChildEvent::Added`] before any
    /// later mutation is observed, so a subscriber never sees a change to
    /// a child it was not first told about.
    pub async fn subscribe(&self, query: ChildQuery) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }

        let mut entries: Vec<(String, Value)> = inner
            .root
            .get(query.path().segments())
            .map(Node::children)
            .unwrap_or_default();
        entries.retain(|(_, value)| !value.is_null() && query.in_range(value));
        entries.sort_by(|a, b| query.compare((a.0.as_str(), &a.1), (b.0.as_str(), &b.1)));
        if let Some(limit) = query.limit() {
            if entries.len() > limit {
                entries.drain(..entries.len() - limit);
            }
        }

        let initial = entries.len();
        for (key, value) in entries {
            let _ = tx.send(ChildEvent::Added { key, value });
        }

        let id = inner.next_watcher_id;
        inner.next_watcher_id += 1;
        debug!(watcher = id, path = %query.path(), initial, "subscription established");
        inner.watchers.push(Watcher { id, query, tx });

        Ok(Subscription {
            id,
            db: Arc::downgrade(&self.inner),
            rx,
        })
    }

    /// Shut the store down: every watcher is dropped and its event stream
    /// ends; subsequent writes and subscriptions fail with
    /// [`StoreError::Closed`]. Reads keep working.
    pub async fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        let dropped = inner.watchers.len();
        inner.watchers.clear();
        debug!(watchers = dropped, "store closed");
    }
}

impl DbInner {
    /// Fan a single-child write (or delete, `new == None`) out to the
    /// watchers of the parent path. Watchers whose receiver is gone are
    /// dropped here.
    fn notify_write(&mut self, path: &StorePath, old: Option<&Value>, new: Option<&Value>) {
        let Some(parent) = path.parent() else {
            return;
        };
        let Some(key) = path.key() else {
            return;
        };
        self.watchers.retain(|watcher| {
            if watcher.query.path() != &parent {
                return true;
            }
            let was_in = old.is_some_and(|v| !v.is_null() && watcher.query.in_range(v));
            let now_in = new.is_some_and(|v| !v.is_null() && watcher.query.in_range(v));
            let event = match (was_in, now_in, new) {
                (false, true, Some(value)) => Some(ChildEvent::Added {
                    key: key.to_string(),
                    value: value.clone(),
                }),
                (true, true, Some(value)) => Some(ChildEvent::Changed {
                    key: key.to_string(),
                    value: value.clone(),
                }),
                (true, false, _) => Some(ChildEvent::Removed {
                    key: key.to_string(),
                }),
                _ => None,
            };
            match event {
                Some(event) => watcher.tx.send(event).is_ok(),
                None => true,
            }
        });
    }
}

/// A live subscription to one child query.
///
/// Holds the receiving end of the event channel. Dropping the handle
/// unregisters the watcher immediately: a released window can never
/// deliver another event.
pub struct Subscription {
    id: u64,
    db: Weak<Mutex<DbInner>>,
    rx: mpsc::UnboundedReceiver<ChildEvent>,
}

impl Subscription {
    /// Await the next event; `None` once the stream has ended (store
    /// closed or dropped)
    pub async fn next(&mut self) -> Option<ChildEvent> {
        self.rx.recv().await
    }

    /// Take the next already-delivered event without waiting
    pub fn try_next(&mut self) -> Option<ChildEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.db.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.watchers.retain(|watcher| watcher.id != self.id);
            trace!(watcher = self.id, "subscription released");
        }
    }
}
