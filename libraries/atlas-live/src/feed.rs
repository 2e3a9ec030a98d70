//! The realtime paginated view of the directory.
//!
//! A [`UserFeed`] reconciles two store primitives into one consistent
//! picture: a live subscription to an ordered child query (discrete
//! add/change/remove events) and re-issuable bounded range queries for
//! backfill. The feed owns a single subscription at a time; requesting an
//! older page replaces the window, and a generation counter fences off any
//! straggler event from a superseded window.

use crate::error::LiveError;
use atlas_core::types::{UserId, UserRecord};
use atlas_store::{users, ChildEvent, ChildQuery, RealtimeDb, Subscription};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Records fetched per pagination window
pub const PAGE_SIZE: usize = 25;

/// Field the directory is ordered and paginated by
const ORDER_FIELD: &str = "updatedAt";

/// A change the feed applied to its view
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A record entered the view
    Added(UserRecord),
    /// A known record was overwritten (last write wins)
    Changed(UserRecord),
    /// A record left the view
    Removed(UserId),
}

/// Live, deduplicated, time-ordered view of the user directory.
///
/// The view maps record ids to their last-known state and only ever covers
/// records that fell within some requested window. `refresh` establishes
/// the newest window; `load_older` extends coverage backwards in
/// `updatedAt` order, one page at a time. All mutation goes through
/// `&mut self`: the feed is single-writer by construction.
pub struct UserFeed {
    db: RealtimeDb,
    page_size: usize,
    view: HashMap<String, UserRecord>,
    /// Upper `updatedAt` bound of the active window; `None` is the initial
    /// open-ended window (newest page plus all future additions)
    window_bound: Option<i64>,
    /// At most one live subscription, ever
    subscription: Option<Subscription>,
    /// Bumped on every window switch; events carry the generation they
    /// were received under and stale ones are dropped
    generation: u64,
    /// True only while a new window is being set up
    loading: bool,
}

impl UserFeed {
    /// Create a feed over `db` with the default page size
    pub fn new(db: RealtimeDb) -> Self {
        Self::with_page_size(db, PAGE_SIZE)
    }

    /// Create a feed with an explicit page size
    pub fn with_page_size(db: RealtimeDb, page_size: usize) -> Self {
        Self {
            db,
            page_size,
            view: HashMap::new(),
            window_bound: None,
            subscription: None,
            generation: 0,
            loading: false,
        }
    }

    /// Establish (or re-establish) the newest window.
    ///
    /// Any previous subscription is released first. The initial page is
    /// drained into the view before this returns.
    pub async fn refresh(&mut self) -> Result<(), LiveError> {
        self.establish_window(None).await
    }

    /// Extend the view one page further into the past.
    ///
    /// Computes the next cursor as `min(updatedAt) - 1` over the current
    /// view (a half-open boundary that cannot re-fetch the record the
    /// cursor came from) and re-establishes the window there. Returns
    /// whether any new record was loaded. No-op on an empty view, and
    /// idempotent once the store is exhausted: when the recomputed cursor
    /// equals the active bound nothing is touched.
    pub async fn load_older(&mut self) -> Result<bool, LiveError> {
        let Some(oldest) = self.view.values().map(|user| user.updated_at).min() else {
            return Ok(false);
        };
        let bound = oldest - 1;
        if self.window_bound == Some(bound) {
            trace!(bound, "window already at oldest page");
            return Ok(false);
        }
        let before = self.view.len();
        self.establish_window(Some(bound)).await?;
        Ok(self.view.len() > before)
    }

    /// Await the next live change and apply it to the view.
    ///
    /// Events that change nothing (stale generation, tombstones, removal
    /// of an unknown id) are skipped. Once the stream has ended the
    /// window is dead and every call fails with
    /// [`LiveError::Subscription`]; recovery is the caller's decision
    /// (`refresh` starts over).
    pub async fn next_change(&mut self) -> Result<FeedEvent, LiveError> {
        loop {
            let generation = self.generation;
            let subscription = self
                .subscription
                .as_mut()
                .ok_or_else(|| LiveError::Subscription("no active window".to_string()))?;
            let Some(event) = subscription.next().await else {
                self.subscription = None;
                return Err(LiveError::Subscription(
                    "event stream ended".to_string(),
                ));
            };
            if let Some(change) = self.apply_event(generation, event) {
                return Ok(change);
            }
        }
    }

    /// Apply every already-delivered event without waiting
    pub fn apply_pending(&mut self) -> Vec<FeedEvent> {
        let generation = self.generation;
        let mut applied = Vec::new();
        while let Some(event) = self
            .subscription
            .as_mut()
            .and_then(Subscription::try_next)
        {
            if let Some(change) = self.apply_event(generation, event) {
                applied.push(change);
            }
        }
        applied
    }

    /// The current view, sorted by `updatedAt` descending with id as the
    /// deterministic tie-break
    pub fn users(&self) -> Vec<UserRecord> {
        let mut records: Vec<UserRecord> = self.view.values().cloned().collect();
        records.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }

    /// Number of records in the view
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Whether the view holds no records
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Upper bound of the active window (`None` = open-ended newest page)
    pub fn window_bound(&self) -> Option<i64> {
        self.window_bound
    }

    /// True only during synchronous window setup
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Release the old window, subscribe to the new one, and drain its
    /// initial page. The old subscription is dropped before the new one
    /// exists, so there is never a moment with two live listeners.
    async fn establish_window(&mut self, bound: Option<i64>) -> Result<(), LiveError> {
        self.subscription = None;
        self.generation += 1;
        self.loading = true;

        let mut query = ChildQuery::children(users::users_root())
            .order_by_child(ORDER_FIELD)
            .limit_to_last(self.page_size);
        if let Some(bound) = bound {
            query = query.end_at(bound);
        }

        let mut subscription = match self.db.subscribe(query).await {
            Ok(subscription) => subscription,
            Err(err) => {
                self.loading = false;
                return Err(err.into());
            }
        };

        let generation = self.generation;
        let mut initial = 0usize;
        while let Some(event) = subscription.try_next() {
            if self.apply_event(generation, event).is_some() {
                initial += 1;
            }
        }
        debug!(?bound, generation, initial, "window established");

        self.window_bound = bound;
        self.subscription = Some(subscription);
        self.loading = false;
        Ok(())
    }

    /// Apply one store event received under `generation`. Returns the
    /// resulting view change, or `None` if the event was a no-op; in
    /// particular, anything from a superseded window is dropped here.
    fn apply_event(&mut self, generation: u64, event: ChildEvent) -> Option<FeedEvent> {
        if generation != self.generation {
            trace!(
                stale = generation,
                current = self.generation,
                key = event.key(),
                "dropping event from superseded window"
            );
            return None;
        }
        match event {
            ChildEvent::Added { key, value } => self.upsert(key, value, false),
            ChildEvent::Changed { key, value } => self.upsert(key, value, true),
            ChildEvent::Removed { key } => self
                .view
                .remove(&key)
                .map(|record| FeedEvent::Removed(record.id)),
        }
    }

    fn upsert(&mut self, key: String, value: Value, changed: bool) -> Option<FeedEvent> {
        if value.is_null() {
            return None; // tombstone, not materially present
        }
        match serde_json::from_value::<UserRecord>(value) {
            Ok(record) => {
                self.view.insert(key, record.clone());
                Some(if changed {
                    FeedEvent::Changed(record)
                } else {
                    FeedEvent::Added(record)
                })
            }
            Err(err) => {
                warn!(key = %key, error = %err, "skipping undecodable record");
                None
            }
        }
    }
}
