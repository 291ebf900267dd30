//! Request-scoped shared props.
//!
//! # Responsibilities
//! - Hold props shared by middleware/helpers for the lifetime of one request
//! - Hand them out exactly once at response-build time
//! - Reclaim entries of requests that never reached the build step
//!
//! # Design Decisions
//! - Sharded concurrent map keyed by request id; requests never contend on a global lock
//! - `share_all` converts its batch before taking the entry lock, then writes it in one go
//! - `PropScope` removes the entry on drop, so cancelled requests cannot leak

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time;

use crate::http::request::RequestId;
use crate::observability::metrics;
use crate::props::{Prop, Props};

/// Props shared by a single request.
#[derive(Debug)]
struct SharedEntry {
    props: Props,
    created_at: Instant,
}

impl SharedEntry {
    fn new() -> Self {
        Self {
            props: Props::new(),
            created_at: Instant::now(),
        }
    }
}

/// Process-wide store of shared props, keyed by request id.
///
/// Cheap to clone; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct PropStore {
    inner: Arc<DashMap<RequestId, SharedEntry>>,
}

impl PropStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite one shared prop for the request.
    pub fn share(&self, id: &RequestId, key: impl Into<String>, value: impl Into<Prop>) {
        let key = key.into();
        let value = value.into();
        self.inner
            .entry(id.clone())
            .or_insert_with(SharedEntry::new)
            .props
            .insert(key, value);
    }

    /// Merge several shared props for the request.
    pub fn share_all<I, K, V>(&self, id: &RequestId, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
    {
        let batch: Vec<(String, Prop)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut entry = self.inner.entry(id.clone()).or_insert_with(SharedEntry::new);
        entry.props.extend(batch);
    }

    /// Read one shared prop without consuming it.
    pub fn get(&self, id: &RequestId, key: &str) -> Option<Prop> {
        self.inner
            .get(id)
            .and_then(|entry| entry.props.get(key).cloned())
    }

    /// Remove and return every prop shared by the request.
    ///
    /// A second call for the same id returns an empty mapping.
    pub fn take_all(&self, id: &RequestId) -> Props {
        self.inner
            .remove(id)
            .map(|(_, entry)| entry.props)
            .unwrap_or_default()
    }

    /// Number of requests currently holding shared props.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove entries older than `ttl`. Returns how many were removed.
    pub fn reap_expired(&self, ttl: Duration) -> usize {
        let mut reaped = 0;
        self.inner.retain(|id, entry| {
            let keep = entry.created_at.elapsed() < ttl;
            if !keep {
                tracing::debug!(request_id = %id, keys = entry.props.len(), "Reaping stale shared props");
                reaped += 1;
            }
            keep
        });
        reaped
    }

    /// Guard that reclaims the request's entry when dropped.
    pub fn scope(&self, id: RequestId) -> PropScope {
        PropScope {
            store: self.clone(),
            id,
        }
    }
}

/// Drop guard held around a request's handling.
#[derive(Debug)]
pub struct PropScope {
    store: PropStore,
    id: RequestId,
}

impl PropScope {
    pub fn request_id(&self) -> &RequestId {
        &self.id
    }
}

impl Drop for PropScope {
    fn drop(&mut self) {
        if let Some((_, entry)) = self.store.inner.remove(&self.id) {
            tracing::debug!(
                request_id = %self.id,
                keys = entry.props.len(),
                "Shared props were never rendered; reclaimed"
            );
        }
    }
}

/// Periodically removes shared props that outlived their ttl.
pub struct SharedPropReaper {
    store: PropStore,
    ttl: Duration,
    interval: Duration,
}

impl SharedPropReaper {
    pub fn new(store: PropStore, ttl: Duration, interval: Duration) -> Self {
        Self {
            store,
            ttl,
            interval,
        }
    }

    /// Run until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            ttl_secs = self.ttl.as_secs(),
            interval_secs = self.interval.as_secs(),
            "Shared prop reaper starting"
        );

        let mut ticker = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reaped = self.store.reap_expired(self.ttl);
                    if reaped > 0 {
                        tracing::warn!(reaped, "Reaped shared props of requests that never rendered");
                        metrics::record_reaped(reaped);
                    }
                    metrics::record_shared_entries(self.store.len());
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shared prop reaper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
