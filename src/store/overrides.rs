// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::time::Instant;

use super::{overrides_namespace, KvStore, StoreError};
use crate::model::{DiagramKey, NodeId, Point};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy)]
struct PendingWrite {
    point: Point,
    due: Instant,
}

type PendingKey = (DiagramKey, NodeId);

/// Persisted map of manual node positions, per diagram key.
///
/// `save` is debounced per `(diagram key, node id)`: the first save opens a window, later saves
/// inside the window only replace the pending value, and one write happens once the window has
/// elapsed. Windows of different nodes are independent.
pub struct OverrideStore {
    kv: Arc<dyn KvStore>,
    debounce: Duration,
    pending: Mutex<BTreeMap<PendingKey, PendingWrite>>,
    wake: Notify,
}

impl std::fmt::Debug for OverrideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideStore")
            .field("debounce", &self.debounce)
            .field("pending", &self.pending_len())
            .finish_non_exhaustive()
    }
}

impl OverrideStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_debounce(kv, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(kv: Arc<dyn KvStore>, debounce: Duration) -> Self {
        Self { kv, debounce, pending: Mutex::new(BTreeMap::new()), wake: Notify::new() }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Every stored override for `diagram_key`, with values still waiting in a debounce
    /// window layered on top.
    ///
    /// Malformed entries are skipped with a warning; they behave like a missing override.
    pub fn load(&self, diagram_key: &DiagramKey) -> Result<BTreeMap<NodeId, Point>, StoreError> {
        let namespace = overrides_namespace(diagram_key);
        let mut overrides = BTreeMap::new();
        for (key, value) in self.kv.read_all(&namespace)? {
            let Ok(node_id) = NodeId::new(key.as_str()) else {
                tracing::warn!(namespace = %namespace, key = %key, "skipping override with invalid node id");
                continue;
            };
            match serde_json::from_value::<Point>(value) {
                Ok(point) if point.is_finite() => {
                    overrides.insert(node_id, point);
                }
                Ok(_) => {
                    tracing::warn!(namespace = %namespace, node_id = %node_id, "skipping non-finite override");
                }
                Err(err) => {
                    tracing::warn!(namespace = %namespace, node_id = %node_id, error = %err, "skipping malformed override");
                }
            }
        }

        for ((key, node_id), pending) in self.lock().iter() {
            if key == diagram_key {
                overrides.insert(node_id.clone(), pending.point);
            }
        }
        Ok(overrides)
    }

    /// Records a drag position. The write happens when the node's debounce window closes.
    pub fn save(&self, diagram_key: &DiagramKey, node_id: &NodeId, point: Point) {
        let now = Instant::now();
        let mut pending = self.lock();
        pending
            .entry((diagram_key.clone(), node_id.clone()))
            .and_modify(|entry| entry.point = point)
            .or_insert(PendingWrite { point, due: now + self.debounce });
        drop(pending);
        self.wake.notify_one();
    }

    /// Writes immediately, superseding anything pending for the node.
    pub fn save_now(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
        point: Point,
    ) -> Result<(), StoreError> {
        self.lock().remove(&(diagram_key.clone(), node_id.clone()));
        self.write(diagram_key, node_id, point)
    }

    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    /// Earliest instant at which a pending write becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().values().map(|entry| entry.due).min()
    }

    /// Writes every pending override whose window has elapsed. Returns the number written.
    pub fn flush_due(&self) -> Result<usize, StoreError> {
        let now = Instant::now();
        self.flush_where(|entry| entry.due <= now)
    }

    /// Writes everything still pending, regardless of windows (diagram unmount).
    pub fn flush_all(&self) -> Result<usize, StoreError> {
        self.flush_where(|_| true)
    }

    /// Flushes due writes until `shutdown` flips to `true` (or its sender is dropped), then
    /// flushes whatever is left.
    pub async fn run_flusher(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            let deadline = self.next_deadline();
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = self.wake.notified() => {}
                _ = async {
                    match deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    if let Err(err) = self.flush_due() {
                        tracing::warn!(error = %err, "failed to flush position overrides");
                    }
                }
            }
        }

        if let Err(err) = self.flush_all() {
            tracing::warn!(error = %err, "failed to flush position overrides on shutdown");
        }
    }

    fn flush_where(&self, mut ready: impl FnMut(&PendingWrite) -> bool) -> Result<usize, StoreError> {
        let batch = {
            let mut pending = self.lock();
            let keys = pending
                .iter()
                .filter(|(_, entry)| ready(*entry))
                .map(|(key, _)| key.clone())
                .collect::<Vec<_>>();
            keys.into_iter()
                .filter_map(|key| pending.remove(&key).map(|entry| (key, entry)))
                .collect::<Vec<_>>()
        };

        let mut written = 0usize;
        let mut batch = batch.into_iter();
        while let Some(((diagram_key, node_id), entry)) = batch.next() {
            if let Err(err) = self.write(&diagram_key, &node_id, entry.point) {
                // Put the failed write and the rest back with a fresh window; a newer save wins
                // over the retry.
                let retry_at = Instant::now() + self.debounce;
                let mut pending = self.lock();
                let requeue = std::iter::once(((diagram_key, node_id), entry)).chain(batch);
                for (key, entry) in requeue {
                    pending.entry(key).or_insert(PendingWrite { due: retry_at, ..entry });
                }
                return Err(err);
            }
            written += 1;
        }
        Ok(written)
    }

    fn write(&self, diagram_key: &DiagramKey, node_id: &NodeId, point: Point) -> Result<(), StoreError> {
        let namespace = overrides_namespace(diagram_key);
        let value = serde_json::to_value(point).map_err(|source| StoreError::Encode {
            namespace: namespace.clone(),
            key: node_id.to_string(),
            source,
        })?;
        self.kv.write(&namespace, node_id.as_str(), value)?;
        tracing::debug!(diagram_key = %diagram_key, node_id = %node_id, x = point.x, y = point.y, "saved position override");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PendingKey, PendingWrite>> {
        self.pending.lock().expect("override store lock poisoned")
    }
}
