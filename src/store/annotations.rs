// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::{annotations_namespace, KvStore, StoreError};
use crate::model::{Annotation, DiagramKey, NodeId};

/// Append-only, per-node annotation lists, scoped by diagram key.
///
/// Each node's list is stored as one JSON array under the node id.
pub struct AnnotationStore {
    kv: Arc<dyn KvStore>,
    // Serializes read-modify-write of a node list.
    write_guard: Mutex<()>,
}

impl std::fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStore").finish_non_exhaustive()
    }
}

impl AnnotationStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, write_guard: Mutex::new(()) }
    }

    pub fn list(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
    ) -> Result<Vec<Annotation>, StoreError> {
        let namespace = annotations_namespace(diagram_key);
        let mut entries = self.kv.read_all(&namespace)?;
        match entries.remove(node_id.as_str()) {
            Some(value) => decode(&namespace, node_id.as_str(), value),
            None => Ok(Vec::new()),
        }
    }

    /// All annotation lists of one diagram, keyed by node id.
    pub fn list_for_diagram(
        &self,
        diagram_key: &DiagramKey,
    ) -> Result<BTreeMap<NodeId, Vec<Annotation>>, StoreError> {
        let namespace = annotations_namespace(diagram_key);
        let mut lists = BTreeMap::new();
        for (key, value) in self.kv.read_all(&namespace)? {
            let Ok(node_id) = NodeId::new(key.as_str()) else {
                tracing::warn!(namespace = %namespace, key = %key, "skipping annotations with invalid node id");
                continue;
            };
            match decode(&namespace, &key, value) {
                Ok(list) => {
                    lists.insert(node_id, list);
                }
                Err(err) => {
                    tracing::warn!(namespace = %namespace, key = %key, error = %err, "skipping malformed annotation list");
                }
            }
        }
        Ok(lists)
    }

    /// Appends a new, incomplete annotation stamped with the current time.
    ///
    /// Blank text is a no-op and returns `Ok(None)`.
    pub fn append(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
        text: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        self.append_at(diagram_key, node_id, text, Utc::now())
    }

    pub fn append_at(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Annotation>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let _guard = self.write_guard.lock().expect("annotation store lock poisoned");
        let mut annotations = self.list(diagram_key, node_id)?;
        let annotation = Annotation::new(diagram_key.clone(), node_id.clone(), text, created_at);
        annotations.push(annotation.clone());
        self.store(diagram_key, node_id, &annotations)?;
        tracing::debug!(diagram_key = %diagram_key, node_id = %node_id, count = annotations.len(), "appended annotation");
        Ok(Some(annotation))
    }

    /// Flips the `completed` flag of the annotation at `index` and returns the updated entry.
    pub fn toggle_complete(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
        index: usize,
    ) -> Result<Annotation, StoreError> {
        let _guard = self.write_guard.lock().expect("annotation store lock poisoned");
        let mut annotations = self.list(diagram_key, node_id)?;
        let len = annotations.len();
        let Some(annotation) = annotations.get_mut(index) else {
            return Err(StoreError::AnnotationOutOfRange {
                diagram_key: diagram_key.clone(),
                node_id: node_id.clone(),
                index,
                len,
            });
        };
        annotation.completed = !annotation.completed;
        let updated = annotation.clone();
        self.store(diagram_key, node_id, &annotations)?;
        Ok(updated)
    }

    fn store(
        &self,
        diagram_key: &DiagramKey,
        node_id: &NodeId,
        annotations: &[Annotation],
    ) -> Result<(), StoreError> {
        let namespace = annotations_namespace(diagram_key);
        let value = serde_json::to_value(annotations).map_err(|source| StoreError::Encode {
            namespace: namespace.clone(),
            key: node_id.to_string(),
            source,
        })?;
        self.kv.write(&namespace, node_id.as_str(), value)
    }
}

fn decode(namespace: &str, key: &str, value: serde_json::Value) -> Result<Vec<Annotation>, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Decode {
        namespace: namespace.to_owned(),
        key: key.to_owned(),
        source,
    })
}
