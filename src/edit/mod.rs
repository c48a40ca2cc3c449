// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive editing of one in-memory org graph.
//!
//! Commands mutate the graph synchronously and optimistically. Each mutation yields a
//! `PendingChange` carrying the upstream event and its local inverse; if the upstream write
//! fails, the controller replays that inverse and reports a retryable error.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::{EdgeId, EntityKind, EntityNode, NodeId, Point, RelationEdge, RelationKind};
use crate::source::SourceError;

mod controller;

pub use controller::{push_upstream, EditController};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    NodeSelected(NodeId),
}

impl EditState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::NodeSelected(_) => "node_selected",
        }
    }

    pub fn selection(&self) -> Option<&NodeId> {
        match self {
            Self::Idle => None,
            Self::NodeSelected(node_id) => Some(node_id),
        }
    }
}

/// Field changes for the selected node. `None` leaves a field untouched; for optional fields
/// `Some(None)` clears it. Metadata entries set to `None` are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub subtitle: Option<Option<String>>,
    pub avatar_ref: Option<Option<String>>,
    pub metadata: BTreeMap<String, Option<String>>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.subtitle.is_none()
            && self.avatar_ref.is_none()
            && self.metadata.is_empty()
    }

    pub(crate) fn apply_to(&self, node: &mut EntityNode) {
        if let Some(label) = &self.label {
            node.set_label(label.clone());
        }
        if let Some(subtitle) = &self.subtitle {
            node.set_subtitle(subtitle.clone());
        }
        if let Some(avatar_ref) = &self.avatar_ref {
            node.set_avatar_ref(avatar_ref.clone());
        }
        for (key, value) in &self.metadata {
            match value {
                Some(value) => node.insert_metadata(key.clone(), value.clone()),
                None => {
                    node.metadata_mut().remove(key);
                }
            }
        }
    }

    /// The patch that puts back `node`'s current values for the fields this patch touches.
    pub(crate) fn revert_from(&self, node: &EntityNode) -> NodePatch {
        NodePatch {
            label: self.label.as_ref().map(|_| node.label().to_owned()),
            subtitle: self.subtitle.as_ref().map(|_| node.subtitle().map(ToOwned::to_owned)),
            avatar_ref: self.avatar_ref.as_ref().map(|_| node.avatar_ref().map(ToOwned::to_owned)),
            metadata: self
                .metadata
                .keys()
                .map(|key| (key.clone(), node.metadata().get(key).cloned()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    SelectNode(NodeId),
    ClearSelection,
    AddNode { kind: EntityKind, label: String, at: Point },
    DeleteSelected,
    EditSelected(NodePatch),
    /// Connect gesture. `kind` falls back to the controller's default edge kind.
    Connect { source: NodeId, target: NodeId, kind: Option<RelationKind> },
    DeleteEdge(EdgeId),
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectNode(_) => "select_node",
            Self::ClearSelection => "clear_selection",
            Self::AddNode { .. } => "add_node",
            Self::DeleteSelected => "delete_selected",
            Self::EditSelected(_) => "edit_selected",
            Self::Connect { .. } => "connect",
            Self::DeleteEdge(_) => "delete_edge",
        }
    }
}

/// A structural change the upstream entity store has to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChangeEvent {
    EntityCreated { node: EntityNode },
    EntityUpdated { node: EntityNode },
    EntityDeleted { node: EntityNode, cascaded_edges: Vec<EdgeId> },
    RelationCreated { edge: RelationEdge },
    RelationDeleted { edge: RelationEdge },
}

impl ChangeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EntityCreated { .. } => "entity_created",
            Self::EntityUpdated { .. } => "entity_updated",
            Self::EntityDeleted { .. } => "entity_deleted",
            Self::RelationCreated { .. } => "relation_created",
            Self::RelationDeleted { .. } => "relation_deleted",
        }
    }
}

/// Local undo record of one optimistic mutation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Inverse {
    RemoveNode { node_id: NodeId },
    RestoreNode {
        index: usize,
        node: EntityNode,
        edges: Vec<(usize, RelationEdge)>,
        self_loops: Vec<RelationEdge>,
    },
    RestoreFields { node_id: NodeId, revert: NodePatch },
    RemoveEdge { edge_id: EdgeId },
    RestoreEdge { index: usize, edge: RelationEdge },
}

/// A mutation already applied locally and not yet confirmed upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    seq: u64,
    event: ChangeEvent,
    inverse: Inverse,
    position: Option<Point>,
}

impl PendingChange {
    pub(crate) fn new(seq: u64, event: ChangeEvent, inverse: Inverse) -> Self {
        Self { seq, event, inverse, position: None }
    }

    pub(crate) fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Monotonic sequence number within one controller.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn event(&self) -> &ChangeEvent {
        &self.event
    }

    /// Canvas position of a node created by this change.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub(crate) fn inverse(&self) -> &Inverse {
        &self.inverse
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("cannot {command} while {state}")]
    InvalidTransition { state: &'static str, command: &'static str },

    #[error("node not found (id={node_id})")]
    UnknownNode { node_id: NodeId },

    #[error("edge not found (id={edge_id})")]
    UnknownEdge { edge_id: EdgeId },

    #[error("a {kind} relation from {source_id} to {target_id} already exists")]
    DuplicateRelation { source_id: NodeId, target_id: NodeId, kind: RelationKind },

    #[error("label must not be blank")]
    BlankLabel,

    /// The optimistic change was rolled back locally.
    #[error("saving {event} failed and was rolled back: {source}")]
    WriteFailed {
        event: &'static str,
        #[source]
        source: SourceError,
    },
}

impl EditError {
    /// Whether the user can retry the action that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::NodeSelected(node_id) => write!(f, "node_selected({node_id})"),
        }
    }
}

#[cfg(test)]
mod tests;
