// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::{ChangeEvent, EditCommand, EditError, EditState, Inverse, NodePatch, PendingChange};
use crate::model::{
    DiagramKey, EdgeId, EntityDetails, EntityKind, EntityNode, NodeId, OrgGraph, Point,
    RelationEdge, RelationKind,
};
use crate::source::{EntityWriter, SourceError};
use crate::store::OverrideStore;

/// Selection state machine over one diagram's graph.
pub struct EditController {
    graph: OrgGraph,
    state: EditState,
    diagram_key: DiagramKey,
    default_edge_kind: RelationKind,
    overrides: Option<Arc<OverrideStore>>,
    next_seq: u64,
}

impl std::fmt::Debug for EditController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditController")
            .field("diagram_key", &self.diagram_key)
            .field("state", &self.state)
            .field("nodes", &self.graph.nodes().len())
            .field("edges", &self.graph.edges().len())
            .finish_non_exhaustive()
    }
}

impl EditController {
    pub fn new(graph: OrgGraph, diagram_key: DiagramKey) -> Self {
        Self {
            graph,
            state: EditState::Idle,
            diagram_key,
            default_edge_kind: RelationKind::Parent,
            overrides: None,
            next_seq: 0,
        }
    }

    pub fn with_default_edge_kind(mut self, kind: RelationKind) -> Self {
        self.default_edge_kind = kind;
        self
    }

    /// Store receiving the canvas position of nodes created with `AddNode`.
    pub fn with_overrides(mut self, overrides: Arc<OverrideStore>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn graph(&self) -> &OrgGraph {
        &self.graph
    }

    pub fn into_graph(self) -> OrgGraph {
        self.graph
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.state.selection()
    }

    pub fn diagram_key(&self) -> &DiagramKey {
        &self.diagram_key
    }

    /// Applies `command` to the local graph.
    ///
    /// Returns the change to push upstream, or `None` when the command only moved the
    /// selection or was an intentional no-op (self-connect). Rejected commands leave the graph
    /// and the state untouched.
    pub fn apply(&mut self, command: EditCommand) -> Result<Option<PendingChange>, EditError> {
        match command {
            EditCommand::SelectNode(node_id) => {
                if !self.graph.contains_node(&node_id) {
                    return Err(EditError::UnknownNode { node_id });
                }
                self.state = EditState::NodeSelected(node_id);
                Ok(None)
            }
            EditCommand::ClearSelection => {
                self.state = EditState::Idle;
                Ok(None)
            }
            EditCommand::AddNode { kind, label, at } => self.add_node(kind, label, at).map(Some),
            EditCommand::DeleteSelected => {
                let node_id = self.require_selection("delete_selected")?;
                self.delete_node(&node_id).map(Some)
            }
            EditCommand::EditSelected(patch) => {
                let node_id = self.require_selection("edit_selected")?;
                self.edit_node(&node_id, &patch).map(Some)
            }
            EditCommand::Connect { source, target, kind } => {
                self.connect(source, target, kind.unwrap_or(self.default_edge_kind))
            }
            EditCommand::DeleteEdge(edge_id) => self.delete_edge(&edge_id).map(Some),
        }
    }

    /// Resolves an upstream write for `change`. On failure the change is rolled back locally.
    pub fn settle(
        &mut self,
        change: PendingChange,
        upstream: Result<(), SourceError>,
    ) -> Result<(), EditError> {
        match upstream {
            Ok(()) => Ok(()),
            Err(source) => {
                let event = change.event().name();
                tracing::warn!(
                    diagram_key = %self.diagram_key,
                    seq = change.seq(),
                    event,
                    error = %source,
                    "upstream write failed, rolling back"
                );
                self.rollback(&change);
                Err(EditError::WriteFailed { event, source })
            }
        }
    }

    /// Applies a command, pushes the change upstream and settles it.
    pub async fn dispatch(
        &mut self,
        command: EditCommand,
        writer: &dyn EntityWriter,
    ) -> Result<Option<ChangeEvent>, EditError> {
        let Some(change) = self.apply(command)? else {
            return Ok(None);
        };
        let upstream = push_upstream(change.event(), writer).await;
        let event = change.event().clone();
        self.settle(change, upstream)?;
        Ok(Some(event))
    }

    /// Replays the inverse of exactly one change. Later, unrelated changes stay intact.
    pub fn rollback(&mut self, change: &PendingChange) {
        match change.inverse().clone() {
            Inverse::RemoveNode { node_id } => {
                self.graph.remove_edges_touching(&node_id);
                self.graph.remove_self_loops_of(&node_id);
                self.graph.remove_node(&node_id);
                if self.selection() == Some(&node_id) {
                    self.state = EditState::Idle;
                }
            }
            Inverse::RestoreNode { index, node, edges, self_loops } => {
                if self.graph.contains_node(node.id()) {
                    return;
                }
                self.graph.insert_node(index, node);
                for (index, edge) in edges {
                    let endpoints_present = self.graph.contains_node(edge.source())
                        && self.graph.contains_node(edge.target());
                    if endpoints_present && self.graph.edge(edge.id()).is_none() {
                        self.graph.insert_edge(index, edge);
                    }
                }
                for edge in self_loops {
                    self.graph.push_self_loop(edge);
                }
            }
            Inverse::RestoreFields { node_id, revert } => {
                if let Some(node) = self.graph.node_mut(&node_id) {
                    revert.apply_to(node);
                }
            }
            Inverse::RemoveEdge { edge_id } => {
                self.graph.remove_edge(&edge_id);
            }
            Inverse::RestoreEdge { index, edge } => {
                let endpoints_present = self.graph.contains_node(edge.source())
                    && self.graph.contains_node(edge.target());
                if endpoints_present && self.graph.edge(edge.id()).is_none() {
                    self.graph.insert_edge(index, edge);
                }
            }
        }
    }

    fn require_selection(&self, command: &'static str) -> Result<NodeId, EditError> {
        match &self.state {
            EditState::NodeSelected(node_id) => Ok(node_id.clone()),
            EditState::Idle => Err(EditError::InvalidTransition { state: self.state.name(), command }),
        }
    }

    fn next_change(&mut self, event: ChangeEvent, inverse: Inverse) -> PendingChange {
        self.next_seq += 1;
        PendingChange::new(self.next_seq, event, inverse)
    }

    fn add_node(&mut self, kind: EntityKind, label: String, at: Point) -> Result<PendingChange, EditError> {
        if label.trim().is_empty() {
            return Err(EditError::BlankLabel);
        }

        let node_id = NodeId::fresh(kind.as_str());
        let node = EntityNode::new(node_id.clone(), label.trim(), EntityDetails::blank(kind));
        self.graph.push_node(node.clone());
        self.state = EditState::Idle;

        if let Some(overrides) = &self.overrides {
            if let Err(err) = overrides.save_now(&self.diagram_key, &node_id, at) {
                tracing::warn!(node_id = %node_id, error = %err, "could not store position of new node");
            }
        }

        tracing::debug!(diagram_key = %self.diagram_key, node_id = %node_id, "added node");
        let change = self.next_change(ChangeEvent::EntityCreated { node }, Inverse::RemoveNode { node_id });
        Ok(change.with_position(at))
    }

    fn delete_node(&mut self, node_id: &NodeId) -> Result<PendingChange, EditError> {
        let Some((index, node)) = self.graph.remove_node(node_id) else {
            return Err(EditError::UnknownNode { node_id: node_id.clone() });
        };
        let edges = self.graph.remove_edges_touching(node_id);
        let self_loops = self.graph.remove_self_loops_of(node_id);
        self.state = EditState::Idle;

        tracing::debug!(
            diagram_key = %self.diagram_key,
            node_id = %node_id,
            cascaded_edges = edges.len(),
            "deleted node"
        );
        let cascaded_edges = edges.iter().map(|(_, edge)| edge.id().clone()).collect();
        Ok(self.next_change(
            ChangeEvent::EntityDeleted { node: node.clone(), cascaded_edges },
            Inverse::RestoreNode { index, node, edges, self_loops },
        ))
    }

    fn edit_node(&mut self, node_id: &NodeId, patch: &NodePatch) -> Result<PendingChange, EditError> {
        if patch.label.as_deref().is_some_and(|label| label.trim().is_empty()) {
            return Err(EditError::BlankLabel);
        }
        let Some(node) = self.graph.node_mut(node_id) else {
            return Err(EditError::UnknownNode { node_id: node_id.clone() });
        };
        let revert = patch.revert_from(node);
        patch.apply_to(node);
        let updated = node.clone();
        self.state = EditState::Idle;

        Ok(self.next_change(
            ChangeEvent::EntityUpdated { node: updated },
            Inverse::RestoreFields { node_id: node_id.clone(), revert },
        ))
    }

    fn connect(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: RelationKind,
    ) -> Result<Option<PendingChange>, EditError> {
        if source == target {
            return Ok(None);
        }
        for node_id in [&source, &target] {
            if !self.graph.contains_node(node_id) {
                return Err(EditError::UnknownNode { node_id: node_id.clone() });
            }
        }
        if self.graph.has_relation(&source, &target, kind) {
            return Err(EditError::DuplicateRelation { source_id: source, target_id: target, kind });
        }

        let edge = RelationEdge::new(EdgeId::fresh("edge"), source, target, kind);
        let edge_id = edge.id().clone();
        self.graph.push_edge(edge.clone());
        tracing::debug!(diagram_key = %self.diagram_key, edge_id = %edge_id, kind = %kind, "connected nodes");
        Ok(Some(self.next_change(ChangeEvent::RelationCreated { edge }, Inverse::RemoveEdge { edge_id })))
    }

    fn delete_edge(&mut self, edge_id: &EdgeId) -> Result<PendingChange, EditError> {
        let Some((index, edge)) = self.graph.remove_edge(edge_id) else {
            return Err(EditError::UnknownEdge { edge_id: edge_id.clone() });
        };
        Ok(self.next_change(
            ChangeEvent::RelationDeleted { edge: edge.clone() },
            Inverse::RestoreEdge { index, edge },
        ))
    }
}

/// Sends one change event to the upstream entity store.
pub async fn push_upstream(event: &ChangeEvent, writer: &dyn EntityWriter) -> Result<(), SourceError> {
    match event {
        ChangeEvent::EntityCreated { node } => writer.create_entity(node).await,
        ChangeEvent::EntityUpdated { node } => writer.update_entity(node).await,
        ChangeEvent::EntityDeleted { node, .. } => writer.delete_entity(node.id()).await,
        ChangeEvent::RelationCreated { edge } => writer.create_relation(edge).await,
        ChangeEvent::RelationDeleted { edge } => writer.delete_relation(edge.id()).await,
    }
}
