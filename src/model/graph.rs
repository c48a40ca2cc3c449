// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityNode;
use super::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Parent,
    BelongsTo,
    Functional,
}

impl RelationKind {
    /// Whether edges of this kind participate in rank assignment.
    ///
    /// Only `parent` edges do. `belongs_to` (division -> position) and
    /// `functional` edges are drawn across layers freely.
    pub fn affects_rank(self) -> bool {
        matches!(self, Self::Parent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::BelongsTo => "belongs_to",
            Self::Functional => "functional",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-type of a functional relation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Functional,
    Administrative,
    Project,
    Territorial,
    Mentoring,
}

impl RelationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Administrative => "administrative",
            Self::Project => "project",
            Self::Territorial => "territorial",
            Self::Mentoring => "mentoring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEdge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    kind: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relation_type: Option<RelationType>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl RelationEdge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, kind: RelationKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
            label: None,
            relation_type: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_label<T: Into<String>>(mut self, label: Option<T>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn with_relation_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = Some(relation_type);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn relation_type(&self) -> Option<RelationType> {
        self.relation_type
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

/// The in-memory graph one diagram session works on.
///
/// Node ids are unique and every edge in `edges` references two present, distinct nodes.
/// Self-loops are kept aside in `self_loops` so they never reach the layout engine.
/// Insertion order is meaningful: it is the layout's tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrgGraph {
    nodes: Vec<EntityNode>,
    edges: Vec<RelationEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    self_loops: Vec<RelationEdge>,
}

impl OrgGraph {
    pub(crate) fn from_parts(
        nodes: Vec<EntityNode>,
        edges: Vec<RelationEdge>,
        self_loops: Vec<RelationEdge>,
    ) -> Self {
        Self { nodes, edges, self_loops }
    }

    pub fn nodes(&self) -> &[EntityNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn self_loops(&self) -> &[RelationEdge] {
        &self.self_loops
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&EntityNode> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut EntityNode> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&RelationEdge> {
        self.edges.iter().find(|edge| edge.id() == edge_id)
    }

    pub fn has_relation(&self, source: &NodeId, target: &NodeId, kind: RelationKind) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source() == source && edge.target() == target && edge.kind() == kind)
    }

    /// Position index of every node, keyed by id.
    pub fn node_indices(&self) -> BTreeMap<&NodeId, usize> {
        self.nodes.iter().enumerate().map(|(idx, node)| (node.id(), idx)).collect()
    }

    pub fn push_node(&mut self, node: EntityNode) {
        self.nodes.push(node);
    }

    pub fn insert_node(&mut self, index: usize, node: EntityNode) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    /// Removes a node without touching edges; returns its former index.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Option<(usize, EntityNode)> {
        let index = self.nodes.iter().position(|node| node.id() == node_id)?;
        Some((index, self.nodes.remove(index)))
    }

    pub fn push_edge(&mut self, edge: RelationEdge) {
        self.edges.push(edge);
    }

    pub fn insert_edge(&mut self, index: usize, edge: RelationEdge) {
        let index = index.min(self.edges.len());
        self.edges.insert(index, edge);
    }

    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Option<(usize, RelationEdge)> {
        let index = self.edges.iter().position(|edge| edge.id() == edge_id)?;
        Some((index, self.edges.remove(index)))
    }

    pub fn push_self_loop(&mut self, edge: RelationEdge) {
        self.self_loops.push(edge);
    }

    /// Removes every edge referencing `node_id`.
    ///
    /// Returned edges carry their former index in ascending order, so reinserting them in
    /// order restores the original edge list.
    pub fn remove_edges_touching(&mut self, node_id: &NodeId) -> Vec<(usize, RelationEdge)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.edges.len());
        for (index, edge) in std::mem::take(&mut self.edges).into_iter().enumerate() {
            if edge.touches(node_id) {
                removed.push((index, edge));
            } else {
                kept.push(edge);
            }
        }
        self.edges = kept;
        removed
    }

    /// Removes the self-loop markers on `node_id`.
    pub fn remove_self_loops_of(&mut self, node_id: &NodeId) -> Vec<RelationEdge> {
        let (removed, kept) = std::mem::take(&mut self.self_loops)
            .into_iter()
            .partition(|edge| edge.touches(node_id));
        self.self_loops = kept;
        removed
    }
}
