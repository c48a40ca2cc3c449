// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph builder: validates adapter output into an `OrgGraph`.
//!
//! Building never fails. Problems in the input are recovered locally and reported in the
//! `BuildReport` so a diagram can always render the data that is consistent.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{EdgeId, EntityNode, NodeId, OrgGraph, RelationEdge, RelationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEndpoint {
    Source,
    Target,
}

/// An edge dropped because it referenced a node not in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub edge_id: EdgeId,
    pub kind: RelationKind,
    pub endpoint: EdgeEndpoint,
    pub missing_node_id: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub dangling: Vec<DanglingReference>,
    pub duplicate_nodes: Vec<NodeId>,
    pub collapsed_edges: Vec<EdgeId>,
    pub self_loops: Vec<EdgeId>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.duplicate_nodes.is_empty()
            && self.collapsed_edges.is_empty()
            && self.self_loops.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub graph: OrgGraph,
    pub report: BuildReport,
}

/// Assembles a graph from flat nodes and candidate edges.
///
/// - Duplicate node ids keep the first node.
/// - Edges with a missing endpoint are dropped and logged.
/// - Duplicate `(source, target, kind)` triples collapse onto the first edge; so do
///   duplicate edge ids.
/// - Self-loops are moved to `OrgGraph::self_loops` and never reach the layout engine.
pub fn build(nodes: Vec<EntityNode>, raw_edges: Vec<RelationEdge>) -> BuildOutcome {
    let mut report = BuildReport::default();

    let mut node_ids = BTreeSet::<NodeId>::new();
    let mut kept_nodes = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !node_ids.insert(node.id().clone()) {
            tracing::warn!(node_id = %node.id(), "dropping duplicate node");
            report.duplicate_nodes.push(node.id().clone());
            continue;
        }
        kept_nodes.push(node);
    }

    let mut seen_triples = BTreeSet::<(NodeId, NodeId, RelationKind)>::new();
    let mut seen_ids = BTreeSet::<EdgeId>::new();
    let mut edges = Vec::with_capacity(raw_edges.len());
    let mut self_loops = Vec::new();

    for edge in raw_edges {
        if let Some((endpoint, missing)) = missing_endpoint(&edge, &node_ids) {
            tracing::warn!(
                edge_id = %edge.id(),
                kind = %edge.kind(),
                endpoint = ?endpoint,
                missing_node_id = %missing,
                "dropping edge with dangling reference"
            );
            report.dangling.push(DanglingReference {
                edge_id: edge.id().clone(),
                kind: edge.kind(),
                endpoint,
                missing_node_id: missing,
            });
            continue;
        }

        let triple = (edge.source().clone(), edge.target().clone(), edge.kind());
        if seen_triples.contains(&triple) || seen_ids.contains(edge.id()) {
            tracing::debug!(edge_id = %edge.id(), "collapsing duplicate edge");
            report.collapsed_edges.push(edge.id().clone());
            continue;
        }
        seen_triples.insert(triple);
        seen_ids.insert(edge.id().clone());

        if edge.is_self_loop() {
            tracing::debug!(edge_id = %edge.id(), "excluding self-loop from layout edges");
            report.self_loops.push(edge.id().clone());
            self_loops.push(edge);
            continue;
        }
        edges.push(edge);
    }

    BuildOutcome { graph: OrgGraph::from_parts(kept_nodes, edges, self_loops), report }
}

fn missing_endpoint(
    edge: &RelationEdge,
    node_ids: &BTreeSet<NodeId>,
) -> Option<(EdgeEndpoint, NodeId)> {
    if !node_ids.contains(edge.source()) {
        return Some((EdgeEndpoint::Source, edge.source().clone()));
    }
    if !node_ids.contains(edge.target()) {
        return Some((EdgeEndpoint::Target, edge.target().clone()));
    }
    None
}
