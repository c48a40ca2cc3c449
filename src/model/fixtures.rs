// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity::{EntityDetails, EntityKind, EntityNode};
use super::graph::{OrgGraph, RelationEdge, RelationKind};
use super::ids::{EdgeId, NodeId};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn division(id: &str) -> EntityNode {
    EntityNode::new(nid(id), id, EntityDetails::blank(EntityKind::Division))
}

pub(crate) fn edge(id: &str, source: &str, target: &str, kind: RelationKind) -> RelationEdge {
    RelationEdge::new(eid(id), nid(source), nid(target), kind)
}

/// Nodes and edges are taken as-is; callers must keep them consistent.
pub(crate) fn graph(nodes: &[&str], edges: &[(&str, &str, &str, RelationKind)]) -> OrgGraph {
    let nodes = nodes.iter().map(|id| division(id)).collect();
    let edges = edges
        .iter()
        .map(|(id, source, target, kind)| edge(id, source, target, *kind))
        .collect();
    OrgGraph::from_parts(nodes, edges, Vec::new())
}

/// A -> B, A -> C, B -> D, C -> D (all `parent`).
pub(crate) fn small_dag() -> OrgGraph {
    graph(
        &["a", "b", "c", "d"],
        &[
            ("e:ab", "a", "b", RelationKind::Parent),
            ("e:ac", "a", "c", RelationKind::Parent),
            ("e:bd", "b", "d", RelationKind::Parent),
            ("e:cd", "c", "d", RelationKind::Parent),
        ],
    )
}

/// root -> x -> y -> z -> x (a `parent` cycle below one root) plus a loose node.
pub(crate) fn cyclic() -> OrgGraph {
    graph(
        &["root", "x", "y", "z", "loose"],
        &[
            ("e:rx", "root", "x", RelationKind::Parent),
            ("e:xy", "x", "y", RelationKind::Parent),
            ("e:yz", "y", "z", RelationKind::Parent),
            ("e:zx", "z", "x", RelationKind::Parent),
        ],
    )
}
