// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::model::{NodeId, OrgGraph, RelationKind};

fn parent_adjacency(graph: &OrgGraph) -> (BTreeMap<&NodeId, Vec<&NodeId>>, BTreeMap<&NodeId, Vec<&NodeId>>) {
    let mut down: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
    let mut up: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
    for edge in graph.edges().iter().filter(|edge| edge.kind() == RelationKind::Parent) {
        down.entry(edge.source()).or_default().push(edge.target());
        up.entry(edge.target()).or_default().push(edge.source());
    }
    (down, up)
}

/// Everything below `node_id` along `parent` edges, with its distance, in breadth-first order.
///
/// `max_depth` limits the distance; the start node itself is not included.
pub fn subordinates(
    graph: &OrgGraph,
    node_id: &NodeId,
    max_depth: Option<usize>,
) -> Vec<(NodeId, usize)> {
    if !graph.contains_node(node_id) {
        return Vec::new();
    }
    let (down, _) = parent_adjacency(graph);

    let mut seen = BTreeSet::from([node_id]);
    let mut queue = VecDeque::from([(node_id, 0usize)]);
    let mut out = Vec::new();
    while let Some((current, distance)) = queue.pop_front() {
        if max_depth.is_some_and(|limit| distance >= limit) {
            continue;
        }
        for next in down.get(current).into_iter().flatten() {
            if seen.insert(*next) {
                out.push(((*next).clone(), distance + 1));
                queue.push_back((*next, distance + 1));
            }
        }
    }
    out
}

/// The superiors of `node_id`, nearest first, following the first `parent` edge at each step.
///
/// Stops at a root or when a cycle would revisit a node.
pub fn chain_of_command(graph: &OrgGraph, node_id: &NodeId) -> Vec<NodeId> {
    let (_, up) = parent_adjacency(graph);
    let mut seen = BTreeSet::from([node_id]);
    let mut chain = Vec::new();
    let mut current = node_id;
    while let Some(superior) = up.get(current).and_then(|parents| parents.first()) {
        if !seen.insert(*superior) {
            break;
        }
        chain.push((*superior).clone());
        current = *superior;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::{chain_of_command, subordinates};
    use crate::model::fixtures::{cyclic, graph, nid};
    use crate::model::RelationKind;

    fn ids(found: Vec<(crate::model::NodeId, usize)>) -> Vec<(String, usize)> {
        found.into_iter().map(|(id, d)| (id.into_string(), d)).collect()
    }

    #[test]
    fn subordinates_are_breadth_first_with_depth_limit() {
        let graph = graph(
            &["ceo", "cto", "cfo", "dev", "ops"],
            &[
                ("1", "ceo", "cto", RelationKind::Parent),
                ("2", "ceo", "cfo", RelationKind::Parent),
                ("3", "cto", "dev", RelationKind::Parent),
                ("4", "cfo", "ops", RelationKind::Functional),
            ],
        );

        assert_eq!(
            ids(subordinates(&graph, &nid("ceo"), None)),
            vec![("cto".to_owned(), 1), ("cfo".to_owned(), 1), ("dev".to_owned(), 2)]
        );
        assert_eq!(subordinates(&graph, &nid("ceo"), Some(1)).len(), 2);
        assert!(subordinates(&graph, &nid("missing"), None).is_empty());
    }

    #[test]
    fn chain_of_command_walks_up_and_survives_cycles() {
        let graph = cyclic();
        let chain = chain_of_command(&graph, &nid("y"));
        let chain = chain.iter().map(|id| id.as_str()).collect::<Vec<_>>();
        // y <- x, and x has two parents (root first in edge order).
        assert_eq!(chain, vec!["x", "root"]);

        let chain = chain_of_command(&graph, &nid("z"));
        assert_eq!(chain.iter().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["y", "x", "root"]);
        assert!(chain_of_command(&graph, &nid("loose")).is_empty());
    }
}
