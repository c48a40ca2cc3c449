// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scatter::scatter;
use crate::model::{EdgeId, NodeId, OrgGraph, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub node_gap: f64,
    pub rank_gap: f64,
    /// Crossing-reduction sweeps, alternating top-down and bottom-up.
    pub ordering_passes: usize,
    /// Deepest rank the layered layout accepts before falling back.
    pub max_rank: usize,
    pub scatter_seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 90.0,
            node_gap: 40.0,
            rank_gap: 80.0,
            ordering_passes: 4,
            max_rank: 10_000,
            scatter_seed: 0x5eed_0c4a,
        }
    }
}

impl LayoutConfig {
    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        let sizes = [
            ("node_width", self.node_width, false),
            ("node_height", self.node_height, false),
            ("node_gap", self.node_gap, true),
            ("rank_gap", self.rank_gap, true),
        ];
        for (field, value, zero_ok) in sizes {
            let in_range = if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !value.is_finite() || !in_range {
                return Err(LayoutError::InvalidSpacing { field, value });
            }
        }
        Ok(())
    }

    fn column_stride(&self) -> f64 {
        self.node_width + self.node_gap
    }

    fn rank_stride(&self) -> f64 {
        self.node_height + self.rank_gap
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid layout spacing: {field} = {value}")]
    InvalidSpacing { field: &'static str, value: f64 },

    #[error("node {node_id} would be placed at rank {rank}, deeper than the limit {max_rank}")]
    RankLimitExceeded { node_id: NodeId, rank: usize, max_rank: usize },

    #[error("rank assignment left {remaining} node(s) unranked after cycle breaking")]
    UnbrokenCycle { remaining: usize },

    #[error("computed a non-finite coordinate for node {node_id}")]
    NonFiniteCoordinate { node_id: NodeId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub rank: usize,
    pub order: usize,
    /// The node lies on a `parent` cycle that was broken for rank computation.
    pub in_cycle: bool,
    /// The layered layout failed and this node was scattered.
    pub layout_failed: bool,
}

impl NodeLayout {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Result of `layout`. Node entries follow the graph's node order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    ok: bool,
    nodes: Vec<NodeLayout>,
    index: BTreeMap<NodeId, usize>,
    layers: Vec<Vec<NodeId>>,
    reversed_edges: Vec<EdgeId>,
    failure: Option<LayoutError>,
}

impl LayoutOutcome {
    pub(crate) fn new(
        nodes: Vec<NodeLayout>,
        layers: Vec<Vec<NodeId>>,
        reversed_edges: Vec<EdgeId>,
        failure: Option<LayoutError>,
    ) -> Self {
        let index = nodes.iter().enumerate().map(|(idx, node)| (node.id.clone(), idx)).collect();
        Self { ok: failure.is_none(), nodes, index, layers, reversed_edges, failure }
    }

    /// `false` when the layered layout failed and every node was scattered.
    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&NodeLayout> {
        self.index.get(node_id).and_then(|idx| self.nodes.get(*idx))
    }

    /// Node ids per rank, in final in-rank order. Empty when the layout failed.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Edges whose direction was flipped for rank computation only.
    pub fn reversed_edges(&self) -> &[EdgeId] {
        &self.reversed_edges
    }

    pub fn failure(&self) -> Option<&LayoutError> {
        self.failure.as_ref()
    }

    pub fn cycle_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().filter(|node| node.in_cycle).map(|node| &node.id)
    }
}

/// Deterministic layered layout for org graphs.
///
/// - Breaks `parent` cycles by reversing DFS back-edges (computation only).
/// - Assigns ranks by longest path from the roots.
/// - Orders each rank by the median of adjacent-rank neighbours, alternating sweeps, keeping
///   the ordering with the fewest crossings. Ties fall back to graph input order.
/// - Maps rank/order to coordinates with every rank centred on the widest one.
///
/// Never fails: if the layered pipeline errors, every node is scattered and flagged and
/// `ok()` reports `false`.
pub fn layout(graph: &OrgGraph, config: &LayoutConfig) -> LayoutOutcome {
    match layout_layered(graph, config) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, nodes = graph.nodes().len(), "layered layout failed, scattering nodes");
            scatter(graph, config, err)
        }
    }
}

/// Rank-affecting edges as dense index pairs.
struct RankEdges {
    /// `(source, target, edge index in graph.edges())`, logical direction.
    logical: Vec<(usize, usize, usize)>,
}

impl RankEdges {
    fn collect(graph: &OrgGraph, index: &BTreeMap<&NodeId, usize>) -> Self {
        let logical = graph
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.kind().affects_rank() && !edge.is_self_loop())
            .filter_map(|(edge_idx, edge)| {
                let source = *index.get(edge.source())?;
                let target = *index.get(edge.target())?;
                Some((source, target, edge_idx))
            })
            .collect();
        Self { logical }
    }
}

struct CycleBreak {
    /// Indices into `RankEdges::logical` that were reversed.
    reversed: BTreeSet<usize>,
    in_cycle: Vec<bool>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnStack,
    Done,
}

/// Iterative DFS in node input order; every edge to a node on the current stack is a back
/// edge and gets reversed. Cycle members are the nodes of non-trivial strongly connected
/// components, which also covers cycles closed through already finished nodes.
fn break_cycles(node_count: usize, edges: &RankEdges) -> CycleBreak {
    let mut outgoing = vec![Vec::<(usize, usize)>::new(); node_count];
    for (slot, (source, target, _)) in edges.logical.iter().enumerate() {
        outgoing[*source].push((*target, slot));
    }

    let mut state = vec![Visit::New; node_count];
    let mut frames = Vec::<(usize, usize)>::new();
    let mut reversed = BTreeSet::new();

    for start in 0..node_count {
        if state[start] != Visit::New {
            continue;
        }
        state[start] = Visit::OnStack;
        frames.push((start, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, cursor) = *frame;
            let Some(&(next, slot)) = outgoing[node].get(cursor) else {
                frames.pop();
                state[node] = Visit::Done;
                continue;
            };
            frame.1 += 1;

            match state[next] {
                Visit::New => {
                    state[next] = Visit::OnStack;
                    frames.push((next, 0));
                }
                Visit::OnStack => {
                    reversed.insert(slot);
                }
                Visit::Done => {}
            }
        }
    }

    let in_cycle = cycle_members(&outgoing);
    CycleBreak { reversed, in_cycle }
}

/// Marks every node of a strongly connected component with two or more nodes (iterative
/// Tarjan).
fn cycle_members(outgoing: &[Vec<(usize, usize)>]) -> Vec<bool> {
    let node_count = outgoing.len();
    let mut order = vec![usize::MAX; node_count];
    let mut low = vec![0usize; node_count];
    let mut on_stack = vec![false; node_count];
    let mut stack = Vec::<usize>::new();
    let mut frames = Vec::<(usize, usize)>::new();
    let mut next_order = 0usize;
    let mut members = vec![false; node_count];

    for start in 0..node_count {
        if order[start] != usize::MAX {
            continue;
        }
        order[start] = next_order;
        low[start] = next_order;
        next_order += 1;
        stack.push(start);
        on_stack[start] = true;
        frames.push((start, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, cursor) = *frame;
            if let Some(&(next, _)) = outgoing[node].get(cursor) {
                frame.1 += 1;
                if order[next] == usize::MAX {
                    order[next] = next_order;
                    low[next] = next_order;
                    next_order += 1;
                    stack.push(next);
                    on_stack[next] = true;
                    frames.push((next, 0));
                } else if on_stack[next] {
                    low[node] = low[node].min(order[next]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                low[parent] = low[parent].min(low[node]);
            }
            if low[node] == order[node] {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                if component.len() > 1 {
                    for member in component {
                        members[member] = true;
                    }
                }
            }
        }
    }
    members
}

/// Longest-path ranking over the acyclic edge set. Roots (and unconnected nodes) get rank 0.
fn assign_ranks(
    graph: &OrgGraph,
    acyclic: &[(usize, usize)],
    config: &LayoutConfig,
) -> Result<Vec<usize>, LayoutError> {
    let node_count = graph.nodes().len();
    let mut indegree = vec![0usize; node_count];
    let mut outgoing = vec![Vec::<usize>::new(); node_count];
    for (source, target) in acyclic {
        outgoing[*source].push(*target);
        indegree[*target] += 1;
    }

    let mut ready = (0..node_count).filter(|idx| indegree[*idx] == 0).collect::<BTreeSet<_>>();
    let mut ranks = vec![0usize; node_count];
    let mut visited = 0usize;

    while let Some(node) = ready.pop_first() {
        visited += 1;
        for target in &outgoing[node] {
            let candidate = ranks[node].checked_add(1).filter(|rank| *rank <= config.max_rank);
            let Some(candidate) = candidate else {
                return Err(LayoutError::RankLimitExceeded {
                    node_id: graph.nodes()[*target].id().clone(),
                    rank: ranks[node].saturating_add(1),
                    max_rank: config.max_rank,
                });
            };
            ranks[*target] = ranks[*target].max(candidate);
            indegree[*target] -= 1;
            if indegree[*target] == 0 {
                ready.insert(*target);
            }
        }
    }

    if visited != node_count {
        return Err(LayoutError::UnbrokenCycle { remaining: node_count - visited });
    }
    Ok(ranks)
}

fn median(mut values: Vec<usize>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid] as f64)
    } else {
        Some((values[mid - 1] + values[mid]) as f64 / 2.0)
    }
}

/// Reorders `layer` by the median position of each node's neighbours in the reference rank.
/// Nodes without such neighbours keep their current slot as key.
fn sort_layer_by_median(layer: &mut [usize], neighbours: &[Vec<usize>], reference_pos: &[usize]) {
    let keys = layer
        .iter()
        .enumerate()
        .map(|(slot, node)| {
            let positions = neighbours[*node].iter().map(|n| reference_pos[*n]).collect();
            (*node, median(positions).unwrap_or(slot as f64))
        })
        .collect::<BTreeMap<_, _>>();

    layer.sort_by(|a, b| keys[a].total_cmp(&keys[b]).then_with(|| a.cmp(b)));
}

fn count_crossings(layers: &[Vec<usize>], down: &[Vec<usize>], position: &[usize]) -> usize {
    let mut crossings = 0usize;
    for lower in layers.iter().skip(1) {
        let mut segments = Vec::<(usize, usize)>::new();
        for node in lower {
            for upper in &down[*node] {
                segments.push((position[*upper], position[*node]));
            }
        }
        for (i, (a_top, a_bottom)) in segments.iter().enumerate() {
            for (b_top, b_bottom) in &segments[i + 1..] {
                if (a_top < b_top && a_bottom > b_bottom) || (a_top > b_top && a_bottom < b_bottom)
                {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

fn refresh_positions(layers: &[Vec<usize>], position: &mut [usize]) {
    for layer in layers {
        for (slot, node) in layer.iter().enumerate() {
            position[*node] = slot;
        }
    }
}

fn order_layers(
    ranks: &[usize],
    acyclic: &[(usize, usize)],
    passes: usize,
) -> Vec<Vec<usize>> {
    let node_count = ranks.len();
    let depth = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers = vec![Vec::<usize>::new(); depth];
    for (node, rank) in ranks.iter().enumerate() {
        layers[*rank].push(node);
    }

    // Only edges between adjacent ranks steer the ordering.
    let mut down = vec![Vec::<usize>::new(); node_count];
    let mut up = vec![Vec::<usize>::new(); node_count];
    for (source, target) in acyclic {
        if ranks[*target] == ranks[*source] + 1 {
            down[*target].push(*source);
            up[*source].push(*target);
        }
    }

    let mut position = vec![0usize; node_count];
    refresh_positions(&layers, &mut position);
    let mut best = layers.clone();
    let mut best_crossings = count_crossings(&layers, &down, &position);

    for pass in 0..passes {
        if best_crossings == 0 {
            break;
        }
        if pass % 2 == 0 {
            for rank in 1..layers.len() {
                sort_layer_by_median(&mut layers[rank], &down, &position);
                refresh_positions(&layers[rank..=rank], &mut position);
            }
        } else {
            for rank in (0..layers.len().saturating_sub(1)).rev() {
                sort_layer_by_median(&mut layers[rank], &up, &position);
                refresh_positions(&layers[rank..=rank], &mut position);
            }
        }

        let crossings = count_crossings(&layers, &down, &position);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }

    best
}

pub(crate) fn layout_layered(
    graph: &OrgGraph,
    config: &LayoutConfig,
) -> Result<LayoutOutcome, LayoutError> {
    config.validate()?;

    let node_count = graph.nodes().len();
    let index = graph.node_indices();
    let rank_edges = RankEdges::collect(graph, &index);
    let cycles = break_cycles(node_count, &rank_edges);

    let acyclic = rank_edges
        .logical
        .iter()
        .enumerate()
        .map(|(slot, (source, target, _))| {
            if cycles.reversed.contains(&slot) {
                (*target, *source)
            } else {
                (*source, *target)
            }
        })
        .collect::<Vec<_>>();

    let reversed_edges = cycles
        .reversed
        .iter()
        .map(|slot| graph.edges()[rank_edges.logical[*slot].2].id().clone())
        .collect::<Vec<_>>();
    for edge_id in &reversed_edges {
        tracing::debug!(edge_id = %edge_id, "reversed back edge for rank computation");
    }

    let ranks = assign_ranks(graph, &acyclic, config)?;
    let layers = order_layers(&ranks, &acyclic, config.ordering_passes);

    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let row_width = |count: usize| {
        if count == 0 {
            0.0
        } else {
            count as f64 * config.node_width + (count - 1) as f64 * config.node_gap
        }
    };
    let total_width = row_width(widest);

    let mut placed = vec![None::<NodeLayout>; node_count];
    for (rank, layer) in layers.iter().enumerate() {
        let offset = (total_width - row_width(layer.len())) / 2.0;
        for (order, node) in layer.iter().enumerate() {
            let id = graph.nodes()[*node].id().clone();
            let x = offset + order as f64 * config.column_stride();
            let y = rank as f64 * config.rank_stride();
            if !x.is_finite() || !y.is_finite() {
                return Err(LayoutError::NonFiniteCoordinate { node_id: id });
            }
            placed[*node] = Some(NodeLayout {
                id,
                x,
                y,
                rank,
                order,
                in_cycle: cycles.in_cycle[*node],
                layout_failed: false,
            });
        }
    }

    let nodes = placed.into_iter().flatten().collect::<Vec<_>>();
    let layer_ids = layers
        .iter()
        .map(|layer| layer.iter().map(|node| graph.nodes()[*node].id().clone()).collect())
        .collect();

    Ok(LayoutOutcome::new(nodes, layer_ids, reversed_edges, None))
}

#[cfg(test)]
mod tests {
    use super::{layout, layout_layered, LayoutConfig, LayoutError};
    use crate::adapter::{normalize, AdapterMode};
    use crate::builder::build;
    use crate::model::fixtures::{cyclic, graph, nid, small_dag};
    use crate::model::{OrgGraph, RelationKind};
    use crate::source::fixtures::hierarchy_divisions_positions;
    use crate::source::RawEntities;

    fn rank_of(outcome: &super::LayoutOutcome, id: &str) -> usize {
        outcome.get(&nid(id)).expect("node placed").rank
    }

    fn assert_parent_edges_descend(graph: &OrgGraph, outcome: &super::LayoutOutcome) {
        for edge in graph.edges().iter().filter(|e| e.kind().affects_rank()) {
            let source = outcome.get(edge.source()).unwrap().rank;
            let target = outcome.get(edge.target()).unwrap().rank;
            assert!(target > source, "edge {} does not descend", edge.id());
        }
    }

    #[test]
    fn assigns_longest_path_ranks_for_a_simple_dag() {
        let graph = small_dag();
        let outcome = layout(&graph, &LayoutConfig::default());

        assert!(outcome.ok());
        assert_eq!(rank_of(&outcome, "a"), 0);
        assert_eq!(rank_of(&outcome, "b"), 1);
        assert_eq!(rank_of(&outcome, "c"), 1);
        assert_eq!(rank_of(&outcome, "d"), 2);
        assert_parent_edges_descend(&graph, &outcome);
    }

    #[test]
    fn longest_path_wins_over_shortcut() {
        let graph = graph(
            &["a", "b", "c"],
            &[
                ("ab", "a", "b", RelationKind::Parent),
                ("bc", "b", "c", RelationKind::Parent),
                ("ac", "a", "c", RelationKind::Parent),
            ],
        );
        let outcome = layout(&graph, &LayoutConfig::default());
        assert_eq!(rank_of(&outcome, "c"), 2);
        assert_parent_edges_descend(&graph, &outcome);
    }

    #[test]
    fn reference_hierarchy_ranks_ignore_belongs_to() {
        let (divisions, positions) = hierarchy_divisions_positions();
        let raw = RawEntities::complete(divisions, positions, Vec::new(), Vec::new());
        let normalized = normalize(&raw, AdapterMode::Positions);
        let built = build(normalized.nodes, normalized.edges);

        let outcome = layout(&built.graph, &LayoutConfig::default());

        assert_eq!(rank_of(&outcome, "division:d1"), 0);
        assert_eq!(rank_of(&outcome, "position:p1"), 0);
        assert_eq!(rank_of(&outcome, "division:d2"), 1);
        assert_eq!(rank_of(&outcome, "position:p2"), 1);
    }

    #[test]
    fn non_rank_edges_do_not_create_layers() {
        let graph = graph(
            &["a", "b"],
            &[
                ("ab", "a", "b", RelationKind::Functional),
                ("ba", "b", "a", RelationKind::BelongsTo),
            ],
        );
        let outcome = layout(&graph, &LayoutConfig::default());
        assert_eq!(rank_of(&outcome, "a"), 0);
        assert_eq!(rank_of(&outcome, "b"), 0);
        assert!(outcome.reversed_edges().is_empty());
    }

    #[test]
    fn cycles_are_broken_and_every_cycle_node_is_flagged() {
        let graph = cyclic();
        let outcome = layout(&graph, &LayoutConfig::default());

        assert!(outcome.ok());
        assert_eq!(outcome.nodes().len(), graph.nodes().len());
        let mut flagged = outcome.cycle_nodes().map(|id| id.as_str()).collect::<Vec<_>>();
        flagged.sort();
        assert_eq!(flagged, vec!["x", "y", "z"]);
        assert_eq!(outcome.reversed_edges().len(), 1);
        assert_eq!(outcome.reversed_edges()[0].as_str(), "e:zx");
        assert!(!outcome.get(&nid("root")).unwrap().in_cycle);

        // The logical edge z -> x stays in the graph unchanged.
        let zx = graph.edges().iter().find(|e| e.id().as_str() == "e:zx").unwrap();
        assert_eq!(zx.source().as_str(), "z");
        assert_eq!(zx.target().as_str(), "x");
    }

    #[test]
    fn cycles_closed_through_finished_nodes_are_flagged() {
        // a <-> b, plus a -> c -> b: c sits on the cycle a -> c -> b -> a.
        let graph = graph(
            &["a", "b", "c", "free"],
            &[
                ("e:ab", "a", "b", RelationKind::Parent),
                ("e:ba", "b", "a", RelationKind::Parent),
                ("e:ac", "a", "c", RelationKind::Parent),
                ("e:cb", "c", "b", RelationKind::Parent),
            ],
        );
        let outcome = layout(&graph, &LayoutConfig::default());

        assert!(outcome.ok());
        let mut flagged = outcome.cycle_nodes().map(|id| id.as_str()).collect::<Vec<_>>();
        flagged.sort();
        assert_eq!(flagged, vec!["a", "b", "c"]);
        assert!(!outcome.get(&nid("free")).unwrap().in_cycle);
    }

    #[test]
    fn ranks_are_centred_on_the_widest_layer() {
        let config = LayoutConfig::default();
        let graph = small_dag();
        let outcome = layout(&graph, &config);

        let a = outcome.get(&nid("a")).unwrap();
        let b = outcome.get(&nid("b")).unwrap();
        let c = outcome.get(&nid("c")).unwrap();
        assert_eq!(b.y, config.node_height + config.rank_gap);
        assert_eq!(c.x - b.x, config.node_width + config.node_gap);
        // Single-node rank sits in the middle of the two-node rank.
        assert_eq!(a.x, (config.node_width + config.node_gap) / 2.0);
    }

    #[test]
    fn median_ordering_removes_avoidable_crossings() {
        // r1 -> x2, r2 -> x1: input order would cross, ordering should untangle it.
        let graph = graph(
            &["r1", "r2", "x1", "x2"],
            &[("a", "r1", "x2", RelationKind::Parent), ("b", "r2", "x1", RelationKind::Parent)],
        );
        let outcome = layout(&graph, &LayoutConfig::default());

        let r1 = outcome.get(&nid("r1")).unwrap().order;
        let x2 = outcome.get(&nid("x2")).unwrap().order;
        assert_eq!(r1, x2);
    }

    #[test]
    fn layout_is_deterministic() {
        let graph = cyclic();
        let config = LayoutConfig::default();
        assert_eq!(layout(&graph, &config), layout(&graph, &config));
    }

    #[test]
    fn invalid_spacing_falls_back_to_scatter() {
        let config = LayoutConfig { node_width: f64::INFINITY, ..LayoutConfig::default() };
        let graph = small_dag();

        assert!(matches!(
            layout_layered(&graph, &config),
            Err(LayoutError::InvalidSpacing { field: "node_width", .. })
        ));

        let outcome = layout(&graph, &config);
        assert!(!outcome.ok());
        assert_eq!(outcome.nodes().len(), 4);
        assert!(outcome.nodes().iter().all(|n| n.layout_failed && n.x.is_finite() && n.y.is_finite()));
    }

    #[test]
    fn rank_limit_triggers_fallback() {
        let config = LayoutConfig { max_rank: 1, ..LayoutConfig::default() };
        let graph = small_dag();

        let outcome = layout(&graph, &config);

        assert!(!outcome.ok());
        assert!(matches!(outcome.failure(), Some(LayoutError::RankLimitExceeded { .. })));
        assert!(outcome.layers().is_empty());
    }

    #[test]
    fn empty_graph_lays_out_to_nothing() {
        let outcome = layout(&OrgGraph::default(), &LayoutConfig::default());
        assert!(outcome.ok());
        assert!(outcome.nodes().is_empty());
    }
}
