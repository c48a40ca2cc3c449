// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render surface for org charts.
//!
//! Produces a declarative `{ nodes, edges }` model: positioned node descriptions (label,
//! subtitle, avatar, border colour, badge count) and styled edges. Any drawing layer can
//! consume it; nothing here depends on a rendering API.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::layout::LayoutOutcome;
use crate::model::{
    active_count, Annotation, EdgeId, EntityKind, NodeId, OrgGraph, Point, RelationKind,
    RelationType,
};

mod style;

pub use style::{edge_style, node_border_color, EdgeStyle};

pub const META_LAYOUT_FAILED: &str = "layoutFailed";
pub const META_IN_CYCLE: &str = "inCycle";

/// Where a node's final coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSource {
    Override,
    Layout,
    Scattered,
    /// Not part of the layout (e.g. created after it was computed) and no override stored.
    Unplaced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub kind: EntityKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
    pub border_color: &'static str,
    pub badge_count: usize,
    pub position: Point,
    pub position_source: PositionSource,
    pub rank: Option<usize>,
    pub layout_failed: bool,
    pub in_cycle: bool,
    pub self_loop: bool,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: RelationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<RelationType>,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub layout_ok: bool,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderModel {
    pub fn node(&self, node_id: &NodeId) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| &node.id == node_id)
    }

    pub fn count_by_source(&self, source: PositionSource) -> usize {
        self.nodes.iter().filter(|node| node.position_source == source).count()
    }
}

/// Final position of every laid-out node: the override when one exists, the computed
/// position otherwise. Overrides for nodes absent from the layout are ignored.
pub fn merge_positions(
    layout: &LayoutOutcome,
    overrides: &BTreeMap<NodeId, Point>,
) -> BTreeMap<NodeId, (Point, PositionSource)> {
    let computed_source =
        if layout.ok() { PositionSource::Layout } else { PositionSource::Scattered };
    layout
        .nodes()
        .iter()
        .map(|placed| {
            let merged = match overrides.get(&placed.id) {
                Some(point) => (*point, PositionSource::Override),
                None => (placed.point(), computed_source),
            };
            (placed.id.clone(), merged)
        })
        .collect()
}

/// Builds the render model for `graph`.
pub fn render_model(
    graph: &OrgGraph,
    layout: &LayoutOutcome,
    overrides: &BTreeMap<NodeId, Point>,
    annotations: &BTreeMap<NodeId, Vec<Annotation>>,
) -> RenderModel {
    let positions = merge_positions(layout, overrides);
    let self_loops = graph.self_loops().iter().map(|edge| edge.source()).collect::<BTreeSet<_>>();

    let nodes = graph
        .nodes()
        .iter()
        .map(|node| {
            let placed = layout.get(node.id());
            let (position, position_source) = match positions.get(node.id()) {
                Some(merged) => *merged,
                None => match overrides.get(node.id()) {
                    Some(point) => (*point, PositionSource::Override),
                    None => (Point::default(), PositionSource::Unplaced),
                },
            };
            let layout_failed = placed.is_some_and(|placed| placed.layout_failed);
            let in_cycle = placed.is_some_and(|placed| placed.in_cycle);

            let mut metadata = node.metadata().clone();
            if layout_failed {
                metadata.insert(META_LAYOUT_FAILED.to_owned(), "true".to_owned());
            }
            if in_cycle {
                metadata.insert(META_IN_CYCLE.to_owned(), "true".to_owned());
            }

            RenderNode {
                id: node.id().clone(),
                kind: node.kind(),
                label: node.label().to_owned(),
                subtitle: node.subtitle().map(ToOwned::to_owned),
                avatar_ref: node.avatar_ref().map(ToOwned::to_owned),
                border_color: node_border_color(node.kind()),
                badge_count: annotations.get(node.id()).map_or(0, |list| active_count(list)),
                position,
                position_source,
                rank: placed.filter(|_| layout.ok()).map(|placed| placed.rank),
                layout_failed,
                in_cycle,
                self_loop: self_loops.contains(node.id()),
                metadata,
            }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| RenderEdge {
            id: edge.id().clone(),
            source: edge.source().clone(),
            target: edge.target().clone(),
            kind: edge.kind(),
            label: edge.label().map(ToOwned::to_owned),
            relation_type: edge.relation_type(),
            style: edge_style(edge.kind(), edge.relation_type()),
        })
        .collect();

    RenderModel { layout_ok: layout.ok(), nodes, edges }
}
