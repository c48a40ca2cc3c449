// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Entity adapter: turns raw backend records into uniform node/edge input.
//!
//! Edges are derived in a fixed priority order (division parents, position parents,
//! position membership, functional relations) so the builder's "first occurrence wins"
//! de-duplication is deterministic. Structural edges point from the superior entity to the
//! subordinate one. Any of the four collections may be missing; the adapter proceeds with the
//! rest and reports which relationship kinds may be incomplete.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    EdgeId, EntityDetails, EntityKind, EntityNode, NodeId, Occupant, RelationEdge, RelationKind,
};
use crate::source::{Division, EntityRef, FunctionalRelation, Position, RawEntities, SourceKind, Staff};

/// How staff are represented in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdapterMode {
    /// Divisions and positions are nodes; staff are occupant metadata on positions.
    #[default]
    Positions,
    /// Divisions and staff are nodes; positions become edge metadata.
    StaffCentric,
}

/// Adapter output, fed to `builder::build`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<RelationEdge>,
    pub failed_sources: Vec<SourceKind>,
    pub incomplete: BTreeSet<RelationKind>,
}

pub fn node_id(kind: EntityKind, raw_id: &str) -> Option<NodeId> {
    if raw_id.trim().is_empty() {
        return None;
    }
    NodeId::new(format!("{kind}:{raw_id}")).ok()
}

fn structural_edge_id(kind: RelationKind, source: &NodeId, target: &NodeId) -> Option<EdgeId> {
    EdgeId::new(format!("{kind}:{source}->{target}")).ok()
}

/// Which relationship kinds can be missing edges when `failed` collections are absent.
pub fn incomplete_kinds(failed: &[SourceKind], mode: AdapterMode) -> BTreeSet<RelationKind> {
    let mut kinds = BTreeSet::new();
    for kind in failed {
        match (kind, mode) {
            (SourceKind::Divisions | SourceKind::Positions, _)
            | (SourceKind::Staff, AdapterMode::StaffCentric) => {
                kinds.insert(RelationKind::Parent);
                kinds.insert(RelationKind::BelongsTo);
                kinds.insert(RelationKind::Functional);
            }
            (SourceKind::Staff, AdapterMode::Positions) | (SourceKind::Relations, _) => {
                kinds.insert(RelationKind::Functional);
            }
        }
    }
    kinds
}

pub fn normalize(raw: &RawEntities, mode: AdapterMode) -> Normalized {
    let failed_sources = raw.missing();
    if !failed_sources.is_empty() {
        tracing::warn!(
            failed = ?failed_sources,
            "normalizing with missing entity collections"
        );
    }
    let incomplete = incomplete_kinds(&failed_sources, mode);

    let occupants = occupants_by_position(raw.staff());
    let mut out = Normalized { failed_sources, incomplete, ..Normalized::default() };

    for division in raw.divisions() {
        if let Some(node) = division_node(division) {
            out.nodes.push(node);
        }
    }

    match mode {
        AdapterMode::Positions => {
            for position in raw.positions() {
                let holders = occupants.get(position.id.as_str()).map(Vec::as_slice);
                if let Some(node) = position_node(position, holders.unwrap_or(&[])) {
                    out.nodes.push(node);
                }
            }
        }
        AdapterMode::StaffCentric => {
            let titles = raw
                .positions()
                .iter()
                .map(|p| (p.id.as_str(), p.title.as_str()))
                .collect::<BTreeMap<_, _>>();
            for staff in raw.staff() {
                let title = staff.position_id.as_deref().and_then(|id| titles.get(id).copied());
                if let Some(node) = staff_node(staff, title) {
                    out.nodes.push(node);
                }
            }
        }
    }

    // (1) division.parent_id
    for division in raw.divisions() {
        let Some(parent_id) = division.parent_id.as_deref() else {
            continue;
        };
        push_structural(
            &mut out.edges,
            RelationKind::Parent,
            node_id(EntityKind::Division, parent_id),
            node_id(EntityKind::Division, &division.id),
        );
    }

    match mode {
        AdapterMode::Positions => {
            // (2) position.parent_id
            for position in raw.positions() {
                let Some(parent_id) = position.parent_id.as_deref() else {
                    continue;
                };
                push_structural(
                    &mut out.edges,
                    RelationKind::Parent,
                    node_id(EntityKind::Position, parent_id),
                    node_id(EntityKind::Position, &position.id),
                );
            }
            // (3) position.division_id
            for position in raw.positions() {
                let Some(division_id) = position.division_id.as_deref() else {
                    continue;
                };
                push_structural(
                    &mut out.edges,
                    RelationKind::BelongsTo,
                    node_id(EntityKind::Division, division_id),
                    node_id(EntityKind::Position, &position.id),
                );
            }
        }
        AdapterMode::StaffCentric => {
            staff_centric_edges(raw.positions(), &occupants, &mut out.edges);
        }
    }

    // (4) functional relations
    let staff_positions = raw
        .staff()
        .iter()
        .map(|s| (s.id.as_str(), s.position_id.as_deref()))
        .collect::<BTreeMap<_, _>>();
    for relation in raw.relations() {
        if let Some(edge) = functional_edge(relation, mode, &staff_positions, &occupants) {
            out.edges.push(edge);
        }
    }

    out
}

fn occupants_by_position(staff: &[Staff]) -> BTreeMap<&str, Vec<&Staff>> {
    let mut by_position = BTreeMap::<&str, Vec<&Staff>>::new();
    for member in staff {
        if let Some(position_id) = member.position_id.as_deref() {
            by_position.entry(position_id).or_default().push(member);
        }
    }
    by_position
}

fn division_node(division: &Division) -> Option<EntityNode> {
    let Some(id) = node_id(EntityKind::Division, &division.id) else {
        tracing::warn!(raw_id = %division.id, "skipping division with unusable id");
        return None;
    };
    let mut node = EntityNode::new(
        id,
        division.name.clone(),
        EntityDetails::Division { code: division.code.clone(), structure: division.structure },
    )
    .with_subtitle(division.code.clone());
    if let Some(organization_id) = &division.organization_id {
        node.insert_metadata("organization_id", organization_id.clone());
    }
    if let Some(structure) = division.structure {
        node.insert_metadata("structure", structure.as_str());
    }
    Some(node)
}

fn position_node(position: &Position, holders: &[&Staff]) -> Option<EntityNode> {
    let Some(id) = node_id(EntityKind::Position, &position.id) else {
        tracing::warn!(raw_id = %position.id, "skipping position with unusable id");
        return None;
    };

    let occupants = holders
        .iter()
        .map(|staff| Occupant {
            staff_id: staff.id.clone(),
            name: staff.full_name(),
            avatar_ref: staff.avatar_url.clone(),
        })
        .collect::<Vec<_>>();

    let subtitle = (!occupants.is_empty())
        .then(|| occupants.iter().map(|o| o.name.as_str()).collect::<Vec<_>>().join(", "));
    let avatar_ref = occupants.iter().find_map(|o| o.avatar_ref.clone());

    let mut node = EntityNode::new(
        id,
        position.title.clone(),
        EntityDetails::Position {
            division_id: position.division_id.clone(),
            occupants: occupants.clone(),
        },
    )
    .with_subtitle(subtitle.clone())
    .with_avatar_ref(avatar_ref);

    match occupants.as_slice() {
        [] => node.insert_metadata("vacant", "true"),
        [only] => {
            node.insert_metadata("occupant", only.name.clone());
            node.insert_metadata("occupant_id", only.staff_id.clone());
        }
        many => {
            node.insert_metadata("occupant", subtitle.unwrap_or_default());
            node.insert_metadata("occupant_count", many.len().to_string());
        }
    }
    if let Some(organization_id) = &position.organization_id {
        node.insert_metadata("organization_id", organization_id.clone());
    }
    Some(node)
}

fn staff_node(staff: &Staff, position_title: Option<&str>) -> Option<EntityNode> {
    let Some(id) = node_id(EntityKind::Staff, &staff.id) else {
        tracing::warn!(raw_id = %staff.id, "skipping staff member with unusable id");
        return None;
    };
    let mut node = EntityNode::new(
        id,
        staff.full_name(),
        EntityDetails::Staff { position_id: staff.position_id.clone(), email: staff.email.clone() },
    )
    .with_subtitle(position_title)
    .with_avatar_ref(staff.avatar_url.clone());
    if let Some(position_id) = &staff.position_id {
        node.insert_metadata("position_id", position_id.clone());
    }
    Some(node)
}

fn push_structural(
    edges: &mut Vec<RelationEdge>,
    kind: RelationKind,
    source: Option<NodeId>,
    target: Option<NodeId>,
) {
    let (Some(source), Some(target)) = (source, target) else {
        return;
    };
    let Some(id) = structural_edge_id(kind, &source, &target) else {
        return;
    };
    edges.push(RelationEdge::new(id, source, target, kind));
}

fn staff_centric_edges(
    positions: &[Position],
    occupants: &BTreeMap<&str, Vec<&Staff>>,
    edges: &mut Vec<RelationEdge>,
) {
    let holders_of = |position_id: &str| occupants.get(position_id).map(Vec::as_slice).unwrap_or(&[]);

    // (2) reporting lines between occupants of parent and child positions
    for position in positions {
        let Some(parent_id) = position.parent_id.as_deref() else {
            continue;
        };
        for superior in holders_of(parent_id) {
            for subordinate in holders_of(&position.id) {
                let source = node_id(EntityKind::Staff, &superior.id);
                let target = node_id(EntityKind::Staff, &subordinate.id);
                let (Some(source), Some(target)) = (source, target) else {
                    continue;
                };
                let Some(id) = structural_edge_id(RelationKind::Parent, &source, &target) else {
                    continue;
                };
                edges.push(
                    RelationEdge::new(id, source, target, RelationKind::Parent)
                        .with_label(Some(position.title.clone()))
                        .with_metadata("position_id", position.id.clone())
                        .with_metadata("position_title", position.title.clone()),
                );
            }
        }
    }

    // (3) staff belong to the division of the position they hold
    for position in positions {
        let Some(division_id) = position.division_id.as_deref() else {
            continue;
        };
        for member in holders_of(&position.id) {
            push_structural(
                edges,
                RelationKind::BelongsTo,
                node_id(EntityKind::Division, division_id),
                node_id(EntityKind::Staff, &member.id),
            );
        }
    }
}

fn resolve_endpoint(
    endpoint: &EntityRef,
    mode: AdapterMode,
    staff_positions: &BTreeMap<&str, Option<&str>>,
    occupants: &BTreeMap<&str, Vec<&Staff>>,
) -> Option<NodeId> {
    match (endpoint.kind, mode) {
        (EntityKind::Staff, AdapterMode::Positions) => {
            match staff_positions.get(endpoint.id.as_str()).copied().flatten() {
                Some(position_id) => node_id(EntityKind::Position, position_id),
                None => node_id(EntityKind::Staff, &endpoint.id),
            }
        }
        (EntityKind::Position, AdapterMode::StaffCentric) => {
            match occupants.get(endpoint.id.as_str()).and_then(|holders| holders.first()) {
                Some(holder) => node_id(EntityKind::Staff, &holder.id),
                None => node_id(EntityKind::Position, &endpoint.id),
            }
        }
        (kind, _) => node_id(kind, &endpoint.id),
    }
}

fn functional_edge(
    relation: &FunctionalRelation,
    mode: AdapterMode,
    staff_positions: &BTreeMap<&str, Option<&str>>,
    occupants: &BTreeMap<&str, Vec<&Staff>>,
) -> Option<RelationEdge> {
    let source = resolve_endpoint(&relation.source, mode, staff_positions, occupants);
    let target = resolve_endpoint(&relation.target, mode, staff_positions, occupants);
    let id = EdgeId::new(format!("{}:{}", RelationKind::Functional, relation.id)).ok();
    let (Some(id), Some(source), Some(target)) = (id, source, target) else {
        tracing::warn!(relation_id = %relation.id, "skipping functional relation with unusable ids");
        return None;
    };

    let mut edge = RelationEdge::new(id, source, target, RelationKind::Functional)
        .with_label(Some(relation.relation_type.as_str()))
        .with_relation_type(relation.relation_type);
    if let Some(description) = &relation.description {
        edge = edge.with_metadata("description", description.clone());
    }
    Some(edge)
}
