// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Division, EntityRef, FunctionalRelation, Position, RawEntities, Staff};
use crate::model::{EntityKind, RelationType, StructureKind};

pub(crate) fn division(id: &str, parent_id: Option<&str>) -> Division {
    Division {
        id: id.to_owned(),
        name: format!("Division {id}"),
        parent_id: parent_id.map(ToOwned::to_owned),
        organization_id: Some("org1".to_owned()),
        structure: Some(StructureKind::Business),
        code: None,
    }
}

pub(crate) fn position(id: &str, division_id: Option<&str>, parent_id: Option<&str>) -> Position {
    Position {
        id: id.to_owned(),
        title: format!("Position {id}"),
        division_id: division_id.map(ToOwned::to_owned),
        parent_id: parent_id.map(ToOwned::to_owned),
        organization_id: Some("org1".to_owned()),
    }
}

pub(crate) fn staff(id: &str, first: &str, last: &str, position_id: Option<&str>) -> Staff {
    Staff {
        id: id.to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        position_id: position_id.map(ToOwned::to_owned),
        avatar_url: Some(format!("avatars/{id}.png")),
        email: None,
    }
}

pub(crate) fn relation(
    id: &str,
    source: (EntityKind, &str),
    target: (EntityKind, &str),
    relation_type: RelationType,
) -> FunctionalRelation {
    FunctionalRelation {
        id: id.to_owned(),
        source: EntityRef { kind: source.0, id: source.1.to_owned() },
        target: EntityRef { kind: target.0, id: target.1.to_owned() },
        relation_type,
        description: None,
    }
}

/// Divisions `d1 <- d2`, positions `p1 <- p2` (p1 in d1, p2 in d2).
pub(crate) fn hierarchy_divisions_positions() -> (Vec<Division>, Vec<Position>) {
    (
        vec![division("d1", None), division("d2", Some("d1"))],
        vec![position("p1", Some("d1"), None), position("p2", Some("d2"), Some("p1"))],
    )
}

/// The hierarchy above plus two staff members and two functional relations, one of which
/// references an unknown staff id.
pub(crate) fn sample_entities() -> RawEntities {
    let (divisions, positions) = hierarchy_divisions_positions();
    RawEntities::complete(
        divisions,
        positions,
        vec![
            staff("s1", "Ada", "Lovelace", Some("p1")),
            staff("s2", "Alan", "Turing", Some("p2")),
        ],
        vec![
            relation(
                "r1",
                (EntityKind::Division, "d2"),
                (EntityKind::Position, "p1"),
                RelationType::Administrative,
            ),
            relation(
                "r2",
                (EntityKind::Staff, "s404"),
                (EntityKind::Position, "p2"),
                RelationType::Mentoring,
            ),
        ],
    )
}
