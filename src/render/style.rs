// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::model::{EntityKind, RelationKind, RelationType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub color: &'static str,
    /// SVG-style dash pattern; `None` draws a solid line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    pub width: f64,
    pub arrow: bool,
}

const PARENT_STYLE: EdgeStyle = EdgeStyle { color: "#374151", dash: None, width: 2.0, arrow: true };
const BELONGS_TO_STYLE: EdgeStyle =
    EdgeStyle { color: "#9ca3af", dash: Some("4 4"), width: 1.0, arrow: false };
const FUNCTIONAL_DASH: Option<&str> = Some("6 3");

const FUNCTIONAL_COLORS: [(RelationType, &str); 5] = [
    (RelationType::Functional, "#7c3aed"),
    (RelationType::Administrative, "#dc2626"),
    (RelationType::Project, "#0891b2"),
    (RelationType::Territorial, "#65a30d"),
    (RelationType::Mentoring, "#db2777"),
];

const NODE_BORDERS: [(EntityKind, &str); 4] = [
    (EntityKind::Org, "#1f2937"),
    (EntityKind::Division, "#2563eb"),
    (EntityKind::Position, "#059669"),
    (EntityKind::Staff, "#d97706"),
];

/// Edge appearance by kind; functional edges are coloured by their relation sub-type.
pub fn edge_style(kind: RelationKind, relation_type: Option<RelationType>) -> EdgeStyle {
    match kind {
        RelationKind::Parent => PARENT_STYLE,
        RelationKind::BelongsTo => BELONGS_TO_STYLE,
        RelationKind::Functional => {
            let relation_type = relation_type.unwrap_or(RelationType::Functional);
            let color = FUNCTIONAL_COLORS
                .iter()
                .find(|(candidate, _)| *candidate == relation_type)
                .map_or(FUNCTIONAL_COLORS[0].1, |(_, color)| *color);
            EdgeStyle { color, dash: FUNCTIONAL_DASH, width: 1.5, arrow: true }
        }
    }
}

pub fn node_border_color(kind: EntityKind) -> &'static str {
    NODE_BORDERS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map_or(NODE_BORDERS[0].1, |(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::{edge_style, node_border_color};
    use crate::model::{EntityKind, RelationKind, RelationType};

    #[test]
    fn structural_edges_have_fixed_styles() {
        assert_eq!(edge_style(RelationKind::Parent, None).dash, None);
        assert_eq!(edge_style(RelationKind::BelongsTo, None).dash, Some("4 4"));
        // Sub-types only matter for functional edges.
        assert_eq!(
            edge_style(RelationKind::Parent, Some(RelationType::Mentoring)),
            edge_style(RelationKind::Parent, None)
        );
    }

    #[test]
    fn functional_edges_are_coloured_by_sub_type() {
        let mentoring = edge_style(RelationKind::Functional, Some(RelationType::Mentoring));
        let project = edge_style(RelationKind::Functional, Some(RelationType::Project));
        assert_ne!(mentoring.color, project.color);
        assert_eq!(
            edge_style(RelationKind::Functional, None).color,
            edge_style(RelationKind::Functional, Some(RelationType::Functional)).color
        );
    }

    #[test]
    fn every_kind_has_a_distinct_border() {
        let kinds = [EntityKind::Org, EntityKind::Division, EntityKind::Position, EntityKind::Staff];
        let mut colors = kinds.map(node_border_color).to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), 4);
    }
}
