// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A diagram session owns one `OrgGraph` of typed entity nodes and relation edges.
//! Annotations and positions are keyed by `DiagramKey` and live in the stores.

pub mod annotation;
pub mod entity;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod graph;
pub mod ids;

pub use annotation::{active_count, Annotation};
pub use entity::{EntityDetails, EntityKind, EntityNode, Occupant, StructureKind};
pub use geometry::Point;
pub use graph::{OrgGraph, RelationEdge, RelationKind, RelationType};
pub use ids::{DiagramKey, EdgeId, Id, IdError, NodeId};
