// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend entity records and the ports the chart engine talks to.
//!
//! `EntitySource` is the read side (four independently failable fetches) and
//! `EntityWriter` the upstream push used by the editing controller. How either is
//! implemented (REST, database, files) is not the engine's concern.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    EdgeId, EntityKind, EntityNode, NodeId, RelationEdge, RelationType, StructureKind,
};

#[cfg(test)]
pub(crate) mod fixtures;
pub mod json_dir;
pub mod memory;

pub use json_dir::JsonDirSource;
pub use memory::{MemorySource, UpstreamWrite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub structure: Option<StructureKind>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub division_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", last) => last.to_owned(),
            (first, "") => first.to_owned(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

/// Points at one backend entity by kind and raw id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalRelation {
    pub id: String,
    pub source: EntityRef,
    pub target: EntityRef,
    pub relation_type: RelationType,
    #[serde(default)]
    pub description: Option<String>,
}

/// The four entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Divisions,
    Positions,
    Staff,
    Relations,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] =
        [SourceKind::Divisions, SourceKind::Positions, SourceKind::Staff, SourceKind::Relations];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Divisions => "divisions",
            Self::Positions => "positions",
            Self::Staff => "staff",
            Self::Relations => "relations",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw fetch results. `None` means the collection could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntities {
    pub divisions: Option<Vec<Division>>,
    pub positions: Option<Vec<Position>>,
    pub staff: Option<Vec<Staff>>,
    pub relations: Option<Vec<FunctionalRelation>>,
}

impl RawEntities {
    pub fn complete(
        divisions: Vec<Division>,
        positions: Vec<Position>,
        staff: Vec<Staff>,
        relations: Vec<FunctionalRelation>,
    ) -> Self {
        Self {
            divisions: Some(divisions),
            positions: Some(positions),
            staff: Some(staff),
            relations: Some(relations),
        }
    }

    /// Collections that are missing (fetch failed).
    pub fn missing(&self) -> Vec<SourceKind> {
        let mut missing = Vec::new();
        if self.divisions.is_none() {
            missing.push(SourceKind::Divisions);
        }
        if self.positions.is_none() {
            missing.push(SourceKind::Positions);
        }
        if self.staff.is_none() {
            missing.push(SourceKind::Staff);
        }
        if self.relations.is_none() {
            missing.push(SourceKind::Relations);
        }
        missing
    }

    pub fn divisions(&self) -> &[Division] {
        self.divisions.as_deref().unwrap_or(&[])
    }

    pub fn positions(&self) -> &[Position] {
        self.positions.as_deref().unwrap_or(&[])
    }

    pub fn staff(&self) -> &[Staff] {
        self.staff.as_deref().unwrap_or(&[])
    }

    pub fn relations(&self) -> &[FunctionalRelation] {
        self.relations.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_kind} source unavailable: {message}")]
    Unavailable { source_kind: SourceKind, message: String },

    #[error("upstream rejected the write: {message}")]
    Rejected { message: String },

    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait EntitySource: Send + Sync {
    async fn fetch_divisions(&self) -> Result<Vec<Division>, SourceError>;
    async fn fetch_positions(&self) -> Result<Vec<Position>, SourceError>;
    async fn fetch_staff(&self) -> Result<Vec<Staff>, SourceError>;
    async fn fetch_functional_relations(&self) -> Result<Vec<FunctionalRelation>, SourceError>;
}

#[async_trait]
pub trait EntityWriter: Send + Sync {
    async fn create_entity(&self, node: &EntityNode) -> Result<(), SourceError>;
    async fn update_entity(&self, node: &EntityNode) -> Result<(), SourceError>;
    async fn delete_entity(&self, node_id: &NodeId) -> Result<(), SourceError>;
    async fn create_relation(&self, edge: &RelationEdge) -> Result<(), SourceError>;
    async fn delete_relation(&self, edge_id: &EdgeId) -> Result<(), SourceError>;
}

#[cfg(test)]
mod tests {
    use super::{RawEntities, SourceKind, Staff};

    #[test]
    fn staff_full_name_skips_blank_parts() {
        let mut staff = Staff {
            id: "s1".to_owned(),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            position_id: None,
            avatar_url: None,
            email: None,
        };
        assert_eq!(staff.full_name(), "Grace Hopper");

        staff.last_name = "  ".to_owned();
        assert_eq!(staff.full_name(), "Grace");
    }

    #[test]
    fn missing_lists_failed_collections() {
        let raw = RawEntities {
            divisions: Some(Vec::new()),
            positions: None,
            staff: Some(Vec::new()),
            relations: None,
        };
        assert_eq!(raw.missing(), vec![SourceKind::Positions, SourceKind::Relations]);
        assert!(raw.positions().is_empty());
    }
}
