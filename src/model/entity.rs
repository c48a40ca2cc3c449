// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Org,
    Division,
    Position,
    Staff,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Division => "division",
            Self::Position => "position",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which organizational structure a division belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Business,
    Legal,
    Territorial,
}

impl StructureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Legal => "legal",
            Self::Territorial => "territorial",
        }
    }
}

/// A staff member shown on a position card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub staff_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

/// Kind-specific node fields. The variant is the node's kind discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetails {
    Org {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        short_name: Option<String>,
    },
    Division {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        structure: Option<StructureKind>,
    },
    Position {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        division_id: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        occupants: Vec<Occupant>,
    },
    Staff {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

impl EntityDetails {
    /// Empty details for a node the user creates on the canvas.
    pub fn blank(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Org => Self::Org { short_name: None },
            EntityKind::Division => Self::Division { code: None, structure: None },
            EntityKind::Position => Self::Position { division_id: None, occupants: Vec::new() },
            EntityKind::Staff => Self::Staff { position_id: None, email: None },
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Org { .. } => EntityKind::Org,
            Self::Division { .. } => EntityKind::Division,
            Self::Position { .. } => EntityKind::Position,
            Self::Staff { .. } => EntityKind::Staff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityNode {
    id: NodeId,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_ref: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
    details: EntityDetails,
}

impl EntityNode {
    pub fn new(id: NodeId, label: impl Into<String>, details: EntityDetails) -> Self {
        Self {
            id,
            label: label.into(),
            subtitle: None,
            avatar_ref: None,
            metadata: BTreeMap::new(),
            details,
        }
    }

    pub fn with_subtitle<T: Into<String>>(mut self, subtitle: Option<T>) -> Self {
        self.set_subtitle(subtitle);
        self
    }

    pub fn with_avatar_ref<T: Into<String>>(mut self, avatar_ref: Option<T>) -> Self {
        self.set_avatar_ref(avatar_ref);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.details.kind()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn avatar_ref(&self) -> Option<&str> {
        self.avatar_ref.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }

    pub fn details(&self) -> &EntityDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut EntityDetails {
        &mut self.details
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_subtitle<T: Into<String>>(&mut self, subtitle: Option<T>) {
        self.subtitle = subtitle.map(Into::into);
    }

    pub fn set_avatar_ref<T: Into<String>>(&mut self, avatar_ref: Option<T>) {
        self.avatar_ref = avatar_ref.map(Into::into);
    }

    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }
}
