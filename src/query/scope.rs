// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::AdapterMode;
use crate::model::{DiagramKey, IdError, StructureKind};
use crate::source::{Division, Position, RawEntities};

/// Which division structure a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Business,
    Legal,
    Territorial,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Legal => "legal",
            Self::Territorial => "territorial",
        }
    }

    pub fn structure(self) -> StructureKind {
        match self {
            Self::Business => StructureKind::Business,
            Self::Legal => StructureKind::Legal,
            Self::Territorial => StructureKind::Territorial,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode '{0}' (expected business, legal or territorial)")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "legal" => Ok(Self::Legal),
            "territorial" => Ok(Self::Territorial),
            _ => Err(UnknownViewMode(s.to_owned())),
        }
    }
}

/// Which subset of the organisation one diagram instance shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagramScope {
    pub view: ViewMode,
    pub organization_id: Option<String>,
    /// Restricts the chart to a position subtree.
    pub root_position_id: Option<String>,
    /// Levels below the root position to include (`Some(0)` is the root alone).
    pub depth: Option<usize>,
    pub mode: AdapterMode,
}

impl DiagramScope {
    pub fn new(view: ViewMode) -> Self {
        Self { view, ..Self::default() }
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_root_position(mut self, position_id: impl Into<String>, depth: Option<usize>) -> Self {
        self.root_position_id = Some(position_id.into());
        self.depth = depth;
        self
    }

    pub fn with_mode(mut self, mode: AdapterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Key scoping overrides and annotations of this diagram.
    pub fn diagram_key(&self) -> Result<DiagramKey, IdError> {
        let base = match &self.root_position_id {
            Some(root) => format!("positions:{root}"),
            None => self.view.as_str().to_owned(),
        };
        match self.mode {
            AdapterMode::Positions => DiagramKey::new(base),
            AdapterMode::StaffCentric => DiagramKey::new(format!("{base}:staff")),
        }
    }
}

fn in_organization(record_org: Option<&str>, scope: &DiagramScope) -> bool {
    match scope.organization_id.as_deref() {
        Some(wanted) => record_org == Some(wanted),
        None => true,
    }
}

/// Position ids within `depth` levels below `root`, breadth-first over parent links.
fn position_subtree(positions: &[Position], root: &str, depth: Option<usize>) -> BTreeSet<String> {
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for position in positions {
        if let Some(parent_id) = position.parent_id.as_deref() {
            children.entry(parent_id).or_default().push(position.id.as_str());
        }
    }

    let mut selected = BTreeSet::new();
    if !positions.iter().any(|position| position.id == root) {
        return selected;
    }

    let mut queue = VecDeque::from([(root, 0usize)]);
    selected.insert(root.to_owned());
    while let Some((position_id, level)) = queue.pop_front() {
        if depth.is_some_and(|limit| level >= limit) {
            continue;
        }
        for child in children.get(position_id).into_iter().flatten() {
            if selected.insert((*child).to_owned()) {
                queue.push_back((*child, level + 1));
            }
        }
    }
    selected
}

/// Narrows raw entities to one diagram scope.
///
/// Collections that failed to load stay `None`. Relations are passed through unchanged;
/// the graph builder drops the ones whose endpoints fell out of scope.
pub fn resolve_scope(raw: &RawEntities, scope: &DiagramScope) -> RawEntities {
    let positions = raw.positions.as_ref().map(|positions| {
        let in_org = positions
            .iter()
            .filter(|position| in_organization(position.organization_id.as_deref(), scope))
            .cloned()
            .collect::<Vec<_>>();
        match scope.root_position_id.as_deref() {
            Some(root) => {
                let subtree = position_subtree(&in_org, root, scope.depth);
                in_org.into_iter().filter(|position| subtree.contains(&position.id)).collect()
            }
            None => in_org,
        }
    });

    let divisions = raw.divisions.as_ref().map(|divisions| {
        let structure = scope.view.structure();
        let in_scope = |division: &&Division| {
            in_organization(division.organization_id.as_deref(), scope)
                && division.structure.map_or(true, |kind| kind == structure)
        };
        match (&scope.root_position_id, &positions) {
            (Some(_), Some(positions)) => {
                let holding = positions
                    .iter()
                    .filter_map(|position| position.division_id.as_deref())
                    .collect::<BTreeSet<_>>();
                divisions
                    .iter()
                    .filter(|division| {
                        holding.contains(division.id.as_str())
                            && in_organization(division.organization_id.as_deref(), scope)
                    })
                    .cloned()
                    .collect()
            }
            _ => divisions.iter().filter(in_scope).cloned().collect::<Vec<_>>(),
        }
    });

    // Without a root, positions follow the divisions shown in this view.
    let positions = match (&scope.root_position_id, positions, &divisions) {
        (None, Some(positions), Some(divisions)) => {
            let shown = divisions.iter().map(|division| division.id.as_str()).collect::<BTreeSet<_>>();
            Some(
                positions
                    .into_iter()
                    .filter(|position| {
                        position.division_id.as_deref().map_or(true, |id| shown.contains(id))
                    })
                    .collect(),
            )
        }
        (_, positions, _) => positions,
    };

    let staff = match (&raw.staff, &positions) {
        (Some(staff), Some(positions)) => {
            let shown = positions.iter().map(|position| position.id.as_str()).collect::<BTreeSet<_>>();
            Some(
                staff
                    .iter()
                    .filter(|member| {
                        member.position_id.as_deref().is_some_and(|id| shown.contains(id))
                    })
                    .cloned()
                    .collect(),
            )
        }
        (staff, _) => staff.clone(),
    };

    RawEntities { divisions, positions, staff, relations: raw.relations.clone() }
}
