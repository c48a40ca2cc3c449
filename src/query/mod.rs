// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over raw entities and built graphs.
//!
//! Scope resolution picks the entity subset one diagram shows; search and hierarchy queries
//! power navigation within a chart.

pub mod hierarchy;
pub mod scope;
pub mod search;

pub use hierarchy::{chain_of_command, subordinates};
pub use scope::{resolve_scope, DiagramScope, UnknownViewMode, ViewMode};
pub use search::{search_nodes, SearchMode};
