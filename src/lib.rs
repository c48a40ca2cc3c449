// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orgchart: organizational chart engine.
//!
//! Raw HR records (divisions, positions, staff, functional relations) are normalized into a
//! typed graph, laid out in ranked layers, and merged with user-dragged positions and
//! annotations into a declarative render model. An editing controller applies changes
//! optimistically and rolls them back when the upstream write fails.

pub mod adapter;
pub mod builder;
pub mod config;
pub mod edit;
pub mod layout;
pub mod model;
pub mod query;
pub mod render;
pub mod session;
pub mod source;
pub mod store;
