// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for org graphs.
//!
//! Computes a layered (top-down) placement for every node, falling back to a seeded scatter
//! when the layered pipeline cannot produce a result.

pub mod layered;
mod scatter;

pub use layered::{layout, LayoutConfig, LayoutError, LayoutOutcome, NodeLayout};
