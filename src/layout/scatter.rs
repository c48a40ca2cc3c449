// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::layered::{LayoutConfig, LayoutError, LayoutOutcome, NodeLayout};
use crate::model::OrgGraph;

/// Places every node at a seeded pseudo-random point inside a roughly square area.
///
/// Used only after the layered layout failed: all nodes are flagged `layout_failed` so the
/// caller can tell the user the arrangement is not meaningful.
pub(crate) fn scatter(graph: &OrgGraph, config: &LayoutConfig, failure: LayoutError) -> LayoutOutcome {
    // The failure may come from the spacing itself.
    let sizing = if config.validate().is_ok() { config.clone() } else { LayoutConfig::default() };

    let count = graph.nodes().len();
    let columns = (count as f64).sqrt().ceil().max(1.0);
    let width = columns * (sizing.node_width + sizing.node_gap);
    let height = columns * (sizing.node_height + sizing.rank_gap);

    let mut rng = StdRng::seed_from_u64(config.scatter_seed);
    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(order, node)| NodeLayout {
            id: node.id().clone(),
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            rank: 0,
            order,
            in_cycle: false,
            layout_failed: true,
        })
        .collect();

    LayoutOutcome::new(nodes, Vec::new(), Vec::new(), Some(failure))
}
