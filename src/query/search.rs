// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{EntityNode, OrgGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Substring,
    Regex,
}

fn searchable_fields(node: &EntityNode) -> impl Iterator<Item = &str> {
    std::iter::once(node.label()).chain(node.subtitle())
}

/// Nodes whose label or subtitle matches `needle`, in graph order.
pub fn search_nodes<'a>(
    graph: &'a OrgGraph,
    needle: &str,
    mode: SearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a EntityNode>, regex::Error> {
    match mode {
        SearchMode::Substring => {
            if case_insensitive {
                let needle_lower = needle.to_lowercase();
                Ok(graph
                    .nodes()
                    .iter()
                    .filter(|node| {
                        searchable_fields(node).any(|field| field.to_lowercase().contains(&needle_lower))
                    })
                    .collect())
            } else {
                Ok(graph
                    .nodes()
                    .iter()
                    .filter(|node| searchable_fields(node).any(|field| field.contains(needle)))
                    .collect())
            }
        }
        SearchMode::Regex => {
            let regex = RegexBuilder::new(needle).case_insensitive(case_insensitive).build()?;
            Ok(graph
                .nodes()
                .iter()
                .filter(|node| searchable_fields(node).any(|field| regex.is_match(field)))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{search_nodes, SearchMode};
    use crate::adapter::{normalize, AdapterMode};
    use crate::builder::build;
    use crate::model::OrgGraph;
    use crate::source::fixtures::sample_entities;

    fn chart() -> OrgGraph {
        let normalized = normalize(&sample_entities(), AdapterMode::Positions);
        build(normalized.nodes, normalized.edges).graph
    }

    fn ids(nodes: Vec<&crate::model::EntityNode>) -> Vec<&str> {
        nodes.into_iter().map(|node| node.id().as_str()).collect()
    }

    #[test]
    fn substring_search_matches_labels_and_occupant_subtitles() {
        let graph = chart();

        let hits = search_nodes(&graph, "turing", SearchMode::Substring, true).unwrap();
        assert_eq!(ids(hits), vec!["position:p2"]);

        let hits = search_nodes(&graph, "turing", SearchMode::Substring, false).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn regex_search_is_ordered_by_graph_order() {
        let graph = chart();
        let hits = search_nodes(&graph, "^Position p[12]$", SearchMode::Regex, false).unwrap();
        assert_eq!(ids(hits), vec!["position:p1", "position:p2"]);
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let graph = chart();
        assert!(search_nodes(&graph, "(", SearchMode::Regex, false).is_err());
    }
}
