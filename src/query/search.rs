// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{GraphData, GraphNode};

const FUZZY_MIN_RATIO: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSearchMode {
    Substring,
    Regex,
    Fuzzy,
}

fn haystack(node: &GraphNode) -> String {
    search_fields(node).join(" ")
}

fn search_fields(node: &GraphNode) -> Vec<String> {
    let mut fields = vec![node.id.clone(), node.name.clone(), node.node_type.clone()];
    fields.extend(node.tags.iter().map(|tag| tag.name.clone()));
    fields
}

/// Searches nodes by id, name, type, and tags; returns matching node ids in
/// snapshot order. Results feed directly into highlight requests.
pub fn node_search(
    graph: &GraphData,
    needle: &str,
    mode: NodeSearchMode,
) -> Result<Vec<String>, regex::Error> {
    match mode {
        NodeSearchMode::Substring => {
            let needle_lower = needle.to_lowercase();
            Ok(graph
                .nodes
                .iter()
                .filter(|node| haystack(node).to_lowercase().contains(&needle_lower))
                .map(|node| node.id.clone())
                .collect())
        }
        NodeSearchMode::Regex => {
            let regex = RegexBuilder::new(needle).case_insensitive(true).build()?;
            Ok(graph
                .nodes
                .iter()
                .filter(|node| regex.is_match(&haystack(node)))
                .map(|node| node.id.clone())
                .collect())
        }
        NodeSearchMode::Fuzzy => {
            let needle_lower = needle.to_lowercase();
            Ok(graph
                .nodes
                .iter()
                .filter(|node| {
                    search_fields(node).iter().any(|field| {
                        let ratio = rapidfuzz::fuzz::ratio(
                            needle_lower.chars(),
                            field.to_lowercase().chars(),
                        );
                        ratio >= FUZZY_MIN_RATIO
                    })
                })
                .map(|node| node.id.clone())
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{node_search, NodeSearchMode};
    use crate::transform::bootstrap_graph;

    #[test]
    fn substring_search_is_case_insensitive_and_covers_tags() {
        let graph = bootstrap_graph();

        let by_id = node_search(&graph, "neron-core", NodeSearchMode::Substring).expect("search");
        assert_eq!(by_id, vec!["NERON-CORE".to_owned()]);

        let by_tag = node_search(&graph, "storage", NodeSearchMode::Substring).expect("search");
        assert_eq!(by_tag, vec!["MEMORY-VAULT".to_owned()]);
    }

    #[test]
    fn regex_search_reports_invalid_patterns() {
        let graph = bootstrap_graph();

        let matches = node_search(&graph, "^NERON", NodeSearchMode::Regex).expect("search");
        assert_eq!(matches, vec!["NERON-CORE".to_owned()]);

        node_search(&graph, "(", NodeSearchMode::Regex).unwrap_err();
    }

    #[test]
    fn fuzzy_search_tolerates_typos() {
        let graph = bootstrap_graph();

        let matches = node_search(&graph, "sentinl", NodeSearchMode::Fuzzy).expect("search");
        assert!(matches.contains(&"SENTINEL".to_owned()));
    }
}
