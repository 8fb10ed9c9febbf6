// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::GraphData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeDegree {
    pub in_degree: u64,
    pub out_degree: u64,
}

pub fn degrees(graph: &GraphData) -> BTreeMap<String, NodeDegree> {
    let node_ids = graph.node_ids();
    let mut degrees: BTreeMap<String, NodeDegree> = BTreeMap::new();
    for node_id in &node_ids {
        degrees.entry(node_id.clone()).or_default();
    }

    for link in &graph.links {
        let source_id = link.source.id();
        let target_id = link.target.id();
        if !node_ids.contains(source_id) || !node_ids.contains(target_id) {
            continue;
        }

        let source_degree = degrees.entry(source_id.to_owned()).or_default();
        source_degree.out_degree = source_degree.out_degree.saturating_add(1);

        let target_degree = degrees.entry(target_id.to_owned()).or_default();
        target_degree.in_degree = target_degree.in_degree.saturating_add(1);
    }

    degrees
}

/// Links whose resolved source or target id is in `node_ids`, as synthetic
/// link keys. Dangling links (an endpoint missing from the node set) are
/// skipped silently.
pub fn connected_link_keys(
    graph: &GraphData,
    node_ids: &BTreeSet<String>,
) -> BTreeSet<String> {
    let present = graph.node_ids();
    graph
        .links
        .iter()
        .filter(|link| {
            let source_id = link.source.id();
            let target_id = link.target.id();
            present.contains(source_id)
                && present.contains(target_id)
                && (node_ids.contains(source_id) || node_ids.contains(target_id))
        })
        .map(|link| link.key())
        .collect()
}

/// The single-hop connected sets for one node: the node itself plus every
/// neighbor reachable by exactly one link, and the incident link keys.
pub fn connected_sets(graph: &GraphData, node_id: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let present = graph.node_ids();
    let mut nodes = BTreeSet::new();
    let mut links = BTreeSet::new();
    nodes.insert(node_id.to_owned());

    for link in &graph.links {
        let source_id = link.source.id();
        let target_id = link.target.id();
        if !present.contains(source_id) || !present.contains(target_id) {
            continue;
        }

        if source_id == node_id {
            nodes.insert(target_id.to_owned());
            links.insert(link.key());
        } else if target_id == node_id {
            nodes.insert(source_id.to_owned());
            links.insert(link.key());
        }
    }

    (nodes, links)
}

/// Node ids bearing a tag, straight from the tag index.
pub fn nodes_with_tag(graph: &GraphData, tag: &str) -> BTreeSet<String> {
    graph.tag_index.get(tag).cloned().unwrap_or_default()
}
