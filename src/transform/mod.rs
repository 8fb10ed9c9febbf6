// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Enrichment of raw entity/relation payloads into [`GraphData`].
//!
//! `transform` is pure and deterministic: it performs no I/O, takes the
//! clock value as an argument, and never fails outright on partially
//! malformed input — offending entities/relations are dropped with a
//! recorded warning instead.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{
    fixtures, GraphData, GraphLayer, GraphLink, GraphNode, LinkEnd, NodeMetadata, NodeTag,
    RawGraph,
};

const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const BASE_NODE_SIZE: f64 = 4.0;
const LAYOUT_RADIUS: f64 = 100.0;

/// A recoverable defect found while transforming a raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformWarning {
    UnresolvedRelation {
        source: String,
        target: String,
        relation_type: String,
    },
    DuplicateEntity {
        name: String,
    },
    EmptyEntityName,
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedRelation {
                source,
                target,
                relation_type,
            } => write!(
                f,
                "dropped relation {source} -[{relation_type}]-> {target}: unknown endpoint"
            ),
            Self::DuplicateEntity { name } => {
                write!(f, "duplicate entity name '{name}': later occurrence wins")
            }
            Self::EmptyEntityName => f.write_str("dropped entity with empty name"),
        }
    }
}

impl std::error::Error for TransformWarning {}

/// Result of one transform run: the enriched snapshot plus any warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub graph: GraphData,
    pub warnings: Vec<TransformWarning>,
}

/// Deterministic color for a classification string.
pub fn color_for(classification: &str) -> String {
    let sum: usize = classification.bytes().map(usize::from).sum();
    PALETTE[sum % PALETTE.len()].to_owned()
}

fn keywords_for(name: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut keywords = Vec::new();
    for segment in name.split(|c: char| !c.is_alphanumeric()) {
        if segment.len() < 2 {
            continue;
        }
        let keyword = segment.to_lowercase();
        if seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }
    keywords
}

/// Enriches a raw entity/relation payload into a [`GraphData`] snapshot.
///
/// Entity names become node ids. Duplicate names are collapsed (the later
/// occurrence wins) and relations referencing unknown names are dropped;
/// both cases are recorded as warnings, never errors. Timestamps come from
/// `now_millis` so the function stays referentially transparent.
pub fn transform(raw: &RawGraph, now_millis: u64) -> TransformOutcome {
    let mut warnings = Vec::new();

    // First-seen order, last-seen data.
    let mut order: Vec<String> = Vec::new();
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    for (index, entity) in raw.entities.iter().enumerate() {
        if entity.name.is_empty() {
            warnings.push(TransformWarning::EmptyEntityName);
            continue;
        }
        if by_name.insert(entity.name.clone(), index).is_some() {
            warnings.push(TransformWarning::DuplicateEntity {
                name: entity.name.clone(),
            });
        } else {
            order.push(entity.name.clone());
        }
    }

    let mut degrees: BTreeMap<&str, u64> = BTreeMap::new();
    let mut links = Vec::with_capacity(raw.relations.len());
    for relation in &raw.relations {
        if !by_name.contains_key(&relation.source) || !by_name.contains_key(&relation.target) {
            warnings.push(TransformWarning::UnresolvedRelation {
                source: relation.source.clone(),
                target: relation.target.clone(),
                relation_type: relation.relation_type.clone(),
            });
            continue;
        }

        *degrees.entry(relation.source.as_str()).or_default() += 1;
        *degrees.entry(relation.target.as_str()).or_default() += 1;
        links.push(GraphLink {
            source: LinkEnd::Id(relation.source.clone()),
            target: LinkEnd::Id(relation.target.clone()),
            relation_type: relation.relation_type.clone(),
            color: color_for(&relation.relation_type),
            width: 1.0,
            strength: 0.5,
        });
    }

    let mut nodes = Vec::with_capacity(order.len());
    let mut tag_index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut layer_groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let total = order.len().max(1) as f64;

    for (position, name) in order.iter().enumerate() {
        let entity = &raw.entities[by_name[name]];
        let degree = degrees.get(name.as_str()).copied().unwrap_or(0);
        let importance =
            1.0 + 0.2 * entity.observations.len() as f64 + 0.15 * degree as f64;
        let keywords = keywords_for(name);

        let mut tags = Vec::with_capacity(1 + keywords.len());
        tags.push(NodeTag {
            name: entity.entity_type.to_lowercase(),
            weight: 1.0,
            category: "type".to_owned(),
        });
        for keyword in &keywords {
            tags.push(NodeTag {
                name: keyword.clone(),
                weight: 0.5,
                category: "keyword".to_owned(),
            });
        }
        for tag in &tags {
            tag_index
                .entry(tag.name.clone())
                .or_default()
                .insert(name.clone());
        }

        layer_groups
            .entry(entity.entity_type.clone())
            .or_default()
            .push(name.clone());

        // Seed positions on a circle; the rendering surface refines them.
        let angle = position as f64 * 2.0 * std::f64::consts::PI / total;
        nodes.push(GraphNode {
            id: name.clone(),
            name: name.clone(),
            node_type: entity.entity_type.clone(),
            observations: entity.observations.clone(),
            color: color_for(&entity.entity_type),
            size: BASE_NODE_SIZE + importance * 2.0,
            x: Some(LAYOUT_RADIUS * angle.cos()),
            y: Some(LAYOUT_RADIUS * angle.sin()),
            z: Some(0.0),
            tags,
            metadata: NodeMetadata {
                created_at: now_millis,
                updated_at: now_millis,
                importance,
                keywords,
                connection_strength: (degree as f64 * 0.2).min(1.0),
            },
        });
    }

    let layers = layer_groups
        .into_iter()
        .map(|(name, node_ids)| GraphLayer { name, node_ids })
        .collect();

    TransformOutcome {
        graph: GraphData {
            nodes,
            links,
            layers,
            tag_index,
        },
        warnings,
    }
}

/// Fills in missing `layers`/`tag_index` on a nodes-and-links payload that
/// arrived without them. Fields already populated are left untouched; node
/// and link data is never modified.
pub fn enhance(mut graph: GraphData) -> GraphData {
    if graph.tag_index.is_empty() {
        let mut tag_index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for node in &graph.nodes {
            if node.tags.is_empty() {
                tag_index
                    .entry(node.node_type.to_lowercase())
                    .or_default()
                    .insert(node.id.clone());
                continue;
            }
            for tag in &node.tags {
                tag_index
                    .entry(tag.name.clone())
                    .or_default()
                    .insert(node.id.clone());
            }
        }
        graph.tag_index = tag_index;
    }

    if graph.layers.is_empty() {
        let mut layer_groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in &graph.nodes {
            layer_groups
                .entry(node.node_type.clone())
                .or_default()
                .push(node.id.clone());
        }
        graph.layers = layer_groups
            .into_iter()
            .map(|(name, node_ids)| GraphLayer { name, node_ids })
            .collect();
    }

    graph
}

/// The enhanced bootstrap snapshot (seed timestamps pinned to zero so the
/// snapshot is identical across processes).
pub fn bootstrap_graph() -> GraphData {
    transform(&fixtures::bootstrap_raw(), 0).graph
}

#[cfg(test)]
mod tests {
    use super::{bootstrap_graph, transform, TransformWarning};
    use crate::model::{RawEntity, RawGraph, RawRelation};

    fn raw(entities: &[(&str, &str)], relations: &[(&str, &str, &str)]) -> RawGraph {
        RawGraph {
            entities: entities
                .iter()
                .map(|(name, entity_type)| RawEntity {
                    name: (*name).to_owned(),
                    entity_type: (*entity_type).to_owned(),
                    observations: Vec::new(),
                })
                .collect(),
            relations: relations
                .iter()
                .map(|(source, target, relation_type)| RawRelation {
                    source: (*source).to_owned(),
                    target: (*target).to_owned(),
                    relation_type: (*relation_type).to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn transform_is_deterministic() {
        let input = raw(
            &[("A", "SYSTEM"), ("B", "PROCESS"), ("C", "SYSTEM")],
            &[("A", "B", "FEEDS"), ("B", "C", "FEEDS")],
        );

        let first = transform(&input, 42);
        let second = transform(&input, 42);

        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_relation_is_dropped_with_warning() {
        let input = raw(
            &[("X", "SYSTEM")],
            &[("X", "Y", "LINKS")],
        );

        let outcome = transform(&input, 0);

        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(outcome.graph.nodes[0].id, "X");
        assert_eq!(outcome.graph.link_count(), 0);
        assert_eq!(
            outcome.warnings,
            vec![TransformWarning::UnresolvedRelation {
                source: "X".to_owned(),
                target: "Y".to_owned(),
                relation_type: "LINKS".to_owned(),
            }]
        );
    }

    #[test]
    fn resolved_relations_survive_alongside_dropped_ones() {
        let input = raw(
            &[("A", "SYSTEM"), ("B", "SYSTEM")],
            &[("A", "B", "FEEDS"), ("A", "GONE", "FEEDS")],
        );

        let outcome = transform(&input, 0);

        assert_eq!(outcome.graph.link_count(), 1);
        assert_eq!(outcome.graph.links[0].key(), "A-B");
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn duplicate_entity_name_keeps_later_data_and_warns() {
        let input = raw(
            &[("A", "SYSTEM"), ("A", "PROCESS")],
            &[],
        );

        let outcome = transform(&input, 0);

        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(outcome.graph.nodes[0].node_type, "PROCESS");
        assert_eq!(
            outcome.warnings,
            vec![TransformWarning::DuplicateEntity {
                name: "A".to_owned()
            }]
        );
    }

    #[test]
    fn tag_index_maps_type_and_keyword_tags_to_node_ids() {
        let input = raw(&[("NERON-CORE", "SYSTEM")], &[]);

        let outcome = transform(&input, 0);
        let tag_index = &outcome.graph.tag_index;

        assert!(tag_index["system"].contains("NERON-CORE"));
        assert!(tag_index["neron"].contains("NERON-CORE"));
        assert!(tag_index["core"].contains("NERON-CORE"));
    }

    #[test]
    fn layers_group_node_ids_by_type() {
        let input = raw(
            &[("A", "SYSTEM"), ("B", "PROCESS"), ("C", "SYSTEM")],
            &[],
        );

        let outcome = transform(&input, 0);
        let layers = &outcome.graph.layers;

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name, "PROCESS");
        assert_eq!(layers[0].node_ids, vec!["B".to_owned()]);
        assert_eq!(layers[1].name, "SYSTEM");
        assert_eq!(layers[1].node_ids, vec!["A".to_owned(), "C".to_owned()]);
    }

    #[test]
    fn importance_scales_with_observations_and_degree() {
        let mut input = raw(
            &[("A", "SYSTEM"), ("B", "SYSTEM")],
            &[("A", "B", "FEEDS")],
        );
        input.entities[0].observations = vec!["one".to_owned(), "two".to_owned()];

        let outcome = transform(&input, 0);
        let a = outcome.graph.node("A").expect("node A");
        let b = outcome.graph.node("B").expect("node B");

        assert!(a.metadata.importance > b.metadata.importance);
        assert!(a.size > b.size);
    }

    #[test]
    fn bootstrap_graph_is_enhanced_and_stable() {
        let graph = bootstrap_graph();

        assert!(graph.is_enhanced());
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.link_count(), 5);
        assert_eq!(graph, bootstrap_graph());
    }
}
