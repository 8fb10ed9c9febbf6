// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A classification tag attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeTag {
    pub name: String,
    pub weight: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    pub created_at: u64,
    pub updated_at: u64,
    pub importance: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub connection_strength: f64,
}

impl Default for NodeMetadata {
    fn default() -> Self {
        Self {
            created_at: 0,
            updated_at: 0,
            importance: 1.0,
            keywords: Vec::new(),
            connection_strength: 0.0,
        }
    }
}

/// A single graph node.
///
/// `id` is the sole join key used by links, selections, and highlight sets;
/// it is immutable once the node exists in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub observations: Vec<String>,
    #[serde(default = "default_node_color")]
    pub color: String,
    #[serde(default = "default_node_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default)]
    pub tags: Vec<NodeTag>,
    #[serde(default)]
    pub metadata: NodeMetadata,
}

/// A link endpoint: either a bare node id, or a node reference once the
/// rendering surface has resolved it. Compare via [`LinkEnd::id`], never by
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LinkEnd {
    Id(String),
    Node(Box<GraphNode>),
}

impl LinkEnd {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Node(node) => &node.id,
        }
    }
}

impl From<&str> for LinkEnd {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

fn default_node_color() -> String {
    "#888888".to_owned()
}

fn default_node_size() -> f64 {
    6.0
}

fn default_link_color() -> String {
    "#888888".to_owned()
}

fn default_link_width() -> f64 {
    1.0
}

fn default_link_strength() -> f64 {
    0.5
}

/// A typed relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: LinkEnd,
    pub target: LinkEnd,
    pub relation_type: String,
    #[serde(default = "default_link_color")]
    pub color: String,
    #[serde(default = "default_link_width")]
    pub width: f64,
    #[serde(default = "default_link_strength")]
    pub strength: f64,
}

impl GraphLink {
    /// Synthetic id used by highlight sets: resolved source and target ids
    /// joined with `-`.
    pub fn key(&self) -> String {
        link_key(self.source.id(), self.target.id())
    }
}

pub fn link_key(source_id: &str, target_id: &str) -> String {
    format!("{source_id}-{target_id}")
}

/// A named node-id grouping used for progressive disclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphLayer {
    pub name: String,
    pub node_ids: Vec<String>,
}

/// One graph snapshot: nodes, links, layers, and the reverse tag index.
///
/// Snapshots are replaced wholesale on reload, never merged. The tag index
/// is built by the transformer and treated as read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    #[serde(default)]
    pub layers: Vec<GraphLayer>,
    #[serde(default, rename = "tagIndex")]
    pub tag_index: BTreeMap<String, BTreeSet<String>>,
}

impl GraphData {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    pub fn node_ids(&self) -> BTreeSet<String> {
        self.nodes.iter().map(|node| node.id.clone()).collect()
    }

    /// A snapshot is "enhanced" once it carries layers and a tag index;
    /// raw-shaped payloads lack both and must pass through the transformer.
    pub fn is_enhanced(&self) -> bool {
        !self.layers.is_empty() && !self.tag_index.is_empty()
    }
}
