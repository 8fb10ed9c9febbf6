// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Raw reload payloads as pushed over the tool channel, before enrichment.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::graph::GraphData;

/// An entity in the raw input vocabulary. Becomes a [`super::GraphNode`]
/// with `id = name` after transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub observations: Vec<String>,
}

/// A relation in the raw input vocabulary, referencing entities by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawRelation {
    pub source: String,
    pub target: String,
    pub relation_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawGraph {
    pub entities: Vec<RawEntity>,
    pub relations: Vec<RawRelation>,
}

/// The graph-reload payload: either an already-enhanced snapshot (installed
/// verbatim) or a raw entity/relation list (run through the transformer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ReloadPayload {
    Enhanced(GraphData),
    Raw(RawGraph),
}
