// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::ViewState;
use crate::model::{GraphData, ReloadPayload};

/// What the operator currently sees, attached to read-style responses so
/// the agent can coordinate with the human side.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewContext {
    pub selected_node_ids: Vec<String>,
    pub highlighted_node_ids: Vec<String>,
    pub hovered_node_id: Option<String>,
    pub hover_mode: bool,
    pub console_visible: bool,
    pub is_loading: bool,
}

impl ViewContext {
    pub fn from_state(state: &ViewState) -> Self {
        Self {
            selected_node_ids: state
                .selections()
                .iter()
                .map(|selection| selection.node_id().to_owned())
                .collect(),
            highlighted_node_ids: state.highlighted_nodes().iter().cloned().collect(),
            hovered_node_id: state.hovered_node_id().map(ToOwned::to_owned),
            hover_mode: state.hover_mode(),
            console_visible: state.console_visible(),
            is_loading: state.is_loading(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GraphReloadParams {
    /// Either an enhanced `{nodes, links, layers, tagIndex}` snapshot or a
    /// raw `{entities, relations}` listing.
    pub payload: ReloadPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphReloadResponse {
    pub nodes: u64,
    pub links: u64,
    pub context: ViewContext,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GraphHighlightParams {
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphHighlightResponse {
    pub highlighted_node_ids: Vec<String>,
    pub highlighted_link_ids: Vec<String>,
    pub context: ViewContext,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphGetResponse {
    pub graph: GraphData,
    pub context: ViewContext,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GraphSearchParams {
    pub query: String,
    /// `substring` (default), `regex`, or `fuzzy`.
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphSearchResponse {
    pub node_ids: Vec<String>,
    pub context: ViewContext,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GraphTagParams {
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphTagResponse {
    pub node_ids: Vec<String>,
    pub context: ViewContext,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphExportResponse {
    pub file_name: String,
    pub json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsoleMessage {
    pub message_id: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsolePollResponse {
    pub messages: Vec<ConsoleMessage>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConsoleReplyParams {
    pub message_id: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsoleReplyResponse {
    pub delivered: bool,
}
