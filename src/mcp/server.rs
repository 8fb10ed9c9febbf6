// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::bridge::{AttachError, EventBridge, ExternalSignal, SignalPort};
use crate::query::{node_search, nodes_with_tag, NodeSearchMode};
use crate::store::{export_json, EXPORT_FILE_NAME};

use super::types::*;

#[derive(Clone, Debug)]
pub struct NeronMcp {
    bridge: EventBridge,
    port: Arc<SignalPort>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NeronMcp {
    /// Binds the MCP surface to the bridge. Fails if another component
    /// already holds the signal port.
    pub fn new(bridge: EventBridge) -> Result<Self, AttachError> {
        let port = Arc::new(bridge.attach()?);
        Ok(Self {
            bridge,
            port,
            tool_router: Self::tool_router(),
        })
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Replace the whole graph. Accepts an enhanced snapshot (installed
    /// verbatim) or raw entities/relations (enriched first); returns the
    /// resulting node/link counts.
    #[tool(name = "graph.reload")]
    async fn graph_reload(
        &self,
        params: Parameters<GraphReloadParams>,
    ) -> Result<Json<GraphReloadResponse>, ErrorData> {
        let GraphReloadParams { payload } = params.0;

        let state = self
            .port
            .deliver(ExternalSignal::GraphReload { payload })
            .await;

        Ok(Json(GraphReloadResponse {
            nodes: state.graph().node_count() as u64,
            links: state.graph().link_count() as u64,
            context: ViewContext::from_state(&state),
        }))
    }

    /// Highlight nodes by id and ask the view to center on them. An empty
    /// list clears the highlight.
    #[tool(name = "graph.highlight")]
    async fn graph_highlight(
        &self,
        params: Parameters<GraphHighlightParams>,
    ) -> Result<Json<GraphHighlightResponse>, ErrorData> {
        let GraphHighlightParams { node_ids } = params.0;

        let state = self
            .port
            .deliver(ExternalSignal::NodeHighlight { node_ids })
            .await;

        Ok(Json(GraphHighlightResponse {
            highlighted_node_ids: state.highlighted_nodes().iter().cloned().collect(),
            highlighted_link_ids: state.highlighted_links().iter().cloned().collect(),
            context: ViewContext::from_state(&state),
        }))
    }

    /// Read the current graph snapshot together with the operator's view
    /// context.
    #[tool(name = "graph.get")]
    async fn graph_get(&self) -> Result<Json<GraphGetResponse>, ErrorData> {
        let state = self.bridge.dispatcher().snapshot().await;

        Ok(Json(GraphGetResponse {
            graph: state.graph().clone(),
            context: ViewContext::from_state(&state),
        }))
    }

    /// Search nodes by id/name/type/tags; results feed `graph.highlight`.
    #[tool(name = "graph.search")]
    async fn graph_search(
        &self,
        params: Parameters<GraphSearchParams>,
    ) -> Result<Json<GraphSearchResponse>, ErrorData> {
        let GraphSearchParams { query, mode } = params.0;

        let mode = match mode.as_deref() {
            None | Some("substring") => NodeSearchMode::Substring,
            Some("regex") => NodeSearchMode::Regex,
            Some("fuzzy") => NodeSearchMode::Fuzzy,
            Some(_) => {
                return Err(ErrorData::invalid_params(
                    "invalid mode (expected substring|regex|fuzzy)",
                    None,
                ))
            }
        };

        let state = self.bridge.dispatcher().snapshot().await;
        let node_ids = node_search(state.graph(), &query, mode)
            .map_err(|err| ErrorData::invalid_params(format!("invalid regex: {err}"), None))?;

        Ok(Json(GraphSearchResponse {
            node_ids,
            context: ViewContext::from_state(&state),
        }))
    }

    /// Look up the tag index: node ids bearing a tag.
    #[tool(name = "graph.tag")]
    async fn graph_tag(
        &self,
        params: Parameters<GraphTagParams>,
    ) -> Result<Json<GraphTagResponse>, ErrorData> {
        let GraphTagParams { tag } = params.0;

        let state = self.bridge.dispatcher().snapshot().await;
        let node_ids = nodes_with_tag(state.graph(), &tag).into_iter().collect();

        Ok(Json(GraphTagResponse {
            node_ids,
            context: ViewContext::from_state(&state),
        }))
    }

    /// Serialize the current graph to the export JSON; re-importing it via
    /// `graph.reload` yields an equal snapshot.
    #[tool(name = "graph.export")]
    async fn graph_export(&self) -> Result<Json<GraphExportResponse>, ErrorData> {
        let state = self.bridge.dispatcher().snapshot().await;
        let json = export_json(state.graph())
            .map_err(|err| ErrorData::internal_error(err.to_string(), None))?;

        Ok(Json(GraphExportResponse {
            file_name: EXPORT_FILE_NAME.to_owned(),
            json,
        }))
    }

    /// Drain console messages the operator sent to the agent. Answer each
    /// with `console.reply`.
    #[tool(name = "console.poll")]
    async fn console_poll(&self) -> Result<Json<ConsolePollResponse>, ErrorData> {
        let messages = self
            .bridge
            .relay()
            .poll()
            .into_iter()
            .map(|message| ConsoleMessage {
                message_id: message.message_id,
                text: message.text,
            })
            .collect();

        Ok(Json(ConsolePollResponse { messages }))
    }

    /// Answer a pending console message by id.
    #[tool(name = "console.reply")]
    async fn console_reply(
        &self,
        params: Parameters<ConsoleReplyParams>,
    ) -> Result<Json<ConsoleReplyResponse>, ErrorData> {
        let ConsoleReplyParams { message_id, text } = params.0;

        let delivered = self.bridge.relay().reply(message_id, text);

        Ok(Json(ConsoleReplyResponse { delivered }))
    }
}

#[tool_handler]
impl ServerHandler for NeronMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Neron knowledge graph server (tools: graph.reload, graph.highlight, graph.get, graph.search, graph.tag, graph.export, console.poll, console.reply)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests;
