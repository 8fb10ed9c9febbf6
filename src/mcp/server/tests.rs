// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rmcp::handler::server::wrapper::Parameters;

use crate::bridge::{AgentRelay, Dispatcher, EventBridge};
use crate::engine::ViewState;
use crate::model::ReloadPayload;
use crate::store::{CacheKey, GraphCache, EXPORT_FILE_NAME};

use crate::mcp::types::{
    ConsoleReplyParams, GraphHighlightParams, GraphReloadParams, GraphSearchParams,
    GraphTagParams,
};

use super::NeronMcp;

fn mcp() -> NeronMcp {
    let bridge = EventBridge::new(
        Dispatcher::new(ViewState::bootstrap(), GraphCache::new()),
        AgentRelay::new(),
    );
    NeronMcp::new(bridge).expect("attach mcp")
}

fn raw_payload(json: &str) -> ReloadPayload {
    serde_json::from_str(json).expect("payload")
}

#[tokio::test]
async fn second_server_instance_cannot_steal_the_signal_port() {
    let bridge = EventBridge::new(
        Dispatcher::new(ViewState::bootstrap(), GraphCache::new()),
        AgentRelay::new(),
    );

    let _first = NeronMcp::new(bridge.clone()).expect("first attach");
    NeronMcp::new(bridge).unwrap_err();
}

#[tokio::test]
async fn graph_reload_reports_the_new_counts() {
    let mcp = mcp();

    let response = mcp
        .graph_reload(Parameters(GraphReloadParams {
            payload: raw_payload(
                r#"{"entities":[
                    {"name":"A","type":"SYSTEM","observations":[]},
                    {"name":"B","type":"PROCESS","observations":[]}
                ],"relations":[{"source":"A","target":"B","relationType":"FEEDS"}]}"#,
            ),
        }))
        .await
        .expect("reload")
        .0;

    assert_eq!(response.nodes, 2);
    assert_eq!(response.links, 1);
}

#[tokio::test]
async fn graph_reload_drops_unresolved_relations_without_failing() {
    let mcp = mcp();

    let response = mcp
        .graph_reload(Parameters(GraphReloadParams {
            payload: raw_payload(
                r#"{"entities":[{"name":"X","type":"SYSTEM","observations":[]}],
                    "relations":[{"source":"X","target":"Y","relationType":"LINKS"}]}"#,
            ),
        }))
        .await
        .expect("reload")
        .0;

    assert_eq!(response.nodes, 1);
    assert_eq!(response.links, 0);
}

#[tokio::test]
async fn graph_highlight_returns_the_derived_link_ids() {
    let mcp = mcp();

    let response = mcp
        .graph_highlight(Parameters(GraphHighlightParams {
            node_ids: vec!["NERON-CORE".to_owned()],
        }))
        .await
        .expect("highlight")
        .0;

    assert_eq!(response.highlighted_node_ids, vec!["NERON-CORE".to_owned()]);
    assert_eq!(
        response.highlighted_link_ids,
        vec![
            "NERON-CORE-DATA-FLOW".to_owned(),
            "NERON-CORE-NEURAL-INTERFACE".to_owned(),
        ]
    );
}

#[tokio::test]
async fn graph_get_includes_the_view_context() {
    let mcp = mcp();

    mcp.graph_highlight(Parameters(GraphHighlightParams {
        node_ids: vec!["SENTINEL".to_owned()],
    }))
    .await
    .expect("highlight");

    let response = mcp.graph_get().await.expect("get").0;

    assert_eq!(response.graph.node_count(), 5);
    assert_eq!(
        response.context.highlighted_node_ids,
        vec!["SENTINEL".to_owned()]
    );
    assert!(!response.context.is_loading);
}

#[tokio::test]
async fn graph_search_rejects_unknown_modes_and_bad_regexes() {
    let mcp = mcp();

    let response = mcp
        .graph_search(Parameters(GraphSearchParams {
            query: "neron".to_owned(),
            mode: None,
        }))
        .await
        .expect("search")
        .0;
    assert_eq!(response.node_ids, vec!["NERON-CORE".to_owned()]);

    assert!(mcp
        .graph_search(Parameters(GraphSearchParams {
            query: "x".to_owned(),
            mode: Some("telepathy".to_owned()),
        }))
        .await
        .is_err());

    assert!(mcp
        .graph_search(Parameters(GraphSearchParams {
            query: "(".to_owned(),
            mode: Some("regex".to_owned()),
        }))
        .await
        .is_err());
}

#[tokio::test]
async fn graph_tag_reads_the_tag_index() {
    let mcp = mcp();

    let response = mcp
        .graph_tag(Parameters(GraphTagParams {
            tag: "agent".to_owned(),
        }))
        .await
        .expect("tag")
        .0;

    assert_eq!(response.node_ids, vec!["SENTINEL".to_owned()]);
}

#[tokio::test]
async fn graph_export_round_trips_through_reload() {
    let mcp = mcp();

    let exported = mcp.graph_export().await.expect("export").0;
    assert_eq!(exported.file_name, EXPORT_FILE_NAME);

    let before = mcp.graph_get().await.expect("get").0.graph;
    let response = mcp
        .graph_reload(Parameters(GraphReloadParams {
            payload: serde_json::from_str(&exported.json).expect("payload"),
        }))
        .await
        .expect("reload")
        .0;

    assert_eq!(response.nodes, before.node_count() as u64);
    let after = mcp.graph_get().await.expect("get").0.graph;
    assert_eq!(after, before);
}

#[tokio::test]
async fn reload_refreshes_the_shared_cache() {
    let cache = GraphCache::new();
    let bridge = EventBridge::new(
        Dispatcher::new(ViewState::bootstrap(), cache.clone()),
        AgentRelay::new(),
    );
    let mcp = NeronMcp::new(bridge).expect("attach");

    mcp.graph_reload(Parameters(GraphReloadParams {
        payload: raw_payload(
            r#"{"entities":[{"name":"ONLY","type":"SYSTEM","observations":[]}],"relations":[]}"#,
        ),
    }))
    .await
    .expect("reload");

    let cached = cache.get(CacheKey::FullGraph).expect("cached snapshot");
    assert_eq!(cached.node_count(), 1);
}

#[tokio::test]
async fn console_poll_and_reply_complete_a_send() {
    let mcp = mcp();
    let bridge = mcp.bridge.clone();

    let send = tokio::spawn(async move { bridge.send_message("ping").await });

    let messages = loop {
        let polled = mcp.console_poll().await.expect("poll").0.messages;
        if !polled.is_empty() {
            break polled;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    };
    assert_eq!(messages[0].text, "ping");

    let response = mcp
        .console_reply(Parameters(ConsoleReplyParams {
            message_id: messages[0].message_id,
            text: "pong".to_owned(),
        }))
        .await
        .expect("reply")
        .0;
    assert!(response.delivered);

    assert_eq!(send.await.expect("join"), "pong");
}

#[tokio::test]
async fn console_reply_to_unknown_id_is_not_delivered() {
    let mcp = mcp();

    let response = mcp
        .console_reply(Parameters(ConsoleReplyParams {
            message_id: 999,
            text: "void".to_owned(),
        }))
        .await
        .expect("reply")
        .0;

    assert!(!response.delivered);
}
