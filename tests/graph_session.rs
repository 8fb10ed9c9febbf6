// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end session flow through the public API: reload, highlight,
//! interaction, export, re-import.

use neron::bridge::{AgentRelay, Dispatcher, EventBridge, ExternalSignal};
use neron::engine::{ViewEvent, ViewState};
use neron::model::{ReloadPayload, ScreenPosition};
use neron::store::{export_json, import_json, CacheKey, GraphCache};

fn bridge_with_cache() -> (EventBridge, GraphCache) {
    let cache = GraphCache::new();
    let bridge = EventBridge::new(
        Dispatcher::new(ViewState::bootstrap(), cache.clone()),
        AgentRelay::new(),
    );
    (bridge, cache)
}

#[tokio::test]
async fn reload_highlight_and_lock_keep_derived_state_consistent() {
    let (bridge, _cache) = bridge_with_cache();
    let port = bridge.attach().expect("attach");

    let payload: ReloadPayload = serde_json::from_str(
        r#"{
            "entities": [
                {"name": "ALPHA", "type": "SYSTEM", "observations": ["root"]},
                {"name": "BETA", "type": "PROCESS", "observations": []},
                {"name": "GAMMA", "type": "PROCESS", "observations": []}
            ],
            "relations": [
                {"source": "ALPHA", "target": "BETA", "relationType": "FEEDS"},
                {"source": "BETA", "target": "GAMMA", "relationType": "FEEDS"},
                {"source": "ALPHA", "target": "MISSING", "relationType": "FEEDS"}
            ]
        }"#,
    )
    .expect("payload");

    let state = port
        .deliver(ExternalSignal::GraphReload { payload })
        .await;
    assert_eq!(state.graph().node_count(), 3);
    assert_eq!(state.graph().link_count(), 2);

    let state = port
        .deliver(ExternalSignal::NodeHighlight {
            node_ids: vec!["BETA".to_owned()],
        })
        .await;
    assert_eq!(
        state.highlighted_links().iter().cloned().collect::<Vec<_>>(),
        vec!["ALPHA-BETA".to_owned(), "BETA-GAMMA".to_owned()]
    );

    let state = bridge
        .dispatcher()
        .dispatch(ViewEvent::DoubleClick {
            node_id: "ALPHA".to_owned(),
            position: ScreenPosition::new(50.0, 50.0),
        })
        .await;
    assert!(state.highlighted_nodes().contains("ALPHA"));
    assert!(state.highlighted_nodes().contains("BETA"));
    assert!(!state.highlighted_nodes().contains("GAMMA"));

    let state = bridge.dispatcher().dispatch(ViewEvent::BackgroundClick).await;
    assert_eq!(state.selections().len(), 1);
    assert!(state.selections()[0].persistent);
    assert!(state.highlighted_nodes().is_empty());
    assert!(state.highlighted_links().is_empty());
}

#[tokio::test]
async fn export_reimports_into_an_equal_snapshot() {
    let (bridge, _cache) = bridge_with_cache();
    let port = bridge.attach().expect("attach");

    let before = bridge.dispatcher().snapshot().await.graph().clone();
    let json = export_json(&before).expect("export");

    assert_eq!(import_json(&json).expect("import"), before);

    let payload: ReloadPayload = serde_json::from_str(&json).expect("reload payload");
    let state = port
        .deliver(ExternalSignal::GraphReload { payload })
        .await;

    assert_eq!(state.graph(), &before);
}

#[tokio::test]
async fn the_cache_always_holds_the_latest_snapshot() {
    let (bridge, cache) = bridge_with_cache();
    let port = bridge.attach().expect("attach");

    let seeded = cache.get(CacheKey::FullGraph).expect("seed snapshot");
    assert_eq!(seeded.node_count(), 5);

    let payload: ReloadPayload = serde_json::from_str(
        r#"{"entities":[{"name":"SOLO","type":"SYSTEM","observations":[]}],"relations":[]}"#,
    )
    .expect("payload");
    port.deliver(ExternalSignal::GraphReload { payload }).await;

    let cached = cache.get(CacheKey::FullGraph).expect("latest snapshot");
    assert_eq!(cached.node_count(), 1);
    assert_eq!(cached.nodes[0].id, "SOLO");
}

#[tokio::test]
async fn notifications_record_reload_counts_and_highlight_ids() {
    let (bridge, _cache) = bridge_with_cache();
    let port = bridge.attach().expect("attach");

    let payload: ReloadPayload = serde_json::from_str(
        r#"{"entities":[{"name":"A","type":"SYSTEM","observations":[]}],"relations":[]}"#,
    )
    .expect("payload");
    port.deliver(ExternalSignal::GraphReload { payload }).await;
    port.deliver(ExternalSignal::NodeHighlight {
        node_ids: vec!["A".to_owned()],
    })
    .await;

    let notifications = bridge.dispatcher().notifications();
    assert!(notifications.contains(&"graph reloaded: 1 nodes, 0 links".to_owned()));
    assert!(notifications.contains(&"highlighting nodes: A".to_owned()));
}
