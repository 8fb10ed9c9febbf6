// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Reducer implementations for `engine::apply`.
fn reduce_reload(state: &ViewState, payload: ReloadPayload, now_millis: u64) -> Transition {
    let mut effects = Vec::new();

    let graph = match payload {
        ReloadPayload::Enhanced(graph) => {
            if graph.is_enhanced() {
                graph
            } else {
                enhance(graph)
            }
        }
        ReloadPayload::Raw(raw) => {
            let outcome = transform(&raw, now_millis);
            for warning in &outcome.warnings {
                effects.push(Effect::Notify(warning.to_string()));
            }
            outcome.graph
        }
    };

    let mut next = state.clone();

    // A topology change invalidates prior derived highlight state.
    next.highlighted_nodes = BTreeSet::new();
    next.highlighted_links = BTreeSet::new();

    // Selections follow their node id across the reload; cards for nodes
    // that no longer exist are dropped in the same transition.
    next.selections = state
        .selections
        .iter()
        .filter_map(|selection| {
            graph.node(selection.node_id()).map(|node| NodeSelection {
                node: node.clone(),
                position: selection.position,
                persistent: selection.persistent,
            })
        })
        .collect();
    next.hovered_node_id = state
        .hovered_node_id
        .as_ref()
        .filter(|node_id| graph.has_node(node_id))
        .cloned();

    effects.push(Effect::Notify(format!(
        "graph reloaded: {} nodes, {} links",
        graph.node_count(),
        graph.link_count()
    )));
    effects.push(Effect::StoreSnapshot);

    next.graph = graph;
    Transition {
        state: next,
        effects,
    }
}

fn reduce_highlight_nodes(state: &ViewState, node_ids: Vec<String>) -> Transition {
    let highlighted_nodes: BTreeSet<String> = node_ids.iter().cloned().collect();
    // Recomputed from the graph current at application time; a racing
    // reload is last-write-wins, never merged.
    let highlighted_links = connected_link_keys(&state.graph, &highlighted_nodes);

    let mut next = state.clone();
    next.highlighted_nodes = highlighted_nodes;
    next.highlighted_links = highlighted_links;

    let effects = vec![
        Effect::Notify(format!("highlighting nodes: {}", node_ids.join(", "))),
        Effect::CenterOn(node_ids),
    ];

    Transition {
        state: next,
        effects,
    }
}

fn reduce_hover(state: &ViewState, node_id: Option<String>) -> Transition {
    let mut next = state.clone();
    next.hovered_node_id = node_id;

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_click(state: &ViewState, node_id: String, position: ScreenPosition) -> Transition {
    let mut next = state.clone();

    // A plain click is not additive: it discards every prior selection,
    // locked ones included.
    if let Some(node) = state.graph.node(&node_id) {
        next.selections = vec![NodeSelection {
            node: node.clone(),
            position: position.offset(CARD_OFFSET.0, CARD_OFFSET.1),
            persistent: false,
        }];
    }

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_double_click(state: &ViewState, node_id: String, position: ScreenPosition) -> Transition {
    let Some(node) = state.graph.node(&node_id) else {
        return Transition {
            state: state.clone(),
            effects: Vec::new(),
        };
    };

    let (connected_nodes, connected_links) = connected_sets(&state.graph, &node_id);

    let mut next = state.clone();
    next.highlighted_nodes = connected_nodes;
    next.highlighted_links = connected_links;

    let locked = NodeSelection {
        node: node.clone(),
        position: position.offset(CARD_OFFSET.0, CARD_OFFSET.1),
        persistent: true,
    };
    match next
        .selections
        .iter_mut()
        .find(|selection| selection.node_id() == node_id)
    {
        // Locking an already-open card must not duplicate it.
        Some(existing) => *existing = locked,
        None => next.selections.push(locked),
    }

    Transition {
        state: next,
        effects: vec![Effect::CenterOn(vec![node_id])],
    }
}

fn reduce_background_click(state: &ViewState) -> Transition {
    let mut next = state.clone();
    next.selections = state
        .selections
        .iter()
        .filter(|selection| selection.persistent)
        .cloned()
        .collect();
    next.highlighted_nodes = BTreeSet::new();
    next.highlighted_links = BTreeSet::new();

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_close_selection(state: &ViewState, node_id: String) -> Transition {
    let mut next = state.clone();
    next.selections = state
        .selections
        .iter()
        .filter(|selection| selection.node_id() != node_id)
        .cloned()
        .collect();

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_toggle_hover_mode(state: &ViewState) -> Transition {
    let mut next = state.clone();
    next.hover_mode = !state.hover_mode;

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_toggle_console(state: &ViewState) -> Transition {
    let mut next = state.clone();
    next.console_visible = !state.console_visible;

    let effects = if next.console_visible {
        vec![Effect::FocusConsole]
    } else {
        Vec::new()
    };

    Transition {
        state: next,
        effects,
    }
}

fn reduce_toggle_fullscreen(state: &ViewState) -> Transition {
    let mut next = state.clone();
    next.fullscreen = !state.fullscreen;

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_reset(state: &ViewState) -> Transition {
    let mut next = state.clone();
    next.selections = Vec::new();
    next.highlighted_nodes = BTreeSet::new();
    next.highlighted_links = BTreeSet::new();
    next.hovered_node_id = None;

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn reduce_send_flag(state: &ViewState, loading: bool) -> Transition {
    let mut next = state.clone();
    next.loading = loading;

    Transition {
        state: next,
        effects: Vec::new(),
    }
}
