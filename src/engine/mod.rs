// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction state engine.
//!
//! Owns the current graph snapshot plus hover/selection/highlight state and
//! reduces external signals and user gestures into the next state. Every
//! reducer produces a fresh [`ViewState`] atomically; `highlighted_nodes`
//! and `highlighted_links` are always recomputed together against the graph
//! current at application time, never independently mutated.

use std::collections::BTreeSet;

use crate::model::{GraphData, NodeSelection, ReloadPayload, ScreenPosition};
use crate::query::{connected_link_keys, connected_sets};
use crate::transform::{enhance, transform};

/// Detail cards anchor at the pointer position shifted by this offset so
/// the card does not obscure the clicked node.
pub const CARD_OFFSET: (f64, f64) = (12.0, -12.0);

/// The single state record the engine owns. Readers (rendering surface,
/// console) only ever see published snapshots of this.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    graph: GraphData,
    selections: Vec<NodeSelection>,
    highlighted_nodes: BTreeSet<String>,
    highlighted_links: BTreeSet<String>,
    hovered_node_id: Option<String>,
    hover_mode: bool,
    console_visible: bool,
    fullscreen: bool,
    loading: bool,
}

impl ViewState {
    pub fn new(graph: GraphData) -> Self {
        Self {
            graph,
            selections: Vec::new(),
            highlighted_nodes: BTreeSet::new(),
            highlighted_links: BTreeSet::new(),
            hovered_node_id: None,
            hover_mode: false,
            console_visible: false,
            fullscreen: false,
            loading: false,
        }
    }

    /// State seeded with the built-in bootstrap graph.
    pub fn bootstrap() -> Self {
        Self::new(crate::transform::bootstrap_graph())
    }

    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    pub fn selections(&self) -> &[NodeSelection] {
        &self.selections
    }

    pub fn selection(&self, node_id: &str) -> Option<&NodeSelection> {
        self.selections
            .iter()
            .find(|selection| selection.node_id() == node_id)
    }

    pub fn highlighted_nodes(&self) -> &BTreeSet<String> {
        &self.highlighted_nodes
    }

    pub fn highlighted_links(&self) -> &BTreeSet<String> {
        &self.highlighted_links
    }

    pub fn hovered_node_id(&self) -> Option<&str> {
        self.hovered_node_id.as_deref()
    }

    pub fn hover_mode(&self) -> bool {
        self.hover_mode
    }

    pub fn console_visible(&self) -> bool {
        self.console_visible
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// An external signal or local gesture, already translated by the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Reload {
        payload: ReloadPayload,
        now_millis: u64,
    },
    HighlightNodes {
        node_ids: Vec<String>,
    },
    Hover {
        node_id: Option<String>,
    },
    Click {
        node_id: String,
        position: ScreenPosition,
    },
    DoubleClick {
        node_id: String,
        position: ScreenPosition,
    },
    BackgroundClick,
    CloseSelection {
        node_id: String,
    },
    ToggleHoverMode,
    ToggleConsole,
    ToggleFullscreen,
    Reset,
    SendStarted,
    SendResolved,
}

/// A side request produced by a reducer, routed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// System notification line for the console feed.
    Notify(String),
    /// Ask the rendering surface to center on these node ids (deferred).
    CenterOn(Vec<String>),
    /// The console just opened and wants input focus.
    FocusConsole,
    /// A new snapshot was installed; the cache should be refreshed.
    StoreSnapshot,
}

/// One atomic state transition: the next state plus its side requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

/// Applies one event to the prior state, producing the next state.
///
/// Runs to completion before the next event is processed; no partial
/// update is ever observable.
pub fn apply(state: &ViewState, event: ViewEvent) -> Transition {
    match event {
        ViewEvent::Reload { payload, now_millis } => reduce_reload(state, payload, now_millis),
        ViewEvent::HighlightNodes { node_ids } => reduce_highlight_nodes(state, node_ids),
        ViewEvent::Hover { node_id } => reduce_hover(state, node_id),
        ViewEvent::Click { node_id, position } => reduce_click(state, node_id, position),
        ViewEvent::DoubleClick { node_id, position } => {
            reduce_double_click(state, node_id, position)
        }
        ViewEvent::BackgroundClick => reduce_background_click(state),
        ViewEvent::CloseSelection { node_id } => reduce_close_selection(state, node_id),
        ViewEvent::ToggleHoverMode => reduce_toggle_hover_mode(state),
        ViewEvent::ToggleConsole => reduce_toggle_console(state),
        ViewEvent::ToggleFullscreen => reduce_toggle_fullscreen(state),
        ViewEvent::Reset => reduce_reset(state),
        ViewEvent::SendStarted => reduce_send_flag(state, true),
        ViewEvent::SendResolved => reduce_send_flag(state, false),
    }
}

// Extracted reducer implementation; keeps `engine::mod` focused on the
// public state/event/effect types.
include!("reducers.rs");
