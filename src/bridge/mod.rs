// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! External event bridge.
//!
//! Translates external signals (graph reload, node highlight) and local
//! input (pointer gestures, keyboard shortcuts) into exactly one reducer
//! call each, and relays console messages between the operator and the
//! agent. Signal delivery requires an attached [`SignalPort`]; the port is
//! a scoped acquisition released on drop, so subscribe/unsubscribe cycles
//! cannot double-deliver.

pub mod dispatcher;
pub mod relay;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::engine::{ViewEvent, ViewState};
use crate::model::{ReloadPayload, ScreenPosition};

pub use dispatcher::{Dispatcher, CENTER_DELAY};
pub use relay::{AgentRelay, OutboundMessage, PendingReply, SEND_ERROR_MARKER};

const SEND_TIMEOUT: Duration = Duration::from_secs(60);

/// An externally raised signal, as received over the tool channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalSignal {
    GraphReload { payload: ReloadPayload },
    NodeHighlight { node_ids: Vec<String> },
}

/// A pointer gesture already resolved against the rendered scene.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerGesture {
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
    Background,
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wires input sources to the dispatcher for the lifetime of the UI.
#[derive(Clone, Debug)]
pub struct EventBridge {
    dispatcher: Dispatcher,
    relay: AgentRelay,
    attached: Arc<AtomicBool>,
}

impl EventBridge {
    pub fn new(dispatcher: Dispatcher, relay: AgentRelay) -> Self {
        Self {
            dispatcher,
            relay,
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn relay(&self) -> &AgentRelay {
        &self.relay
    }

    /// Acquires the signal delivery port. Fails while a previous port is
    /// still alive, so external signals are never delivered twice.
    pub fn attach(&self) -> Result<SignalPort, AttachError> {
        if self.attached.swap(true, Ordering::SeqCst) {
            return Err(AttachError::PortBusy);
        }
        Ok(SignalPort {
            dispatcher: self.dispatcher.clone(),
            attached: self.attached.clone(),
        })
    }

    pub fn handle_gesture(&self, gesture: PointerGesture) -> ViewState {
        let event = match gesture {
            PointerGesture::Hover { node_id } => ViewEvent::Hover { node_id },
            PointerGesture::Click { node_id, position } => {
                ViewEvent::Click { node_id, position }
            }
            PointerGesture::DoubleClick { node_id, position } => {
                ViewEvent::DoubleClick { node_id, position }
            }
            PointerGesture::Background => ViewEvent::BackgroundClick,
        };
        self.dispatcher.dispatch_blocking(event)
    }

    /// Handles the global shortcuts (`h` hover mode, `/` console, `f`
    /// fullscreen). Suppressed entirely while a text input has focus.
    /// Returns whether the key was consumed.
    pub fn handle_shortcut(&self, ch: char, text_input_focused: bool) -> bool {
        if text_input_focused {
            return false;
        }

        let event = match ch {
            'h' => ViewEvent::ToggleHoverMode,
            '/' => ViewEvent::ToggleConsole,
            'f' => ViewEvent::ToggleFullscreen,
            _ => return false,
        };
        self.dispatcher.dispatch_blocking(event);
        true
    }

    /// Sends a console message to the agent and waits for the reply.
    ///
    /// Never fails: transport errors and timeouts come back as a string
    /// prefixed with [`SEND_ERROR_MARKER`] so the console can always render
    /// something. Concurrent sends run independently; the loading flag is
    /// cleared by whichever resolution lands last.
    pub async fn send_message(&self, text: &str) -> String {
        self.send_message_with_timeout(text, SEND_TIMEOUT).await
    }

    pub async fn send_message_with_timeout(&self, text: &str, timeout: Duration) -> String {
        self.dispatcher.dispatch(ViewEvent::SendStarted).await;
        let pending = self.relay.begin_send(text);

        let outcome = tokio::time::timeout(timeout, pending.receiver).await;
        self.dispatcher.dispatch(ViewEvent::SendResolved).await;

        match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => format!("{SEND_ERROR_MARKER} message channel closed"),
            Err(_) => format!("{SEND_ERROR_MARKER} no reply from agent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    PortBusy,
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PortBusy => f.write_str("signal port is already attached"),
        }
    }
}

impl std::error::Error for AttachError {}

/// Exclusive handle for delivering external signals; dropping it releases
/// the subscription so a later component instance can re-attach.
#[derive(Debug)]
pub struct SignalPort {
    dispatcher: Dispatcher,
    attached: Arc<AtomicBool>,
}

impl SignalPort {
    /// Translates one signal into one reducer call and returns the state
    /// it produced.
    pub async fn deliver(&self, signal: ExternalSignal) -> ViewState {
        let event = match signal {
            ExternalSignal::GraphReload { payload } => ViewEvent::Reload {
                payload,
                now_millis: now_millis(),
            },
            ExternalSignal::NodeHighlight { node_ids } => ViewEvent::HighlightNodes { node_ids },
        };
        self.dispatcher.dispatch(event).await
    }
}

impl Drop for SignalPort {
    fn drop(&mut self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}
