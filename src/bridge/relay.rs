// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// Prefix of console lines produced by failed message sends.
pub const SEND_ERROR_MARKER: &str = "[error]";

/// A console message queued for the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub message_id: u64,
    pub text: String,
}

/// A send in flight: resolves once the agent replies, or errors when the
/// relay side is dropped.
#[derive(Debug)]
pub struct PendingReply {
    pub message_id: u64,
    pub receiver: oneshot::Receiver<String>,
}

#[derive(Debug, Default)]
struct RelayInner {
    next_id: u64,
    pending: VecDeque<OutboundMessage>,
    waiting: BTreeMap<u64, oneshot::Sender<String>>,
}

/// Console-to-agent message relay.
///
/// The operator side enqueues with [`AgentRelay::begin_send`]; the agent
/// drains with `poll` and completes with `reply`. Multiple sends may be in
/// flight concurrently; each resolves independently.
#[derive(Debug, Clone, Default)]
pub struct AgentRelay {
    inner: Arc<Mutex<RelayInner>>,
}

impl AgentRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_send(&self, text: impl Into<String>) -> PendingReply {
        let (sender, receiver) = oneshot::channel();
        let mut inner = self.inner.lock().expect("agent relay lock poisoned");
        inner.next_id += 1;
        let message_id = inner.next_id;
        inner.pending.push_back(OutboundMessage {
            message_id,
            text: text.into(),
        });
        inner.waiting.insert(message_id, sender);

        PendingReply {
            message_id,
            receiver,
        }
    }

    /// Drains messages not yet seen by the agent. Replies stay open until
    /// `reply` or drop.
    pub fn poll(&self) -> Vec<OutboundMessage> {
        let mut inner = self.inner.lock().expect("agent relay lock poisoned");
        inner.pending.drain(..).collect()
    }

    /// Completes a pending send. Returns `false` for unknown or already
    /// answered message ids.
    pub fn reply(&self, message_id: u64, text: impl Into<String>) -> bool {
        let sender = {
            let mut inner = self.inner.lock().expect("agent relay lock poisoned");
            inner.pending.retain(|message| message.message_id != message_id);
            inner.waiting.remove(&message_id)
        };
        match sender {
            Some(sender) => sender.send(text.into()).is_ok(),
            None => false,
        }
    }

    pub fn waiting_count(&self) -> usize {
        let inner = self.inner.lock().expect("agent relay lock poisoned");
        inner.waiting.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentRelay, OutboundMessage};

    #[tokio::test]
    async fn reply_resolves_the_matching_send() {
        let relay = AgentRelay::new();

        let pending = relay.begin_send("hello");
        let polled = relay.poll();
        assert_eq!(
            polled,
            vec![OutboundMessage {
                message_id: pending.message_id,
                text: "hello".to_owned(),
            }]
        );

        assert!(relay.reply(pending.message_id, "hi back"));
        assert_eq!(pending.receiver.await.as_deref(), Ok("hi back"));
    }

    #[tokio::test]
    async fn concurrent_sends_resolve_independently() {
        let relay = AgentRelay::new();

        let first = relay.begin_send("one");
        let second = relay.begin_send("two");

        assert!(relay.reply(second.message_id, "two back"));
        assert!(relay.reply(first.message_id, "one back"));

        assert_eq!(first.receiver.await.as_deref(), Ok("one back"));
        assert_eq!(second.receiver.await.as_deref(), Ok("two back"));
    }

    #[test]
    fn poll_drains_only_once() {
        let relay = AgentRelay::new();
        let _pending = relay.begin_send("hello");

        assert_eq!(relay.poll().len(), 1);
        assert!(relay.poll().is_empty());
        assert_eq!(relay.waiting_count(), 1);
    }

    #[test]
    fn reply_to_unknown_id_is_rejected() {
        let relay = AgentRelay::new();
        assert!(!relay.reply(42, "nobody asked"));
    }
}
