// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::engine::{apply, Effect, ViewEvent, ViewState};
use crate::store::{CacheKey, GraphCache};

const NOTIFICATION_LIMIT: usize = 64;

/// Centering is deferred so the rendering surface can finish laying out the
/// new state first.
pub const CENTER_DELAY: Duration = Duration::from_millis(120);

#[derive(Debug)]
struct DeferredCenter {
    due_at: Instant,
    node_ids: Vec<String>,
}

#[derive(Debug, Default)]
struct Feed {
    notifications: VecDeque<String>,
    centers: VecDeque<DeferredCenter>,
    console_focus_requested: bool,
}

/// Serializes reducer application over the shared view state and routes
/// effects to their consumers (notification feed, cache, deferred center
/// queue). Both the MCP server and the TUI mutate state only through this.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    state: Arc<Mutex<ViewState>>,
    cache: GraphCache,
    feed: Arc<StdMutex<Feed>>,
}

impl Dispatcher {
    pub fn new(state: ViewState, cache: GraphCache) -> Self {
        cache.set(CacheKey::FullGraph, state.graph().clone());
        Self {
            state: Arc::new(Mutex::new(state)),
            cache,
            feed: Arc::new(StdMutex::new(Feed::default())),
        }
    }

    pub async fn dispatch(&self, event: ViewEvent) -> ViewState {
        let mut state = self.state.lock().await;
        self.reduce(&mut state, event)
    }

    /// Same as [`Dispatcher::dispatch`] for callers off the runtime (the
    /// TUI input loop runs under `spawn_blocking`).
    pub fn dispatch_blocking(&self, event: ViewEvent) -> ViewState {
        let mut state = self.state.blocking_lock();
        self.reduce(&mut state, event)
    }

    fn reduce(&self, state: &mut ViewState, event: ViewEvent) -> ViewState {
        let transition = apply(state, event);
        *state = transition.state.clone();

        let mut feed = self.feed.lock().expect("dispatcher feed lock poisoned");
        for effect in transition.effects {
            match effect {
                Effect::Notify(message) => {
                    if feed.notifications.len() == NOTIFICATION_LIMIT {
                        feed.notifications.pop_front();
                    }
                    feed.notifications.push_back(message);
                }
                Effect::CenterOn(node_ids) => {
                    feed.centers.push_back(DeferredCenter {
                        due_at: Instant::now() + CENTER_DELAY,
                        node_ids,
                    });
                }
                Effect::FocusConsole => feed.console_focus_requested = true,
                Effect::StoreSnapshot => {
                    self.cache
                        .set(CacheKey::FullGraph, transition.state.graph().clone());
                }
            }
        }

        transition.state
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub fn snapshot_blocking(&self) -> ViewState {
        self.state.blocking_lock().clone()
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// Appends a line to the notification feed directly (boundary messages
    /// that do not originate from a reducer, e.g. agent replies).
    pub fn notify(&self, message: impl Into<String>) {
        let mut feed = self.feed.lock().expect("dispatcher feed lock poisoned");
        if feed.notifications.len() == NOTIFICATION_LIMIT {
            feed.notifications.pop_front();
        }
        feed.notifications.push_back(message.into());
    }

    pub fn notifications(&self) -> Vec<String> {
        let feed = self.feed.lock().expect("dispatcher feed lock poisoned");
        feed.notifications.iter().cloned().collect()
    }

    /// Pops center requests whose deferral has elapsed.
    pub fn due_center_requests(&self) -> Vec<Vec<String>> {
        let now = Instant::now();
        let mut feed = self.feed.lock().expect("dispatcher feed lock poisoned");
        let mut due = Vec::new();
        while feed
            .centers
            .front()
            .is_some_and(|center| center.due_at <= now)
        {
            let center = feed.centers.pop_front().expect("non-empty after front()");
            due.push(center.node_ids);
        }
        due
    }

    /// True once per console-open request; reading clears the flag.
    pub fn take_console_focus_request(&self) -> bool {
        let mut feed = self.feed.lock().expect("dispatcher feed lock poisoned");
        std::mem::take(&mut feed.console_focus_requested)
    }
}
