// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::model::GraphData;

/// Well-known cache slots. One entry per key for the session lifetime; no
/// eviction at this scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheKey {
    /// The latest full graph snapshot.
    FullGraph,
}

impl CacheKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullGraph => "graph:full",
        }
    }
}

/// Keyed snapshot cache shared across the process.
///
/// `set` overwrites, `get` returns a clone of the stored value or `None`;
/// neither ever fails. Writing is how downstream consumers observe the
/// latest snapshot without re-deriving it.
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    entries: Arc<Mutex<BTreeMap<CacheKey, GraphData>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache instance.
    pub fn global() -> &'static GraphCache {
        static GLOBAL: OnceLock<GraphCache> = OnceLock::new();
        GLOBAL.get_or_init(GraphCache::new)
    }

    pub fn set(&self, key: CacheKey, value: GraphData) {
        let mut entries = self.entries.lock().expect("graph cache lock poisoned");
        entries.insert(key, value);
    }

    pub fn get(&self, key: CacheKey) -> Option<GraphData> {
        let entries = self.entries.lock().expect("graph cache lock poisoned");
        entries.get(&key).cloned()
    }
}
