// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over graph snapshots.
//!
//! Queries provide derived views (adjacency, tag lookups, search) that power
//! the UI, the highlight reducers, and MCP tools.

pub mod adjacency;
pub mod search;

pub use adjacency::{connected_link_keys, connected_sets, degrees, nodes_with_tag, NodeDegree};
pub use search::{node_search, NodeSearchMode};
