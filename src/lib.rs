// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Neron — terminal knowledge graph explorer (interaction engine + MCP).
//!
//! The core is the graph synchronization and interaction-state engine:
//! raw entity/relation payloads are enriched into indexed snapshots, and
//! external signals plus operator gestures reduce into consistent
//! hover/selection/highlight state.

pub mod bridge;
pub mod engine;
pub mod mcp;
pub mod model;
pub mod query;
pub mod store;
pub mod transform;
pub mod tui;
