// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot cache and JSON export.
//!
//! The store holds the latest graph snapshot under well-known keys for
//! reuse within the session, and serializes snapshots to the export file
//! consumed back through `graph.reload`.

pub mod export;
pub mod graph_cache;

pub use export::{export_json, export_to_dir, import_json, StoreError, EXPORT_FILE_NAME};
pub use graph_cache::{CacheKey, GraphCache};
