// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Graph snapshots contain enriched nodes and typed links plus the derived
//! layer groupings and tag index; raw payloads carry the pre-enrichment
//! entity/relation vocabulary.

pub mod fixtures;
pub mod graph;
pub mod raw;
pub mod selection;

pub use graph::{
    link_key, GraphData, GraphLayer, GraphLink, GraphNode, LinkEnd, NodeMetadata, NodeTag,
};
pub use raw::{RawEntity, RawGraph, RawRelation, ReloadPayload};
pub use selection::{NodeSelection, ScreenPosition};
