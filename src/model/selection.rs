// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::graph::GraphNode;

/// A 2D screen position in pixels, as reported by the pointer device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offsets by `(dx, dy)`, clamping each axis at zero.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: (self.x + dx).max(0.0),
            y: (self.y + dy).max(0.0),
        }
    }
}

/// An open detail card for one node.
///
/// Non-persistent selections are ephemeral click picks; persistent ("locked")
/// selections survive background clicks and must be closed explicitly.
/// Identity is the node id, never the position in the selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeSelection {
    pub node: GraphNode,
    pub position: ScreenPosition,
    pub persistent: bool,
}

impl NodeSelection {
    pub fn node_id(&self) -> &str {
        &self.node.id
    }
}
