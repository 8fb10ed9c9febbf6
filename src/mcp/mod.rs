// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer is the tool-call channel: agents push graph reloads and
//! highlight requests through it and answer console messages the operator
//! sent from the TUI.

mod server;
mod types;

pub use server::NeronMcp;
pub use types::ViewContext;
