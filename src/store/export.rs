// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::GraphData;

pub const EXPORT_FILE_NAME: &str = "neron-graph-export.json";

#[derive(Debug)]
pub enum StoreError {
    Serialize(serde_json::Error),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize graph: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Serializes a snapshot to indented JSON. The output re-imports as a
/// reload payload yielding an equal snapshot (layers and tag index are
/// carried verbatim since the snapshot is already enhanced).
pub fn export_json(graph: &GraphData) -> Result<String, StoreError> {
    serde_json::to_string_pretty(graph).map_err(StoreError::Serialize)
}

/// Writes the export file into `dir` and returns its path.
pub fn export_to_dir(graph: &GraphData, dir: &Path) -> Result<PathBuf, StoreError> {
    let json = export_json(graph)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, json).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn import_json(json: &str) -> Result<GraphData, StoreError> {
    serde_json::from_str(json).map_err(StoreError::Serialize)
}
