// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::raw::{RawEntity, RawGraph, RawRelation};

fn entity(name: &str, entity_type: &str, observations: &[&str]) -> RawEntity {
    RawEntity {
        name: name.to_owned(),
        entity_type: entity_type.to_owned(),
        observations: observations.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn relation(source: &str, target: &str, relation_type: &str) -> RawRelation {
    RawRelation {
        source: source.to_owned(),
        target: target.to_owned(),
        relation_type: relation_type.to_owned(),
    }
}

/// The seed graph installed at process start, before any reload arrives.
pub fn bootstrap_raw() -> RawGraph {
    RawGraph {
        entities: vec![
            entity(
                "NERON-CORE",
                "SYSTEM",
                &["Central orchestration lattice", "Runs the cognition loop"],
            ),
            entity(
                "DATA-FLOW",
                "PROCESS",
                &["Streams telemetry between subsystems"],
            ),
            entity(
                "NEURAL-INTERFACE",
                "INTERFACE",
                &["Operator-facing neural I/O surface"],
            ),
            entity("MEMORY-VAULT", "STORAGE", &["Long-term observation archive"]),
            entity("SENTINEL", "AGENT", &["Watches the lattice for anomalies"]),
        ],
        relations: vec![
            relation("NERON-CORE", "DATA-FLOW", "FEEDS"),
            relation("NERON-CORE", "NEURAL-INTERFACE", "EXPOSES"),
            relation("DATA-FLOW", "MEMORY-VAULT", "PERSISTS-TO"),
            relation("SENTINEL", "DATA-FLOW", "MONITORS"),
            relation("SENTINEL", "MEMORY-VAULT", "AUDITS"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::bootstrap_raw;

    #[test]
    fn bootstrap_relations_reference_known_entities() {
        let raw = bootstrap_raw();
        for relation in &raw.relations {
            assert!(raw.entities.iter().any(|e| e.name == relation.source));
            assert!(raw.entities.iter().any(|e| e.name == relation.target));
        }
    }

    #[test]
    fn bootstrap_core_node_has_exactly_two_incident_relations() {
        let raw = bootstrap_raw();
        let incident = raw
            .relations
            .iter()
            .filter(|r| r.source == "NERON-CORE" || r.target == "NERON-CORE")
            .count();

        assert_eq!(incident, 2);
    }
}
