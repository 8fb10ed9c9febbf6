// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use neron::engine::{apply, ViewEvent, ViewState};
use neron::model::{RawEntity, RawGraph, RawRelation};
use neron::transform::transform;

mod profiler;

fn synthetic_raw(entities: usize, relations_per_entity: usize) -> RawGraph {
    let entity_types = ["SYSTEM", "PROCESS", "INTERFACE", "STORAGE", "AGENT"];
    RawGraph {
        entities: (0..entities)
            .map(|index| RawEntity {
                name: format!("NODE-{index}"),
                entity_type: entity_types[index % entity_types.len()].to_owned(),
                observations: vec![format!("observation for node {index}")],
            })
            .collect(),
        relations: (0..entities)
            .flat_map(|index| {
                (1..=relations_per_entity).map(move |hop| RawRelation {
                    source: format!("NODE-{index}"),
                    target: format!("NODE-{}", (index + hop * 7) % entities),
                    relation_type: "FEEDS".to_owned(),
                })
            })
            .collect(),
    }
}

// Benchmark identity (keep stable):
// - Group name in this file: `engine.sync`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `transform_medium`,
//   `highlight_medium`).
fn benches_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.sync");

    let raw = synthetic_raw(500, 2);
    group.bench_function("transform_medium", |b| {
        b.iter(|| transform(black_box(&raw), 0))
    });

    let state = ViewState::new(transform(&raw, 0).graph);
    let node_ids: Vec<String> = (0..50).map(|index| format!("NODE-{}", index * 10)).collect();
    group.bench_function("highlight_medium", |b| {
        b.iter_batched(
            || state.clone(),
            |state| {
                apply(
                    black_box(&state),
                    ViewEvent::HighlightNodes {
                        node_ids: node_ids.clone(),
                    },
                )
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("lock_medium", |b| {
        b.iter_batched(
            || state.clone(),
            |state| {
                apply(
                    black_box(&state),
                    ViewEvent::DoubleClick {
                        node_id: "NODE-250".to_owned(),
                        position: neron::model::ScreenPosition::new(10.0, 10.0),
                    },
                )
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_sync
}
criterion_main!(benches);
