// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic graph builders shared by the benches.

use galatea::model::{EdgeKind, Spider, SpiderKind, ZxGraph};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumRing,
    LargeRing,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumRing => "medium_ring",
            Self::LargeRing => "large_ring",
        }
    }

    fn spiders(self) -> usize {
        match self {
            Self::Small => 2,
            Self::MediumRing => 32,
            Self::LargeRing => 256,
        }
    }
}

/// A ring of alternating Z/X spiders, every third wire Hadamard, with a
/// boundary hanging off every eighth spider.
pub fn fixture(case: Case) -> ZxGraph {
    let count = case.spiders();
    let mut graph = ZxGraph::new();

    let ids: Vec<_> = (0..count)
        .map(|index| {
            let kind = if index % 2 == 0 {
                SpiderKind::Z
            } else {
                SpiderKind::X
            };
            let mut spider = Spider::new(index as i32 * 10, 0, kind);
            spider.set_phase(format!("{}", (index % 8) * 45));
            graph.add_spider(spider)
        })
        .collect();

    for index in 0..count {
        let kind = if index % 3 == 0 {
            EdgeKind::Hadamard
        } else {
            EdgeKind::Normal
        };
        let next = (index + 1) % count;
        if next != index {
            graph
                .add_edge(ids[index], ids[next], kind)
                .expect("ring edge");
        }
    }

    for index in (0..count).step_by(8) {
        let label = graph.generate_unique_boundary_label();
        let boundary = graph.add_spider(Spider::boundary(index as i32 * 10, 40, label));
        graph
            .add_edge(ids[index], boundary, EdgeKind::Normal)
            .expect("boundary edge");
    }

    graph
}

/// Cheap structural checksum to keep results observable.
pub fn checksum(graph: &ZxGraph) -> u64 {
    graph.spiders().len() as u64 * 31 + graph.edges().len() as u64
}
