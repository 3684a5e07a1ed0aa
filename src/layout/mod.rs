// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Importer layout.
//!
//! Freshly imported diagrams carry no positions; this pass spaces the colored
//! spiders evenly around a circle so the result is immediately viewable, with
//! each boundary pushed outward past its neighbor.

use std::f64::consts::PI;

use crate::model::{SpiderId, SpiderKind, ZxGraph};

/// Places non-boundary spiders evenly on a circle around `(center_x,
/// center_y)`; each boundary spider sits 40 units further out at the angle of
/// the spider it hangs off.
pub fn layout_circle(graph: &mut ZxGraph, center_x: i32, center_y: i32) {
    let inner_ids: Vec<SpiderId> = graph
        .spiders()
        .iter()
        .filter(|(_, spider)| spider.kind() != SpiderKind::Boundary)
        .map(|(spider_id, _)| *spider_id)
        .collect();
    if inner_ids.is_empty() {
        return;
    }

    let count = inner_ids.len();
    let radius = f64::min(100.0, count as f64 * 15.0 + 30.0);

    let edges: Vec<(SpiderId, SpiderId)> = graph
        .edges()
        .values()
        .map(|edge| (edge.source(), edge.target()))
        .collect();

    for (index, spider_id) in inner_ids.iter().enumerate() {
        let angle = 2.0 * PI * index as f64 / count as f64;
        let x = center_x + (radius * angle.cos()) as i32;
        let y = center_y + (radius * angle.sin()) as i32;
        if let Some(spider) = graph.spider_mut(*spider_id) {
            spider.set_location(x, y);
        }

        let boundary_x = center_x + ((radius + 40.0) * angle.cos()) as i32;
        let boundary_y = center_y + ((radius + 40.0) * angle.sin()) as i32;
        for (source, target) in &edges {
            let neighbor = if source == spider_id {
                *target
            } else if target == spider_id {
                *source
            } else {
                continue;
            };
            if let Some(neighbor_spider) = graph.spider_mut(neighbor) {
                if neighbor_spider.kind() == SpiderKind::Boundary {
                    neighbor_spider.set_location(boundary_x, boundary_y);
                }
            }
        }
    }
}
