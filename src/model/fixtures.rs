// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared builders for unit tests across modules.

#![cfg_attr(not(test), allow(dead_code))]

use smol_str::SmolStr;

use super::edge::EdgeKind;
use super::graph::ZxGraph;
use super::rule::ZxRule;
use super::spider::{Spider, SpiderKind, UNDEFINED_PHASE};

/// Two Z spiders joined by one normal wire.
pub(crate) fn z_pair() -> ZxGraph {
    let mut graph = ZxGraph::new();
    let first = graph.add_spider(Spider::new(10, 10, SpiderKind::Z));
    let second = graph.add_spider(Spider::new(50, 50, SpiderKind::Z));
    graph
        .add_edge(first, second, EdgeKind::Normal)
        .expect("z_pair edge");
    graph
}

/// A Z spider with an undefined color parameter.
pub(crate) fn undefined_color_spider(variable_label: impl Into<SmolStr>) -> Spider {
    let mut spider = Spider::new(10, 10, SpiderKind::Z);
    spider.set_color_undefined(true);
    spider.set_variable_label(Some(variable_label));
    spider
}

/// An X spider with an undefined phase parameter.
pub(crate) fn undefined_phase_spider(variable_label: impl Into<SmolStr>) -> Spider {
    let mut spider = Spider::new(20, 20, SpiderKind::X);
    spider.set_phase(UNDEFINED_PHASE);
    spider.set_variable_label(Some(variable_label));
    spider
}

/// A Z spider wired to a labeled boundary.
pub(crate) fn z_with_boundary(label: &str, edge_kind: EdgeKind) -> ZxGraph {
    let mut graph = ZxGraph::new();
    let z = graph.add_spider(Spider::new(10, 10, SpiderKind::Z));
    let boundary = graph.add_spider(Spider::boundary(80, 10, label));
    graph.add_edge(z, boundary, edge_kind).expect("boundary edge");
    graph
}

/// `fuse` rule: two wired Z spiders on the left, a single Z on the right,
/// boundary `b1` on both sides.
pub(crate) fn fuse_rule() -> ZxRule {
    let mut rule = ZxRule::new("fuse");

    let lhs = rule.lhs_mut();
    let first = lhs.add_spider(Spider::new(10, 10, SpiderKind::Z));
    let second = lhs.add_spider(Spider::new(50, 10, SpiderKind::Z));
    let lhs_boundary = lhs.add_spider(Spider::boundary(90, 10, "b1"));
    lhs.add_edge(first, second, EdgeKind::Normal)
        .expect("lhs inner edge");
    lhs.add_edge(second, lhs_boundary, EdgeKind::Normal)
        .expect("lhs boundary edge");

    let rhs = rule.rhs_mut();
    let fused = rhs.add_spider(Spider::new(30, 10, SpiderKind::Z));
    let rhs_boundary = rhs.add_spider(Spider::boundary(90, 10, "b1"));
    rhs.add_edge(fused, rhs_boundary, EdgeKind::Normal)
        .expect("rhs boundary edge");

    rule
}
