// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use super::edge::{Edge, EdgeKind};
use super::ids::{EdgeId, SpiderId};
use super::spider::{Spider, SpiderKind};

/// A ZX diagram: an owned collection of spiders and edges.
///
/// Ids are monotonic and graph-scoped, so iterating the stores in id order is
/// insertion order; the serializer and structural equality both depend on
/// that. The boundary/variable label counters are likewise graph-scoped; two
/// graphs never share counter state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZxGraph {
    spiders: BTreeMap<SpiderId, Spider>,
    edges: BTreeMap<EdgeId, Edge>,
    next_spider_id: u32,
    next_edge_id: u32,
    boundary_counter: u32,
    variable_counter: u32,
    rev: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOpError {
    MissingSpider { spider_id: SpiderId },
    BoundaryToBoundary,
}

impl fmt::Display for GraphOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpider { spider_id } => {
                write!(f, "edge endpoint does not exist (id={spider_id})")
            }
            Self::BoundaryToBoundary => {
                f.write_str("cannot connect two boundary spiders")
            }
        }
    }
}

impl std::error::Error for GraphOpError {}

impl ZxGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spiders(&self) -> &BTreeMap<SpiderId, Spider> {
        &self.spiders
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }

    pub fn spider(&self, spider_id: SpiderId) -> Option<&Spider> {
        self.spiders.get(&spider_id)
    }

    pub fn spider_mut(&mut self, spider_id: SpiderId) -> Option<&mut Spider> {
        self.spiders.get_mut(&spider_id)
    }

    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    pub fn edge_mut(&mut self, edge_id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&edge_id)
    }

    pub fn add_spider(&mut self, spider: Spider) -> SpiderId {
        let spider_id = SpiderId::new(self.next_spider_id);
        self.next_spider_id += 1;
        self.spiders.insert(spider_id, spider);
        spider_id
    }

    /// Connects two existing spiders. Boundary-to-boundary wires are refused.
    pub fn add_edge(
        &mut self,
        source: SpiderId,
        target: SpiderId,
        kind: EdgeKind,
    ) -> Result<EdgeId, GraphOpError> {
        let source_kind = self
            .spiders
            .get(&source)
            .map(Spider::kind)
            .ok_or(GraphOpError::MissingSpider { spider_id: source })?;
        let target_kind = self
            .spiders
            .get(&target)
            .map(Spider::kind)
            .ok_or(GraphOpError::MissingSpider { spider_id: target })?;

        if source_kind == SpiderKind::Boundary && target_kind == SpiderKind::Boundary {
            return Err(GraphOpError::BoundaryToBoundary);
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.insert(edge_id, Edge::new(source, target, kind));
        Ok(edge_id)
    }

    /// Removes a spider and, atomically, every edge touching it.
    pub fn remove_spider(&mut self, spider_id: SpiderId) -> bool {
        if self.spiders.remove(&spider_id).is_none() {
            return false;
        }
        self.edges.retain(|_, edge| !edge.touches(spider_id));
        true
    }

    pub fn remove_edge(&mut self, edge_id: EdgeId) -> bool {
        self.edges.remove(&edge_id).is_some()
    }

    pub fn clear(&mut self) {
        self.spiders.clear();
        self.edges.clear();
        self.next_spider_id = 0;
        self.next_edge_id = 0;
        self.boundary_counter = 0;
        self.variable_counter = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.spiders.is_empty() && self.edges.is_empty()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Next free `b<n>` label. Serialization upper-cases boundary labels, so
    /// the taken check ignores case.
    pub fn generate_unique_boundary_label(&mut self) -> SmolStr {
        loop {
            self.boundary_counter += 1;
            let label = SmolStr::new(format!("b{}", self.boundary_counter));
            if !self.is_boundary_label_taken(&label) {
                return label;
            }
        }
    }

    pub fn generate_unique_variable_label(&mut self) -> SmolStr {
        self.variable_counter += 1;
        SmolStr::new(format!("v{}", self.variable_counter))
    }

    pub(crate) fn label_counters(&self) -> (u32, u32) {
        (self.boundary_counter, self.variable_counter)
    }

    pub(crate) fn set_label_counters(&mut self, boundary: u32, variable: u32) {
        self.boundary_counter = boundary;
        self.variable_counter = variable;
    }

    fn is_boundary_label_taken(&self, label: &str) -> bool {
        self.spiders.values().any(|spider| {
            spider.kind() == SpiderKind::Boundary
                && spider
                    .label()
                    .is_some_and(|existing| existing.eq_ignore_ascii_case(label))
        })
    }

    /// Multiset of boundary labels, exact-case.
    pub fn boundary_label_counts(&self) -> BTreeMap<SmolStr, usize> {
        let mut counts = BTreeMap::new();
        for spider in self.spiders.values() {
            if spider.kind() != SpiderKind::Boundary {
                continue;
            }
            if let Some(label) = spider.label() {
                *counts.entry(SmolStr::new(label)).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Hit test against spider centers. First match in id order wins.
    pub fn find_spider_at(&self, x: i32, y: i32, tolerance: i32) -> Option<SpiderId> {
        let tolerance = f64::from(tolerance);
        self.spiders.iter().find_map(|(spider_id, spider)| {
            let dx = f64::from(spider.x() - x);
            let dy = f64::from(spider.y() - y);
            ((dx * dx + dy * dy).sqrt() < tolerance).then_some(*spider_id)
        })
    }

    /// Hit test against edge segments. First match in id order wins.
    pub fn find_edge_at(&self, x: i32, y: i32, tolerance: i32) -> Option<EdgeId> {
        let tolerance = f64::from(tolerance);
        self.edges.iter().find_map(|(edge_id, edge)| {
            let source = self.spiders.get(&edge.source())?;
            let target = self.spiders.get(&edge.target())?;
            let distance = point_segment_distance(
                f64::from(x),
                f64::from(y),
                f64::from(source.x()),
                f64::from(source.y()),
                f64::from(target.x()),
                f64::from(target.y()),
            );
            (distance < tolerance).then_some(*edge_id)
        })
    }
}

fn point_segment_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let abx = bx - ax;
    let aby = by - ay;
    let apx = px - ax;
    let apy = py - ay;

    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };

    let cx = ax + t * abx;
    let cy = ay + t * aby;
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

/// A graph with a user-visible name, as listed in the workspace sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGraph {
    name: String,
    graph: ZxGraph,
}

impl NamedGraph {
    pub fn new(name: impl Into<String>, graph: ZxGraph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn graph(&self) -> &ZxGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ZxGraph {
        &mut self.graph
    }
}
