// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named graph/rule collections with committed snapshots.
//!
//! The host editor mutates live entries in place; each entry keeps the last
//! committed value copy, and dirtiness is the pure structural comparison of
//! the two. No flags, no identity tricks.

use crate::format::lmntal::Import;
use crate::model::{NamedGraph, ZxGraph, ZxRule};
use crate::validate::{graphs_identical, rules_identical};

/// True when the live graph structurally differs from its committed
/// snapshot. Positions are view-only and never make a graph dirty.
pub fn graph_dirty(live: &ZxGraph, committed: &ZxGraph) -> bool {
    !graphs_identical(live, committed)
}

pub fn rule_dirty(live: &ZxRule, committed: &ZxRule) -> bool {
    !rules_identical(live, committed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GraphEntry {
    live: NamedGraph,
    committed: NamedGraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RuleEntry {
    live: ZxRule,
    committed: ZxRule,
}

/// The in-memory collection a host session runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    graphs: Vec<GraphEntry>,
    rules: Vec<RuleEntry>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(graphs: Vec<NamedGraph>, rules: Vec<ZxRule>) -> Self {
        let mut workspace = Self::new();
        for graph in graphs {
            workspace.add_graph(graph);
        }
        for rule in rules {
            workspace.add_rule(rule);
        }
        workspace
    }

    /// Adopts everything an import produced; errors stay with the caller.
    pub fn from_import(import: Import) -> Self {
        Self::from_parts(import.graphs, import.rules)
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn graphs(&self) -> impl Iterator<Item = &NamedGraph> {
        self.graphs.iter().map(|entry| &entry.live)
    }

    pub fn rules(&self) -> impl Iterator<Item = &ZxRule> {
        self.rules.iter().map(|entry| &entry.live)
    }

    pub fn graph(&self, index: usize) -> Option<&NamedGraph> {
        self.graphs.get(index).map(|entry| &entry.live)
    }

    pub fn graph_mut(&mut self, index: usize) -> Option<&mut NamedGraph> {
        self.graphs.get_mut(index).map(|entry| &mut entry.live)
    }

    pub fn rule(&self, index: usize) -> Option<&ZxRule> {
        self.rules.get(index).map(|entry| &entry.live)
    }

    pub fn rule_mut(&mut self, index: usize) -> Option<&mut ZxRule> {
        self.rules.get_mut(index).map(|entry| &mut entry.live)
    }

    pub fn committed_graph(&self, index: usize) -> Option<&NamedGraph> {
        self.graphs.get(index).map(|entry| &entry.committed)
    }

    pub fn committed_rule(&self, index: usize) -> Option<&ZxRule> {
        self.rules.get(index).map(|entry| &entry.committed)
    }

    /// Adds a graph; the committed snapshot starts equal to the live value.
    pub fn add_graph(&mut self, graph: NamedGraph) -> usize {
        self.graphs.push(GraphEntry {
            committed: graph.clone(),
            live: graph,
        });
        self.graphs.len() - 1
    }

    pub fn add_rule(&mut self, rule: ZxRule) -> usize {
        self.rules.push(RuleEntry {
            committed: rule.clone(),
            live: rule,
        });
        self.rules.len() - 1
    }

    /// Suggested name for the next graph, as offered by the new-graph dialog.
    pub fn next_graph_name(&self) -> String {
        format!("graph_{}", self.graphs.len() + 1)
    }

    pub fn next_rule_name(&self) -> String {
        format!("rule_{}", self.rules.len() + 1)
    }

    pub fn remove_graph(&mut self, index: usize) -> Option<NamedGraph> {
        (index < self.graphs.len()).then(|| self.graphs.remove(index).live)
    }

    pub fn remove_rule(&mut self, index: usize) -> Option<ZxRule> {
        (index < self.rules.len()).then(|| self.rules.remove(index).live)
    }

    pub fn commit_graph(&mut self, index: usize) -> bool {
        let Some(entry) = self.graphs.get_mut(index) else {
            return false;
        };
        entry.committed = entry.live.clone();
        true
    }

    pub fn commit_rule(&mut self, index: usize) -> bool {
        let Some(entry) = self.rules.get_mut(index) else {
            return false;
        };
        entry.committed = entry.live.clone();
        true
    }

    pub fn is_graph_dirty(&self, index: usize) -> Option<bool> {
        self.graphs
            .get(index)
            .map(|entry| graph_dirty(entry.live.graph(), entry.committed.graph()))
    }

    pub fn is_rule_dirty(&self, index: usize) -> Option<bool> {
        self.rules
            .get(index)
            .map(|entry| rule_dirty(&entry.live, &entry.committed))
    }

    pub fn any_dirty(&self) -> bool {
        (0..self.graphs.len()).any(|index| self.is_graph_dirty(index) == Some(true))
            || (0..self.rules.len()).any(|index| self.is_rule_dirty(index) == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use crate::model::{fixtures, NamedGraph, RuleKind, Spider, SpiderKind, ZxGraph, ZxRule};

    fn seeded() -> Workspace {
        let mut workspace = Workspace::new();
        workspace.add_graph(NamedGraph::new("graph_1", fixtures::z_pair()));
        workspace.add_rule(fixtures::fuse_rule());
        workspace
    }

    #[test]
    fn fresh_entries_are_clean() {
        let workspace = seeded();
        assert_eq!(workspace.is_graph_dirty(0), Some(false));
        assert_eq!(workspace.is_rule_dirty(0), Some(false));
        assert!(!workspace.any_dirty());
        assert_eq!(workspace.is_graph_dirty(7), None);
    }

    #[test]
    fn structural_edits_make_a_graph_dirty_until_committed() {
        let mut workspace = seeded();
        workspace
            .graph_mut(0)
            .expect("graph")
            .graph_mut()
            .add_spider(Spider::new(0, 0, SpiderKind::X));

        assert_eq!(workspace.is_graph_dirty(0), Some(true));
        assert!(workspace.any_dirty());

        assert!(workspace.commit_graph(0));
        assert_eq!(workspace.is_graph_dirty(0), Some(false));
    }

    #[test]
    fn moving_spiders_does_not_make_a_graph_dirty() {
        let mut workspace = seeded();
        let graph = workspace.graph_mut(0).expect("graph").graph_mut();
        let spider_id = *graph.spiders().keys().next().expect("spider");
        graph
            .spider_mut(spider_id)
            .expect("spider")
            .set_location(999, 999);

        assert_eq!(workspace.is_graph_dirty(0), Some(false));
    }

    #[test]
    fn flipping_rule_direction_makes_it_dirty() {
        let mut workspace = seeded();
        workspace.rule_mut(0).expect("rule").set_kind(RuleKind::Equals);
        assert_eq!(workspace.is_rule_dirty(0), Some(true));
    }

    #[test]
    fn name_suggestions_count_from_current_size() {
        let workspace = seeded();
        assert_eq!(workspace.next_graph_name(), "graph_2");
        assert_eq!(workspace.next_rule_name(), "rule_2");
    }

    #[test]
    fn removal_returns_the_live_entry() {
        let mut workspace = seeded();
        let removed = workspace.remove_graph(0).expect("removed");
        assert_eq!(removed.name(), "graph_1");
        assert_eq!(workspace.graph_count(), 0);
        assert_eq!(workspace.remove_graph(0), None);
    }

    #[test]
    fn from_parts_adopts_entries_clean() {
        let workspace = Workspace::from_parts(
            vec![NamedGraph::new("g", ZxGraph::new())],
            vec![ZxRule::new("r")],
        );
        assert_eq!(workspace.graph_count(), 1);
        assert_eq!(workspace.rule_count(), 1);
        assert!(!workspace.any_dirty());
    }
}
