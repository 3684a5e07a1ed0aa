// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for diagrams.
//!
//! Operations are applied with optimistic concurrency (revision checks) and
//! produce a minimal delta the host editor can use to refresh derived state.
//! A batch applies atomically: any failing op leaves the graph untouched.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::model::{EdgeId, EdgeKind, GraphOpError, Spider, SpiderId, SpiderKind, ZxGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddSpider {
        x: i32,
        y: i32,
        kind: SpiderKind,
    },
    /// Adds a boundary spider with a freshly minted unique label.
    AddBoundarySpider {
        x: i32,
        y: i32,
    },
    MoveSpider {
        spider_id: SpiderId,
        x: i32,
        y: i32,
    },
    /// Setting the `?` sentinel makes the phase symbolic; the variable-label
    /// coupling mints or clears the label as needed.
    SetPhase {
        spider_id: SpiderId,
        phase: String,
    },
    /// Flips Z to X and back. Clears an undefined color.
    ToggleSpiderKind {
        spider_id: SpiderId,
    },
    SetColorUndefined {
        spider_id: SpiderId,
        undefined: bool,
    },
    SetVariableLabel {
        spider_id: SpiderId,
        label: SmolStr,
    },
    SetBoundaryLabel {
        spider_id: SpiderId,
        label: SmolStr,
    },
    RemoveSpider {
        spider_id: SpiderId,
    },
    AddEdge {
        source: SpiderId,
        target: SpiderId,
        kind: EdgeKind,
    },
    ToggleEdgeKind {
        edge_id: EdgeId,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Coarse description of which objects changed while applying a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added_spiders: Vec<SpiderId>,
    pub removed_spiders: Vec<SpiderId>,
    pub updated_spiders: Vec<SpiderId>,
    pub added_edges: Vec<EdgeId>,
    pub removed_edges: Vec<EdgeId>,
    pub updated_edges: Vec<EdgeId>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added_spiders: BTreeSet<SpiderId>,
    removed_spiders: BTreeSet<SpiderId>,
    updated_spiders: BTreeSet<SpiderId>,
    added_edges: BTreeSet<EdgeId>,
    removed_edges: BTreeSet<EdgeId>,
    updated_edges: BTreeSet<EdgeId>,
}

impl DeltaBuilder {
    fn record_spider_added(&mut self, spider_id: SpiderId) {
        self.removed_spiders.remove(&spider_id);
        self.updated_spiders.remove(&spider_id);
        self.added_spiders.insert(spider_id);
    }

    fn record_spider_removed(&mut self, spider_id: SpiderId) {
        self.updated_spiders.remove(&spider_id);
        if self.added_spiders.remove(&spider_id) {
            return;
        }
        self.removed_spiders.insert(spider_id);
    }

    fn record_spider_updated(&mut self, spider_id: SpiderId) {
        if self.added_spiders.contains(&spider_id) || self.removed_spiders.contains(&spider_id) {
            return;
        }
        self.updated_spiders.insert(spider_id);
    }

    fn record_edge_added(&mut self, edge_id: EdgeId) {
        self.removed_edges.remove(&edge_id);
        self.updated_edges.remove(&edge_id);
        self.added_edges.insert(edge_id);
    }

    fn record_edge_removed(&mut self, edge_id: EdgeId) {
        self.updated_edges.remove(&edge_id);
        if self.added_edges.remove(&edge_id) {
            return;
        }
        self.removed_edges.insert(edge_id);
    }

    fn record_edge_updated(&mut self, edge_id: EdgeId) {
        if self.added_edges.contains(&edge_id) || self.removed_edges.contains(&edge_id) {
            return;
        }
        self.updated_edges.insert(edge_id);
    }

    fn finish(self) -> Delta {
        Delta {
            added_spiders: self.added_spiders.into_iter().collect(),
            removed_spiders: self.removed_spiders.into_iter().collect(),
            updated_spiders: self.updated_spiders.into_iter().collect(),
            added_edges: self.added_edges.into_iter().collect(),
            removed_edges: self.removed_edges.into_iter().collect(),
            updated_edges: self.updated_edges.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    SpiderNotFound { spider_id: SpiderId },
    EdgeNotFound { edge_id: EdgeId },
    NotABoundary { spider_id: SpiderId },
    NotColored { spider_id: SpiderId },
    NotUndefined { spider_id: SpiderId },
    EmptyLabel,
    Graph(GraphOpError),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                base_rev,
                current_rev,
            } => write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})"),
            Self::SpiderNotFound { spider_id } => {
                write!(f, "spider not found (id={spider_id})")
            }
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found (id={edge_id})"),
            Self::NotABoundary { spider_id } => {
                write!(f, "spider {spider_id} is not a boundary spider")
            }
            Self::NotColored { spider_id } => {
                write!(f, "spider {spider_id} is a boundary spider and carries no color or phase")
            }
            Self::NotUndefined { spider_id } => write!(
                f,
                "spider {spider_id} must be undefined (color or phase) to carry a variable label"
            ),
            Self::EmptyLabel => f.write_str("label must not be empty"),
            Self::Graph(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for ApplyError {}

impl From<GraphOpError> for ApplyError {
    fn from(source: GraphOpError) -> Self {
        Self::Graph(source)
    }
}

/// Applies a batch of ops against `base_rev`.
///
/// The batch runs on a working copy; only a fully successful batch is
/// committed (and bumps the revision).
pub fn apply_ops(graph: &mut ZxGraph, base_rev: u64, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
    let current_rev = graph.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut working = graph.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut working, op, &mut delta)?;
    }

    working.bump_rev();
    let new_rev = working.rev();
    *graph = working;

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta: delta.finish(),
    })
}

fn apply_op(graph: &mut ZxGraph, op: &Op, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        Op::AddSpider { x, y, kind } => {
            let spider_id = if *kind == SpiderKind::Boundary {
                let label = graph.generate_unique_boundary_label();
                graph.add_spider(Spider::boundary(*x, *y, label))
            } else {
                graph.add_spider(Spider::new(*x, *y, *kind))
            };
            delta.record_spider_added(spider_id);
            Ok(())
        }
        Op::AddBoundarySpider { x, y } => {
            let label = graph.generate_unique_boundary_label();
            let spider_id = graph.add_spider(Spider::boundary(*x, *y, label));
            delta.record_spider_added(spider_id);
            Ok(())
        }
        Op::MoveSpider { spider_id, x, y } => {
            let spider = graph
                .spider_mut(*spider_id)
                .ok_or(ApplyError::SpiderNotFound {
                    spider_id: *spider_id,
                })?;
            spider.set_location(*x, *y);
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::SetPhase { spider_id, phase } => {
            let spider = colored_spider_mut(graph, *spider_id)?;
            spider.set_phase(phase.clone());
            refresh_variable_label(graph, *spider_id);
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::ToggleSpiderKind { spider_id } => {
            let spider = colored_spider_mut(graph, *spider_id)?;
            let flipped = match spider.kind() {
                SpiderKind::Z => SpiderKind::X,
                _ => SpiderKind::Z,
            };
            spider.set_kind(flipped);
            if spider.is_color_undefined() {
                spider.set_color_undefined(false);
            }
            refresh_variable_label(graph, *spider_id);
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::SetColorUndefined {
            spider_id,
            undefined,
        } => {
            let spider = colored_spider_mut(graph, *spider_id)?;
            spider.set_color_undefined(*undefined);
            refresh_variable_label(graph, *spider_id);
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::SetVariableLabel { spider_id, label } => {
            if label.trim().is_empty() {
                return Err(ApplyError::EmptyLabel);
            }
            let spider = colored_spider_mut(graph, *spider_id)?;
            if !spider.is_undefined() {
                return Err(ApplyError::NotUndefined {
                    spider_id: *spider_id,
                });
            }
            spider.set_variable_label(Some(label.clone()));
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::SetBoundaryLabel { spider_id, label } => {
            if label.trim().is_empty() {
                return Err(ApplyError::EmptyLabel);
            }
            let spider = graph
                .spider_mut(*spider_id)
                .ok_or(ApplyError::SpiderNotFound {
                    spider_id: *spider_id,
                })?;
            if spider.kind() != SpiderKind::Boundary {
                return Err(ApplyError::NotABoundary {
                    spider_id: *spider_id,
                });
            }
            spider.set_label(Some(label.clone()));
            delta.record_spider_updated(*spider_id);
            Ok(())
        }
        Op::RemoveSpider { spider_id } => {
            let removed_edges: Vec<EdgeId> = graph
                .edges()
                .iter()
                .filter(|(_, edge)| edge.touches(*spider_id))
                .map(|(edge_id, _)| *edge_id)
                .collect();
            if !graph.remove_spider(*spider_id) {
                return Err(ApplyError::SpiderNotFound {
                    spider_id: *spider_id,
                });
            }
            for edge_id in removed_edges {
                delta.record_edge_removed(edge_id);
            }
            delta.record_spider_removed(*spider_id);
            Ok(())
        }
        Op::AddEdge {
            source,
            target,
            kind,
        } => {
            let edge_id = graph.add_edge(*source, *target, *kind)?;
            delta.record_edge_added(edge_id);
            Ok(())
        }
        Op::ToggleEdgeKind { edge_id } => {
            let edge = graph.edge_mut(*edge_id).ok_or(ApplyError::EdgeNotFound {
                edge_id: *edge_id,
            })?;
            let flipped = match edge.kind() {
                EdgeKind::Normal => EdgeKind::Hadamard,
                EdgeKind::Hadamard => EdgeKind::Normal,
            };
            edge.set_kind(flipped);
            delta.record_edge_updated(*edge_id);
            Ok(())
        }
        Op::RemoveEdge { edge_id } => {
            if !graph.remove_edge(*edge_id) {
                return Err(ApplyError::EdgeNotFound {
                    edge_id: *edge_id,
                });
            }
            delta.record_edge_removed(*edge_id);
            Ok(())
        }
        Op::Clear => {
            for spider_id in graph.spiders().keys().copied().collect::<Vec<_>>() {
                delta.record_spider_removed(spider_id);
            }
            for edge_id in graph.edges().keys().copied().collect::<Vec<_>>() {
                delta.record_edge_removed(edge_id);
            }
            graph.clear();
            Ok(())
        }
    }
}

fn colored_spider_mut(
    graph: &mut ZxGraph,
    spider_id: SpiderId,
) -> Result<&mut Spider, ApplyError> {
    let spider = graph
        .spider_mut(spider_id)
        .ok_or(ApplyError::SpiderNotFound { spider_id })?;
    if spider.kind() == SpiderKind::Boundary {
        return Err(ApplyError::NotColored { spider_id });
    }
    Ok(spider)
}

/// Keeps the variable-label invariant: an undefined spider always carries a
/// label, a defined spider never does.
fn refresh_variable_label(graph: &mut ZxGraph, spider_id: SpiderId) {
    let Some(spider) = graph.spider(spider_id) else {
        return;
    };
    let needs_label = spider.is_undefined();
    let has_label = spider.variable_label().is_some();

    if needs_label && !has_label {
        let label = graph.generate_unique_variable_label();
        if let Some(spider) = graph.spider_mut(spider_id) {
            spider.set_variable_label(Some(label));
        }
    } else if !needs_label && has_label {
        if let Some(spider) = graph.spider_mut(spider_id) {
            spider.set_variable_label(None::<SmolStr>);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_ops, ApplyError, Op};
    use crate::model::{EdgeKind, SpiderKind, ZxGraph, UNDEFINED_PHASE};

    fn two_spiders(graph: &mut ZxGraph) -> (crate::model::SpiderId, crate::model::SpiderId) {
        let result = apply_ops(
            graph,
            graph.rev(),
            &[
                Op::AddSpider {
                    x: 0,
                    y: 0,
                    kind: SpiderKind::Z,
                },
                Op::AddSpider {
                    x: 50,
                    y: 0,
                    kind: SpiderKind::X,
                },
            ],
        )
        .expect("seed spiders");
        (result.delta.added_spiders[0], result.delta.added_spiders[1])
    }

    #[test]
    fn stale_base_rev_is_rejected() {
        let mut graph = ZxGraph::new();
        two_spiders(&mut graph);
        assert_eq!(graph.rev(), 1);

        let err = apply_ops(
            &mut graph,
            0,
            &[Op::AddSpider {
                x: 0,
                y: 0,
                kind: SpiderKind::Z,
            }],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ApplyError::Conflict {
                base_rev: 0,
                current_rev: 1
            }
        );
    }

    #[test]
    fn empty_batch_is_a_noop_without_rev_bump() {
        let mut graph = ZxGraph::new();
        let result = apply_ops(&mut graph, 0, &[]).expect("empty batch");
        assert_eq!(result.new_rev, 0);
        assert_eq!(result.applied, 0);
        assert_eq!(graph.rev(), 0);
    }

    #[test]
    fn add_edge_and_toggle_kind() {
        let mut graph = ZxGraph::new();
        let (a, b) = two_spiders(&mut graph);

        let result = apply_ops(
            &mut graph,
            1,
            &[Op::AddEdge {
                source: a,
                target: b,
                kind: EdgeKind::Normal,
            }],
        )
        .expect("add edge");
        let edge_id = result.delta.added_edges[0];

        apply_ops(&mut graph, 2, &[Op::ToggleEdgeKind { edge_id }]).expect("toggle");
        assert_eq!(graph.edge(edge_id).expect("edge").kind(), EdgeKind::Hadamard);
    }

    #[test]
    fn failing_op_rolls_back_the_whole_batch() {
        let mut graph = ZxGraph::new();
        let (a, b) = two_spiders(&mut graph);

        let err = apply_ops(
            &mut graph,
            1,
            &[
                Op::AddEdge {
                    source: a,
                    target: b,
                    kind: EdgeKind::Normal,
                },
                Op::RemoveSpider {
                    spider_id: crate::model::SpiderId::new(99),
                },
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ApplyError::SpiderNotFound { .. }));

        // Nothing from the batch landed.
        assert!(graph.edges().is_empty());
        assert_eq!(graph.rev(), 1);
    }

    #[test]
    fn removing_a_spider_reports_its_edges_in_the_delta() {
        let mut graph = ZxGraph::new();
        let (a, b) = two_spiders(&mut graph);
        let result = apply_ops(
            &mut graph,
            1,
            &[Op::AddEdge {
                source: a,
                target: b,
                kind: EdgeKind::Normal,
            }],
        )
        .expect("add edge");
        let edge_id = result.delta.added_edges[0];

        let result = apply_ops(&mut graph, 2, &[Op::RemoveSpider { spider_id: a }])
            .expect("remove spider");
        assert_eq!(result.delta.removed_spiders, vec![a]);
        assert_eq!(result.delta.removed_edges, vec![edge_id]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn remove_after_update_keeps_only_the_removal_in_the_delta() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        let result = apply_ops(
            &mut graph,
            1,
            &[
                Op::MoveSpider {
                    spider_id: a,
                    x: 5,
                    y: 5,
                },
                Op::RemoveSpider { spider_id: a },
            ],
        )
        .expect("move then remove");
        assert_eq!(result.delta.removed_spiders, vec![a]);
        assert!(result.delta.updated_spiders.is_empty());
        assert!(result.delta.added_spiders.is_empty());
    }

    #[test]
    fn boundary_spiders_get_fresh_labels() {
        let mut graph = ZxGraph::new();
        let result = apply_ops(
            &mut graph,
            0,
            &[
                Op::AddBoundarySpider { x: 0, y: 0 },
                Op::AddBoundarySpider { x: 10, y: 0 },
            ],
        )
        .expect("boundaries");

        let labels: Vec<_> = result
            .delta
            .added_spiders
            .iter()
            .map(|id| graph.spider(*id).expect("spider").label().expect("label").to_owned())
            .collect();
        assert_eq!(labels, ["b1", "b2"]);
    }

    #[test]
    fn undefined_phase_mints_a_variable_label() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        apply_ops(
            &mut graph,
            1,
            &[Op::SetPhase {
                spider_id: a,
                phase: UNDEFINED_PHASE.to_owned(),
            }],
        )
        .expect("set phase");

        let spider = graph.spider(a).expect("spider");
        assert!(spider.is_phase_undefined());
        assert_eq!(spider.variable_label(), Some("v1"));
    }

    #[test]
    fn defining_the_phase_again_clears_the_variable_label() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        apply_ops(
            &mut graph,
            1,
            &[Op::SetPhase {
                spider_id: a,
                phase: UNDEFINED_PHASE.to_owned(),
            }],
        )
        .expect("set undefined");
        apply_ops(
            &mut graph,
            2,
            &[Op::SetPhase {
                spider_id: a,
                phase: "90".to_owned(),
            }],
        )
        .expect("set defined");

        let spider = graph.spider(a).expect("spider");
        assert!(!spider.is_undefined());
        assert_eq!(spider.variable_label(), None);
    }

    #[test]
    fn toggling_kind_clears_an_undefined_color() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        apply_ops(
            &mut graph,
            1,
            &[Op::SetColorUndefined {
                spider_id: a,
                undefined: true,
            }],
        )
        .expect("undefine color");
        assert!(graph.spider(a).expect("spider").is_color_undefined());
        assert_eq!(graph.spider(a).expect("spider").variable_label(), Some("v1"));

        apply_ops(&mut graph, 2, &[Op::ToggleSpiderKind { spider_id: a }]).expect("toggle");
        let spider = graph.spider(a).expect("spider");
        assert_eq!(spider.kind(), SpiderKind::X);
        assert!(!spider.is_color_undefined());
        assert_eq!(spider.variable_label(), None);
    }

    #[test]
    fn variable_labels_require_an_undefined_spider() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        let err = apply_ops(
            &mut graph,
            1,
            &[Op::SetVariableLabel {
                spider_id: a,
                label: "v9".into(),
            }],
        )
        .unwrap_err();
        assert_eq!(err, ApplyError::NotUndefined { spider_id: a });
    }

    #[test]
    fn boundary_label_ops_reject_colored_spiders() {
        let mut graph = ZxGraph::new();
        let (a, _) = two_spiders(&mut graph);

        let err = apply_ops(
            &mut graph,
            1,
            &[Op::SetBoundaryLabel {
                spider_id: a,
                label: "b7".into(),
            }],
        )
        .unwrap_err();
        assert_eq!(err, ApplyError::NotABoundary { spider_id: a });
    }

    #[test]
    fn clear_reports_everything_removed() {
        let mut graph = ZxGraph::new();
        let (a, b) = two_spiders(&mut graph);
        apply_ops(
            &mut graph,
            1,
            &[Op::AddEdge {
                source: a,
                target: b,
                kind: EdgeKind::Normal,
            }],
        )
        .expect("add edge");

        let result = apply_ops(&mut graph, 2, &[Op::Clear]).expect("clear");
        assert!(graph.is_empty());
        assert_eq!(result.delta.removed_spiders.len(), 2);
        assert_eq!(result.delta.removed_edges.len(), 1);
    }
}
