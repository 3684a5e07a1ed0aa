// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON workspace sidecar.
//!
//! The sidecar persists what the `.lmn` interchange format drops: graph and
//! rule names, spider positions, rule direction kinds, and the per-graph
//! label counters. Spider ids are serialized by value and remapped on load,
//! so a loaded graph keeps its insertion order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{write_atomic, StoreError};
use crate::model::{
    EdgeKind, NamedGraph, RuleKind, Spider, SpiderId, SpiderKind, ZxGraph, ZxRule,
};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceJson {
    graphs: Vec<NamedGraphJson>,
    rules: Vec<RuleJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NamedGraphJson {
    name: String,
    graph: GraphJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphJson {
    spiders: Vec<SpiderJson>,
    edges: Vec<EdgeJson>,
    boundary_counter: u32,
    variable_counter: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpiderJson {
    id: u32,
    kind: SpiderKindJson,
    x: i32,
    y: i32,
    phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variable_label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    color_undefined: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum SpiderKindJson {
    #[serde(rename = "z")]
    Z,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "boundary")]
    Boundary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeJson {
    source: u32,
    target: u32,
    kind: EdgeKindJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum EdgeKindJson {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "hadamard")]
    Hadamard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleJson {
    name: String,
    kind: RuleKindJson,
    lhs: GraphJson,
    rhs: GraphJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum RuleKindJson {
    #[serde(rename = "rewrite")]
    Rewrite,
    #[serde(rename = "equals")]
    Equals,
}

fn graph_to_json(graph: &ZxGraph) -> GraphJson {
    let (boundary_counter, variable_counter) = graph.label_counters();
    GraphJson {
        spiders: graph
            .spiders()
            .iter()
            .map(|(spider_id, spider)| SpiderJson {
                id: spider_id.value(),
                kind: match spider.kind() {
                    SpiderKind::Z => SpiderKindJson::Z,
                    SpiderKind::X => SpiderKindJson::X,
                    SpiderKind::Boundary => SpiderKindJson::Boundary,
                },
                x: spider.x(),
                y: spider.y(),
                phase: spider.phase().to_owned(),
                label: spider.label().map(str::to_owned),
                variable_label: spider.variable_label().map(str::to_owned),
                color_undefined: spider.is_color_undefined(),
            })
            .collect(),
        edges: graph
            .edges()
            .values()
            .map(|edge| EdgeJson {
                source: edge.source().value(),
                target: edge.target().value(),
                kind: match edge.kind() {
                    EdgeKind::Normal => EdgeKindJson::Normal,
                    EdgeKind::Hadamard => EdgeKindJson::Hadamard,
                },
            })
            .collect(),
        boundary_counter,
        variable_counter,
    }
}

fn graph_from_json(json: &GraphJson) -> ZxGraph {
    let mut graph = ZxGraph::new();
    let mut id_map: BTreeMap<u32, SpiderId> = BTreeMap::new();

    for spider_json in &json.spiders {
        let kind = match spider_json.kind {
            SpiderKindJson::Z => SpiderKind::Z,
            SpiderKindJson::X => SpiderKind::X,
            SpiderKindJson::Boundary => SpiderKind::Boundary,
        };
        let mut spider = Spider::new(spider_json.x, spider_json.y, kind);
        spider.set_phase(spider_json.phase.clone());
        spider.set_label(spider_json.label.as_deref().map(SmolStr::new));
        spider.set_variable_label(spider_json.variable_label.as_deref().map(SmolStr::new));
        spider.set_color_undefined(spider_json.color_undefined);
        id_map.insert(spider_json.id, graph.add_spider(spider));
    }

    for edge_json in &json.edges {
        let (Some(source), Some(target)) =
            (id_map.get(&edge_json.source), id_map.get(&edge_json.target))
        else {
            continue;
        };
        let kind = match edge_json.kind {
            EdgeKindJson::Normal => EdgeKind::Normal,
            EdgeKindJson::Hadamard => EdgeKind::Hadamard,
        };
        // Edges that violate model invariants are dropped, same as a value
        // copy with vanished endpoints.
        let _ = graph.add_edge(*source, *target, kind);
    }

    graph.set_label_counters(json.boundary_counter, json.variable_counter);
    graph
}

fn workspace_to_json(workspace: &Workspace) -> WorkspaceJson {
    WorkspaceJson {
        graphs: workspace
            .graphs()
            .map(|graph| NamedGraphJson {
                name: graph.name().to_owned(),
                graph: graph_to_json(graph.graph()),
            })
            .collect(),
        rules: workspace
            .rules()
            .map(|rule| RuleJson {
                name: rule.name().to_owned(),
                kind: match rule.kind() {
                    RuleKind::Rewrite => RuleKindJson::Rewrite,
                    RuleKind::Equals => RuleKindJson::Equals,
                },
                lhs: graph_to_json(rule.lhs()),
                rhs: graph_to_json(rule.rhs()),
            })
            .collect(),
    }
}

fn workspace_from_json(json: &WorkspaceJson) -> Workspace {
    let graphs = json
        .graphs
        .iter()
        .map(|graph_json| NamedGraph::new(graph_json.name.clone(), graph_from_json(&graph_json.graph)))
        .collect();

    let rules = json
        .rules
        .iter()
        .map(|rule_json| {
            let mut rule = ZxRule::new(rule_json.name.clone());
            *rule.lhs_mut() = graph_from_json(&rule_json.lhs);
            *rule.rhs_mut() = graph_from_json(&rule_json.rhs);
            rule.set_kind(match rule_json.kind {
                RuleKindJson::Rewrite => RuleKind::Rewrite,
                RuleKindJson::Equals => RuleKind::Equals,
            });
            rule
        })
        .collect();

    Workspace::from_parts(graphs, rules)
}

/// Saves the workspace as pretty JSON, atomically.
pub fn save_workspace(path: &Path, workspace: &Workspace) -> Result<(), StoreError> {
    let json = workspace_to_json(workspace);
    let mut body = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    body.push('\n');
    write_atomic(path, body.as_bytes())
}

/// Loads a workspace sidecar. Entries come back committed (clean).
pub fn load_workspace(path: &Path) -> Result<Workspace, StoreError> {
    let body = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: WorkspaceJson =
        serde_json::from_str(&body).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(workspace_from_json(&json))
}
