// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph reconstruction from parsed term lists.
//!
//! Topology is recovered purely from link occurrence counts: a link named in
//! two spider terms is an internal wire, a link named once is an outward
//! (boundary) wire unless a Hadamard gate absorbs it. After reconstruction,
//! mirrored one-way rule pairs are merged into single two-way rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use smol_str::SmolStr;

use super::parse::{parse_source, Atom, Content, Item, RawRule, Value};
use crate::layout::layout_circle;
use crate::model::{
    EdgeKind, GraphOpError, NamedGraph, RuleKind, Spider, SpiderId, SpiderKind, ZxGraph, ZxRule,
    UNDEFINED_PHASE,
};
use crate::validate::graphs_identical;

const GRAPH_CENTER: (i32, i32) = (400, 300);
const RULE_SIDE_CENTER: (i32, i32) = (250, 250);

/// Result of importing one source text or file.
///
/// Failures never abort the import; they are collected here as human-readable
/// strings, localized to the smallest unit possible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Import {
    pub graphs: Vec<NamedGraph>,
    pub rules: Vec<ZxRule>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildError {
    /// A link named in more than two spider terms has no graph reading.
    LinkMultiplicity { link: SmolStr, count: usize },
    Graph(GraphOpError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkMultiplicity { link, count } => {
                write!(f, "link '{link}' occurs in {count} spider terms (at most 2 allowed)")
            }
            Self::Graph(source) => source.fmt(f),
        }
    }
}

impl From<GraphOpError> for BuildError {
    fn from(source: GraphOpError) -> Self {
        Self::Graph(source)
    }
}

/// Imports graphs and rules from LMNtal source text.
pub fn import_source(source: &str) -> Import {
    let (items, syntax_errors) = parse_source(source);

    let mut graphs = Vec::new();
    let mut raw_rules: Vec<(ZxRule, String)> = Vec::new();
    let mut errors = Vec::new();
    let mut graph_counter = 1u32;

    for item in items {
        match item {
            Item::Graph(atoms) => {
                let name = format!("graph_{graph_counter}");
                graph_counter += 1;

                let mut graph = ZxGraph::new();
                match build_graph(&mut graph, &atoms) {
                    Ok(()) => {
                        layout_circle(&mut graph, GRAPH_CENTER.0, GRAPH_CENTER.1);
                        graphs.push(NamedGraph::new(name, graph));
                    }
                    Err(err) => errors.push(format!("Failed to process a graph: {err}")),
                }
            }
            Item::Rule(raw) => match build_rule(&raw) {
                Ok(rule) => raw_rules.push((rule, raw.guard.unwrap_or_default())),
                Err(err) => {
                    errors.push(format!("Failed to process rule '{}': {err}", raw.name));
                }
            },
        }
    }

    let rules = pair_rules(raw_rules);

    if !syntax_errors.is_empty() {
        errors.push("Syntax errors detected in LMNtal file:".to_owned());
        errors.extend(syntax_errors.iter().map(ToString::to_string));
    }

    Import {
        graphs,
        rules,
        errors,
    }
}

fn build_rule(raw: &RawRule) -> Result<ZxRule, BuildError> {
    let mut rule = ZxRule::new(raw.name.as_str());
    build_graph(rule.lhs_mut(), &raw.lhs)?;
    build_graph(rule.rhs_mut(), &raw.rhs)?;
    layout_circle(rule.lhs_mut(), RULE_SIDE_CENTER.0, RULE_SIDE_CENTER.1);
    layout_circle(rule.rhs_mut(), RULE_SIDE_CENTER.0, RULE_SIDE_CENTER.1);
    Ok(rule)
}

fn build_graph(graph: &mut ZxGraph, atoms: &[Atom]) -> Result<(), BuildError> {
    let mut link_map: BTreeMap<SmolStr, Vec<SpiderId>> = BTreeMap::new();
    let mut hadamard_pairs: Vec<(SmolStr, SmolStr)> = Vec::new();

    // First pass: create spiders, collect link occurrences per name.
    for atom in atoms {
        match atom {
            Atom::Hadamard(links) => {
                if let [first, second] = links.as_slice() {
                    hadamard_pairs.push((first.clone(), second.clone()));
                }
            }
            Atom::Spider(contents) => {
                let mut spider = Spider::new(0, 0, SpiderKind::Z);
                let mut spider_links: Vec<&SmolStr> = Vec::new();
                for content in contents {
                    match content {
                        Content::Color(value) => apply_color(&mut spider, value),
                        Content::Phase(value) => apply_phase(&mut spider, value),
                        Content::Link(name) => spider_links.push(name),
                    }
                }
                let spider_id = graph.add_spider(spider);
                for name in spider_links {
                    link_map.entry(name.clone()).or_default().push(spider_id);
                }
            }
        }
    }

    for (link, referencing) in &link_map {
        if referencing.len() > 2 {
            return Err(BuildError::LinkMultiplicity {
                link: link.clone(),
                count: referencing.len(),
            });
        }
    }

    // Second pass: links named twice are internal wires.
    for referencing in link_map.values() {
        if let [first, second] = referencing.as_slice() {
            graph.add_edge(*first, *second, EdgeKind::Normal)?;
        }
    }

    // Hadamard gates wire their two links' unique referencing spiders
    // directly; the gate itself is not materialized as a node.
    let mut hadamard_involved: BTreeSet<&SmolStr> = BTreeSet::new();
    for (first, second) in &hadamard_pairs {
        hadamard_involved.insert(first);
        hadamard_involved.insert(second);
    }
    for (first, second) in &hadamard_pairs {
        let (Some(first_refs), Some(second_refs)) = (link_map.get(first), link_map.get(second))
        else {
            continue;
        };
        if let ([source], [target]) = (first_refs.as_slice(), second_refs.as_slice()) {
            graph.add_edge(*source, *target, EdgeKind::Hadamard)?;
        }
    }

    // Third pass: remaining once-named links are outward wires; each gets a
    // boundary spider labeled with the link name.
    for (link, referencing) in &link_map {
        if referencing.len() != 1 || hadamard_involved.contains(link) {
            continue;
        }
        let inner = referencing[0];
        let boundary = graph.add_spider(Spider::boundary(0, 0, link.clone()));
        graph.add_edge(inner, boundary, EdgeKind::Normal)?;
    }

    Ok(())
}

fn apply_color(spider: &mut Spider, value: &Value) {
    if value.symbolic {
        spider.set_color_undefined(true);
        if value.text.len() > 1 {
            spider.set_variable_label(Some(SmolStr::new(&value.text[1..])));
        }
    } else if value.text.contains('-') {
        spider.set_kind(SpiderKind::X);
    }
}

fn apply_phase(spider: &mut Spider, value: &Value) {
    if value.symbolic {
        spider.set_phase(UNDEFINED_PHASE);
        // A color variable on the same spider already names the parameter.
        if !spider.is_color_undefined() && value.text.len() > 1 {
            spider.set_variable_label(Some(SmolStr::new(&value.text[1..])));
        }
    } else {
        spider.set_phase(value.text.as_str());
    }
}

/// Merges mirrored one-way rule pairs into single two-way rules.
///
/// Greedy first-match in parse order: a later rule with the same name, the
/// same guard text, and structurally mirrored sides upgrades the earlier one
/// to `Equals` and is itself dropped. Order-dependent when more than two
/// rules could mutually match.
fn pair_rules(raw_rules: Vec<(ZxRule, String)>) -> Vec<ZxRule> {
    let mut slots: Vec<Option<(ZxRule, String)>> = raw_rules.into_iter().map(Some).collect();
    let mut rules = Vec::new();

    for i in 0..slots.len() {
        let Some((mut rule, guard)) = slots[i].take() else {
            continue;
        };

        let partner = (i + 1..slots.len()).find(|&j| {
            slots[j].as_ref().is_some_and(|(candidate, candidate_guard)| {
                candidate.name() == rule.name()
                    && *candidate_guard == guard
                    && graphs_identical(rule.lhs(), candidate.rhs())
                    && graphs_identical(rule.rhs(), candidate.lhs())
            })
        });

        if let Some(j) = partner {
            slots[j] = None;
            rule.set_kind(RuleKind::Equals);
        }
        rules.push(rule);
    }

    rules
}
