// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{EdgeKind, RuleKind, SpiderId, SpiderKind, ZxGraph, ZxRule};

type LinkList = SmallVec<[SmolStr; 4]>;

fn mint_link(counter: &mut u32) -> SmolStr {
    *counter += 1;
    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(*counter);
    let mut name = String::with_capacity(2 + digits.len());
    name.push_str("+L");
    name.push_str(digits);
    SmolStr::new(name)
}

fn sub_link(base: &SmolStr, suffix: char) -> SmolStr {
    let mut name = String::with_capacity(base.len() + 1);
    name.push_str(base);
    name.push(suffix);
    SmolStr::new(name)
}

fn outward_link(label: &str) -> SmolStr {
    let mut name = String::with_capacity(1 + label.len());
    name.push('+');
    name.push_str(&label.to_ascii_uppercase());
    SmolStr::new(name)
}

pub fn graph_to_lmntal(graph: &ZxGraph) -> String {
    let mut variables = BTreeSet::new();
    graph_to_lmntal_with_vars(graph, &mut variables)
}

/// Serializes a graph to LMNtal terms, collecting the free symbolic variable
/// names (`Cv1`, `Pv1`, ..) into `variables`.
///
/// Hadamard gate terms come first (in edge order), then spider terms (in
/// spider order), joined by `,\n`. Boundary spiders emit no term of their
/// own; an empty graph serializes to the empty string.
pub fn graph_to_lmntal_with_vars(graph: &ZxGraph, variables: &mut BTreeSet<SmolStr>) -> String {
    if graph.is_empty() {
        return String::new();
    }

    let mut components: Vec<String> = Vec::new();
    let mut spider_links: BTreeMap<SpiderId, LinkList> = graph
        .spiders()
        .iter()
        .filter(|(_, spider)| spider.kind() != SpiderKind::Boundary)
        .map(|(spider_id, _)| (*spider_id, LinkList::new()))
        .collect();

    let mut link_counter = 0u32;

    for edge in graph.edges().values() {
        let Some(source) = graph.spider(edge.source()) else {
            continue;
        };
        let Some(target) = graph.spider(edge.target()) else {
            continue;
        };
        let source_is_boundary = source.kind() == SpiderKind::Boundary;
        let target_is_boundary = target.kind() == SpiderKind::Boundary;

        if source_is_boundary && target_is_boundary {
            continue;
        }

        if source_is_boundary || target_is_boundary {
            let (boundary, inner_id) = if source_is_boundary {
                (source, edge.target())
            } else {
                (target, edge.source())
            };
            let Some(label) = boundary.label() else {
                continue;
            };
            let boundary_link = outward_link(label);

            if edge.kind() == EdgeKind::Hadamard {
                let intermediate = mint_link(&mut link_counter);
                if let Some(links) = spider_links.get_mut(&inner_id) {
                    links.push(intermediate.clone());
                }
                components.push(format!("h{{e^i(180), {intermediate}, {boundary_link}}}"));
            } else if let Some(links) = spider_links.get_mut(&inner_id) {
                links.push(boundary_link);
            }
        } else {
            let link_name = mint_link(&mut link_counter);
            if edge.kind() == EdgeKind::Hadamard {
                let first = sub_link(&link_name, 'a');
                let second = sub_link(&link_name, 'b');
                if let Some(links) = spider_links.get_mut(&edge.source()) {
                    links.push(first.clone());
                }
                if let Some(links) = spider_links.get_mut(&edge.target()) {
                    links.push(second.clone());
                }
                components.push(format!("h{{e^i(180), {first}, {second}}}"));
            } else {
                if let Some(links) = spider_links.get_mut(&edge.source()) {
                    links.push(link_name.clone());
                }
                if let Some(links) = spider_links.get_mut(&edge.target()) {
                    links.push(link_name);
                }
            }
        }
    }

    for (spider_id, spider) in graph.spiders() {
        if spider.kind() == SpiderKind::Boundary {
            continue;
        }

        let color;
        let phase;
        if spider.is_undefined() {
            // The op layer keeps undefined spiders labeled; an unlabeled one
            // cannot be expressed and is dropped from the output.
            let Some(variable_label) = spider.variable_label().filter(|l| !l.trim().is_empty())
            else {
                continue;
            };

            if spider.is_color_undefined() {
                let name = SmolStr::new(format!("C{variable_label}"));
                variables.insert(name.clone());
                color = name.to_string();
            } else {
                color = plain_color(spider.kind()).to_owned();
            }

            if spider.is_phase_undefined() {
                let name = SmolStr::new(format!("P{variable_label}"));
                variables.insert(name.clone());
                phase = name.to_string();
            } else {
                phase = spider.phase().to_owned();
            }
        } else {
            color = plain_color(spider.kind()).to_owned();
            phase = spider.phase().to_owned();
        }

        let links = spider_links
            .get(spider_id)
            .map(|links| {
                links
                    .iter()
                    .map(SmolStr::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        components.push(format!("{{c({color}), e^i({phase}), {links}}}"));
    }

    components.join(",\n")
}

fn plain_color(kind: SpiderKind) -> &'static str {
    match kind {
        SpiderKind::X => "-1",
        _ => "+1",
    }
}

/// Serializes a rule, including the `int(..)` guard over the free variables
/// of both sides. Two-way rules additionally emit the mirrored one-way rule
/// after a blank line, reusing the same guard.
pub fn rule_to_lmntal(rule: &ZxRule) -> String {
    let mut lhs_vars = BTreeSet::new();
    let mut rhs_vars = BTreeSet::new();

    let lhs_text = graph_to_lmntal_with_vars(rule.lhs(), &mut lhs_vars);
    let rhs_text = graph_to_lmntal_with_vars(rule.rhs(), &mut rhs_vars);

    let mut all_vars = lhs_vars;
    all_vars.extend(rhs_vars);

    let guard = if all_vars.is_empty() {
        String::new()
    } else {
        let joined = all_vars
            .iter()
            .map(SmolStr::as_str)
            .collect::<Vec<_>>()
            .join("), int(");
        format!(" int({joined}) | ")
    };

    let name = rule.name();
    let mut out = format!("{name}@@\n{lhs_text}\n:-{guard}\n{rhs_text}.");
    if rule.kind() == RuleKind::Equals {
        out.push_str("\n\n");
        out.push_str(&format!("{name}@@\n{rhs_text}\n:-{guard}\n{lhs_text}."));
    }
    out
}
