// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use galatea::format::lmntal::{graph_to_lmntal, import_source, rule_to_lmntal};
use galatea::model::{EdgeKind, RuleKind, SpiderKind};
use galatea::store::export_source;
use galatea::validate::validate_rule;
use galatea::workspace::Workspace;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("lmn")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

#[test]
fn graphs_fixture_imports_cleanly() {
    let import = import_source(&read_fixture("graphs.lmn"));
    assert!(import.errors.is_empty(), "errors: {:?}", import.errors);
    assert_eq!(import.graphs.len(), 2);
    assert!(import.rules.is_empty());

    let first = import.graphs[0].graph();
    assert_eq!(first.spiders().len(), 1);
    assert_eq!(
        first.spiders().values().next().expect("spider").phase(),
        "90"
    );

    let second = import.graphs[1].graph();
    let kinds: Vec<SpiderKind> = second
        .spiders()
        .values()
        .map(|spider| spider.kind())
        .collect();
    assert_eq!(
        kinds,
        [SpiderKind::Z, SpiderKind::X, SpiderKind::Boundary]
    );
    // Hadamard edges are wired before boundary edges during reconstruction.
    let edge_kinds: Vec<EdgeKind> = second.edges().values().map(|edge| edge.kind()).collect();
    assert_eq!(edge_kinds, [EdgeKind::Hadamard, EdgeKind::Normal]);
}

#[test]
fn rules_fixture_pairs_the_mirrored_pair_and_keeps_the_rest() {
    let import = import_source(&read_fixture("rules.lmn"));
    assert!(import.errors.is_empty(), "errors: {:?}", import.errors);
    assert!(import.graphs.is_empty());
    assert_eq!(import.rules.len(), 2);

    assert_eq!(import.rules[0].name(), "bialg");
    assert_eq!(import.rules[0].kind(), RuleKind::Equals);
    assert_eq!(import.rules[1].name(), "phasefree");
    assert_eq!(import.rules[1].kind(), RuleKind::Rewrite);

    for rule in &import.rules {
        assert_eq!(validate_rule(rule), Ok(()), "rule {}", rule.name());
    }
}

#[test]
fn broken_fixture_reports_errors_but_still_imports_the_good_graph() {
    let import = import_source(&read_fixture("broken.lmn"));
    assert_eq!(import.graphs.len(), 1);
    assert!(import
        .errors
        .iter()
        .any(|error| error == "Syntax errors detected in LMNtal file:"));
    assert!(import.errors.iter().any(|error| error.starts_with("line 1:")));
}

#[test]
fn import_export_import_is_stable() {
    let mut sources = read_fixture("graphs.lmn");
    sources.push('\n');
    sources.push_str(&read_fixture("rules.lmn"));

    let first = import_source(&sources);
    assert!(first.errors.is_empty(), "errors: {:?}", first.errors);

    let (exported, skipped) = export_source(&Workspace::from_import(first.clone()));
    assert!(skipped.is_empty(), "skipped: {skipped:?}");

    let second = import_source(&exported);
    assert!(second.errors.is_empty(), "errors: {:?}", second.errors);
    assert_eq!(second.graphs.len(), first.graphs.len());
    assert_eq!(second.rules.len(), first.rules.len());

    // The second pass is a fixpoint: serialized forms agree exactly.
    for (a, b) in first.graphs.iter().zip(&second.graphs) {
        assert_eq!(graph_to_lmntal(a.graph()), graph_to_lmntal(b.graph()));
    }
    for (a, b) in first.rules.iter().zip(&second.rules) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(rule_to_lmntal(a), rule_to_lmntal(b));
    }
}
