// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `.lmn` file import/export.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{write_atomic, StoreError};
use crate::format::lmntal::serialize::{graph_to_lmntal, rule_to_lmntal};
use crate::format::lmntal::{import_source, Import};
use crate::validate::{validate_rule, RuleValidationError};
use crate::workspace::Workspace;

/// A rule left out of an export because it failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub name: String,
    pub reason: RuleValidationError,
}

impl fmt::Display for SkippedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule '{}' was not exported because it failed validation: {}",
            self.name, self.reason
        )
    }
}

#[derive(Debug)]
pub struct ExportReport {
    pub path: PathBuf,
    pub skipped: Vec<SkippedRule>,
}

/// Renders the export file body: all non-empty graphs, then every non-empty
/// rule that passes validation. Skipped rules are returned, not silently
/// dropped.
pub fn export_source(workspace: &Workspace) -> (String, Vec<SkippedRule>) {
    let mut out = String::new();
    let mut skipped = Vec::new();

    out.push_str("// === Graph Definitions ===\n\n");
    for graph in workspace.graphs() {
        if graph.graph().is_empty() {
            continue;
        }
        out.push_str(&format!(
            "// {}\n{}.\n\n",
            graph.name(),
            graph_to_lmntal(graph.graph())
        ));
    }

    out.push_str("// === Rule Definitions ===\n\n");
    for rule in workspace.rules() {
        if rule.is_empty() {
            continue;
        }
        match validate_rule(rule) {
            Ok(()) => {
                out.push_str(&format!("{}\n\n", rule_to_lmntal(rule)));
            }
            Err(reason) => skipped.push(SkippedRule {
                name: rule.name().to_owned(),
                reason,
            }),
        }
    }

    (out, skipped)
}

pub fn export_file(path: &Path, workspace: &Workspace) -> Result<ExportReport, StoreError> {
    let (source, skipped) = export_source(workspace);
    write_atomic(path, source.as_bytes())?;
    Ok(ExportReport {
        path: path.to_path_buf(),
        skipped,
    })
}

/// Imports one `.lmn` file. Unreadable files surface as a single error entry;
/// this never returns `Err` and never panics.
pub fn import_file(path: &Path) -> Import {
    match fs::read_to_string(path) {
        Ok(source) => import_source(&source),
        Err(err) => Import {
            graphs: Vec::new(),
            rules: Vec::new(),
            errors: vec![format!("Failed to read {}: {err}", path.display())],
        },
    }
}

/// Imports independent files in parallel, preserving input order.
///
/// Every graph carries its own counters, so imports share no state.
pub fn import_files(paths: &[PathBuf]) -> Vec<Import> {
    paths
        .par_iter()
        .map(|path| import_file(path))
        .collect()
}
