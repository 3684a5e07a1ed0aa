// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural equality and pre-export rule validation.
//!
//! Equality deliberately goes through the serialized form: two graphs are
//! identical when their spider/edge counts, boundary-label multisets, and
//! LMNtal texts all agree. This is insertion-order sensitive (isomorphic
//! graphs built in different orders compare unequal), and the rest of the
//! system (rule pairing, dirty checks) depends on exactly that behavior.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::format::lmntal::serialize::graph_to_lmntal_with_vars;
use crate::model::{RuleKind, SpiderKind, ZxGraph, ZxRule};

pub fn graphs_identical(a: &ZxGraph, b: &ZxGraph) -> bool {
    if a.spiders().len() != b.spiders().len() || a.edges().len() != b.edges().len() {
        return false;
    }
    if a.boundary_label_counts() != b.boundary_label_counts() {
        return false;
    }

    let mut a_vars = BTreeSet::new();
    let mut b_vars = BTreeSet::new();
    graph_to_lmntal_with_vars(a, &mut a_vars) == graph_to_lmntal_with_vars(b, &mut b_vars)
}

pub fn rules_identical(a: &ZxRule, b: &ZxRule) -> bool {
    a.kind() == b.kind() && graphs_identical(a.lhs(), b.lhs()) && graphs_identical(a.rhs(), b.rhs())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lhs,
    Rhs,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lhs => "left",
            Self::Rhs => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    DuplicateVariableLabel { side: Side },
    DuplicateBoundaryLabel { side: Side },
    BoundaryMismatch,
    VariablesMissingInLhs { variables: Vec<SmolStr> },
    /// Two-way rules must be usable in both directions.
    VariablesMissingInRhs { variables: Vec<SmolStr> },
}

impl fmt::Display for RuleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateVariableLabel { side } => write!(
                f,
                "variable labels must be unique on the {} side of the rule",
                side.as_str()
            ),
            Self::DuplicateBoundaryLabel { side } => write!(
                f,
                "boundary labels must be unique on the {} side of the rule",
                side.as_str()
            ),
            Self::BoundaryMismatch => {
                f.write_str("boundary node labels must match on both sides of the rule")
            }
            Self::VariablesMissingInLhs { variables } => write!(
                f,
                "variables from the RHS are missing in the LHS: {}",
                join(variables)
            ),
            Self::VariablesMissingInRhs { variables } => write!(
                f,
                "variables from the LHS are missing in the RHS (two-way rule): {}",
                join(variables)
            ),
        }
    }
}

impl std::error::Error for RuleValidationError {}

fn join(variables: &[SmolStr]) -> String {
    variables
        .iter()
        .map(SmolStr::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn has_duplicate_variable_labels(graph: &ZxGraph) -> bool {
    let mut seen = BTreeSet::new();
    graph
        .spiders()
        .values()
        .filter_map(|spider| spider.variable_label())
        .any(|label| !seen.insert(label))
}

fn has_duplicate_boundary_labels(graph: &ZxGraph) -> bool {
    graph.boundary_label_counts().values().any(|count| *count > 1)
}

fn boundary_label_set(graph: &ZxGraph) -> BTreeSet<SmolStr> {
    graph
        .spiders()
        .values()
        .filter(|spider| spider.kind() == SpiderKind::Boundary)
        .filter_map(|spider| spider.label())
        .map(SmolStr::new)
        .collect()
}

/// Checks the boundary/variable invariants that gate rule export.
///
/// A failing rule is excluded from export (and reported); it never aborts
/// the export of other rules.
pub fn validate_rule(rule: &ZxRule) -> Result<(), RuleValidationError> {
    if has_duplicate_variable_labels(rule.lhs()) {
        return Err(RuleValidationError::DuplicateVariableLabel { side: Side::Lhs });
    }
    if has_duplicate_variable_labels(rule.rhs()) {
        return Err(RuleValidationError::DuplicateVariableLabel { side: Side::Rhs });
    }

    if has_duplicate_boundary_labels(rule.lhs()) {
        return Err(RuleValidationError::DuplicateBoundaryLabel { side: Side::Lhs });
    }
    if has_duplicate_boundary_labels(rule.rhs()) {
        return Err(RuleValidationError::DuplicateBoundaryLabel { side: Side::Rhs });
    }

    if boundary_label_set(rule.lhs()) != boundary_label_set(rule.rhs()) {
        return Err(RuleValidationError::BoundaryMismatch);
    }

    let mut lhs_vars = BTreeSet::new();
    let mut rhs_vars = BTreeSet::new();
    graph_to_lmntal_with_vars(rule.lhs(), &mut lhs_vars);
    graph_to_lmntal_with_vars(rule.rhs(), &mut rhs_vars);

    let missing_in_lhs: Vec<SmolStr> = rhs_vars.difference(&lhs_vars).cloned().collect();
    if !missing_in_lhs.is_empty() {
        return Err(RuleValidationError::VariablesMissingInLhs {
            variables: missing_in_lhs,
        });
    }

    if rule.kind() == RuleKind::Equals {
        let missing_in_rhs: Vec<SmolStr> = lhs_vars.difference(&rhs_vars).cloned().collect();
        if !missing_in_rhs.is_empty() {
            return Err(RuleValidationError::VariablesMissingInRhs {
                variables: missing_in_rhs,
            });
        }
    }

    Ok(())
}
