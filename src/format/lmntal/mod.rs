// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! LMNtal parsing and serialization.
//!
//! Serialization names wires (`+L1`), boundaries (`+B1`) and Hadamard gates
//! (`h{e^i(180), ..}`); import reconstructs topology purely from link
//! occurrence counts and merges mirrored one-way rules into two-way rules.

pub mod import;
pub mod parse;
pub mod serialize;
pub mod token;

pub use import::{import_source, Import};
pub use parse::{parse_source, Atom, Content, Item, RawRule, Value};
pub use serialize::{graph_to_lmntal, graph_to_lmntal_with_vars, rule_to_lmntal};
pub use token::SyntaxError;
