// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A graph owns spiders and edges; rules own two graphs. Everything here is
//! pure data plus structural operations: no codec, no layout, no I/O.

pub mod edge;
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod rule;
pub mod spider;

pub use edge::{Edge, EdgeKind};
pub use graph::{GraphOpError, NamedGraph, ZxGraph};
pub use ids::{EdgeId, Id, SpiderId};
pub use rule::{RuleKind, ZxRule};
pub use spider::{Spider, SpiderKind, UNDEFINED_PHASE};
