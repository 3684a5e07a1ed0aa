// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

/// Phase sentinel marking a symbolic (undefined) phase.
pub const UNDEFINED_PHASE: &str = "?";

/// The kind of a spider node.
///
/// `Boundary` is a labeled placeholder for an external wire, not a real
/// colored node: it never emits a term of its own in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiderKind {
    Z,
    X,
    Boundary,
}

/// A single node of a ZX diagram.
///
/// Position is view-only state carried through copies; it never influences
/// serialization or structural equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spider {
    x: i32,
    y: i32,
    kind: SpiderKind,
    phase: String,
    label: Option<SmolStr>,
    variable_label: Option<SmolStr>,
    color_undefined: bool,
}

impl Spider {
    pub fn new(x: i32, y: i32, kind: SpiderKind) -> Self {
        Self {
            x,
            y,
            kind,
            phase: "0".to_owned(),
            label: None,
            variable_label: None,
            color_undefined: false,
        }
    }

    pub fn boundary(x: i32, y: i32, label: impl Into<SmolStr>) -> Self {
        let mut spider = Self::new(x, y, SpiderKind::Boundary);
        spider.label = Some(label.into());
        spider
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn kind(&self) -> SpiderKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: SpiderKind) {
        self.kind = kind;
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub fn set_phase(&mut self, phase: impl Into<String>) {
        self.phase = phase.into();
    }

    /// Boundary label. Only meaningful for `Boundary` spiders.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<SmolStr>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    /// Name of the symbolic parameter when the color or phase is undefined.
    pub fn variable_label(&self) -> Option<&str> {
        self.variable_label.as_deref()
    }

    pub fn set_variable_label<T: Into<SmolStr>>(&mut self, variable_label: Option<T>) {
        self.variable_label = variable_label.map(Into::into);
    }

    pub fn is_color_undefined(&self) -> bool {
        self.color_undefined
    }

    pub fn set_color_undefined(&mut self, color_undefined: bool) {
        self.color_undefined = color_undefined;
    }

    pub fn is_phase_undefined(&self) -> bool {
        self.phase == UNDEFINED_PHASE
    }

    /// True when either the color or the phase is a free symbolic parameter.
    pub fn is_undefined(&self) -> bool {
        self.color_undefined || self.is_phase_undefined()
    }
}
