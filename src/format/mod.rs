// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire-format codecs.
//!
//! Currently this is the LMNtal term-graph subset the editor round-trips
//! diagrams and rules through.

pub mod lmntal;
