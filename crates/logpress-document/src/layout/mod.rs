// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — block types and the builder that produces them from a
// journal collection.

pub mod blocks;
pub mod builder;

pub use blocks::{
    DateHeaderBlock, DividerBlock, ImageBlock, LayoutBlock, TextBlock, TwoColumnBlock,
};
pub use builder::{BlockBuilder, EntryLayout, JournalLayout};
