// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logpress — Journal data model, loader, and error definitions shared across
// all crates.

pub mod attachments;
pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use attachments::{AttachmentResolver, SkipReason, SkippedAttachment};
pub use config::{JournalConfig, PageNumberFormat};
pub use error::LogpressError;
pub use loader::{LoadedJournal, load_journal};
pub use types::*;
