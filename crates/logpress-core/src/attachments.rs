// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attachment resolution — maps attachment records to files under the journal's
// attachment directory. Problems here are never fatal: they become
// `SkippedAttachment` values that the caller logs and moves past.

use std::path::{Component, Path, PathBuf};

use crate::types::{Attachment, EntryId};

/// Why an attachment contributes nothing to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has no `filename`.
    MissingFilename,
    /// The filename is absolute or climbs out of the attachment directory.
    UnsafeFilename,
    /// No file exists at the resolved path.
    NotFound(PathBuf),
    /// The file exists but could not be decoded.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFilename => f.write_str("attachment has no filename"),
            Self::UnsafeFilename => f.write_str("filename escapes the attachment directory"),
            Self::NotFound(path) => write!(f, "file not found at {}", path.display()),
            Self::Unreadable(cause) => write!(f, "could not load image: {cause}"),
        }
    }
}

/// An attachment that was left out, with the entry it belonged to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAttachment {
    pub entry: EntryId,
    pub filename: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for SkippedAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entry {}: {} ({})",
            self.entry, self.filename, self.reason
        )
    }
}

/// Locates attachment files on disk.
#[derive(Debug, Clone)]
pub struct AttachmentResolver {
    root: PathBuf,
}

impl AttachmentResolver {
    /// Resolver rooted at `base_dir` joined with each of `segments`.
    pub fn new<S: AsRef<str>>(base_dir: impl AsRef<Path>, segments: &[S]) -> Self {
        let mut root = base_dir.as_ref().to_path_buf();
        for segment in segments {
            root.push(segment.as_ref());
        }
        Self { root }
    }

    /// Directory attachments are looked up in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the attachment's file, if it names one that exists.
    pub fn resolve(&self, attachment: &Attachment) -> Result<PathBuf, SkipReason> {
        let filename = attachment
            .filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(SkipReason::MissingFilename)?;

        let relative = Path::new(filename);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(SkipReason::UnsafeFilename);
        }

        let path = self.root.join(relative);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SkipReason::NotFound(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with_file(name: &str) -> (tempfile::TempDir, AttachmentResolver) {
        let dir = tempfile::tempdir().unwrap();
        let attachments = dir.path().join("sawyer").join("attachments");
        std::fs::create_dir_all(&attachments).unwrap();
        std::fs::write(attachments.join(name), b"not really a png").unwrap();
        let resolver = AttachmentResolver::new(dir.path(), &["sawyer", "attachments"]);
        (dir, resolver)
    }

    #[test]
    fn existing_file_resolves_under_attachment_dir() {
        let (dir, resolver) = resolver_with_file("a.png");
        let path = resolver.resolve(&Attachment::image("a.png")).unwrap();
        assert_eq!(path, dir.path().join("sawyer/attachments/a.png"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, resolver) = resolver_with_file("a.png");
        let reason = resolver.resolve(&Attachment::image("b.png")).unwrap_err();
        assert!(matches!(reason, SkipReason::NotFound(p) if p.ends_with("b.png")));
    }

    #[test]
    fn missing_or_empty_filename() {
        let (_dir, resolver) = resolver_with_file("a.png");
        let mut attachment = Attachment::image("");
        assert_eq!(
            resolver.resolve(&attachment),
            Err(SkipReason::MissingFilename)
        );
        attachment.filename = None;
        assert_eq!(
            resolver.resolve(&attachment),
            Err(SkipReason::MissingFilename)
        );
    }

    #[test]
    fn parent_traversal_is_refused() {
        let (_dir, resolver) = resolver_with_file("a.png");
        assert_eq!(
            resolver.resolve(&Attachment::image("../../etc/passwd")),
            Err(SkipReason::UnsafeFilename)
        );
    }
}
