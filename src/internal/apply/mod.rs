//! Patch driver: turns a source buffer and a parsed patch into postimage entries, and orders whole-diff application.

mod binary;
mod text;

use bytes::Bytes;

use crate::errors::ApplyError;
use crate::internal::patch::{DeltaStatus, FileMode, Patch};
use crate::utils::reader::{PreimageReader, ReadError};

/// Where a patch set draws its preimages from and where collaborators write
/// the results, mirroring `git apply` / `git apply --cached` /
/// `git apply --index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyLocation {
    /// Working-tree contents only.
    #[default]
    Workdir,
    /// Staged contents only.
    Index,
    /// Both the index and the working tree.
    Both,
}

/// Options accepted at the driver boundary. The location selects which
/// preimage reader the caller constructs and where results land; it does
/// not alter the transform itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub location: ApplyLocation,
}

/// Outcome of applying one patch: the new contents and where they belong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Target path; `None` when the patch deletes the file.
    pub path: Option<String>,
    pub mode: FileMode,
    pub contents: Bytes,
}

/// One step of a whole-diff application, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    /// Drop the entry at `path` from the postimage.
    Remove { path: String },
    /// Write `contents` at `path` with `mode`.
    Write {
        path: String,
        mode: FileMode,
        contents: Bytes,
    },
}

/// Applies a single parsed patch to `source`.
///
/// Dispatches on the patch shape: binary payloads go through the delta
/// applier, hunks are walked in order over one evolving image, and a patch
/// with neither is a pure metadata change that keeps the source bytes. A
/// deletion that would leave contents behind is rejected.
pub fn apply_patch(source: &Bytes, patch: &Patch) -> Result<Applied, ApplyError> {
    tracing::debug!(
        status = ?patch.delta.status,
        hunks = patch.hunks.len(),
        binary = patch.delta.flags.binary,
        "applying patch"
    );

    let (path, mode) = if patch.delta.status == DeltaStatus::Deleted {
        (None, FileMode::Unreadable)
    } else {
        let new_file = &patch.delta.new_file;
        let mode = match new_file.mode {
            FileMode::Unreadable => FileMode::Blob,
            mode => mode,
        };
        (Some(new_file.path.clone()), mode)
    };

    let contents = if patch.delta.flags.binary {
        let binary = patch.binary.as_ref().ok_or(ApplyError::MissingBinaryData)?;
        binary::apply_binary(source, binary, patch.delta.status)?
    } else if !patch.hunks.is_empty() {
        text::apply_hunks(source, patch)?
    } else {
        source.clone()
    };

    if patch.delta.status == DeltaStatus::Deleted && !contents.is_empty() {
        return Err(ApplyError::RemovalLeavesContents);
    }

    Ok(Applied {
        path,
        mode,
        contents,
    })
}

/// Applies a sequence of per-file patches against `preimage`, producing the
/// ordered operations a checkout or index writer must perform.
///
/// Deletions and renames release their old paths before any write happens,
/// so a rename onto a pre-existing path cannot collide with it. The engine
/// itself touches neither a filesystem nor an index.
pub fn apply_all(
    preimage: &dyn PreimageReader,
    patches: &[Patch],
    opts: &ApplyOptions,
) -> Result<Vec<FileOp>, ApplyError> {
    tracing::debug!(location = ?opts.location, patches = patches.len(), "applying patch set");

    let mut ops = Vec::new();

    for patch in patches {
        if matches!(
            patch.delta.status,
            DeltaStatus::Deleted | DeltaStatus::Renamed
        ) {
            ops.push(FileOp::Remove {
                path: patch.delta.old_file.path.clone(),
            });
        }
    }

    for patch in patches {
        if patch.delta.status == DeltaStatus::Deleted {
            continue;
        }

        let source = if patch.delta.status == DeltaStatus::Added {
            Bytes::new()
        } else {
            match preimage.read(&patch.delta.old_file.path) {
                Ok(contents) => contents,
                // A missing preimage is a patch-level failure, not transport.
                Err(ReadError::NotFound(path)) => return Err(ApplyError::MissingPreimage(path)),
                Err(ReadError::Io(e)) => return Err(ApplyError::Io(e)),
            }
        };

        let applied = apply_patch(&source, patch)?;
        if let Some(path) = applied.path {
            ops.push(FileOp::Write {
                path,
                mode: applied.mode,
                contents: applied.contents,
            });
        }
    }

    Ok(ops)
}
