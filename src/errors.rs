//! Error taxonomy for patch application: patch-level failures, payload decode errors, and internal invariant violations.

use thiserror::Error;

use crate::internal::delta::DeltaError;

/// Errors produced while applying a patch.
///
/// Most variants mean the patch does not fit the given source; see
/// [`ApplyError::is_apply_failure`]. `Inflate` and `Delta` report a payload
/// that could not be decoded at all, `Io` a failing preimage transport, and
/// `InternalBug` a violated engine invariant (a programming error, never a
/// property of the patch data).
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("hunk at line {0} did not apply")]
    HunkFailed(u32),

    #[error("preimage does not contain line {0}")]
    MissingPatchLine(usize),

    #[error("patch does not contain binary data")]
    MissingBinaryData,

    #[error("inflated delta does not match expected length")]
    InflatedSizeMismatch,

    #[error("unknown binary delta type")]
    UnknownBinaryKind,

    #[error("binary patch did not apply cleanly")]
    BinaryMismatch,

    #[error("removal patch leaves file contents")]
    RemovalLeavesContents,

    #[error("preimage '{0}' does not exist")]
    MissingPreimage(String),

    #[error("zlib inflate failed: {0}")]
    Inflate(#[source] std::io::Error),

    #[error(transparent)]
    Delta(#[from] DeltaError),

    #[error("preimage read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    InternalBug(String),
}

impl ApplyError {
    /// True when the error means "this patch does not apply to this source",
    /// as opposed to an undecodable payload, a transport fault, or a bug.
    pub fn is_apply_failure(&self) -> bool {
        matches!(
            self,
            ApplyError::HunkFailed(_)
                | ApplyError::MissingPatchLine(_)
                | ApplyError::MissingBinaryData
                | ApplyError::InflatedSizeMismatch
                | ApplyError::UnknownBinaryKind
                | ApplyError::BinaryMismatch
                | ApplyError::RemovalLeavesContents
                | ApplyError::MissingPreimage(_)
        )
    }
}
