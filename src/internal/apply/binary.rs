//! Binary patch application: inflate both embedded deltas, apply the forward one, verify with the reverse one.

use bytes::Bytes;

use crate::errors::ApplyError;
use crate::internal::delta;
use crate::internal::patch::{BinaryFile, BinaryKind, BinaryPatch, DeltaStatus};
use crate::utils::compress;

/// Applies one side's compressed payload to `source`.
fn apply_side(source: &Bytes, side: &BinaryFile) -> Result<Bytes, ApplyError> {
    // An absent payload means this side's contents are identical.
    if side.data.is_empty() {
        return Ok(source.clone());
    }

    let inflated = compress::inflate(&side.data).map_err(ApplyError::Inflate)?;
    if inflated.len() != side.inflated_len {
        return Err(ApplyError::InflatedSizeMismatch);
    }

    match side.kind {
        BinaryKind::Delta => Ok(Bytes::from(delta::apply(source, &inflated)?)),
        BinaryKind::Literal => Ok(Bytes::from(inflated)),
        BinaryKind::None => Err(ApplyError::UnknownBinaryKind),
    }
}

/// Applies the forward delta to `source`, then runs the reverse delta over
/// the result and requires it to reproduce `source` byte-for-byte. The
/// round trip catches both corrupted payloads and mis-paired patches.
pub(crate) fn apply_binary(
    source: &Bytes,
    binary: &BinaryPatch,
    status: DeltaStatus,
) -> Result<Bytes, ApplyError> {
    if !binary.contains_data {
        return Err(ApplyError::MissingBinaryData);
    }

    // Neither side carries a payload: resolve by delta status instead of
    // leaving the output unspecified.
    if binary.old_file.data.is_empty() && binary.new_file.data.is_empty() {
        return Ok(match status {
            DeltaStatus::Added | DeltaStatus::Deleted => Bytes::new(),
            _ => source.clone(),
        });
    }

    let forward = apply_side(source, &binary.new_file)?;
    let reverse = apply_side(&forward, &binary.old_file)?;

    if reverse != *source {
        return Err(ApplyError::BinaryMismatch);
    }

    Ok(forward)
}
