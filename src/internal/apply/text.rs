//! Text hunk application: locate a hunk's preimage on the line image and splice in its postimage.

use bytes::Bytes;

use crate::errors::ApplyError;
use crate::internal::image::Image;
use crate::internal::patch::{Hunk, Patch};

/// Checks whether `preimage` matches the image line-for-line starting at
/// `at`. Lines compare by exact byte equality.
fn matches_at(image: &Image, preimage: &[Bytes], at: usize) -> Result<bool, ApplyError> {
    if at > image.len() || preimage.len() > image.len() - at {
        return Ok(false);
    }

    for (i, expected) in preimage.iter().enumerate() {
        if image.line(at + i)? != expected {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Applies one hunk to the image at its stated position.
///
/// Only the exact anchor derived from `new_start` is tried; the hunks this
/// engine consumes carry authoritative positions, so an ambiguous placement
/// is an error rather than something to search around.
pub(crate) fn apply_hunk(image: &mut Image, patch: &Patch, hunk: &Hunk) -> Result<(), ApplyError> {
    let mut preimage = Vec::with_capacity(hunk.line_count);
    let mut postimage = Vec::with_capacity(hunk.line_count);

    for offset in 0..hunk.line_count {
        let index = hunk.line_start + offset;
        let line = patch
            .lines
            .get(index)
            .ok_or(ApplyError::MissingPatchLine(index))?;

        if line.origin.in_preimage() {
            preimage.push(line.content.clone());
        }
        if line.origin.in_postimage() {
            postimage.push(line.content.clone());
        }
    }

    // new_start is 1-based; 0 anchors a pure insertion at the top. Anchors
    // past the end clamp to the end, where only an empty preimage can match.
    let anchor = (hunk.new_start as usize)
        .saturating_sub(1)
        .min(image.len());

    if !matches_at(image, &preimage, anchor)? {
        return Err(ApplyError::HunkFailed(hunk.new_start));
    }

    image.splice(anchor, preimage.len(), &postimage)
}

/// Applies every hunk of `patch`, in order, to an image built from `source`
/// and linearizes the result.
///
/// Each hunk's `new_start` is already expressed in post-previous-hunks
/// numbering, so walking the hunks left-to-right over one evolving image
/// needs no offset bookkeeping.
pub(crate) fn apply_hunks(source: &Bytes, patch: &Patch) -> Result<Bytes, ApplyError> {
    let mut image = Image::from_bytes(source);

    for hunk in &patch.hunks {
        apply_hunk(&mut image, patch, hunk)?;
    }

    Ok(image.to_bytes())
}
