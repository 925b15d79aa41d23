//! Line-indexed, mutable view of file contents under patch application.

use bytes::{Bytes, BytesMut};

use crate::errors::ApplyError;

/// A file's contents split into lines, mutated in place as hunks apply.
///
/// Lines are `Bytes` slices into whichever buffer they came from (the source
/// file or the patch), so building and splicing an image never copies line
/// data. Every line keeps its trailing `\n`; only the final line may lack
/// one. Concatenating the lines in order always reconstructs the current
/// logical contents.
#[derive(Debug, Default)]
pub struct Image {
    lines: Vec<Bytes>,
}

impl Image {
    /// Splits `src` on newline boundaries. An empty buffer yields an empty
    /// image with zero lines.
    pub fn from_bytes(src: &Bytes) -> Image {
        let mut lines = Vec::new();
        let mut start = 0;

        while start < src.len() {
            let end = match src[start..].iter().position(|&b| b == b'\n') {
                Some(offset) => start + offset + 1,
                None => src.len(),
            };
            lines.push(src.slice(start..end));
            start = end;
        }

        Image { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Borrows line `index`. Out-of-range access is reported as an internal
    /// error rather than a panic; the index never comes from patch data.
    pub fn line(&self, index: usize) -> Result<&Bytes, ApplyError> {
        self.lines.get(index).ok_or_else(|| {
            ApplyError::InternalBug(format!(
                "image line {index} out of range ({} lines)",
                self.lines.len()
            ))
        })
    }

    /// Removes `remove` lines at `at`, then inserts `insert` at the same
    /// position. Bounds are validated before any mutation, so a failed call
    /// leaves the image unchanged.
    pub fn splice(&mut self, at: usize, remove: usize, insert: &[Bytes]) -> Result<(), ApplyError> {
        let end = at
            .checked_add(remove)
            .filter(|&end| end <= self.lines.len())
            .ok_or_else(|| {
                ApplyError::InternalBug(format!(
                    "splice of {remove} lines at {at} exceeds image ({} lines)",
                    self.lines.len()
                ))
            })?;

        self.lines.splice(at..end, insert.iter().cloned());
        Ok(())
    }

    /// Concatenates every line back into one contiguous buffer.
    pub fn to_bytes(&self) -> Bytes {
        let total = self.lines.iter().map(|line| line.len()).sum();
        let mut out = BytesMut::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line);
        }
        out.freeze()
    }
}
