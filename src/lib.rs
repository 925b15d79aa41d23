//! Altair: a patch application engine for Git-style diffs.
//!
//! Given a file's previous contents and a parsed patch, Altair produces the
//! new contents. Text hunks are located by their stated positions on a
//! line-indexed image and spliced in; binary patches are inflated,
//! delta-applied, and verified by running the paired reverse delta back over
//! the result. Placement is strict-exact: the patches this engine consumes
//! carry authoritative positions, so ambiguous placements fail instead of
//! silently landing somewhere else.
//!
//! The engine is synchronous and owns no global state. Preimages come from a
//! [`PreimageReader`] the caller supplies; results are returned as plain
//! `(path, mode, contents)` entries or an ordered [`FileOp`] sequence for
//! whole-diff application. Everything else — repositories, diff parsing,
//! checkout — belongs to the caller.

pub mod errors;
pub mod internal;
pub mod utils;

pub use errors::ApplyError;
pub use internal::apply::{apply_all, apply_patch, Applied, ApplyLocation, ApplyOptions, FileOp};
pub use internal::image::Image;
pub use internal::patch::{
    BinaryFile, BinaryKind, BinaryPatch, Delta, DeltaFlags, DeltaStatus, DiffLine, FileInfo,
    FileMode, Hunk, LineOrigin, Patch,
};
pub use utils::reader::{MemoryReader, PreimageReader, ReadError, WorkdirReader};
