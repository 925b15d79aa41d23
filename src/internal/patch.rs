//! Structured patch model: deltas, hunks, tagged diff lines, and binary payloads as emitted by an upstream diff parser.

use bytes::Bytes;

/// Classification of one line inside a hunk, matching the origin column of a
/// unified diff. The EOFNL variants mark lines adjacent to a
/// "\ No newline at end of file" annotation; for placement they behave like
/// their plain counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    Context,
    Addition,
    Deletion,
    ContextEofNl,
    AdditionEofNl,
    DeletionEofNl,
}

impl LineOrigin {
    /// Lines the hunk expects to find in the image before application.
    pub fn in_preimage(self) -> bool {
        matches!(
            self,
            LineOrigin::Context
                | LineOrigin::ContextEofNl
                | LineOrigin::Deletion
                | LineOrigin::DeletionEofNl
        )
    }

    /// Lines the hunk leaves behind in the image after application.
    pub fn in_postimage(self) -> bool {
        matches!(
            self,
            LineOrigin::Context
                | LineOrigin::ContextEofNl
                | LineOrigin::Addition
                | LineOrigin::AdditionEofNl
        )
    }
}

/// One line of a parsed patch. The content is a slice of the patch's backing
/// buffer, so clones are reference bumps, not copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub content: Bytes,
    pub origin: LineOrigin,
}

impl DiffLine {
    pub fn new(content: impl Into<Bytes>, origin: LineOrigin) -> DiffLine {
        DiffLine {
            content: content.into(),
            origin,
        }
    }
}

/// One localized edit region of a patch.
///
/// `old_start`/`new_start` are the 1-based line numbers from the `@@` header
/// (0 means the side is empty), and the counts include context lines.
/// `line_start`/`line_count` locate the hunk's lines inside the owning
/// patch's shared line storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub line_start: usize,
    pub line_count: usize,
}

/// Change classification for a whole file, as the diff reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaStatus {
    #[default]
    Unmodified,
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
}

/// On-disk mode for a patched entry, restricted to git's canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// No mode recorded, e.g. the side does not exist.
    #[default]
    Unreadable,
    Blob,
    BlobExecutable,
    Link,
    Commit,
}

impl FileMode {
    /// The mode as the octal value git stores in tree entries.
    pub fn bits(self) -> u32 {
        match self {
            FileMode::Unreadable => 0o000000,
            FileMode::Blob => 0o100644,
            FileMode::BlobExecutable => 0o100755,
            FileMode::Link => 0o120000,
            FileMode::Commit => 0o160000,
        }
    }
}

/// Path and mode of one side of a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub path: String,
    pub mode: FileMode,
}

impl FileInfo {
    pub fn new(path: impl Into<String>, mode: FileMode) -> FileInfo {
        FileInfo {
            path: path.into(),
            mode,
        }
    }
}

/// Per-delta flags carried over from the diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaFlags {
    /// The file pair was diffed as binary; contents live in the binary
    /// payload, not in hunks.
    pub binary: bool,
}

/// Top-level change record for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub status: DeltaStatus,
    pub old_file: FileInfo,
    pub new_file: FileInfo,
    pub flags: DeltaFlags,
}

/// How a binary side's payload reconstructs its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryKind {
    /// No payload on this side.
    #[default]
    None,
    /// The inflated payload is the complete new contents.
    Literal,
    /// The inflated payload is a delta instruction stream against a base.
    Delta,
}

/// One side of a binary patch: a deflate-compressed payload plus its
/// declared inflated size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryFile {
    pub kind: BinaryKind,
    pub data: Bytes,
    pub inflated_len: usize,
}

/// The two delta sides of a binary patch: `new_file` transforms source into
/// target, `old_file` transforms target back into source for verification.
/// `contains_data` distinguishes a parsed payload from a bare
/// "Binary files differ" marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryPatch {
    pub contains_data: bool,
    pub old_file: BinaryFile,
    pub new_file: BinaryFile,
}

/// A parsed per-file patch. Hunks index into the shared `lines` storage, the
/// way the upstream parser emits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub delta: Delta,
    pub lines: Vec<DiffLine>,
    pub hunks: Vec<Hunk>,
    pub binary: Option<BinaryPatch>,
}
