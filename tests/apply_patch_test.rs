//! End-to-end tests for single-patch application: text hunks, binary payloads, and deletion semantics.

use altair::{
    apply_patch, ApplyError, BinaryFile, BinaryKind, BinaryPatch, Delta, DeltaFlags, DeltaStatus,
    DiffLine, FileInfo, FileMode, Hunk, LineOrigin, Patch,
};
use bytes::Bytes;

fn line(content: &'static [u8], origin: LineOrigin) -> DiffLine {
    DiffLine::new(Bytes::from_static(content), origin)
}

fn text_patch(
    status: DeltaStatus,
    path: &str,
    hunk: (u32, u32, u32, u32),
    lines: Vec<DiffLine>,
) -> Patch {
    let (old_start, old_lines, new_start, new_lines) = hunk;
    let line_count = lines.len();
    Patch {
        delta: Delta {
            status,
            old_file: FileInfo::new(path, FileMode::Blob),
            new_file: FileInfo::new(path, FileMode::Blob),
            flags: DeltaFlags::default(),
        },
        hunks: vec![Hunk {
            old_start,
            old_lines,
            new_start,
            new_lines,
            line_start: 0,
            line_count,
        }],
        lines,
        binary: None,
    }
}

fn literal_side(contents: &[u8]) -> BinaryFile {
    BinaryFile {
        kind: BinaryKind::Literal,
        data: Bytes::from(altair::utils::compress::deflate(contents).unwrap()),
        inflated_len: contents.len(),
    }
}

fn binary_patch(status: DeltaStatus, old: BinaryFile, new: BinaryFile) -> Patch {
    Patch {
        delta: Delta {
            status,
            old_file: FileInfo::new("blob.bin", FileMode::Blob),
            new_file: FileInfo::new("blob.bin", FileMode::Blob),
            flags: DeltaFlags { binary: true },
        },
        lines: vec![],
        hunks: vec![],
        binary: Some(BinaryPatch {
            contains_data: true,
            old_file: old,
            new_file: new,
        }),
    }
}

/// Replacing one line in the middle of a file, with context on both sides.
#[test]
fn test_simple_replacement() {
    let patch = text_patch(
        DeltaStatus::Modified,
        "file.txt",
        (1, 3, 1, 3),
        vec![
            line(b"a\n", LineOrigin::Context),
            line(b"b\n", LineOrigin::Deletion),
            line(b"B\n", LineOrigin::Addition),
            line(b"c\n", LineOrigin::Context),
        ],
    );

    let applied = apply_patch(&Bytes::from_static(b"a\nb\nc\n"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"a\nB\nc\n");
    assert_eq!(applied.path.as_deref(), Some("file.txt"));
    assert_eq!(applied.mode, FileMode::Blob);
}

/// A pure insertion with `new_start == 0` lands at the top of the file.
#[test]
fn test_insertion_at_top() {
    let patch = text_patch(
        DeltaStatus::Modified,
        "file.txt",
        (0, 0, 0, 1),
        vec![line(b"hello\n", LineOrigin::Addition)],
    );

    let applied = apply_patch(&Bytes::from_static(b"x\n"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"hello\nx\n");
}

/// Deleting the final, newline-less line of a file.
#[test]
fn test_deletion_of_unterminated_last_line() {
    let patch = text_patch(
        DeltaStatus::Modified,
        "file.txt",
        (1, 2, 1, 1),
        vec![
            line(b"one\n", LineOrigin::Context),
            line(b"two", LineOrigin::Deletion),
        ],
    );

    let applied = apply_patch(&Bytes::from_static(b"one\ntwo"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"one\n");
}

/// A preimage that does not match at the anchor is rejected with the hunk's
/// target line, and the source is left undisturbed.
#[test]
fn test_mismatch_rejects() {
    let patch = text_patch(
        DeltaStatus::Modified,
        "file.txt",
        (1, 3, 1, 3),
        vec![
            line(b"a\n", LineOrigin::Context),
            line(b"X\n", LineOrigin::Deletion),
            line(b"Y\n", LineOrigin::Addition),
            line(b"c\n", LineOrigin::Context),
        ],
    );

    let source = Bytes::from_static(b"a\nb\nc\n");
    let err = apply_patch(&source, &patch).unwrap_err();

    assert!(matches!(err, ApplyError::HunkFailed(1)));
    assert!(err.is_apply_failure());
    assert_eq!(source.as_ref(), b"a\nb\nc\n");
}

/// The same hunk must fail once the source is shifted by one extra line
/// ahead of the anchor: placement is positional, never searched.
#[test]
fn test_exact_positioning_rejects_shifted_source() {
    let lines = vec![
        line(b"a\n", LineOrigin::Context),
        line(b"b\n", LineOrigin::Deletion),
        line(b"B\n", LineOrigin::Addition),
        line(b"c\n", LineOrigin::Context),
    ];
    let patch = text_patch(DeltaStatus::Modified, "file.txt", (2, 3, 2, 3), lines);

    // Matches at line 2 of the expected layout...
    let applied = apply_patch(&Bytes::from_static(b"zero\na\nb\nc\n"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"zero\na\nB\nc\n");

    // ...and fails once one more line is inserted ahead of the anchor.
    let err = apply_patch(&Bytes::from_static(b"minus\nzero\na\nb\nc\n"), &patch).unwrap_err();
    assert!(matches!(err, ApplyError::HunkFailed(2)));
}

/// A patch with no hunks and no binary payload is a pure metadata change.
#[test]
fn test_noop_patch_keeps_source_bytes() {
    let patch = Patch {
        delta: Delta {
            status: DeltaStatus::Renamed,
            old_file: FileInfo::new("old.txt", FileMode::Blob),
            new_file: FileInfo::new("new.txt", FileMode::BlobExecutable),
            flags: DeltaFlags::default(),
        },
        ..Patch::default()
    };

    let applied = apply_patch(&Bytes::from_static(b"data"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"data");
    assert_eq!(applied.path.as_deref(), Some("new.txt"));
    assert_eq!(applied.mode, FileMode::BlobExecutable);
}

/// An unset new-file mode falls back to the regular blob mode.
#[test]
fn test_unset_mode_defaults_to_blob() {
    let patch = Patch {
        delta: Delta {
            status: DeltaStatus::Added,
            new_file: FileInfo::new("fresh.txt", FileMode::Unreadable),
            ..Delta::default()
        },
        ..Patch::default()
    };

    let applied = apply_patch(&Bytes::new(), &patch).unwrap();
    assert_eq!(applied.mode, FileMode::Blob);
    assert_eq!(applied.mode.bits(), 0o100644);
}

/// A deletion patch yields no path, no mode, and empty contents.
#[test]
fn test_deletion_yields_empty_entry() {
    let patch = Patch {
        delta: Delta {
            status: DeltaStatus::Deleted,
            old_file: FileInfo::new("gone.txt", FileMode::Blob),
            ..Delta::default()
        },
        hunks: vec![],
        lines: vec![],
        binary: None,
    };

    // A deletion whose hunks drained the file applies cleanly.
    let drained = text_patch(
        DeltaStatus::Deleted,
        "gone.txt",
        (1, 1, 0, 0),
        vec![line(b"data\n", LineOrigin::Deletion)],
    );
    let applied = apply_patch(&Bytes::from_static(b"data\n"), &drained).unwrap();
    assert_eq!(applied.path, None);
    assert_eq!(applied.mode, FileMode::Unreadable);
    assert!(applied.contents.is_empty());

    // A deletion with no hunks against non-empty source leaves residue.
    let err = apply_patch(&Bytes::from_static(b"data"), &patch).unwrap_err();
    assert!(matches!(err, ApplyError::RemovalLeavesContents));
}

/// Binary literal patch: forward side becomes the contents, reverse side
/// must reproduce the source.
#[test]
fn test_binary_literal() {
    let patch = binary_patch(
        DeltaStatus::Modified,
        literal_side(b"OLD"),
        literal_side(b"NEW"),
    );

    let applied = apply_patch(&Bytes::from_static(b"OLD"), &patch).unwrap();
    assert_eq!(applied.contents.as_ref(), b"NEW");
}

/// A mis-paired reverse side fails the round-trip check.
#[test]
fn test_binary_reverse_check_failure() {
    let patch = binary_patch(
        DeltaStatus::Modified,
        literal_side(b"WRONG"),
        literal_side(b"NEW"),
    );

    let err = apply_patch(&Bytes::from_static(b"OLD"), &patch).unwrap_err();
    assert!(matches!(err, ApplyError::BinaryMismatch));
    assert!(err.is_apply_failure());
}

/// A binary-flagged delta without a parsed payload cannot apply.
#[test]
fn test_binary_flag_without_payload() {
    let mut patch = binary_patch(
        DeltaStatus::Modified,
        BinaryFile::default(),
        BinaryFile::default(),
    );
    patch.binary = None;

    let err = apply_patch(&Bytes::from_static(b"abc"), &patch).unwrap_err();
    assert!(matches!(err, ApplyError::MissingBinaryData));
}

/// Several hunks over one file apply strictly left-to-right on the evolving
/// image, each positioned in post-previous-hunk numbering.
#[test]
fn test_multiple_hunks_in_order() {
    let lines = vec![
        line(b"head\n", LineOrigin::Context),
        line(b"a1\n", LineOrigin::Deletion),
        line(b"A1\n", LineOrigin::Addition),
        line(b"mid1\n", LineOrigin::Context),
        line(b"mid3\n", LineOrigin::Context),
        line(b"b1\n", LineOrigin::Deletion),
        line(b"B1\n", LineOrigin::Addition),
        line(b"tail\n", LineOrigin::Context),
    ];
    let patch = Patch {
        delta: Delta {
            status: DeltaStatus::Modified,
            old_file: FileInfo::new("file.txt", FileMode::Blob),
            new_file: FileInfo::new("file.txt", FileMode::Blob),
            flags: DeltaFlags::default(),
        },
        hunks: vec![
            Hunk {
                old_start: 1,
                old_lines: 3,
                new_start: 1,
                new_lines: 3,
                line_start: 0,
                line_count: 4,
            },
            Hunk {
                old_start: 5,
                old_lines: 3,
                new_start: 5,
                new_lines: 3,
                line_start: 4,
                line_count: 4,
            },
        ],
        lines,
        binary: None,
    };

    let source = Bytes::from_static(b"head\na1\nmid1\nmid2\nmid3\nb1\ntail\n");
    let applied = apply_patch(&source, &patch).unwrap();
    assert_eq!(
        applied.contents.as_ref(),
        b"head\nA1\nmid1\nmid2\nmid3\nB1\ntail\n"
    );
}
