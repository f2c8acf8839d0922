//! Empty files, acquisition failures, and release behavior.

use mmap_cursor::{MappedFile, MmapCursorError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn empty_file_confines_cursor_to_zero() {
    let path = NamedTempFile::new().expect("tempfile").into_temp_path();

    let mut file = MappedFile::open(&path).expect("open empty");
    assert_eq!(file.len(), 0);
    assert!(file.is_empty());
    assert!(file.is_at_end());

    file.set_position(0).expect("seek zero");
    assert!(file.set_position(1).is_err());
    assert!(file.read(0).expect("empty read").is_empty());
    assert!(matches!(file.read(1), Err(MmapCursorError::OutOfBounds { .. })));
    assert!(matches!(file.read_until(b"\n"), Err(MmapCursorError::OutOfBounds { .. })));
    assert!(matches!(file.read_until(b""), Err(MmapCursorError::InvalidArgument(_))));
    assert_eq!(file.position(), 0);
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist.bin");

    let err = MappedFile::open(&path).expect_err("missing file");
    match &err {
        MmapCursorError::OpenFailed { path: p, source } => {
            assert_eq!(p, &path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected OpenFailed, got {other:?}"),
    }
    let shown = err.to_string();
    assert!(shown.starts_with("failed to open "));
    assert!(shown.contains("does-not-exist.bin"));
    assert!(!shown.ends_with(": "));
}

#[test]
#[cfg(unix)]
fn directory_fails_to_map() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = MappedFile::open(dir.path()).expect_err("directory");
    assert!(matches!(err, MmapCursorError::MapFailed { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
#[cfg(unix)]
fn unreadable_file_fails_to_open() {
    use std::os::unix::fs::PermissionsExt;

    let path = NamedTempFile::new().expect("tempfile").into_temp_path();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).expect("chmod");

    // Privileged users bypass permission bits, so only assert when open fails.
    if let Err(err) = MappedFile::open(&path) {
        assert!(matches!(err, MmapCursorError::OpenFailed { .. }));
    }
}

#[test]
fn mapping_survives_unlink_until_closed() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"still here").expect("write");
    // Readers deny writers on Windows, so the writer handle goes first.
    let path = tmp.into_temp_path();

    let mut file = MappedFile::open(&path).expect("open");

    // Windows refuses to delete a mapped file; only unlink where it is allowed.
    if std::fs::remove_file(&path).is_ok() {
        assert_eq!(file.read(10).expect("read after unlink"), b"still here");
    }

    file.close();
    assert!(file.is_closed());
    file.close();
    assert!(matches!(file.read(0), Err(MmapCursorError::Closed)));
    assert!(matches!(file.skip(0), Err(MmapCursorError::Closed)));
    drop(file);
}

#[test]
#[cfg(windows)]
fn writers_are_denied_until_closed() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"read shared").expect("write");
    let path = tmp.into_temp_path();

    let mut file = MappedFile::open(&path).expect("open");
    let err = std::fs::OpenOptions::new().write(true).open(&path).expect_err("writer");
    assert_eq!(err.raw_os_error(), Some(32)); // ERROR_SHARING_VIOLATION
    let mut reader = MappedFile::open(&path).expect("second reader");
    assert_eq!(reader.read(4).expect("read"), b"read");

    file.close();
    drop(reader);
    std::fs::OpenOptions::new().write(true).open(&path).expect("writer after close");
}

#[test]
fn large_file_reads_at_far_offsets() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    let page = vec![0x5Au8; 4096];
    for _ in 0..256 {
        tmp.write_all(&page).expect("write page");
    }
    tmp.write_all(b"END").expect("write tail");
    let path = tmp.into_temp_path();

    let mut file = MappedFile::open(&path).expect("open");
    assert_eq!(file.len(), 256 * 4096 + 3);
    file.set_position(256 * 4096).expect("seek");
    assert_eq!(file.read(3).expect("tail"), b"END");

    file.set_position(4095).expect("seek across page");
    assert_eq!(file.read(2).expect("straddle"), vec![0x5A, 0x5A]);
}
