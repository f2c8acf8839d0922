//! Integration tests for feature-gated functionality and convenience functions.

#[cfg(any(feature = "advise", feature = "iterator"))]
use mmap_cursor::MappedFile;
use mmap_cursor::{read_file, split_file, ScanMode};
use std::fs;
use std::path::PathBuf;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("mmap_cursor_feature_test_{}_{}", name, std::process::id()));
    p
}

#[test]
#[cfg(feature = "iterator")]
fn test_records_then_chunks() {
    let path = tmp_path("records_then_chunks");
    let mut data = b"id=1|id=2|id=3|".to_vec();
    data.extend(std::iter::repeat(0xEEu8).take(100));
    fs::write(&path, &data).expect("write");

    let mut file = MappedFile::builder(&path)
        .scan_mode(ScanMode::Substring)
        .open()
        .expect("open");

    let ids: Vec<Vec<u8>> = file
        .records(b"|")
        .expect("records")
        .collect::<mmap_cursor::Result<_>>()
        .expect("collect records");
    assert_eq!(ids, vec![b"id=1".to_vec(), b"id=2".to_vec(), b"id=3".to_vec()]);
    assert_eq!(file.position(), 15);

    let chunks: Vec<Vec<u8>> = file
        .chunks(40)
        .expect("chunks")
        .collect::<mmap_cursor::Result<_>>()
        .expect("collect chunks");
    assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![40, 40, 20]);
    assert!(file.is_at_end());

    drop(file);
    fs::remove_file(&path).expect("cleanup");
}

#[test]
#[cfg(feature = "advise")]
fn test_advice_does_not_change_reads() {
    use mmap_cursor::MmapAdvice;

    let path = tmp_path("advice_reads");
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 7) as u8).collect();
    fs::write(&path, &data).expect("write");

    let mut file = MappedFile::builder(&path)
        .advice(MmapAdvice::Sequential)
        .open()
        .expect("open");
    file.advise(10_000, 20_000, MmapAdvice::WillNeed).expect("will need");
    file.set_position(10_000).expect("seek");
    assert_eq!(file.read(20_000).expect("read"), &data[10_000..30_000]);

    drop(file);
    fs::remove_file(&path).expect("cleanup");
}

#[test]
fn test_convenience_functions() {
    let path = tmp_path("convenience");
    fs::write(&path, b"k1\0v1\0k2\0v2\0").expect("write");

    assert_eq!(read_file(&path).expect("read_file"), b"k1\0v1\0k2\0v2\0");

    let (records, tail) = split_file(&path, b"\0", ScanMode::Block).expect("split");
    assert_eq!(records.len(), 4);
    assert_eq!(records[3], b"v2");
    assert!(tail.is_empty());

    fs::remove_file(&path).expect("cleanup");
}
