use std::fs;
use std::io::SeekFrom;

use tilepack::{ByteSink, ByteSource, TileReader, TileWriter, TilepackError, WidthPattern};

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiles.bin");
    let p = WidthPattern::new(vec![3, 2, 9]).unwrap();

    let mut w = TileWriter::create(&path).unwrap();
    assert_eq!(w.write_tiles(&[7, 3, 483, 7, 2, 510], &p).unwrap(), 4);
    w.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0x8F, 0xDF, 0xE0]);

    let mut r = TileReader::open(&path).unwrap();
    assert_eq!(r.size().unwrap(), 4);
    let values = r.read_tiles(4, &p).unwrap();
    // 32 bits hold six values plus one 3-bit slot of padding.
    assert_eq!(values, vec![7, 3, 483, 7, 2, 510, 0]);
    assert_eq!(r.last_len(), 7);
}

#[test]
fn reads_from_current_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("offset.bin");
    fs::write(&path, [0xAA, 0xFF, 0x8C]).unwrap();
    let p = WidthPattern::new(vec![3, 2, 9]).unwrap();

    let mut r = TileReader::open(&path).unwrap();
    r.seek(SeekFrom::Start(1)).unwrap();
    let mut out = [0u16; 3];
    assert_eq!(r.read_tiles_into(2, &p, &mut out).unwrap(), 3);
    assert_eq!(out, [7, 3, 483]);
    assert_eq!(r.position().unwrap(), 3);
    assert!(matches!(
        r.read_range(1),
        Err(TilepackError::InsufficientInput { .. })
    ));
}

#[test]
fn writer_appends_consecutive_encodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.bin");
    let p = WidthPattern::new(vec![8]).unwrap();

    let mut w = TileWriter::create(&path).unwrap();
    w.write_tiles(&[1, 2], &p).unwrap();
    w.write_tiles(&[3], &p).unwrap();
    assert_eq!(w.last_len(), 1);
    w.flush().unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    drop(w);
    assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TileReader::open(dir.path().join("nope.bin")).unwrap_err();
    assert!(matches!(err, TilepackError::Io(_)));
}

#[test]
fn rejected_values_leave_stream_untouched() {
    let p = WidthPattern::new(vec![2]).unwrap();
    let mut w = TileWriter::new(Vec::new());
    assert!(matches!(
        w.write_tiles(&[1, 4], &p),
        Err(TilepackError::ValueTooWide { slot: 1, .. })
    ));
    assert!(w.finish().unwrap().is_empty());
}

#[test]
fn writer_encodes_at_seeked_offset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patch.bin");
    let p = WidthPattern::new(vec![4, 4]).unwrap();

    let mut w = TileWriter::create(&path).unwrap();
    w.write_tiles(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6], &p).unwrap();
    assert_eq!(w.position().unwrap(), 3);
    w.seek(SeekFrom::Start(1)).unwrap();
    w.write_tiles(&[0xA, 0xB], &p).unwrap();
    assert_eq!(w.position().unwrap(), 2);
    w.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![0x12, 0xAB, 0x56]);
}
