use std::io::{Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::{write::DeflateEncoder, Compression};
use pretty_assertions::assert_eq;
use tos_ipf::error::{Error, Result};
use tos_ipf::read::IpfArchive;
use tos_ipf::CompressionMethod;
use tracing_test::traced_test;

/// One entry to pack into a synthetic archive.
struct TestEntry<'a> {
    archive: &'static str,
    name: &'static str,
    data: &'a [u8],
    deflate: bool,
}

/// Assemble a syntactically valid IPF file: payloads, file table, footer.
fn build_ipf(entries: &[TestEntry<'_>]) -> Vec<u8> {
    let mut payloads: Vec<(u64, Vec<u8>, &TestEntry<'_>)> = Vec::new();
    let mut out = Vec::new();

    for entry in entries {
        let stored = if entry.deflate {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(entry.data).unwrap();
            encoder.finish().unwrap()
        } else {
            entry.data.to_vec()
        };
        payloads.push((out.len() as u64, stored.clone(), entry));
        out.extend_from_slice(&stored);
    }

    let filetable_offset = out.len() as u32;
    for (offset, stored, entry) in &payloads {
        out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();
        out.write_u32::<LittleEndian>(stored.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(entry.data.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(*offset as u32).unwrap();
        out.write_u16::<LittleEndian>(entry.archive.len() as u16).unwrap();
        out.extend_from_slice(entry.archive.as_bytes());
        out.extend_from_slice(entry.name.as_bytes());
    }

    let filefooter_offset = out.len() as u32;
    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    out.write_u32::<LittleEndian>(filetable_offset).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u32::<LittleEndian>(filefooter_offset).unwrap();
    out.extend_from_slice(&[0x50, 0x4B, 0x05, 0x06]);
    out.write_u32::<LittleEndian>(100).unwrap();
    out.write_u32::<LittleEndian>(101).unwrap();

    out
}

#[traced_test]
#[test]
fn footer_metadata_is_exposed() -> Result<()> {
    let input = build_ipf(&[TestEntry {
        archive: "base",
        name: "a.txt",
        data: b"a",
        deflate: false,
    }]);

    let archive = IpfArchive::new(Cursor::new(input))?;

    assert_eq!(archive.len(), 1);
    assert_eq!(archive.filetable_offset(), 1);
    assert_eq!(archive.format(), [0x50, 0x4B, 0x05, 0x06]);
    assert_eq!(archive.base_revision(), 100);
    assert_eq!(archive.revision(), 101);
    assert_eq!(archive.decompressed_size(), Some(1));

    Ok(())
}

#[traced_test]
#[test]
fn lookup_is_case_insensitive() -> Result<()> {
    let input = build_ipf(&[TestEntry {
        archive: "data",
        name: "Data/Item.ies",
        data: b"payload",
        deflate: false,
    }]);

    let mut archive = IpfArchive::new(Cursor::new(input))?;

    assert!(archive.entry("data/item.ies").is_some());
    assert!(archive.entry("DATA/ITEM.IES").is_some());
    assert!(archive.entry("data/other.ies").is_none());

    // The original case survives in the metadata.
    let entry = archive.entry("data/item.ies").unwrap();
    assert_eq!(entry.file_name.as_ref(), "Data/Item.ies");

    let file = archive.by_name("data/item.ies")?;
    assert_eq!(file.name(), "Data/Item.ies");

    Ok(())
}

#[traced_test]
#[test]
fn missing_entry_is_absent() -> Result<()> {
    let input = build_ipf(&[]);
    let mut archive = IpfArchive::new(Cursor::new(input))?;

    assert!(archive.entry("nope.txt").is_none());
    assert!(matches!(
        archive.by_name("nope.txt"),
        Err(Error::EntryNotFound(_))
    ));
    assert!(matches!(
        archive.read_entry("nope.txt"),
        Err(Error::EntryNotFound(_))
    ));

    Ok(())
}

#[traced_test]
#[test]
fn stored_entry_returns_raw_bytes() -> Result<()> {
    let data = b"uncompressed payload bytes";
    let input = build_ipf(&[TestEntry {
        archive: "base",
        name: "raw.bin",
        data,
        deflate: false,
    }]);

    let mut archive = IpfArchive::new(Cursor::new(input))?;
    assert_eq!(
        archive.entry("raw.bin").unwrap().compression_method,
        CompressionMethod::Stored
    );
    assert_eq!(archive.read_entry("raw.bin")?, data.to_vec());

    Ok(())
}

#[traced_test]
#[test]
fn deflated_entry_inflates_to_uncompressed_length() -> Result<()> {
    // Repetitive content so the deflate stream is shorter than the original,
    // keeping the two lengths distinct.
    let data = "payload ".repeat(64);
    let input = build_ipf(&[TestEntry {
        archive: "base",
        name: "packed.bin",
        data: data.as_bytes(),
        deflate: true,
    }]);

    let mut archive = IpfArchive::new(Cursor::new(input))?;

    let entry = archive.entry("packed.bin").unwrap();
    assert_eq!(entry.compression_method, CompressionMethod::Deflate);
    assert_eq!(entry.uncompressed_size, data.len() as u64);
    assert!(entry.compressed_size < entry.uncompressed_size);

    let inflated = archive.read_entry("packed.bin")?;
    assert_eq!(inflated.len(), data.len());
    assert_eq!(inflated, data.as_bytes());

    Ok(())
}

#[traced_test]
#[test]
fn corrupt_deflate_stream_fails_decompression() -> Result<()> {
    // Lengths differ, so the payload is treated as deflate; the bytes are not
    // a valid stream.
    let mut input = Vec::new();
    input.extend_from_slice(&[0xFF; 8]);
    input.write_u16::<LittleEndian>(7).unwrap();
    input.write_u32::<LittleEndian>(0).unwrap();
    input.write_u32::<LittleEndian>(8).unwrap();
    input.write_u32::<LittleEndian>(64).unwrap();
    input.write_u32::<LittleEndian>(0).unwrap();
    input.write_u16::<LittleEndian>(4).unwrap();
    input.extend_from_slice(b"base");
    input.extend_from_slice(b"bad.bin");
    input.write_u16::<LittleEndian>(1).unwrap();
    input.write_u32::<LittleEndian>(8).unwrap();
    input.write_u16::<LittleEndian>(0).unwrap();
    input.write_u32::<LittleEndian>(39).unwrap();
    input.extend_from_slice(&[0x50, 0x4B, 0x05, 0x06]);
    input.write_u32::<LittleEndian>(0).unwrap();
    input.write_u32::<LittleEndian>(0).unwrap();

    let mut archive = IpfArchive::new(Cursor::new(input))?;
    assert!(matches!(
        archive.read_entry("bad.bin"),
        Err(Error::Decompression(_))
    ));

    Ok(())
}

#[traced_test]
#[test]
fn duplicate_names_are_rejected() {
    // Same name in two different cases; keys fold to lowercase.
    let input = build_ipf(&[
        TestEntry {
            archive: "base",
            name: "item.ies",
            data: b"one",
            deflate: false,
        },
        TestEntry {
            archive: "patch",
            name: "Item.IES",
            data: b"two",
            deflate: false,
        },
    ]);

    let archive = IpfArchive::new(Cursor::new(input));
    match archive {
        Err(Error::DuplicateEntry(name)) => assert_eq!(name, "Item.IES"),
        other => panic!("expected DuplicateEntry, got {:?}", other.err()),
    }
}

#[traced_test]
#[test]
fn extract_all_writes_under_archive_name() -> Result<()> {
    let input = build_ipf(&[
        TestEntry {
            archive: "base",
            name: "stored.txt",
            data: b"stored content",
            deflate: false,
        },
        TestEntry {
            archive: "base",
            name: "packed.txt",
            data: b"packed content packed content packed content",
            deflate: true,
        },
    ]);

    let dir = tempfile::tempdir()?;
    let mut archive = IpfArchive::new(Cursor::new(input))?;
    archive.extract_all(dir.path())?;

    let stored = std::fs::read(dir.path().join("base").join("stored.txt"))?;
    assert_eq!(stored, b"stored content".to_vec());

    let packed = std::fs::read(dir.path().join("base").join("packed.txt"))?;
    assert_eq!(
        packed,
        b"packed content packed content packed content".to_vec()
    );

    Ok(())
}

#[traced_test]
#[test]
fn extract_all_does_not_overwrite_existing_files() -> Result<()> {
    let input = build_ipf(&[TestEntry {
        archive: "base",
        name: "keep.txt",
        data: b"from the archive",
        deflate: false,
    }]);

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("base").join("keep.txt");
    std::fs::create_dir_all(target.parent().unwrap())?;
    std::fs::write(&target, b"already here")?;

    let mut archive = IpfArchive::new(Cursor::new(input))?;
    archive.extract_all(dir.path())?;

    assert_eq!(std::fs::read(&target)?, b"already here".to_vec());

    Ok(())
}

#[traced_test]
#[test]
fn extract_all_with_overwrite_replaces_existing_files() -> Result<()> {
    let input = build_ipf(&[TestEntry {
        archive: "base",
        name: "keep.txt",
        data: b"from the archive",
        deflate: false,
    }]);

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("base").join("keep.txt");
    std::fs::create_dir_all(target.parent().unwrap())?;
    std::fs::write(&target, b"already here")?;

    let mut archive = IpfArchive::new(Cursor::new(input))?;
    archive.extract_all_with_overwrite(dir.path(), true)?;

    assert_eq!(std::fs::read(&target)?, b"from the archive".to_vec());

    Ok(())
}

#[traced_test]
#[test]
fn extraction_failure_does_not_abort_the_batch() -> Result<()> {
    // The first entry's payload claims to be deflate but is garbage; the
    // second entry must still land on disk.
    let bad = TestEntry {
        archive: "base",
        name: "bad.bin",
        data: b"",
        deflate: false,
    };
    let mut input = build_ipf(&[
        bad,
        TestEntry {
            archive: "base",
            name: "good.txt",
            data: b"good bytes",
            deflate: false,
        },
    ]);
    // Corrupt the first record: grow its compressed length past its
    // uncompressed length so the reader treats the payload as deflate.
    let filetable_offset = 10usize;
    input[filetable_offset + 6..filetable_offset + 10]
        .copy_from_slice(&4u32.to_le_bytes());

    let dir = tempfile::tempdir()?;
    let mut archive = IpfArchive::new(Cursor::new(input))?;
    archive.extract_all(dir.path())?;

    // The failed entry leaves its empty target behind, but nothing more.
    let bad = std::fs::read(dir.path().join("base").join("bad.bin"))?;
    assert!(bad.is_empty());
    assert_eq!(
        std::fs::read(dir.path().join("base").join("good.txt"))?,
        b"good bytes".to_vec()
    );

    Ok(())
}
