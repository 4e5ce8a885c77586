//! This library handles reading from **IPF** archives used by *Tree of Savior*.
//!
//! # IPF Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **IPF** archive format
//! used by the game *Tree of Savior*. The IPF format is a custom binary format that stores
//! various game assets within a single file. IPF files are typically identified with the
//! `.ipf` extension.
//!
//! ## File Structure
//!
//! An IPF file consists of the entry payloads, a file table describing them, and a fixed
//! 24 byte footer occupying the last bytes of the file. The footer is the only structure at
//! a known position; everything else is located through it.
//!
//! ### Footer
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | EOF-24         | File Count             | 2 bytes: Number of entries in the file table               |
//! | EOF-22         | File Table Offset      | 4 bytes: Offset of the file table from the start of file   |
//! | EOF-18         | Unknown                | 2 bytes: A field with a currently unknown purpose          |
//! | EOF-16         | File Footer Offset     | 4 bytes: Offset of the footer from the start of file       |
//! | EOF-12         | Format                 | 4 bytes: Signature, fixed value `50 4B 05 06`              |
//! | EOF-8          | Base Revision          | 4 bytes: Revision the archive patches against              |
//! | EOF-4          | Revision               | 4 bytes: Revision of the archive contents                  |
//!
//! ### File Table
//!
//! The file table starts at **File Table Offset** and holds one variable length record per
//! entry: a fixed 20 byte prefix followed by the archive name and the file name as raw
//! bytes (neither is obfuscated).
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | File Name Length       | 2 bytes: Length of the trailing file name               |
//! | 0x0002         | CRC32                  | 4 bytes: Checksum of the entry data (stored, unchecked) |
//! | 0x0006         | Compressed Size        | 4 bytes: Size of the payload as stored                  |
//! | 0x000A         | Uncompressed Size      | 4 bytes: Size of the payload once decompressed          |
//! | 0x000E         | Data Offset            | 4 bytes: Absolute offset of the payload                 |
//! | 0x0012         | Archive Name Length    | 2 bytes: Length of the trailing archive name            |
//!
//! ### Entry Payloads
//!
//! Payloads are addressed absolutely via **Data Offset**. There is no per-entry compression
//! flag: an entry whose compressed and uncompressed sizes are equal is stored verbatim; any
//! other entry is a raw deflate stream (no zlib or gzip wrapper).
//!
//! ## Additional Information
//!
//! - **File Extension**: `.ipf`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Entry names**: Case-insensitive; lookups fold to lowercase
//!

pub mod compression;
pub mod error;
pub mod read;
pub mod types;

pub use compression::CompressionMethod;
pub use read::IpfArchive;
