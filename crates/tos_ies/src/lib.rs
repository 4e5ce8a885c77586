//! # IES Format Documentation
//!
//! This crate provides utilities to read and extract data from the **IES** format used by
//! the game *Tree of Savior*. The IES format is a custom binary format that stores one table
//! of typed columns and rows within a single file. IES files are typically identified with
//! the `.ies` extension.
//!
//! ## File Structure
//!
//! An IES file consists of a table name, a pair of headers, a column descriptor block and a
//! row data block. The two blocks at the end of the file are located by seeking backwards
//! from end-of-file, not forwards from the headers.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Table Name             | 128 bytes: NUL padded name of the table                    |
//! | 0x0080         | Unknown                | 4 bytes: A field with a currently unknown purpose          |
//! | 0x0084         | Data Offset            | 4 bytes: Size of the column descriptor block               |
//! | 0x0088         | Resource Offset        | 4 bytes: Size of the row data block                        |
//! | 0x008C         | File Size              | 4 bytes: Total size of the file                            |
//! | 0x0090         | Unknown                | 2 bytes: A field with a currently unknown purpose          |
//! | 0x0092         | Row Count              | 2 bytes: Number of rows in the table                       |
//! | 0x0094         | Column Count           | 2 bytes: Number of column descriptors                      |
//! | 0x0096         | Number Column Count    | 2 bytes: Advisory count of number typed columns            |
//! | 0x0098         | Text Column Count      | 2 bytes: Advisory count of text typed columns              |
//! | 0x009A         | Unknown                | 2 bytes: A field with a currently unknown purpose          |
//!
//! ### Column Block
//!
//! The column block starts at `EOF - resource_offset - data_offset` and holds one 88 byte
//! descriptor per column:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name                   | 64 bytes: Obfuscated, NUL padded primary label          |
//! | 0x0040         | Name 2                 | 64 bytes: Obfuscated, NUL padded secondary label        |
//! | 0x0080         | Type                   | 2 bytes: 0 = number, 1 or 2 = text                      |
//! | 0x0082         | Unknown                | 4 bytes: Carried through but not interpreted            |
//! | 0x0086         | Position               | 2 bytes: Declared ordinal of the column                 |
//!
//! Rows store their values with all number columns first (ascending by position), followed
//! by all text columns (ascending by position), regardless of the order the descriptors
//! appear on disk.
//!
//! ### Row Block
//!
//! The row block starts at `EOF - resource_offset`. Each row begins with a 4 byte row id and
//! a 2 byte length of vendor reserved bytes to skip, followed by one value per column in the
//! sorted column order: numbers are 4 byte IEEE-754 floats, texts are a 2 byte length
//! followed by that many obfuscated bytes. Every row ends with one padding byte per text
//! column declared in the header.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.ies`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Obfuscation**: Text fields are XORed bytewise with `0x01`, see [`obfuscation`]
//!

pub mod error;
pub mod obfuscation;
pub mod read;
pub mod types;

pub use read::{ColumnPolicy, IesReadOptions, IesTable};
