//! Types for reading IES table files
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

use crate::error::{Error, Result};
use crate::obfuscation;
use crate::types::{ColumnDef, ColumnType, Value};

/// Table name field plus the primary and secondary headers.
const HEADER_LENGTH: u64 = 128 + 16 + 12;

/// How to treat column descriptors with a type value this crate does not know.
///
/// The game client silently skips such columns; [`ColumnPolicy::Permissive`]
/// reproduces that, dropping the descriptor from the decoded column list.
/// [`ColumnPolicy::Strict`] turns them into [`Error::UnknownColumnType`]
/// instead, for callers that prefer a hard failure over losing data.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Drop columns with an unknown type from the decoded table
    #[default]
    Permissive,
    /// Fail the decode when a column declares an unknown type
    Strict,
}

/// Options controlling how a table is decoded.
#[derive(Debug, Copy, Clone, Default)]
pub struct IesReadOptions {
    /// See [`ColumnPolicy`]
    pub column_policy: ColumnPolicy,
}

/// IES table reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn print_table(reader: impl Read + Seek) -> tos_ies::error::Result<()> {
///     let table = tos_ies::IesTable::new(reader)?;
///
///     for row in table.rows() {
///         println!("{row:?}");
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IesTable {
    name: String,
    columns: Vec<ColumnDef>,
    rows: Vec<Vec<Value>>,
}

impl IesTable {
    /// Read an IES file and decode its columns and rows.
    pub fn new<R: Read + Seek>(reader: R) -> Result<IesTable> {
        Self::with_options(reader, IesReadOptions::default())
    }

    /// Read an IES file with explicit [`IesReadOptions`].
    pub fn with_options<R: Read + Seek>(mut reader: R, options: IesReadOptions) -> Result<IesTable> {
        let end = reader.seek(SeekFrom::End(0))?;
        if end < HEADER_LENGTH {
            return Err(Error::InvalidTable);
        }
        reader.seek(SeekFrom::Start(0))?;

        let mut name_raw = [0u8; 128];
        reader.read_exact(&mut name_raw)?;
        let name = table_name(&name_raw);

        let _unknown = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()? as u64;
        let resource_offset = reader.read_u32::<LittleEndian>()? as u64;
        let _file_size = reader.read_u32::<LittleEndian>()?;

        let _unknown = reader.read_u16::<LittleEndian>()?;
        let row_count = reader.read_u16::<LittleEndian>()?;
        let column_count = reader.read_u16::<LittleEndian>()?;
        let _number_column_count = reader.read_u16::<LittleEndian>()?;
        let text_column_count = reader.read_u16::<LittleEndian>()?;
        let _unknown = reader.read_u16::<LittleEndian>()?;

        // Both blocks are addressed backwards from end-of-file.
        if resource_offset + data_offset > end {
            return Err(Error::InvalidTable);
        }

        debug!(
            table = %name,
            rows = row_count,
            columns = column_count,
            "parsed table headers"
        );

        reader.seek(SeekFrom::End(-((resource_offset + data_offset) as i64)))?;
        let columns = Self::get_columns(&mut reader, column_count, options.column_policy)?;

        reader.seek(SeekFrom::End(-(resource_offset as i64)))?;
        let rows = Self::get_rows(&mut reader, row_count, &columns, text_column_count)?;

        Ok(IesTable {
            name,
            columns,
            rows,
        })
    }

    /// Name of the table, taken from the 128 byte field at the start of the file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded columns: number columns first, then text columns, each group
    /// sorted by its declared position
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Decoded rows, each aligned 1:1 with [`IesTable::columns`]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this table contains no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn get_columns<R: Read + Seek>(
        reader: &mut R,
        count: u16,
        policy: ColumnPolicy,
    ) -> Result<Vec<ColumnDef>> {
        let mut numbers = Vec::new();
        let mut texts = Vec::new();

        for _ in 0..count {
            let mut label = [0u8; 64];
            reader.read_exact(&mut label)?;
            let name = obfuscation::decode(&label);
            reader.read_exact(&mut label)?;
            let name2 = obfuscation::decode(&label);

            let kind = reader.read_u16::<LittleEndian>()?;
            let unknown = reader.read_u32::<LittleEndian>()?;
            let position = reader.read_u16::<LittleEndian>()?;

            match kind {
                0 => numbers.push(ColumnDef {
                    name,
                    name2,
                    kind: ColumnType::Number,
                    position,
                    unknown,
                }),
                1 | 2 => texts.push(ColumnDef {
                    name,
                    name2,
                    kind: if kind == 1 {
                        ColumnType::Text
                    } else {
                        ColumnType::TextAlt
                    },
                    position,
                    unknown,
                }),
                other => match policy {
                    ColumnPolicy::Strict => {
                        return Err(Error::UnknownColumnType {
                            column: name,
                            kind: other,
                        })
                    }
                    ColumnPolicy::Permissive => {
                        debug!(column = %name, kind = other, "dropping column with unknown type");
                    }
                },
            }
        }

        // Row values are stored number columns first, then text columns, each
        // group ordered by declared position rather than on-disk order.
        numbers.sort_by_key(|c| c.position);
        texts.sort_by_key(|c| c.position);

        let mut columns = numbers;
        columns.extend(texts);
        Ok(columns)
    }

    fn get_rows<R: Read + Seek>(
        reader: &mut R,
        count: u16,
        columns: &[ColumnDef],
        text_column_count: u16,
    ) -> Result<Vec<Vec<Value>>> {
        let mut rows = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let _id = reader.read_u32::<LittleEndian>()?;
            let reserved = reader.read_u16::<LittleEndian>()?;
            reader.seek(SeekFrom::Current(reserved as i64))?;

            let mut row = Vec::with_capacity(columns.len());
            for column in columns {
                if column.kind.is_text() {
                    let length = reader.read_u16::<LittleEndian>()? as usize;
                    if length == 0 {
                        row.push(Value::Text(String::new()));
                    } else {
                        let mut buffer = vec![0u8; length];
                        reader.read_exact(&mut buffer)?;
                        row.push(Value::Text(obfuscation::decode(&buffer)));
                    }
                } else {
                    let raw = reader.read_f32::<LittleEndian>()?;
                    row.push(Value::from(raw));
                }
            }

            // Every row carries one trailing pad byte per text column declared
            // in the header, even when descriptors were dropped above.
            reader.seek(SeekFrom::Current(text_column_count as i64))?;
            rows.push(row);
        }

        Ok(rows)
    }
}

fn table_name(raw: &[u8]) -> String {
    let trimmed = match raw.iter().rposition(|&b| b != 0) {
        Some(last) => &raw[..=last],
        None => &[],
    };
    String::from_utf8_lossy(trimmed).into_owned()
}
