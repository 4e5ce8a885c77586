//! Types for reading IPF archives
//!

use binrw::BinRead;
use indexmap::IndexMap;
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    fs,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::{debug, warn};

use crate::{
    compression::{CompressionMethod, IpfBlockReader},
    error::{EntryNotFoundError, Error, Result},
    types::{IpfEntryRecord, IpfFooter, SUPPORTED_FORMAT},
};

const FOOTER_LENGTH: u64 = 24;

/// A struct for reading an entry from an IPF file
pub struct IpfFile<'a, W: Read + Seek> {
    data: Cow<'a, IpfFileData>,
    reader: IpfBlockReader<'a, W>,
}

impl<'a, W: Read + Seek> Debug for IpfFile<'a, W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IpfFile({:#?})", self.get_metadata())
    }
}

/// Methods for retrieving information on IPF file entries
impl<'a, W: Read + Seek> IpfFile<'a, W> {
    /// Get the name of the file
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// It may contain an absolute path (`/etc/shadow`), or break out of the
    /// current directory (`../runtime`). Carelessly writing to these paths
    /// allows an attacker to craft an IPF archive that will overwrite critical
    /// files.
    ///
    pub fn name(&self) -> &str {
        &self.get_metadata().file_name
    }

    /// Get the name of the file, in the raw (internal) byte representation.
    ///
    /// The encoding of this data is currently undefined.
    pub fn name_raw(&self) -> &[u8] {
        &self.get_metadata().file_name_raw
    }

    /// Get the archive group label this entry was packaged under
    pub fn archive_name(&self) -> &str {
        &self.get_metadata().archive_name
    }

    /// Get the size of the file, in bytes, in the archive
    pub fn compressed_size(&self) -> u64 {
        self.get_metadata().compressed_size
    }

    /// Get the size of the file, in bytes, when uncompressed
    pub fn size(&self) -> u64 {
        self.get_metadata().uncompressed_size
    }

    /// Get the stored CRC32 hash of the original file; it is never validated
    pub fn crc32(&self) -> u32 {
        self.get_metadata().crc32
    }

    /// Get the starting offset of the data of the file
    pub fn data_start(&self) -> u64 {
        self.get_metadata().data_start
    }

    /// Get the compression method used for this file
    pub fn compression_method(&self) -> CompressionMethod {
        self.get_metadata().compression_method
    }

    fn get_metadata(&self) -> &IpfFileData {
        self.data.as_ref()
    }
}

impl<W: Read + Seek> Read for IpfFile<'_, W> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

/// Structure representing an IPF file entry.
#[derive(Debug, Clone, Default)]
pub struct IpfFileData {
    /// Stored CRC32 checksum, carried but not validated
    pub crc32: u32,
    /// Method of compressing the file in the ipf
    pub compression_method: CompressionMethod,
    /// Size of the file in the ipf
    pub compressed_size: u64,
    /// Size of the file when extracted
    pub uncompressed_size: u64,
    /// Name of the file
    pub file_name: Box<str>,
    /// Raw file name. To be used when file_name was incorrectly decoded.
    pub file_name_raw: Box<[u8]>,
    /// The archive group label stored alongside the file name
    pub archive_name: Box<str>,
    /// Specifies where the data of the file starts
    pub data_start: u64,
}

#[derive(Debug)]
pub(crate) struct Shared {
    footer: IpfFooter,
    // keyed by the lowercased file name; IPF lookups are case-insensitive
    files: IndexMap<Box<str>, IpfFileData>,
}

/// IPF archive reader
///
/// Entry names are case-insensitive: two entries whose names differ only in
/// case describe the same file, and such an archive is rejected with
/// [`Error::DuplicateEntry`] rather than silently keeping one of the two.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_ipf_contents(reader: impl Read + Seek) -> tos_ipf::error::Result<()> {
///     let mut ipf = tos_ipf::IpfArchive::new(reader)?;
///
///     for i in 0..ipf.len() {
///         let mut file = ipf.by_index(i)?;
///         println!("Filename: {}", file.name());
///         std::io::copy(&mut file, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct IpfArchive<R> {
    reader: R,
    shared: Arc<Shared>,
}

impl<R> IpfArchive<R> {
    /// Total size of the files in the archive, if it can be known. Doesn't
    /// include metadata.
    pub fn decompressed_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in self.shared.files.values() {
            total = total.checked_add(file.uncompressed_size as u128)?;
        }
        Some(total)
    }
}

impl<R: Read + Seek> IpfArchive<R> {
    /// Read an IPF archive collecting the entries it contains.
    pub fn new(mut reader: R) -> Result<IpfArchive<R>> {
        let shared = Self::get_metadata(&mut reader)?;
        Ok(IpfArchive {
            reader,
            shared: shared.into(),
        })
    }

    /// Number of entries contained in this IPF.
    pub fn len(&self) -> usize {
        self.shared.files.len()
    }

    /// Whether this IPF archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the file names in this archive, in file
    /// table order and original case.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.shared.files.values().map(|f| f.file_name.as_ref())
    }

    /// Returns an iterator over the metadata of every entry, in file table
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = &IpfFileData> {
        self.shared.files.values()
    }

    /// Returns the offset of the file table from the start of the file.
    pub fn filetable_offset(&self) -> u32 {
        self.shared.footer.filetable_offset
    }

    /// Returns the offset of the footer from the start of the file.
    pub fn filefooter_offset(&self) -> u32 {
        self.shared.footer.filefooter_offset
    }

    /// Returns the format signature found in the footer.
    pub fn format(&self) -> [u8; 4] {
        self.shared.footer.format
    }

    /// Returns the revision this archive patches against.
    pub fn base_revision(&self) -> u32 {
        self.shared.footer.base_revision
    }

    /// Returns the revision of this archive's contents.
    pub fn revision(&self) -> u32 {
        self.shared.footer.revision
    }

    /// Returns the uninterpreted 2 byte footer field.
    pub fn unknown(&self) -> u16 {
        self.shared.footer.unknown
    }

    /// Get the metadata of an entry by name, if it's present. Lookup is
    /// case-insensitive.
    pub fn entry(&self, name: &str) -> Option<&IpfFileData> {
        self.shared.files.get(name.to_lowercase().as_str())
    }

    /// Get the index of an entry by name, if it's present. Lookup is
    /// case-insensitive.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.shared.files.get_index_of(name.to_lowercase().as_str())
    }

    /// Get the name of an entry, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.shared
            .files
            .get_index(index)
            .map(|(_, data)| data.file_name.as_ref())
    }

    /// Search for an entry by name (case-insensitive)
    pub fn by_name(&mut self, name: &str) -> Result<IpfFile<'_, R>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::EntryNotFound(EntryNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Get a contained entry by index
    pub fn by_index(&mut self, file_number: usize) -> Result<IpfFile<'_, R>> {
        let (_, data) = self
            .shared
            .files
            .get_index(file_number)
            .ok_or(Error::EntryNotFound(EntryNotFoundError::Index(file_number)))?;

        Ok(IpfFile {
            data: Cow::Borrowed(data),
            reader: IpfBlockReader::new(
                &mut self.reader,
                data.data_start,
                data.compressed_size,
                data.compression_method,
            )?,
        })
    }

    /// Read an entry's whole payload, decompressing it when stored deflated.
    ///
    /// Fails with [`Error::Decompression`] when a deflated payload is
    /// malformed.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self.by_name(name)?;
        let method = entry.compression_method();

        let mut buffer = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buffer).map_err(|e| match method {
            CompressionMethod::Deflate => Error::Decompression(e),
            CompressionMethod::Stored => Error::IOError(e),
        })?;
        Ok(buffer)
    }

    /// Extract every entry to `output_root/<archive name>/<file name>`.
    ///
    /// Intermediate directories are created as needed and targets that
    /// already exist are left untouched. A failure on one entry is logged and
    /// the remaining entries are still extracted; only errors touching the
    /// archive itself abort the batch.
    pub fn extract_all(&mut self, output_root: &Path) -> Result<()> {
        self.extract_all_with_overwrite(output_root, false)
    }

    /// Like [`IpfArchive::extract_all`], but with `overwrite` set existing
    /// targets are replaced instead of skipped.
    pub fn extract_all_with_overwrite(
        &mut self,
        output_root: &Path,
        overwrite: bool,
    ) -> Result<()> {
        for index in 0..self.len() {
            let mut entry = self.by_index(index)?;
            let target = output_root
                .join(entry.archive_name())
                .join(entry.name());

            if !overwrite && target.is_file() {
                debug!("skipping existing {}", target.display());
                continue;
            }

            if let Err(e) = Self::write_entry(&mut entry, &target) {
                warn!("could not unpack {}: {e}", entry.name());
            }
        }
        Ok(())
    }

    fn write_entry(entry: &mut IpfFile<'_, R>, target: &Path) -> io::Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(target)?;
        io::copy(entry, &mut out)?;
        Ok(())
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_footer(reader: &mut R) -> Result<IpfFooter> {
        let end = reader.seek(SeekFrom::End(0))?;
        if end < FOOTER_LENGTH {
            return Err(Error::InvalidArchive);
        }
        reader.seek(SeekFrom::End(-(FOOTER_LENGTH as i64)))?;
        Ok(IpfFooter::read(reader)?)
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let footer = Self::get_footer(reader)?;
        if footer.format != SUPPORTED_FORMAT {
            return Err(Error::UnsupportedFormat(footer.format));
        }

        debug!(
            entries = footer.file_count,
            filetable_offset = footer.filetable_offset,
            "parsed archive footer"
        );

        reader.seek(SeekFrom::Start(footer.filetable_offset as u64))?;
        let mut files = IndexMap::with_capacity(footer.file_count as usize);
        for _ in 0..footer.file_count {
            let record = IpfEntryRecord::read(reader)?;

            let mut archive_raw = vec![0u8; record.archivename_length as usize];
            reader.read_exact(&mut archive_raw)?;
            let mut name_raw = vec![0u8; record.filename_length as usize];
            reader.read_exact(&mut name_raw)?;

            let file = IpfFileData {
                crc32: record.crc,
                compression_method: CompressionMethod::for_lengths(
                    record.compressed_length as u64,
                    record.uncompressed_length as u64,
                ),
                compressed_size: record.compressed_length as u64,
                uncompressed_size: record.uncompressed_length as u64,
                data_start: record.data_offset as u64,
                file_name: String::from_utf8_lossy(&name_raw).into(),
                archive_name: String::from_utf8_lossy(&archive_raw).into(),
                file_name_raw: name_raw.into(),
            };

            let key = file.file_name.to_lowercase().into_boxed_str();
            if files.contains_key(key.as_ref()) {
                return Err(Error::DuplicateEntry(file.file_name.into_string()));
            }
            files.insert(key, file);
        }

        Ok(Shared { footer, files })
    }
}
