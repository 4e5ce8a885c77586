//! Base types for the structure of an IPF archive.

use binrw::BinRead;

/// The only footer signature this crate reads
pub const SUPPORTED_FORMAT: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// IPF archive footer
///
/// The fixed 24 bytes at the end of the file. All data is stored in little
/// endian format. The signature sits in the middle of the footer rather than
/// at the front, so it is validated after the read rather than as a magic.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[br(little)]
pub struct IpfFooter {
    /// The number of entries described by the file table
    pub file_count: u16,

    /// The offset from the beginning of the file where the file table starts
    pub filetable_offset: u32,

    /// Carried through from disk but not interpreted
    pub unknown: u16,

    /// The offset from the beginning of the file where this footer starts
    pub filefooter_offset: u32,

    /// The format signature, [`SUPPORTED_FORMAT`] for readable archives
    pub format: [u8; 4],

    /// The revision this archive patches against
    pub base_revision: u32,

    /// The revision of this archive's contents
    pub revision: u32,
}

/// Fixed size prefix of one file table record
///
/// The archive name and the file name follow the prefix as raw bytes of
/// [`IpfEntryRecord::archivename_length`] and [`IpfEntryRecord::filename_length`]
/// bytes respectively.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[br(little)]
pub struct IpfEntryRecord {
    /// Length of the file name trailing the record
    pub filename_length: u16,

    /// CRC32 checksum of the entry data; stored but never validated
    pub crc: u32,

    /// Size of the payload as stored in the archive
    pub compressed_length: u32,

    /// Size of the payload once decompressed
    pub uncompressed_length: u32,

    /// Absolute offset of the payload within the archive
    pub data_offset: u32,

    /// Length of the archive name trailing the record
    pub archivename_length: u16,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{IpfEntryRecord, IpfFooter, SUPPORTED_FORMAT};

    #[test]
    fn read_footer() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x02, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x00, 0x00,
            0x3C, 0x00, 0x00, 0x00,
            0x50, 0x4B, 0x05, 0x06,
            0x7B, 0x00, 0x00, 0x00,
            0x7C, 0x00, 0x00, 0x00,
        ]);

        let expected = IpfFooter {
            file_count: 2,
            filetable_offset: 16,
            unknown: 0,
            filefooter_offset: 60,
            format: SUPPORTED_FORMAT,
            base_revision: 123,
            revision: 124,
        };

        assert_eq!(IpfFooter::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_entry_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x09, 0x00,
            0x78, 0x56, 0x34, 0x12,
            0x0B, 0x00, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
            0x24, 0x00, 0x00, 0x00,
            0x04, 0x00,
        ]);

        let expected = IpfEntryRecord {
            filename_length: 9,
            crc: 0x12345678,
            compressed_length: 11,
            uncompressed_length: 11,
            data_offset: 36,
            archivename_length: 4,
        };

        assert_eq!(IpfEntryRecord::read(&mut input)?, expected);

        Ok(())
    }
}
