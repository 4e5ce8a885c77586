//! Entry payload decompression handling.

use std::io::{self, Read, Seek};

use flate2::read::DeflateDecoder;
use tracing::instrument;

use crate::error::Result;

/// Identifies how an entry's payload is stored inside the IPF file
///
/// IPF carries no per-entry compression flag. An entry whose compressed and
/// uncompressed lengths in the file table are equal is stored verbatim;
/// anything else is a raw deflate stream without a zlib or gzip wrapper. That
/// length comparison is the only discriminator the format provides.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Stores the data as it is
    #[default]
    Stored,

    /// Compress the data using raw deflate
    Deflate,
}

impl CompressionMethod {
    pub(crate) fn for_lengths(compressed: u64, uncompressed: u64) -> Self {
        if compressed == uncompressed {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflate
        }
    }
}

pub(crate) enum IpfBlockReader<'a, W: Read + Seek> {
    Raw(io::Take<&'a mut W>),
    Compressed(Box<DeflateDecoder<io::Take<&'a mut W>>>),
}

impl<'a, W: Read + Seek> IpfBlockReader<'a, W> {
    #[tracing::instrument(skip(reader))]
    pub fn new(
        reader: &'a mut W,
        start: u64,
        limit: u64,
        compression: CompressionMethod,
    ) -> Result<Self> {
        reader.seek(io::SeekFrom::Start(start))?;

        let limit_reader = reader.by_ref().take(limit);
        Ok(match compression {
            CompressionMethod::Stored => IpfBlockReader::Raw(limit_reader),
            CompressionMethod::Deflate => {
                IpfBlockReader::Compressed(Box::new(DeflateDecoder::new(limit_reader)))
            }
        })
    }
}

impl<W: Read + Seek> Read for IpfBlockReader<'_, W> {
    #[instrument(skip(self, buf), err)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            IpfBlockReader::Raw(r) => r.read(buf),
            IpfBlockReader::Compressed(r) => r.read(buf),
        }
    }

    #[instrument(skip(self, buf), err)]
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        match self {
            IpfBlockReader::Raw(r) => r.read_exact(buf),
            IpfBlockReader::Compressed(r) => r.read_exact(buf),
        }
    }

    #[instrument(skip(self, buf), err)]
    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self {
            IpfBlockReader::Raw(r) => r.read_to_end(buf),
            IpfBlockReader::Compressed(r) => r.read_to_end(buf),
        }
    }
}

#[cfg(test)]
mod test {
    use super::CompressionMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_lengths_mean_stored() {
        assert_eq!(
            CompressionMethod::for_lengths(11, 11),
            CompressionMethod::Stored
        );
        assert_eq!(CompressionMethod::for_lengths(0, 0), CompressionMethod::Stored);
    }

    #[test]
    fn differing_lengths_mean_deflate() {
        assert_eq!(
            CompressionMethod::for_lengths(19, 11),
            CompressionMethod::Deflate
        );
        // Shorter uncompressed data still counts; the lengths simply differ.
        assert_eq!(
            CompressionMethod::for_lengths(4, 11),
            CompressionMethod::Deflate
        );
    }
}
