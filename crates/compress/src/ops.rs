//! Compression Operations

use crate::Compression;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::io::Read;
#[cfg(any(test, feature = "fixtures"))]
use {
    crate::error::{ErrorKind, Result},
    bzip2::{Compression as BzCompression, write::BzEncoder},
    exn::ResultExt,
    flate2::{Compression as GzCompression, write::GzEncoder},
    std::io::Write,
    tracing::instrument,
};

#[cfg(any(test, feature = "fixtures"))]
const BZIP2_LEVEL: BzCompression = BzCompression::new(9);
#[cfg(any(test, feature = "fixtures"))]
const GZIP_LEVEL: GzCompression = GzCompression::new(6);

impl Compression {
    /// Wrap a reader with the appropriate decompression layer.
    ///
    /// Decoding errors surface lazily, from the returned reader's `read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::io::Read;
    /// use wheelhouse_compress::Compression;
    ///
    /// let file = std::fs::File::open("six-1.16.0.tar.gz")?;
    /// let mut tar = Vec::new();
    /// Compression::from_path("six-1.16.0.tar.gz").wrap_reader(file).read_to_end(&mut tar)?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn wrap_reader<'a, R: Read + 'a>(&self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(reader),
            Compression::Bzip2 => Box::new(BzDecoder::new(reader)),
            Compression::Gzip => Box::new(GzDecoder::new(reader)),
        }
    }

    /// Compress a byte slice in memory.
    #[cfg(any(test, feature = "fixtures"))]
    #[instrument(skip(input), fields(format = ?self, input_size = input.len()))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        match self {
            Compression::None => output.extend_from_slice(input),
            Compression::Bzip2 => {
                let mut encoder = BzEncoder::new(&mut output, BZIP2_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?;
            },
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(&mut output, GZIP_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?;
            },
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;
    use std::io::{Cursor, Read};

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    fn test_wrap_reader(#[case] format: Compression) {
        let original = b"Metadata-Version: 2.1\nName: requests\nVersion: 2.31.0\n";
        let compressed = format.compress(original).unwrap();
        let mut reader = format.wrap_reader(Cursor::new(compressed));
        let mut decompressed = Vec::new();
        reader.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[rstest]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    fn test_wrap_reader_surfaces_corruption_on_read(#[case] format: Compression) {
        let mut reader = format.wrap_reader(Cursor::new(b"definitely not compressed".to_vec()));
        let mut sink = Vec::new();
        assert!(reader.read_to_end(&mut sink).is_err());
    }
}
