//! Forward-only reader of big-endian primitives.

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    string::FromUtf8Error,
};

use thiserror::Error;

use super::scalar;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer bytes were available than a field requires, or the underlying
    /// reader failed.
    #[error("Ran out of data reading {wanted} bytes at offset {offset}: {source}.")]
    Truncated {
        offset: u64,
        wanted: u64,
        #[source]
        source: io::Error,
    },
    /// A metadata entry carried a negative type tag with no known meaning.
    #[error("Unknown metadata entry tag ({tag}) at offset {offset}.")]
    UnknownEntryTag { offset: u64, tag: i32 },
    /// A string payload was not valid UTF-8.
    #[error("Invalid UTF-8 string at offset {offset}.")]
    Encoding {
        offset: u64,
        #[source]
        source: FromUtf8Error,
    },
    /// A raw data block declared a negative length.
    #[error("Negative data length ({length}) at offset {offset}.")]
    NegativeLength { offset: u64, length: i32 },
}

/// A sequential reader over the bytes of one file.
///
/// The reader never seeks backward. Any failed read leaves it at an
/// unspecified position, and decoding of the file should stop.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    offset: u64,
    source: Option<PathBuf>,
}

impl<R: Read> Reader<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            source: None,
        }
    }

    /// Wrap a byte source, labelling it with the path it was opened from.
    pub fn with_source(inner: R, source: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            offset: 0,
            source: Some(source.into()),
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The path this reader was labelled with, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Take an exact number of bytes, advancing the offset.
    pub(crate) fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|source| self.truncated(N as u64, source))?;

        self.offset += N as u64;

        Ok(buf)
    }

    /// Read exactly `n` bytes.
    pub fn read_raw(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let wanted = n as u64;

        // Let the source bound the allocation rather than the declared length.
        let mut buf = Vec::new();
        let result = (&mut self.inner).take(wanted).read_to_end(&mut buf);
        let read = result.map_err(|source| self.truncated(wanted, source))?;

        if read as u64 != wanted {
            Err(self.truncated(wanted, io::ErrorKind::UnexpectedEof.into()))?;
        }

        self.offset += wanted;

        Ok(buf)
    }

    /// Advance past `n` bytes without keeping them.
    pub fn skip(&mut self, n: u64) -> Result<(), Error> {
        let result = io::copy(&mut (&mut self.inner).take(n), &mut io::sink());
        let skipped = result.map_err(|source| self.truncated(n, source))?;

        if skipped != n {
            Err(self.truncated(n, io::ErrorKind::UnexpectedEof.into()))?;
        }

        self.offset += n;

        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_be_bytes(self.take()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(i64::from_be_bytes(self.take()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_be_bytes(self.take()?))
    }

    /// Read one byte; any non-zero value is true.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        let [b] = self.take()?;
        Ok(b != 0)
    }

    /// Read a string preceded by its `int32` byte length.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let length = self.read_i32()?;
        self.read_string_of(length)
    }

    /// Read a UTF-8 string of `length` bytes. A length of zero or less reads
    /// nothing and yields an empty string.
    pub fn read_string_of(&mut self, length: i32) -> Result<String, Error> {
        if length <= 0 {
            return Ok(String::new());
        }

        let offset = self.offset;
        let bytes = self.read_raw(length as usize)?;

        String::from_utf8(bytes).map_err(|source| Error::Encoding { offset, source })
    }

    /// Read a coordinate in degrees.
    pub fn read_coordinate(&mut self) -> Result<f64, Error> {
        self.read_i32().map(scalar::coordinate)
    }

    /// Read an elevation in meters.
    pub fn read_elevation(&mut self) -> Result<f64, Error> {
        self.read_i32().map(scalar::elevation)
    }

    /// Read a timestamp in epoch seconds, if one was recorded.
    pub fn read_timestamp(&mut self) -> Result<Option<i64>, Error> {
        self.read_i64().map(scalar::timestamp)
    }

    fn truncated(&self, wanted: u64, source: io::Error) -> Error {
        Error::Truncated {
            offset: self.offset,
            wanted,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_primitives() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&(-2i32).to_be_bytes());
        bytes.extend_from_slice(&0x0102_0304_0506_0708i64.to_be_bytes());
        bytes.extend_from_slice(&1.5f64.to_be_bytes());
        bytes.extend_from_slice(&[0, 7]);

        let mut r = Reader::new(&bytes[..]);
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_i64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(r.read_f64().unwrap(), 1.5);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert_eq!(r.offset(), 22);
    }

    #[test]
    fn short_primitive_is_truncated() {
        let mut r = Reader::new(&[0u8, 1, 2][..]);
        let err = r.read_i32().unwrap_err();
        assert!(matches!(err, Error::Truncated { offset: 0, wanted: 4, .. }));
    }

    #[test]
    fn raw_block() {
        let mut r = Reader::new(&[9u8, 8, 7, 6][..]);
        assert_eq!(r.read_raw(3).unwrap(), vec![9, 8, 7]);
        assert_eq!(r.read_raw(0).unwrap(), Vec::<u8>::new());
        assert!(matches!(
            r.read_raw(2),
            Err(Error::Truncated { offset: 3, wanted: 2, .. })
        ));
    }

    #[test]
    fn huge_raw_length_does_not_allocate_up_front() {
        let mut r = Reader::new(&[1u8, 2][..]);
        assert!(matches!(
            r.read_raw(usize::MAX >> 1),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn prefixed_string() {
        let mut bytes = 6i32.to_be_bytes().to_vec();
        bytes.extend_from_slice("Gipfel".as_bytes());

        let mut r = Reader::new(&bytes[..]);
        assert_eq!(r.read_string().unwrap(), "Gipfel");
        assert_eq!(r.offset(), 10);
    }

    #[test]
    fn empty_string_ignores_trailing_bytes() {
        let mut r = Reader::new(&b"abc"[..]);
        assert_eq!(r.read_string_of(0).unwrap(), "");
        assert_eq!(r.read_string_of(-5).unwrap(), "");
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn invalid_utf8_string() {
        let mut r = Reader::new(&[0xC3u8, 0x28][..]);
        let err = r.read_string_of(2).unwrap_err();
        assert!(matches!(err, Error::Encoding { offset: 0, .. }));
    }

    #[test]
    fn skip_advances_without_reading() {
        let mut r = Reader::new(&[0u8, 0, 0, 0, 0, 0, 0, 42][..]);
        r.skip(4).unwrap();
        assert_eq!(r.read_i32().unwrap(), 42);
        assert!(matches!(r.skip(1), Err(Error::Truncated { offset: 8, .. })));
    }

    #[test]
    fn domain_scalars() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&101_234_567i32.to_be_bytes());
        bytes.extend_from_slice(&(-999_999_999i32).to_be_bytes());
        bytes.extend_from_slice(&0i64.to_be_bytes());

        let mut r = Reader::new(&bytes[..]);
        assert!((r.read_coordinate().unwrap() - 10.1234567).abs() < 1e-12);
        assert_eq!(r.read_elevation().unwrap(), 0.0);
        assert_eq!(r.read_timestamp().unwrap(), None);
    }

    #[test]
    fn source_label() {
        let r = Reader::with_source(&b""[..], "/data/psyberia.alpinequest.full/a.wpt");
        assert_eq!(
            r.source(),
            Some(Path::new("/data/psyberia.alpinequest.full/a.wpt"))
        );
        assert_eq!(Reader::new(&b""[..]).source(), None);
    }
}
