//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use types::{FixedSize, Scalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
pub(crate) struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this? It is handled for you when loading
    /// data from disk, but may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..offset + T::RAW_BYTE_LEN)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub(crate) fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance<T: Scalar>(&mut self) {
        self.pos += T::RAW_BYTE_LEN
    }

    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos += T::RAW_BYTE_LEN;
        temp
    }

    /// Read `len` consecutive values into an owned buffer.
    pub(crate) fn read_vec<T: Scalar>(&mut self, len: usize) -> Result<Vec<T>, ReadError> {
        let len_bytes = len * T::RAW_BYTE_LEN;
        self.data.check_in_bounds(self.pos + len_bytes)?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.data.read_at(self.pos)?);
            self.pos += T::RAW_BYTE_LEN;
        }
        Ok(out)
    }

    // used when handling fields with an implicit length, which must be at the
    // end of a table.
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The remainder of the data, from the current position to the end.
    pub(crate) fn remaining_data(&self) -> Option<FontData<'a>> {
        self.data.split_off(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_at_bounds() {
        let data = FontData::new(&[0, 1, 2, 3]);
        assert_eq!(data.read_at::<u16>(0), Ok(1));
        assert_eq!(data.read_at::<u16>(2), Ok(0x0203));
        assert_eq!(data.read_at::<u16>(3), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn cursor_walks_in_order() {
        let data = FontData::new(&[0, 5, 0xff, 0xfe, 9]);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<u16>(), Ok(5));
        assert_eq!(cursor.read::<i16>(), Ok(-2));
        assert_eq!(cursor.remaining_bytes(), 1);
        assert_eq!(cursor.read::<u8>(), Ok(9));
        assert!(cursor.read::<u8>().is_err());
    }

    #[test]
    fn read_vec_past_end_is_an_error() {
        let data = FontData::new(&[0, 1, 0, 2, 0]);
        let mut cursor = data.cursor();
        assert!(cursor.read_vec::<u16>(3).is_err());
        // a failed read does not advance
        assert_eq!(cursor.read_vec::<u16>(2), Ok(vec![1, 2]));
    }
}
