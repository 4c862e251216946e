//! Bounds-checked head/tail decoding.

pub mod context;

use crate::{
    error::{Error, Location, ResultExt as _},
    primitive::{Primitive, Word, WORD_LEN},
};

/// Represents a decodable type.
pub trait Decode: Sized {
    /// Returns `true` if the type is dynamic, meaning it is referenced by an
    /// offset in its container's head instead of being stored inline.
    fn is_dynamic() -> bool;

    /// Reads the type's data from the specified decoder.
    fn decode(decoder: &mut Decoder) -> Result<Self, Error>;
}

/// Decodes a value from a complete, word-aligned buffer.
pub fn decode<T>(bytes: &[u8]) -> Result<T, Error>
where
    T: Decode,
{
    let mut decoder = Decoder::aligned(bytes)?;

    // Make sure to call `decode` on the type instead of `read`. This is
    // because the top level value never gets redirected even if it is a
    // dynamic type.
    T::decode(&mut decoder)
}

/// A head/tail decoder.
///
/// Each decoder covers one container: its head starts at the decoder's
/// first byte and offsets read from the head are resolved against the
/// container's tail start.
#[derive(Debug)]
pub struct Decoder<'a> {
    buffer: &'a [u8],
    position: usize,
    tail_offset: usize,
    last_offset: Option<usize>,
    base: usize,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder around the specified buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::anchored(buffer, 0)
    }

    /// Create a new decoder, rejecting buffers that are not a whole number
    /// of words.
    pub fn aligned(buffer: &'a [u8]) -> Result<Self, Error> {
        if buffer.len() % WORD_LEN != 0 {
            return Err(Error::invalid(format!(
                "buffer length {} is not a multiple of {WORD_LEN}",
                buffer.len()
            )));
        }
        Ok(Self::new(buffer))
    }

    fn anchored(buffer: &'a [u8], base: usize) -> Self {
        Self {
            buffer,
            position: 0,
            tail_offset: 0,
            last_offset: None,
            base,
        }
    }

    /// Returns the current read position, relative to the start of this
    /// decoder's buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Moves the read position to the specified offset.
    ///
    /// Seeking past the end of the buffer is allowed; the next read fails.
    pub fn seek(&mut self, offset: usize) {
        self.position = offset;
    }

    /// Reads a word from the decoder.
    pub fn read_word(&mut self) -> Result<Word, Error> {
        let mut word = Word::default();
        word.copy_from_slice(self.read_bytes(WORD_LEN)?);
        Ok(word)
    }

    /// Reads a slice of bytes from the decoder.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let buffer = self.buffer;
        let bytes = buffer
            .get(self.position..)
            .and_then(|rest| rest.get(..len))
            .ok_or_else(|| self.truncated(len))?;
        self.position += len;
        Ok(bytes)
    }

    /// Reads a byte string of the specified length, skipping over the zero
    /// padding up to the next word boundary.
    pub fn read_padded(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let padded_len = len
            .checked_next_multiple_of(WORD_LEN)
            .ok_or_else(|| self.truncated(len))?;
        let padded = self.read_bytes(padded_len)?;
        Ok(&padded[..len])
    }

    /// Reads an offset word.
    pub fn read_size(&mut self) -> Result<usize, Error> {
        let position = self.base + self.position;
        usize::from_word(self.read_word()?).map_err(|_| {
            Error::invalid(format!(
                "size at offset {position} does not fit in a native integer"
            ))
        })
    }

    /// Reads a length word.
    ///
    /// A length that does not fit in a `usize` can never be satisfied by the
    /// buffer, so it is reported as truncated input.
    pub fn read_len(&mut self) -> Result<usize, Error> {
        let position = self.position;
        let word = self.read_word()?;
        usize::from_word(word).map_err(|_| Error::TruncatedInput {
            offset: self.base + position,
            needed: usize::MAX,
            available: self.buffer.len().saturating_sub(position),
        })
    }

    /// Returns a decoder for a container whose head starts at the current
    /// position and spans `head_words` words.
    ///
    /// The current decoder is advanced past the whole remaining buffer, as
    /// the container owns it from here on.
    pub fn untail(&mut self, head_words: usize) -> Result<Self, Error> {
        let head_len = head_words
            .checked_mul(WORD_LEN)
            .ok_or_else(|| Error::invalid(format!("head of {head_words} words is too large")))?;
        if head_len > self.remaining() {
            return Err(self.truncated(head_len));
        }

        let buffer = self.buffer;
        let start = self.position;
        self.position = buffer.len();
        Ok(Self {
            tail_offset: head_len,
            ..Self::anchored(&buffer[start..], self.base + start)
        })
    }

    /// Reads an offset from the head and returns a decoder anchored at the
    /// tail location it points to.
    ///
    /// Offsets must be strictly increasing within a container and must point
    /// at a whole word inside the buffer.
    ///
    /// This method is used for getting a sub-`Decoder` for reading the contents
    /// of a dynamic type.
    pub fn slice(&mut self) -> Result<Self, Error> {
        self.redirect(|decoder, offset| {
            Error::invalid(format!(
                "offset {offset} points outside of the {} byte container",
                decoder.buffer.len()
            ))
        })
    }

    /// Same as [`Decoder::slice`], except that offsets pointing past the end
    /// of the buffer are reported as truncated input.
    pub fn slice_truncated(&mut self) -> Result<Self, Error> {
        self.redirect(|decoder, offset| {
            let start = decoder.tail_offset.saturating_add(offset);
            Error::TruncatedInput {
                offset: decoder.base.saturating_add(start),
                needed: WORD_LEN,
                available: decoder.buffer.len().saturating_sub(start),
            }
        })
    }

    fn redirect(&mut self, outside: impl FnOnce(&Self, usize) -> Error) -> Result<Self, Error> {
        let offset = self.read_size()?;
        if let Some(last) = self.last_offset {
            if offset <= last {
                return Err(Error::invalid(format!(
                    "offset {offset} does not follow previous offset {last}"
                )));
            }
        }
        self.last_offset = Some(offset);

        let start = self
            .tail_offset
            .checked_add(offset)
            .filter(|start| start.saturating_add(WORD_LEN) <= self.buffer.len())
            .ok_or_else(|| outside(self, offset))?;

        let buffer = self.buffer;
        Ok(Self::anchored(&buffer[start..], self.base + start))
    }

    /// Reads a value from the decoder.
    ///
    /// This method takes care to either decode the value directly for static
    /// types or follow an offset into the "tail" for dynamic types.
    pub fn read<T>(&mut self) -> Result<T, Error>
    where
        T: Decode,
    {
        if T::is_dynamic() {
            T::decode(&mut self.slice()?)
        } else {
            T::decode(self)
        }
    }

    fn truncated(&self, needed: usize) -> Error {
        Error::TruncatedInput {
            offset: self.base + self.position,
            needed,
            available: self.buffer.len().saturating_sub(self.position),
        }
    }
}

impl<T> Decode for T
where
    T: Primitive,
{
    fn is_dynamic() -> bool {
        false
    }

    fn decode(decoder: &mut Decoder) -> Result<Self, Error> {
        T::from_word(decoder.read_word()?)
    }
}

/// Decodes a length-prefixed sequence of values.
impl<T> Decode for Vec<T>
where
    T: Decode,
{
    fn is_dynamic() -> bool {
        true
    }

    fn decode(decoder: &mut Decoder) -> Result<Self, Error> {
        let len = decoder.read_len().at(|| Location::Length)?;
        let mut members = decoder.untail(len)?;
        (0..len)
            .map(|index| members.read().at(|| Location::Element(index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use hex_literal::hex;

    #[test]
    fn reads_words_in_order() {
        let buffer = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001
             0000000000000000000000000000000000000000000000000000000000000002"
        );
        let mut decoder = Decoder::new(&buffer);
        assert_eq!(decoder.read::<u64>().unwrap(), 1);
        assert_eq!(decoder.read::<u8>().unwrap(), 2);
        assert_eq!(decoder.remaining(), 0);
        assert_eq!(
            decoder.read_word().unwrap_err().kind(),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn decodes_static_sequences() {
        let values = decode::<Vec<u16>>(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000002
             0000000000000000000000000000000000000000000000000000000000000102
             0000000000000000000000000000000000000000000000000000000000000304"
        ))
        .unwrap();
        assert_eq!(values, [0x102, 0x304]);
    }

    #[test]
    fn rejects_unaligned_buffers() {
        assert_eq!(
            decode::<u64>(&[0; 31]).unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );
    }

    #[test]
    fn rejects_oversized_sizes() {
        let buffer = [0xff; 32];
        let mut decoder = Decoder::new(&buffer);
        assert_eq!(
            decoder.read_size().unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );
    }

    #[test]
    fn oversized_lengths_are_truncated() {
        let buffer = hex!(
            "0000000000000000000000000000000000000000000000010000000000000000
             0000000000000000000000000000000000000000000000000000000000000000"
        );
        let mut decoder = Decoder::new(&buffer);
        assert_eq!(
            decoder.read_len().unwrap_err().kind(),
            ErrorKind::TruncatedInput
        );
        assert_eq!(
            decode::<Vec<u8>>(&buffer).unwrap_err().kind(),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn rejects_offsets_outside_of_buffer() {
        let buffer = hex!("0000000000000000000000000000000000000000000000000000000000000020");
        let mut container = Decoder::new(&buffer).untail(1).unwrap();
        assert_eq!(
            container.slice().unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );

        let mut container = Decoder::new(&buffer).untail(1).unwrap();
        assert_eq!(
            container.slice_truncated().unwrap_err().kind(),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn rejects_non_increasing_offsets() {
        let buffer = hex!(
            "0000000000000000000000000000000000000000000000000000000000000000
             0000000000000000000000000000000000000000000000000000000000000000
             0000000000000000000000000000000000000000000000000000000000000000"
        );
        let mut container = Decoder::new(&buffer).untail(2).unwrap();
        assert!(container.slice().is_ok());
        assert_eq!(
            container.slice().unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );
    }
}
