//! Module implementing head/tail encoding.
//!
//! Encoding happens in two passes: first the [`Size`] of the value is
//! computed so the output buffer can be allocated exactly, then the value
//! writes itself into an [`Encoder`] that hands out head slots and tail
//! regions. Offsets written for dynamic members are relative to the start
//! of the enclosing container's tail.

use crate::{
    layout::Size,
    primitive::{pad32, Primitive, Word},
};
use std::mem;

/// Represents an encodable type.
pub trait Encode {
    /// Returns the size information for the type.
    fn size(&self) -> Size;

    /// Writes the type's data to the specified encoder.
    ///
    /// # Notes
    ///
    /// Encoding values that do not match what is returned by [`Encode::size`]
    /// may cause the encoding to panic.
    fn encode(&self, encoder: &mut Encoder);
}

/// Encodes a value into a freshly allocated, word-aligned buffer.
pub fn encode<T>(value: &T) -> Vec<u8>
where
    T: Encode + ?Sized,
{
    let size = value.size();
    let mut buffer = vec![0; size.byte_length()];
    let mut encoder = Encoder::new(&mut buffer, size);

    // The top level value is encoded in place rather than through `write`,
    // so it is never redirected through an offset even if it is dynamic.
    value.encode(&mut encoder);

    buffer
}

/// A head/tail encoder over a pre-sized buffer.
pub struct Encoder<'a> {
    head: &'a mut [u8],
    tail: &'a mut [u8],
    tail_offset: usize,
}

impl<'a> Encoder<'a> {
    /// Create a new encoder with the specified buffer and head/tail word
    /// count.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size does not match the word count.
    fn new(buffer: &'a mut [u8], size: Size) -> Self {
        assert_eq!(
            buffer.len(),
            size.byte_length(),
            "buffer length does not match encoder size"
        );

        let (head, tail) = buffer.split_at_mut(size.tail_byte_offset());
        Self {
            head,
            tail,
            tail_offset: 0,
        }
    }

    /// Writes a word to the encoder's head.
    pub fn write_word(&mut self, word: Word) {
        self.write_bytes(&word);
    }

    /// Writes a slice of bytes to the encoder's head, zero-padded on the
    /// right to a word boundary.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let slot = take(&mut self.head, pad32(bytes.len()));
        slot[..bytes.len()].copy_from_slice(bytes);
    }

    /// Slices a chunk off of the encoder's tail, writing its offset into the
    /// head.
    ///
    /// This method is used for getting a sub-`Encoder` for writing the contents
    /// of a dynamic type.
    pub fn slice(&mut self, size: Size) -> Self {
        let offset = self.tail_offset;
        self.write_word(offset.to_word());

        let len = size.byte_length();
        let slot = take(&mut self.tail, len);
        self.tail_offset += len;

        Self::new(slot, size)
    }

    /// Returns an encoder for the remaining tail without writing an offset.
    ///
    /// This is used by length-prefixed sequences, whose members are laid out
    /// directly after the count word.
    pub fn untail(&mut self, size: Size) -> Self {
        let len = size.byte_length();
        let slot = take(&mut self.tail, len);
        self.tail_offset += len;

        Self::new(slot, size)
    }

    /// Writes a value to the encoder.
    ///
    /// This method takes care to either encode the value directly for static
    /// types or slice off some section of the "tail" for dynamic types.
    pub fn write<T>(&mut self, value: &T)
    where
        T: Encode + ?Sized,
    {
        match value.size() {
            Size::Static(..) => value.encode(self),
            size => value.encode(&mut self.slice(size)),
        }
    }
}

/// Splits an array in-place returning a mutable slice to the chunk that was
/// split of the front.
fn take<'a>(buffer: &mut &'a mut [u8], len: usize) -> &'a mut [u8] {
    let (slot, rest) = mem::take(buffer).split_at_mut(len);
    *buffer = rest;
    slot
}

impl<T> Encode for T
where
    T: Primitive,
{
    fn size(&self) -> Size {
        Size::WORD
    }

    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_word(self.to_word())
    }
}
