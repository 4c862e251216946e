//! Codec for slices of dynamic byte strings (`bytes[]`).
//!
//! The elements are laid out as a container: a head with one offset word
//! per element, followed by a tail with each element's byte string
//! encoding in order. Offsets are relative to the start of the tail. At the
//! top level the container is preceded by a word holding the element count.

use crate::{
    bytes::Bytes,
    decode::{self, Decoder},
    encode::{self, Encode, Encoder},
    error::{Error, Location, ResultExt as _},
    layout::Size,
    verify,
};

/// A top-level, count-prefixed slice of byte strings.
#[derive(Clone, Copy, Debug)]
pub struct Slice<'a, T>(pub &'a [T]);

/// The elements of a slice of byte strings without the leading count, as
/// they appear when nested inside another container.
#[derive(Clone, Copy, Debug)]
pub struct SliceBody<'a, T>(pub &'a [T]);

impl<T> Encode for SliceBody<'_, T>
where
    T: AsRef<[u8]>,
{
    fn size(&self) -> Size {
        Size::tuple(self.0.iter().map(|element| Size::bytes(element.as_ref().len())))
    }

    fn encode(&self, encoder: &mut Encoder) {
        for element in self.0 {
            encoder.write(&Bytes(element.as_ref()));
        }
    }
}

impl<T> Encode for Slice<'_, T>
where
    T: AsRef<[u8]>,
{
    fn size(&self) -> Size {
        Size::sequence(self.0.iter().map(|element| Size::bytes(element.as_ref().len())))
    }

    fn encode(&self, encoder: &mut Encoder) {
        encoder.write(&self.0.len());
        let body = SliceBody(self.0);
        body.encode(&mut encoder.untail(body.size()));
    }
}

/// Encodes a top-level slice of byte strings, verifying that it decodes back
/// to the same elements.
pub fn encode_slice<T>(elements: &[T]) -> Result<Vec<u8>, Error>
where
    T: AsRef<[u8]>,
{
    verify::encode_and_verify(
        "bytes[]",
        elements,
        |elements| Ok(encode::encode(&Slice(elements))),
        decode_slice,
        |elements, decoded| verify::slices_eq(elements, decoded),
    )
}

/// Decodes a top-level, count-prefixed slice of byte strings.
pub fn decode_slice(buffer: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
    let elements = decode::decode::<Vec<Bytes<Vec<u8>>>>(buffer)?;
    Ok(elements.into_iter().map(|Bytes(element)| element).collect())
}

/// Encodes the elements of a slice of byte strings without a leading count,
/// verifying that they decode back to the same elements.
pub fn encode_slice_body<T>(elements: &[T]) -> Result<Vec<u8>, Error>
where
    T: AsRef<[u8]>,
{
    verify::encode_and_verify(
        "bytes[] body",
        elements,
        |elements| Ok(encode::encode(&SliceBody(elements))),
        |encoded| decode_slice_body(encoded, elements.len()),
        |elements, decoded| verify::slices_eq(elements, decoded),
    )
}

/// Decodes `len` byte strings laid out without a leading count.
pub fn decode_slice_body(buffer: &[u8], len: usize) -> Result<Vec<Vec<u8>>, Error> {
    let mut elements = Decoder::aligned(buffer)?.untail(len)?;
    (0..len)
        .map(|index| {
            elements
                .read::<Bytes<Vec<u8>>>()
                .map(|Bytes(element)| element)
                .at(|| Location::Element(index))
        })
        .collect()
}
