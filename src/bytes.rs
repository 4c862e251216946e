//! Dynamic byte string codec.
//!
//! A byte string is encoded as a length word followed by its content,
//! zero-padded on the right to a word boundary.

use crate::{
    decode::{Decode, Decoder},
    encode::{self, Encode, Encoder},
    error::{Error, Location, ResultExt as _},
    fmt::Hex,
    layout::Size,
    verify,
};
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
};

/// A wrapper type for dynamic bytes.
///
/// Plain byte slices and vectors are sequences of `uint8` as far as the
/// encoding is concerned; wrapping them selects the dynamic `bytes` layout.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Bytes<T>(pub T);

impl<T> Bytes<T>
where
    T: AsRef<[u8]>,
{
    /// Returns the underlying slice of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T> AsRef<[u8]> for Bytes<T>
where
    T: AsRef<[u8]>,
{
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T> Debug for Bytes<T>
where
    T: AsRef<[u8]>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Bytes").field(&Hex(self.as_bytes())).finish()
    }
}

impl<T> Deref for Bytes<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Encode for Bytes<&'_ [u8]> {
    fn size(&self) -> Size {
        Size::bytes(self.len())
    }

    fn encode(&self, encoder: &mut Encoder) {
        encoder.write(&self.len());
        encoder.write_bytes(self.0);
    }
}

impl Encode for Bytes<Vec<u8>> {
    fn size(&self) -> Size {
        Bytes(&self[..]).size()
    }

    fn encode(&self, encoder: &mut Encoder) {
        Bytes(&self[..]).encode(encoder)
    }
}

impl Decode for Bytes<Vec<u8>> {
    fn is_dynamic() -> bool {
        true
    }

    fn decode(decoder: &mut Decoder) -> Result<Self, Error> {
        let len = decoder.read_len().at(|| Location::Length)?;
        Ok(Self(decoder.read_padded(len)?.to_owned()))
    }
}

/// Encodes a dynamic byte string, verifying that it decodes back to the
/// same bytes.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>, Error> {
    verify::encode_and_verify(
        "bytes",
        data,
        |data| Ok(encode::encode(&Bytes(data))),
        |encoded| {
            let (decoded, end) = decode_bytes(encoded, 0)?;
            if end != encoded.len() {
                return Err(Error::invalid(format!(
                    "{} trailing bytes after byte string",
                    encoded.len() - end
                )));
            }
            Ok(decoded)
        },
        |data, decoded| verify::bytes_eq(data, decoded),
    )
}

/// Decodes a dynamic byte string whose length word starts at `offset`.
///
/// Returns the content along with the offset just past its padding, where
/// the next value would start.
pub fn decode_bytes(buffer: &[u8], offset: usize) -> Result<(Vec<u8>, usize), Error> {
    let mut decoder = Decoder::new(buffer);
    decoder.seek(offset);
    let Bytes(data) = Bytes::<Vec<u8>>::decode(&mut decoder)?;
    Ok((data, decoder.position()))
}
