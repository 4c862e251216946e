//! Module implementing contextual decoding.
//!
//! This allows values to be decoded that rely on runtime type information,
//! such as tuple fields whose kinds come from a schema.

use super::Decoder;
use crate::error::Error;

/// Represents a decodable type requing runtime context for decoding.
pub trait DecodeContext: Sized {
    /// Context for decoding.
    type Context: ?Sized;

    /// Returns `true` if the type is dynamic.
    fn is_dynamic_context(context: &Self::Context) -> bool;

    /// Reads the type's data from the specified decoder.
    fn decode_context(decoder: &mut Decoder, context: &Self::Context) -> Result<Self, Error>;
}

/// Decodes a value from a complete, word-aligned buffer.
pub fn decode<T>(bytes: &[u8], context: &T::Context) -> Result<T, Error>
where
    T: DecodeContext,
{
    let mut decoder = Decoder::aligned(bytes)?;

    // Make sure to call `decode_context` on the type instead of
    // `read_context`. This is because the top level value never gets
    // redirected even if it is a dynamic type.
    T::decode_context(&mut decoder, context)
}

impl Decoder<'_> {
    /// Reads a value from the decoder for the specified context.
    pub fn read_context<T>(&mut self, context: &T::Context) -> Result<T, Error>
    where
        T: DecodeContext,
    {
        if T::is_dynamic_context(context) {
            T::decode_context(&mut self.slice()?, context)
        } else {
            T::decode_context(self, context)
        }
    }
}
