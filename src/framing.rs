//! Framing of a lone top-level tuple with dynamic fields.
//!
//! Encoding such a tuple as the only argument treats the tuple itself as a
//! dynamic value, which puts one extra offset word in front of the tuple's
//! head. Decoders that know the tuple's shape statically expect the tuple's
//! head to start at byte 0, so the published encoding has that word
//! stripped, and decoding puts it back before reading the tuple.

use crate::{
    decode::Decoder,
    error::Error,
    primitive::{Primitive as _, WORD_LEN},
};

/// Offset stored in the wrapper word: the tuple starts right after it.
pub const WRAPPER_OFFSET: usize = 0;

/// Prepends the wrapper word to a tuple encoding.
pub fn wrap(tuple: &[u8]) -> Vec<u8> {
    let mut wrapped = Vec::with_capacity(WORD_LEN + tuple.len());
    wrapped.extend_from_slice(&WRAPPER_OFFSET.to_word());
    wrapped.extend_from_slice(tuple);
    tracing::debug!(len = tuple.len(), "reinserted tuple wrapper word");
    wrapped
}

/// Returns the tuple encoding a wrapped buffer points to.
pub fn unwrap(wrapped: &[u8]) -> Result<&[u8], Error> {
    let mut decoder = Decoder::new(wrapped);
    let offset = decoder.read_size()?;
    let start = WORD_LEN
        .checked_add(offset)
        .filter(|start| *start <= wrapped.len())
        .ok_or_else(|| {
            Error::invalid(format!("tuple wrapper offset {offset} points outside of buffer"))
        })?;
    Ok(&wrapped[start..])
}

/// Removes the wrapper word from a wrapped tuple encoding.
///
/// Only wrappers pointing directly at the following word can be stripped,
/// as anything else would leave bytes in front of the tuple's head.
pub fn strip(mut wrapped: Vec<u8>) -> Result<Vec<u8>, Error> {
    let offset = Decoder::new(&wrapped).read_size()?;
    if offset != WRAPPER_OFFSET {
        return Err(Error::invalid(format!(
            "cannot strip tuple wrapper with offset {offset}"
        )));
    }
    wrapped.drain(..WORD_LEN);
    tracing::debug!(len = wrapped.len(), "stripped tuple wrapper word");
    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use hex_literal::hex;

    #[test]
    fn wrap_and_strip_are_inverse() {
        let tuple = hex!("0000000000000000000000000000000000000000000000000000000000000001");
        let wrapped = wrap(&tuple);
        assert_eq!(wrapped[..WORD_LEN], [0; 32]);
        assert_eq!(unwrap(&wrapped).unwrap(), tuple);
        assert_eq!(strip(wrapped).unwrap(), tuple);
    }

    #[test]
    fn unwrap_follows_offset() {
        let wrapped = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020
             ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
             0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(unwrap(&wrapped).unwrap(), &wrapped[64..]);
        assert_eq!(
            strip(wrapped.to_vec()).unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );
    }

    #[test]
    fn rejects_missing_or_dangling_wrappers() {
        assert_eq!(unwrap(&[]).unwrap_err().kind(), ErrorKind::TruncatedInput);
        let dangling = hex!("0000000000000000000000000000000000000000000000000000000000000040");
        assert_eq!(
            unwrap(&dangling).unwrap_err().kind(),
            ErrorKind::InvalidEncoding
        );
    }
}
