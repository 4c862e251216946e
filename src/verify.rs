//! Round-trip verification of encodings.
//!
//! Every encoding this crate hands out has been decoded again and compared
//! against the value it was produced from. Encodings end up persisted as
//! golden test data, so a divergence is reported as an error instead of
//! being written out.

use crate::error::{Error, Location};

/// Encodes a value, decodes the result and compares it with the original,
/// returning the encoding only if the two agree.
///
/// The `compare` predicate returns the location of the first difference
/// between the original and the decoded value.
pub fn encode_and_verify<T, D>(
    kind: &'static str,
    value: &T,
    encode: impl FnOnce(&T) -> Result<Vec<u8>, Error>,
    decode: impl FnOnce(&[u8]) -> Result<D, Error>,
    compare: impl FnOnce(&T, &D) -> Result<(), Location>,
) -> Result<Vec<u8>, Error>
where
    T: ?Sized,
{
    let encoded = encode(value)?;
    let decoded = decode(&encoded)?;
    if let Err(location) = compare(value, &decoded) {
        tracing::warn!(kind, %location, "decoded value differs from original");
        return Err(Error::RoundTripMismatch(location));
    }

    tracing::trace!(kind, len = encoded.len(), "verified round-trip encoding");
    Ok(encoded)
}

/// Compares two byte strings length-for-length and byte-for-byte.
pub fn bytes_eq(expected: &[u8], actual: &[u8]) -> Result<(), Location> {
    if expected.len() != actual.len() {
        return Err(Location::Length);
    }
    match expected.iter().zip(actual).position(|(a, b)| a != b) {
        Some(index) => Err(Location::Byte(index)),
        None => Ok(()),
    }
}

/// Compares two sequences of byte strings element-for-element.
pub fn slices_eq<T, U>(expected: &[T], actual: &[U]) -> Result<(), Location>
where
    T: AsRef<[u8]>,
    U: AsRef<[u8]>,
{
    if expected.len() != actual.len() {
        return Err(Location::Length);
    }
    match expected
        .iter()
        .zip(actual)
        .position(|(a, b)| bytes_eq(a.as_ref(), b.as_ref()).is_err())
    {
        Some(index) => Err(Location::Element(index)),
        None => Ok(()),
    }
}
