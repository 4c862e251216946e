//! Codec error types.

use std::fmt::{self, Display, Formatter};

/// The location within a value at which an error occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Location {
    /// The length of a sequence.
    Length,
    /// A byte at the specified index of a byte string.
    Byte(usize),
    /// An element at the specified index of a slice.
    Element(usize),
    /// A named tuple field.
    Field(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Length => f.write_str("length"),
            Self::Byte(index) => write!(f, "byte {index}"),
            Self::Element(index) => write!(f, "element {index}"),
            Self::Field(name) => write!(f, "field `{name}`"),
        }
    }
}

/// The kind of a codec error, independent of where it occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    OutOfRange,
    Overflow,
    TruncatedInput,
    InvalidEncoding,
    SchemaMismatch,
    RoundTripMismatch,
}

/// An error encoding, decoding or verifying a value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value is too large for its declared integer width.
    #[error("value does not fit in {bit_width} bits")]
    OutOfRange { bit_width: u32 },

    /// A decoded integer exceeds its target width.
    #[error("decoded integer overflows {bit_width} bits")]
    Overflow { bit_width: u32 },

    /// The buffer is shorter than a length or offset implies.
    #[error("truncated input: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The buffer is structurally malformed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A value or buffer does not match the expected tuple schema.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Decoding an encoded value did not reproduce the original.
    #[error("round-trip mismatch at {0}")]
    RoundTripMismatch(Location),

    /// An error with the location at which it occurred.
    #[error("{location}: {source}")]
    At {
        location: Location,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the kind of error, looking through any location context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Self::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            Self::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
            Self::RoundTripMismatch(_) => ErrorKind::RoundTripMismatch,
            Self::At { source, .. } => source.kind(),
        }
    }

    /// Returns the innermost location attached to the error, if any.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::RoundTripMismatch(location) => Some(location),
            Self::At { location, source } => source.location().or(Some(location)),
            _ => None,
        }
    }

    /// Attaches a location to the error.
    pub fn at(self, location: Location) -> Self {
        Self::At {
            location,
            source: Box::new(self),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidEncoding(message.into())
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }
}

/// Extension for attaching locations to fallible results.
pub(crate) trait ResultExt<T> {
    fn at(self, location: impl FnOnce() -> Location) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn at(self, location: impl FnOnce() -> Location) -> Result<T, Error> {
        self.map_err(|err| err.at(location()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_sees_through_locations() {
        let err = Error::Overflow { bit_width: 64 }
            .at(Location::Field("val1".to_owned()))
            .at(Location::Element(2));
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(err.location(), Some(&Location::Field("val1".to_owned())));
        assert_eq!(
            err.to_string(),
            "element 2: field `val1`: decoded integer overflows 64 bits"
        );
    }
}
