//! Verified Solidity ABI encodings for golden test data.
//!
//! Supports the subset of the ABI needed for cross-implementation test
//! fixtures: unsigned integers, dynamic `bytes`, `bytes[]` and flat tuples
//! mixing the two. Every encoding function decodes its own output again and
//! fails if the result differs from the input.

pub mod array;
pub mod bytes;
pub mod decode;
pub mod encode;
pub mod error;
pub mod fixtures;
pub mod fmt;
pub mod framing;
pub mod layout;
pub mod primitive;
pub mod tuple;
pub mod verify;

pub use self::{
    array::{decode_slice, encode_slice},
    bytes::{decode_bytes, encode_bytes, Bytes},
    error::{Error, ErrorKind, Location},
    primitive::{decode_uint, encode_uint, Word},
    tuple::{AbiTuple, FieldKind, FieldValue, TupleSchema},
};
