//! Codec for flat tuples of unsigned integers and dynamic byte strings.
//!
//! A tuple is described at runtime by a [`TupleSchema`]: an ordered list of
//! named fields. The encoding is a head with one word per field, holding
//! integers inline and offsets for byte strings, followed by a tail with
//! the byte strings in declaration order. Offsets are relative to the start
//! of the tail.
//!
//! Tuples with at least one dynamic field are framed with the wrapper word
//! described in [`crate::framing`] while being verified, and published
//! without it.

use crate::{
    bytes::Bytes,
    decode::{
        context::{self, DecodeContext},
        Decode as _, Decoder,
    },
    encode::{self, Encode, Encoder},
    error::{Error, Location, ResultExt as _},
    fmt::Hex,
    framing,
    layout::Size,
    primitive::{self, Word, WORD_LEN},
    verify,
};
use ethnum::U256;
use std::fmt::{self, Debug, Display, Formatter};

/// The kind of a tuple field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    /// An unsigned integer of the specified bit width (`uintN`).
    Uint(u32),
    /// A dynamic byte string (`bytes`).
    Bytes,
}

impl FieldKind {
    /// Returns `true` if fields of this kind are stored in the tail.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes)
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Uint(bit_width) => write!(f, "uint{bit_width}"),
            Self::Bytes => f.write_str("bytes"),
        }
    }
}

/// A named tuple field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

/// The value of a tuple field.
#[derive(Clone, Eq, PartialEq)]
pub enum FieldValue {
    Uint(U256),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Converts the value into a `u64`.
    pub fn into_u64(self) -> Result<u64, Error> {
        match self {
            Self::Uint(value) if value <= U256::from(u64::MAX) => Ok(value.as_u64()),
            Self::Uint(_) => Err(Error::Overflow { bit_width: u64::BITS }),
            Self::Bytes(_) => Err(Error::schema("expected an integer, found bytes")),
        }
    }

    /// Converts the value into a byte string.
    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Uint(_) => Err(Error::schema("expected bytes, found an integer")),
        }
    }
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Uint(value) => f.debug_tuple("Uint").field(value).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&Hex(bytes)).finish(),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<U256> for FieldValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&'_ [u8]> for FieldValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_owned())
    }
}

/// The ordered fields of a tuple.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TupleSchema {
    fields: Vec<Field>,
}

impl TupleSchema {
    /// Creates a schema from `(name, kind)` pairs in declaration order.
    pub fn new<S>(fields: impl IntoIterator<Item = (S, FieldKind)>) -> Self
    where
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, kind)| Field {
                    name: name.into(),
                    kind,
                })
                .collect(),
        }
    }

    /// Returns `true` if any of the fields is dynamic, meaning the tuple is
    /// framed with a wrapper word at the top level.
    pub fn is_dynamic(&self) -> bool {
        has_dynamic_field(&self.fields)
    }

    /// Encodes a tuple's field values, verifying that they decode back to the
    /// same values.
    ///
    /// The returned bytes start directly with the tuple's head.
    pub fn encode(&self, values: &[FieldValue]) -> Result<Vec<u8>, Error> {
        let framed = verify::encode_and_verify(
            "tuple",
            values,
            |values| self.encode_framed(values),
            |encoded| self.decode_framed(encoded),
            |values, decoded| self.fields_eq(values, decoded),
        )?;

        if self.is_dynamic() {
            framing::strip(framed)
        } else {
            Ok(framed)
        }
    }

    /// Decodes a tuple's field values from an encoding starting with the
    /// tuple's head.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<FieldValue>, Error> {
        if self.is_dynamic() {
            self.decode_framed(&framing::wrap(bytes))
        } else {
            self.decode_framed(bytes)
        }
    }

    fn encode_framed(&self, values: &[FieldValue]) -> Result<Vec<u8>, Error> {
        let tuple = encode::encode(&Slots(self.slots(values)?));
        if self.is_dynamic() {
            Ok(framing::wrap(&tuple))
        } else {
            Ok(tuple)
        }
    }

    fn decode_framed(&self, bytes: &[u8]) -> Result<Vec<FieldValue>, Error> {
        let tuple = if self.is_dynamic() {
            framing::unwrap(bytes)?
        } else {
            let expected = self.fields.len() * WORD_LEN;
            if bytes.len() != expected {
                return Err(Error::schema(format!(
                    "static tuple of {} fields needs {expected} bytes, found {}",
                    self.fields.len(),
                    bytes.len()
                )));
            }
            bytes
        };
        Ok(context::decode::<Tuple>(tuple, &self.fields)?.0)
    }

    /// Checks values against the schema, encoding integers along the way.
    fn slots<'a>(&self, values: &'a [FieldValue]) -> Result<Vec<Slot<'a>>, Error> {
        if values.len() != self.fields.len() {
            return Err(Error::schema(format!(
                "expected {} field values, found {}",
                self.fields.len(),
                values.len()
            )));
        }

        self.fields
            .iter()
            .zip(values)
            .map(|(field, value)| {
                let slot = match (field.kind, value) {
                    (FieldKind::Uint(bit_width), FieldValue::Uint(value)) => {
                        primitive::encode_uint(*value, bit_width).map(Slot::Word)
                    }
                    (FieldKind::Bytes, FieldValue::Bytes(bytes)) => {
                        Ok(Slot::Bytes(Bytes(bytes.as_slice())))
                    }
                    (kind, _) => Err(Error::schema(format!("expected {kind} value"))),
                };
                slot.at(|| Location::Field(field.name.clone()))
            })
            .collect()
    }

    /// Compares field values of this schema field-for-field.
    fn fields_eq(&self, expected: &[FieldValue], actual: &[FieldValue]) -> Result<(), Location> {
        if expected.len() != actual.len() {
            return Err(Location::Length);
        }
        match self
            .fields
            .iter()
            .zip(expected.iter().zip(actual))
            .find(|(_, (a, b))| a != b)
        {
            Some((field, _)) => Err(Location::Field(field.name.clone())),
            None => Ok(()),
        }
    }
}

fn has_dynamic_field(fields: &[Field]) -> bool {
    fields.iter().any(|field| field.kind.is_dynamic())
}

/// An encoded head slot of a tuple field.
enum Slot<'a> {
    Word(Word),
    Bytes(Bytes<&'a [u8]>),
}

impl Encode for Slot<'_> {
    fn size(&self) -> Size {
        match self {
            Self::Word(_) => Size::WORD,
            Self::Bytes(bytes) => bytes.size(),
        }
    }

    fn encode(&self, encoder: &mut Encoder) {
        match self {
            Self::Word(word) => encoder.write_word(*word),
            Self::Bytes(bytes) => bytes.encode(encoder),
        }
    }
}

/// The slots of a whole tuple.
struct Slots<'a>(Vec<Slot<'a>>);

impl Encode for Slots<'_> {
    fn size(&self) -> Size {
        Size::tuple(self.0.iter().map(Encode::size))
    }

    fn encode(&self, encoder: &mut Encoder) {
        for slot in &self.0 {
            encoder.write(slot);
        }
    }
}

impl DecodeContext for FieldValue {
    type Context = FieldKind;

    fn is_dynamic_context(kind: &FieldKind) -> bool {
        kind.is_dynamic()
    }

    fn decode_context(decoder: &mut Decoder, kind: &FieldKind) -> Result<Self, Error> {
        match kind {
            FieldKind::Uint(bit_width) => Ok(Self::Uint(primitive::decode_uint(
                decoder.read_word()?,
                *bit_width,
            )?)),
            FieldKind::Bytes => Ok(Self::Bytes(Bytes::<Vec<u8>>::decode(decoder)?.0)),
        }
    }
}

/// Decoded tuple field values.
struct Tuple(Vec<FieldValue>);

impl DecodeContext for Tuple {
    type Context = [Field];

    fn is_dynamic_context(fields: &[Field]) -> bool {
        has_dynamic_field(fields)
    }

    fn decode_context(decoder: &mut Decoder, fields: &[Field]) -> Result<Self, Error> {
        let mut head = decoder.untail(fields.len())?;
        fields
            .iter()
            .map(|field| {
                // Field offsets running off the end of the buffer mean the
                // tuple was cut short.
                let value = if FieldValue::is_dynamic_context(&field.kind) {
                    head.slice_truncated()
                        .and_then(|mut tail| FieldValue::decode_context(&mut tail, &field.kind))
                } else {
                    head.read_context::<FieldValue>(&field.kind)
                };
                value.at(|| Location::Field(field.name.clone()))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

/// A Rust type with a fixed tuple schema.
pub trait AbiTuple: Sized {
    /// Returns the tuple's schema.
    fn schema() -> TupleSchema;

    /// Returns the field values in schema order.
    fn to_values(&self) -> Vec<FieldValue>;

    /// Builds the type from field values in schema order.
    fn from_values(values: Vec<FieldValue>) -> Result<Self, Error>;

    /// Encodes the tuple, verifying that it decodes back to the same value.
    fn encode_tuple(&self) -> Result<Vec<u8>, Error> {
        Self::schema().encode(&self.to_values())
    }

    /// Decodes the tuple from an encoding starting with its head.
    fn decode_tuple(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_values(Self::schema().decode(bytes)?)
    }
}

/// Splits decoded values into exactly `N` fields.
pub fn fields<const N: usize>(values: Vec<FieldValue>) -> Result<[FieldValue; N], Error> {
    let len = values.len();
    values
        .try_into()
        .map_err(|_| Error::schema(format!("expected {N} field values, found {len}")))
}
