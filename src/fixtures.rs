//! Named native values and their verified encodings, for use as golden
//! test data by other implementations.

use crate::{
    array,
    error::Error,
    fmt::Hex,
    tuple::{self, AbiTuple, FieldKind, FieldValue, TupleSchema},
};
use std::fmt::{self, Display, Formatter};

pub const EMPTY_BYTES: &str = "emptyBytes";
pub const ONE_BYTE: &str = "oneByte";
pub const SOME_BYTES_1: &str = "someBytes1";
pub const SOME_BYTES_2: &str = "someBytes2";
pub const ALIGNED_BYTES: &str = "alignedBytes";

/// The byte strings fixtures are built from, by name.
pub const CATALOG: [(&str, &[u8]); 5] = [
    (EMPTY_BYTES, b""),
    (ONE_BYTE, b"a"),
    (SOME_BYTES_1, b"hello"),
    (SOME_BYTES_2, b"world"),
    (ALIGNED_BYTES, b"32-bytes-xxxxxxxxxxxxxxxxxxxxxxx"),
];

/// Returns the catalog byte string with the specified name.
pub fn example(name: &str) -> Option<&'static [u8]> {
    CATALOG
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, bytes)| *bytes)
}

fn catalog_entry(name: &str) -> Result<Vec<u8>, Error> {
    example(name)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| Error::schema(format!("no catalog entry named `{name}`")))
}

/// A native value along with its verified encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fixture<T> {
    pub name: String,
    pub native: T,
    pub encoded: Vec<u8>,
}

impl<T> Fixture<T> {
    fn new(name: impl Into<String>, native: T, encoded: Vec<u8>) -> Self {
        let fixture = Self {
            name: name.into(),
            native,
            encoded,
        };
        tracing::debug!(name = %fixture.name, len = fixture.encoded.len(), "generated fixture");
        fixture
    }

    /// Returns the encoding as lowercase hex without a prefix.
    pub fn encoded_hex(&self) -> String {
        hex::encode(&self.encoded)
    }
}

impl<T> Display for Fixture<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, Hex(&self.encoded))
    }
}

/// A tuple of three `uint64` values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AllInts {
    pub val1: u64,
    pub val2: u64,
    pub val3: u64,
}

impl AbiTuple for AllInts {
    fn schema() -> TupleSchema {
        TupleSchema::new([
            ("val1", FieldKind::Uint(64)),
            ("val2", FieldKind::Uint(64)),
            ("val3", FieldKind::Uint(64)),
        ])
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![self.val1.into(), self.val2.into(), self.val3.into()]
    }

    fn from_values(values: Vec<FieldValue>) -> Result<Self, Error> {
        let [val1, val2, val3] = tuple::fields::<3>(values)?;
        Ok(Self {
            val1: val1.into_u64()?,
            val2: val2.into_u64()?,
            val3: val3.into_u64()?,
        })
    }
}

/// A tuple mixing a `uint64` with two dynamic byte strings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IntAndBytes {
    pub int1: u64,
    pub bytes1: Vec<u8>,
    pub bytes2: Vec<u8>,
}

impl AbiTuple for IntAndBytes {
    fn schema() -> TupleSchema {
        TupleSchema::new([
            ("int1", FieldKind::Uint(64)),
            ("bytes1", FieldKind::Bytes),
            ("bytes2", FieldKind::Bytes),
        ])
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            self.int1.into(),
            self.bytes1.clone().into(),
            self.bytes2.clone().into(),
        ]
    }

    fn from_values(values: Vec<FieldValue>) -> Result<Self, Error> {
        let [int1, bytes1, bytes2] = tuple::fields::<3>(values)?;
        Ok(Self {
            int1: int1.into_u64()?,
            bytes1: bytes1.into_bytes()?,
            bytes2: bytes2.into_bytes()?,
        })
    }
}

/// Builds the `bytes[]` fixtures: the empty slice, every catalog entry on
/// its own, and a set of multi-element combinations.
pub fn slice_of_bytes() -> Result<Vec<Fixture<Vec<Vec<u8>>>>, Error> {
    let mut groups = vec![("empty".to_owned(), vec![])];
    groups.extend(
        CATALOG
            .iter()
            .map(|(name, _)| (format!("one-elt-{name}"), vec![*name])),
    );
    groups.extend(
        [
            &[SOME_BYTES_1, EMPTY_BYTES][..],
            &[EMPTY_BYTES, SOME_BYTES_1],
            &[EMPTY_BYTES, SOME_BYTES_1, EMPTY_BYTES],
            &[SOME_BYTES_1, EMPTY_BYTES, SOME_BYTES_2],
            &[SOME_BYTES_1, SOME_BYTES_2],
            &[SOME_BYTES_1, ALIGNED_BYTES],
            &[ALIGNED_BYTES, SOME_BYTES_1],
            &[ALIGNED_BYTES, SOME_BYTES_1, ALIGNED_BYTES],
            &[SOME_BYTES_1, ALIGNED_BYTES, SOME_BYTES_2],
        ]
        .into_iter()
        .map(|names| {
            let name = names.iter().fold("multiple-elts".to_owned(), |name, element| {
                format!("{name}-{element}")
            });
            (name, names.to_vec())
        }),
    );

    groups
        .into_iter()
        .map(|(name, names)| {
            let native = names
                .iter()
                .map(|name| catalog_entry(name))
                .collect::<Result<Vec<_>, _>>()?;
            let encoded = array::encode_slice(&native)?;
            Ok(Fixture::new(name, native, encoded))
        })
        .collect()
}

/// Builds the all-integer tuple fixtures.
pub fn all_ints() -> Result<Vec<Fixture<AllInts>>, Error> {
    [
        ("zeros", AllInts::default()),
        ("middle-one", AllInts { val1: 0, val2: 1, val3: 0 }),
        ("ascending", AllInts { val1: 1, val2: 2, val3: 3 }),
        (
            "max",
            AllInts {
                val1: u64::MAX,
                val2: u64::MAX,
                val3: u64::MAX,
            },
        ),
    ]
    .into_iter()
    .map(|(name, native)| {
        let encoded = native.encode_tuple()?;
        Ok(Fixture::new(name, native, encoded))
    })
    .collect()
}

/// Builds the mixed integer and byte string tuple fixtures.
pub fn int_and_bytes() -> Result<Vec<Fixture<IntAndBytes>>, Error> {
    [
        ("empty", 0, EMPTY_BYTES, EMPTY_BYTES),
        ("hello-world", 1, SOME_BYTES_1, SOME_BYTES_2),
        ("aligned-and-one-byte", 42, ALIGNED_BYTES, ONE_BYTE),
        ("max-int", u64::MAX, SOME_BYTES_1, EMPTY_BYTES),
    ]
    .into_iter()
    .map(|(name, int1, bytes1, bytes2)| {
        let native = IntAndBytes {
            int1,
            bytes1: catalog_entry(bytes1)?,
            bytes2: catalog_entry(bytes2)?,
        };
        let encoded = native.encode_tuple()?;
        Ok(Fixture::new(name, native, encoded))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, primitive::WORD_LEN};
    use hex_literal::hex;

    #[test]
    fn catalog_lookup() {
        assert_eq!(example(SOME_BYTES_1), Some(&b"hello"[..]));
        assert_eq!(example(ALIGNED_BYTES).map(<[u8]>::len), Some(32));
        assert_eq!(example("missing"), None);

        assert_eq!(catalog_entry(SOME_BYTES_2).unwrap(), b"world");
        assert_eq!(
            catalog_entry("missing").unwrap_err().kind(),
            ErrorKind::SchemaMismatch
        );
    }

    #[test]
    fn slice_fixtures() {
        let fixtures = slice_of_bytes().unwrap();
        assert_eq!(fixtures.len(), 1 + 5 + 9);

        assert_eq!(fixtures[0].name, "empty");
        assert_eq!(fixtures[0].encoded, [0; 32]);

        let one_empty = &fixtures[1];
        assert_eq!(one_empty.name, "one-elt-emptyBytes");
        assert_eq!(one_empty.native, [Vec::<u8>::new()]);
        assert_eq!(
            one_empty.encoded,
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000001
                 0000000000000000000000000000000000000000000000000000000000000000
                 0000000000000000000000000000000000000000000000000000000000000000"
            ),
        );

        assert_eq!(
            fixtures.last().unwrap().name,
            "multiple-elts-someBytes1-alignedBytes-someBytes2"
        );
        for fixture in &fixtures {
            assert_eq!(fixture.encoded.len() % WORD_LEN, 0);
            assert_eq!(array::decode_slice(&fixture.encoded).unwrap(), fixture.native);
        }
    }

    #[test]
    fn all_ints_fixtures() {
        let fixtures = all_ints().unwrap();
        let middle = &fixtures[1];
        assert_eq!(middle.encoded.len(), 96);
        assert_eq!(
            middle.encoded_hex(),
            "0000000000000000000000000000000000000000000000000000000000000000\
             0000000000000000000000000000000000000000000000000000000000000001\
             0000000000000000000000000000000000000000000000000000000000000000"
        );
        for fixture in &fixtures {
            assert_eq!(AllInts::decode_tuple(&fixture.encoded).unwrap(), fixture.native);
        }
    }

    #[test]
    fn int_and_bytes_fixtures() {
        let fixtures = int_and_bytes().unwrap();
        let hello = &fixtures[1];
        assert_eq!(
            hello.native,
            IntAndBytes {
                int1: 1,
                bytes1: b"hello".to_vec(),
                bytes2: b"world".to_vec(),
            }
        );
        assert_eq!(
            hello.encoded[..3 * WORD_LEN],
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000001
                 0000000000000000000000000000000000000000000000000000000000000000
                 0000000000000000000000000000000000000000000000000000000000000040"
            ),
        );
        for fixture in &fixtures {
            assert_eq!(IntAndBytes::decode_tuple(&fixture.encoded).unwrap(), fixture.native);
        }
    }

    #[test]
    fn displays_name_and_hex() {
        let fixture = Fixture::new("one", (), vec![0xab; 2]);
        assert_eq!(fixture.to_string(), "one: 0xabab");
        assert_eq!(fixture.encoded_hex(), "abab");
    }

    #[test]
    fn typed_tuples_reject_wrong_shapes() {
        assert!(AllInts::from_values(vec![1_u64.into()]).is_err());
        assert!(IntAndBytes::from_values(vec![1_u64.into(), 2_u64.into(), 3_u64.into()]).is_err());
    }
}
