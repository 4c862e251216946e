//! Word-sized primitive types and unsigned integer encoding.

use crate::error::Error;
use ethnum::{AsU256 as _, U256};

/// An Ethereum 32-byte word.
pub type Word = [u8; 32];

/// Size of a word in bytes.
pub const WORD_LEN: usize = 32;

/// Trait reprenting any type that can be converted to and from a single
/// Ethereum 32-byte word.
pub trait Primitive: Sized {
    /// Converts a primitive type to an Ethereum 32-byte word.
    fn to_word(&self) -> Word;

    /// Converts an Ethereum 32-byte word to the type.
    ///
    /// Unlike a cast, this is checked: words with bits set above the type's
    /// width are rejected with [`Error::Overflow`].
    fn from_word(word: Word) -> Result<Self, Error>;
}

macro_rules! impl_primitive_for_unsigned {
    ($($t:ty,)*) => {$(
        impl Primitive for $t {
            fn to_word(&self) -> Word {
                self.as_u256().to_be_bytes()
            }

            fn from_word(word: Word) -> Result<Self, Error> {
                let value = decode_uint(word, <$t>::BITS)?;
                Ok(value.as_u128() as $t)
            }
        }
    )*};
}

impl_primitive_for_unsigned! {
    u8, u16, u32, u64, u128, usize,
}

impl Primitive for U256 {
    fn to_word(&self) -> Word {
        self.to_be_bytes()
    }

    fn from_word(word: Word) -> Result<Self, Error> {
        Ok(U256::from_be_bytes(word))
    }
}

/// Returns `true` if the bit width names a Solidity `uintN` type.
pub fn is_valid_bit_width(bit_width: u32) -> bool {
    (8..=256).contains(&bit_width) && bit_width % 8 == 0
}

/// Encodes an unsigned integer of the specified bit width as a big-endian,
/// left zero-padded word.
pub fn encode_uint(value: U256, bit_width: u32) -> Result<Word, Error> {
    check_bit_width(bit_width)?;
    if significant_bits(value) > bit_width {
        return Err(Error::OutOfRange { bit_width });
    }
    Ok(value.to_be_bytes())
}

/// Decodes an unsigned integer of the specified bit width from a word.
pub fn decode_uint(word: Word, bit_width: u32) -> Result<U256, Error> {
    check_bit_width(bit_width)?;
    let value = U256::from_be_bytes(word);
    if significant_bits(value) > bit_width {
        return Err(Error::Overflow { bit_width });
    }
    Ok(value)
}

/// Pads the specified size to a 32-byte boundry.
pub fn pad32(len: usize) -> usize {
    len.div_ceil(WORD_LEN) * WORD_LEN
}

fn significant_bits(value: U256) -> u32 {
    256 - value.leading_zeros()
}

fn check_bit_width(bit_width: u32) -> Result<(), Error> {
    if !is_valid_bit_width(bit_width) {
        return Err(Error::schema(format!("unsupported integer type uint{bit_width}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use hex_literal::hex;

    #[test]
    fn encodes_left_padded_big_endian() {
        assert_eq!(
            encode_uint(U256::new(0x0102), 64).unwrap(),
            hex!("0000000000000000000000000000000000000000000000000000000000000102"),
        );
        assert_eq!(encode_uint(U256::ZERO, 64).unwrap(), [0; 32]);
        assert_eq!(
            u64::MAX.to_word(),
            hex!("000000000000000000000000000000000000000000000000ffffffffffffffff"),
        );
    }

    #[test]
    fn rejects_values_wider_than_bit_width() {
        let err = encode_uint(U256::from(u64::MAX) + U256::ONE, 64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(encode_uint(U256::MAX, 256).is_ok());
        assert!(encode_uint(U256::new(256), 8).is_err());
    }

    #[test]
    fn decode_checks_overflow() {
        let word = hex!("0000000000000000000000000000000000000000000000010000000000000000");
        assert_eq!(decode_uint(word, 64).unwrap_err().kind(), ErrorKind::Overflow);
        assert_eq!(u64::from_word(word).unwrap_err().kind(), ErrorKind::Overflow);
        assert_eq!(decode_uint(word, 72).unwrap(), U256::from(u64::MAX) + U256::ONE);
        assert_eq!(u64::from_word(u64::MAX.to_word()).unwrap(), u64::MAX);
    }

    #[test]
    fn rejects_unsupported_bit_widths() {
        for bit_width in [0, 7, 63, 264] {
            assert!(!is_valid_bit_width(bit_width));
            assert_eq!(
                encode_uint(U256::ZERO, bit_width).unwrap_err().kind(),
                ErrorKind::SchemaMismatch,
            );
        }
    }

    #[test]
    fn pads_to_word_boundaries() {
        assert_eq!(pad32(0), 0);
        assert_eq!(pad32(1), 32);
        assert_eq!(pad32(32), 32);
        assert_eq!(pad32(33), 64);
    }
}
