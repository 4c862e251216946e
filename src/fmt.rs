//! Formatting helpers.

use std::fmt::{self, Debug, Display, Formatter};

/// A `0x`-prefixed hexadecimal formatter for byte slices.
pub struct Hex<'a>(pub &'a [u8]);

impl Debug for Hex<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Hex<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_prefix() {
        assert_eq!(Hex(&[]).to_string(), "0x");
        assert_eq!(format!("{:?}", Hex(b"\x01\xab")), "0x01ab");
    }
}
