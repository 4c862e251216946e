//! Head and tail layout of encodable values.
//!
//! Every encoding is split into a fixed-size "head" followed by a
//! variable-size "tail". This module computes how many words each part
//! needs, so that encoders can allocate the exact output buffer up front.

use crate::primitive::WORD_LEN;

/// Encoding size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Size {
    /// Static type size, specifying the number of words required to represent
    /// the type.
    Static(usize),

    /// Dynamic type size, specifying the number of words required to represent
    /// the "head" and the "tail" of the type.
    Dynamic(usize, usize),
}

impl Size {
    /// Size of a single word-sized value.
    pub const WORD: Self = Self::Static(1);

    /// Size of a dynamic byte string of the specified length: a length word
    /// followed by the zero-padded content.
    pub fn bytes(len: usize) -> Self {
        Self::Dynamic(1 + len.div_ceil(WORD_LEN), 0)
    }

    /// Combines the sizes of a container's members into the size of the
    /// container.
    ///
    /// Static members are laid out inline in the head, while dynamic members
    /// occupy a single offset word in the head and move their own head and
    /// tail to the container's tail.
    pub fn tuple(members: impl IntoIterator<Item = Size>) -> Self {
        members
            .into_iter()
            .fold(Self::Static(0), |acc, member| {
                let (head, tail) = acc.word_count();
                match member {
                    Self::Static(words) if acc.is_static() => Self::Static(head + words),
                    Self::Static(words) => Self::Dynamic(head + words, tail),
                    Self::Dynamic(..) => {
                        Self::Dynamic(head + 1, tail + member.total_word_count())
                    }
                }
            })
    }

    /// Size of a length-prefixed sequence: a count word followed by the
    /// sequence's members laid out as a container.
    pub fn sequence(members: impl IntoIterator<Item = Size>) -> Self {
        Self::Dynamic(1, Self::tuple(members).total_word_count())
    }

    /// Returns the head and tail word counts required for the spcified size.
    ///
    /// Note that for static types, the tail word count is always 0.
    pub fn word_count(&self) -> (usize, usize) {
        match self {
            Self::Static(head) => (*head, 0),
            Self::Dynamic(head, tail) => (*head, *tail),
        }
    }

    /// Returns the total word count of the head and tail combined.
    pub fn total_word_count(&self) -> usize {
        let (head, tail) = self.word_count();
        head + tail
    }

    /// Returns the byte-length for the specified size.
    pub fn byte_length(&self) -> usize {
        self.total_word_count() * WORD_LEN
    }

    /// Returns the offset, in bytes, of the tail.
    pub fn tail_byte_offset(&self) -> usize {
        let (head, _) = self.word_count();
        head * WORD_LEN
    }

    /// Returns `true` if the type is static.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_members_stay_static() {
        let size = Size::tuple([Size::WORD, Size::WORD, Size::WORD]);
        assert_eq!(size, Size::Static(3));
        assert_eq!(size.byte_length(), 96);
        assert_eq!(size.tail_byte_offset(), 96);
    }

    #[test]
    fn dynamic_members_move_to_tail() {
        let size = Size::tuple([Size::WORD, Size::bytes(5), Size::bytes(32)]);
        assert_eq!(size, Size::Dynamic(3, 2 + 2));
        assert_eq!(size.tail_byte_offset(), 96);
        assert_eq!(size.byte_length(), 224);
    }

    #[test]
    fn byte_string_sizes() {
        assert_eq!(Size::bytes(0), Size::Dynamic(1, 0));
        assert_eq!(Size::bytes(1), Size::Dynamic(2, 0));
        assert_eq!(Size::bytes(33), Size::Dynamic(3, 0));
    }

    #[test]
    fn sequences_have_count_head() {
        assert_eq!(Size::sequence([]), Size::Dynamic(1, 0));
        assert_eq!(
            Size::sequence([Size::bytes(5), Size::bytes(0)]),
            Size::Dynamic(1, 2 + 2 + 1),
        );
    }
}
