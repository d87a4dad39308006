//! 4-bit layout: two codes per byte.
//!
//! ```text
//! even: [c0 c1] [c2 c3] ... [c(n-2) c(n-1)] [0x00]
//! odd:  [c0 c1] [c2 c3] ... [0x0 c(n-1)]    [0x01]
//! ```
//!
//! The high nibble holds the earlier code. An odd trailing code gets a byte
//! of its own, and the flag byte says whether that byte is present.

use std::iter::FusedIterator;

use strpack_common::BitWidth;

use super::Layout;

/// Nibble-pair layout used by the 4-bit codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nibble;

impl Nibble {
    /// Splits a packed buffer into its code pairs and the optional odd code.
    #[inline]
    fn split(packed: &[u8]) -> (&[u8], Option<u8>) {
        match packed {
            [] | [_] => (&[], None),
            [pairs @ .., tail, 1] => (pairs, Some(*tail)),
            [pairs @ .., _] => (pairs, None),
        }
    }
}

impl Layout for Nibble {
    const WIDTH: BitWidth = BitWidth::Four;

    type Codes<'a> = NibbleCodes<'a>;

    fn decoded_len(packed: &[u8]) -> usize {
        let (pairs, tail) = Self::split(packed);
        pairs.len() * 2 + usize::from(tail.is_some())
    }

    fn codes(packed: &[u8]) -> NibbleCodes<'_> {
        let (pairs, tail) = Self::split(packed);
        NibbleCodes {
            pairs,
            tail,
            pos: 0,
        }
    }

    fn pack_codes(buf: &mut Vec<u8>) {
        let len = buf.len();
        if len == 0 {
            return;
        }

        // Byte i is built from codes 2i and 2i+1, both at or after i.
        let pairs = len / 2;
        for i in 0..pairs {
            buf[i] = (buf[2 * i] << 4) | (buf[2 * i + 1] & 0x0F);
        }

        if len % 2 == 1 {
            buf[pairs] = buf[len - 1];
            buf.truncate(pairs + 1);
            buf.push(1);
        } else {
            buf.truncate(pairs);
            buf.push(0);
        }
    }
}

/// Lazy decoder over a 4-bit buffer.
#[derive(Debug, Clone)]
pub struct NibbleCodes<'a> {
    pairs: &'a [u8],
    tail: Option<u8>,
    pos: usize,
}

impl Iterator for NibbleCodes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if let Some(&byte) = self.pairs.get(self.pos / 2) {
            let code = if self.pos % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            self.pos += 1;
            return Some(code);
        }
        self.tail.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pairs.len() * 2 - self.pos + usize::from(self.tail.is_some());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NibbleCodes<'_> {}

impl FusedIterator for NibbleCodes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(codes: &[u8]) -> Vec<u8> {
        let mut buf = codes.to_vec();
        Nibble::pack_codes(&mut buf);
        buf
    }

    #[test]
    fn test_pack_even_and_odd() {
        assert!(packed(&[]).is_empty());
        assert_eq!(packed(&[0]), vec![0x00, 0x01]);
        assert_eq!(packed(&[0, 1]), vec![0x01, 0x00]);
        assert_eq!(packed(&[0xA, 0xB, 0xC]), vec![0xAB, 0x0C, 0x01]);
        assert_eq!(packed(&[0xF, 0xE, 0xD, 0xC]), vec![0xFE, 0xDC, 0x00]);
    }

    #[test]
    fn test_decoded_len() {
        assert_eq!(Nibble::decoded_len(&[]), 0);
        assert_eq!(Nibble::decoded_len(&[0x01]), 0);
        assert_eq!(Nibble::decoded_len(&[0x00, 0x01]), 1);
        assert_eq!(Nibble::decoded_len(&[0x01, 0x00]), 2);
        assert_eq!(Nibble::decoded_len(&[0xAB, 0x0C, 0x01]), 3);
        assert_eq!(Nibble::decoded_len(&[0xAB, 0xCD, 0x00]), 4);
    }

    #[test]
    fn test_codes_iterator() {
        let codes: Vec<u8> = Nibble::codes(&[0xAB, 0x0C, 0x01]).collect();
        assert_eq!(codes, vec![0xA, 0xB, 0xC]);

        let mut iter = Nibble::codes(&[0x12, 0x34, 0x00]);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_every_length_round_trips() {
        for len in 0..64u8 {
            let codes: Vec<u8> = (0..len).map(|i| i % 16).collect();
            let buf = packed(&codes);
            assert_eq!(buf.len(), BitWidth::Four.packed_len(codes.len()));
            assert_eq!(Nibble::codes(&buf).collect::<Vec<_>>(), codes);
        }
    }
}
