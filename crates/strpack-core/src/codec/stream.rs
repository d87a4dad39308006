//! 5- and 6-bit layout: a most-significant-bit-first code stream.
//!
//! Codes are appended to an accumulator and emitted a byte at a time. The
//! last partial byte is left-justified and zero padded. The flag byte is 1
//! when that padding is wide enough to be mistaken for one more code, that
//! is when `0 < residual <= 8 - BITS`.

use std::iter::FusedIterator;

use strpack_common::BitWidth;

use super::Layout;

/// Bit-stream layout for a code width of `BITS` (5 or 6).
#[derive(Debug, Clone, Copy, Default)]
pub struct BitStream<const BITS: u32>;

impl<const BITS: u32> BitStream<BITS> {
    const MASK: u32 = (1 << BITS) - 1;
}

impl<const BITS: u32> Layout for BitStream<BITS> {
    const WIDTH: BitWidth = match BitWidth::from_bits(BITS) {
        Some(width @ (BitWidth::Five | BitWidth::Six)) => width,
        _ => panic!("bit stream layout supports 5 or 6 bits"),
    };

    type Codes<'a> = StreamCodes<'a, BITS>;

    fn decoded_len(packed: &[u8]) -> usize {
        match packed.split_last() {
            Some((flag, data)) => {
                (data.len() * 8 / BITS as usize).saturating_sub(usize::from(flag & 1))
            }
            None => 0,
        }
    }

    fn codes(packed: &[u8]) -> StreamCodes<'_, BITS> {
        let remaining = Self::decoded_len(packed);
        let data = packed.split_last().map_or(&[][..], |(_, data)| data);
        StreamCodes {
            data,
            pos: 0,
            acc: 0,
            bits: 0,
            remaining,
        }
    }

    fn pack_codes(buf: &mut Vec<u8>) {
        let len = buf.len();
        if len == 0 {
            return;
        }

        // After reading code i at most floor((i + 1) * BITS / 8) bytes have
        // been written, so the write cursor never passes the read cursor.
        let mut acc: u32 = 0;
        let mut bits: u32 = 0;
        let mut out = 0;
        for i in 0..len {
            acc = (acc << BITS) | (u32::from(buf[i]) & Self::MASK);
            bits += BITS;
            if bits >= 8 {
                bits -= 8;
                buf[out] = (acc >> bits) as u8;
                out += 1;
                acc &= (1 << bits) - 1;
            }
        }

        let flag = if bits > 0 {
            buf[out] = (acc << (8 - bits)) as u8;
            out += 1;
            u8::from(bits <= Self::WIDTH.flag_threshold())
        } else {
            0
        };
        buf.truncate(out);
        buf.push(flag);
    }
}

/// Lazy decoder over a 5- or 6-bit buffer.
#[derive(Debug, Clone)]
pub struct StreamCodes<'a, const BITS: u32> {
    data: &'a [u8],
    pos: usize,
    acc: u32,
    bits: u32,
    remaining: usize,
}

impl<const BITS: u32> Iterator for StreamCodes<'_, BITS> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        while self.bits < BITS {
            let byte = self.data.get(self.pos).copied().unwrap_or(0);
            self.acc = (self.acc << 8) | u32::from(byte);
            self.pos += 1;
            self.bits += 8;
        }
        self.bits -= BITS;
        let code = (self.acc >> self.bits) & BitStream::<BITS>::MASK;
        self.acc &= (1 << self.bits) - 1;
        self.remaining -= 1;
        Some(code as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const BITS: u32> ExactSizeIterator for StreamCodes<'_, BITS> {}

impl<const BITS: u32> FusedIterator for StreamCodes<'_, BITS> {}

#[cfg(test)]
mod tests {
    use super::*;

    type Five = BitStream<5>;
    type Six = BitStream<6>;

    fn packed<L: Layout>(codes: &[u8]) -> Vec<u8> {
        let mut buf = codes.to_vec();
        L::pack_codes(&mut buf);
        buf
    }

    #[test]
    fn test_widths() {
        assert_eq!(Five::WIDTH, BitWidth::Five);
        assert_eq!(Six::WIDTH, BitWidth::Six);
    }

    #[test]
    fn test_five_bit_flags() {
        // residual bits per length: 1->5, 2->2, 3->7, 4->4, 5->1, 6->6, 7->3, 8->0
        let expected_flags = [0u8, 1, 0, 0, 1, 0, 1, 0];
        for (i, &flag) in expected_flags.iter().enumerate() {
            let buf = packed::<Five>(&vec![31; i + 1]);
            assert_eq!(*buf.last().unwrap(), flag, "len {}", i + 1);
            assert_eq!(Five::decoded_len(&buf), i + 1);
        }
    }

    #[test]
    fn test_six_bit_flags() {
        // residual bits per length: 1->6, 2->4, 3->2, 4->0
        let expected_flags = [0u8, 0, 1, 0];
        for (i, &flag) in expected_flags.iter().enumerate() {
            let buf = packed::<Six>(&vec![63; i + 1]);
            assert_eq!(*buf.last().unwrap(), flag, "len {}", i + 1);
            assert_eq!(Six::decoded_len(&buf), i + 1);
        }
    }

    #[test]
    fn test_msb_first_order() {
        assert_eq!(packed::<Five>(&[1, 2]), vec![0b0000_1000, 0b1000_0000, 0x01]);
        assert_eq!(packed::<Six>(&[1]), vec![0b0000_0100, 0x00]);
    }

    #[test]
    fn test_decoded_len_of_short_buffers() {
        assert_eq!(Five::decoded_len(&[]), 0);
        assert_eq!(Five::decoded_len(&[0x00]), 0);
        assert_eq!(Five::decoded_len(&[0x01]), 0);
        assert_eq!(Six::decoded_len(&[0xFF, 0x00]), 1);
    }

    #[test]
    fn test_every_length_round_trips() {
        for len in 0..80u8 {
            let five: Vec<u8> = (0..len).map(|i| i.wrapping_mul(7) % 32).collect();
            let buf = packed::<Five>(&five);
            assert_eq!(buf.len(), BitWidth::Five.packed_len(five.len()));
            assert_eq!(Five::codes(&buf).collect::<Vec<_>>(), five);

            let six: Vec<u8> = (0..len).map(|i| i.wrapping_mul(13) % 64).collect();
            let buf = packed::<Six>(&six);
            assert_eq!(buf.len(), BitWidth::Six.packed_len(six.len()));
            assert_eq!(Six::codes(&buf).collect::<Vec<_>>(), six);
        }
    }
}
