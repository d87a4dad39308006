//! Default symbol sets.
//!
//! The position of a symbol is its packed code. Search compares decoded
//! symbol bytes, so collections must be sorted by plain byte order no matter
//! how the symbols are arranged here.

use super::BitWidth;

/// Default 4-bit set: digits followed by `;`, `#`, `-`, `+`, `.`, `,`.
pub const DEFAULT_4BIT: &[u8; 16] = b"0123456789;#-+.,";

/// The default 4-bit symbols in ASCII order, so codes sort like the bytes.
pub const SORTED_4BIT: &[u8; 16] = b"#+,-.0123456789;";

/// Default 5-bit set (ASCII order): space, `'`, `,`, `-`, `.`, `@` and `A`..`Z`.
pub const DEFAULT_5BIT: &[u8; 32] = b" ',-.@ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lower-case counterpart of [`DEFAULT_5BIT`].
pub const DEFAULT_5BIT_LOWERCASE: &[u8; 32] = b" ',-.@abcdefghijklmnopqrstuvwxyz";

/// Default 6-bit set (ASCII order): space through `@`, `A`..`Z` and `[`, `]`, `_`, `{`, `}`.
pub const DEFAULT_6BIT: &[u8; 64] =
    b" !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]_{}";

/// Lower-case counterpart of [`DEFAULT_6BIT`].
pub const DEFAULT_6BIT_LOWERCASE: &[u8; 64] =
    b" !\"#$%&'()*+,-./0123456789:;<=>?@abcdefghijklmnopqrstuvwxyz[]_{}";

/// Returns the default symbol set for a width.
#[must_use]
pub const fn default_for(width: BitWidth) -> &'static [u8] {
    match width {
        BitWidth::Four => DEFAULT_4BIT,
        BitWidth::Five => DEFAULT_5BIT,
        BitWidth::Six => DEFAULT_6BIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes_match_width() {
        for width in BitWidth::ALL {
            assert_eq!(default_for(width).len(), width.symbol_count());
        }
        assert_eq!(DEFAULT_5BIT_LOWERCASE.len(), 32);
        assert_eq!(DEFAULT_6BIT_LOWERCASE.len(), 64);
    }

    #[test]
    fn test_sorted_sets_are_ascending() {
        for set in [
            &SORTED_4BIT[..],
            &DEFAULT_5BIT[..],
            &DEFAULT_5BIT_LOWERCASE[..],
            &DEFAULT_6BIT[..],
        ] {
            assert!(set.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
