//! Binary search over sorted collections of packed strings.
//!
//! The collection must be sorted by the plain byte order of the original
//! strings. Each probe decodes the candidate lazily and stops at the first
//! differing symbol, so most probes touch only a few bytes.
//!
//! Collections are anything implementing [`PackedCollection`]: slices,
//! vectors and arrays of [`PackedSlot`] items. Absent slots (`None`) sort
//! after every key, which lets a partly filled bulk destination be searched
//! directly.

use std::cmp::Ordering;

use bytes::Bytes;
use strpack_common::types::Alphabet;

use crate::codec::Layout;

/// One element of a packed collection.
pub trait PackedSlot {
    /// Returns the packed bytes, or `None` for an absent slot.
    fn packed(&self) -> Option<&[u8]>;
}

impl PackedSlot for [u8] {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> PackedSlot for [u8; N] {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl PackedSlot for Vec<u8> {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl PackedSlot for Box<[u8]> {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl PackedSlot for Bytes {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<T: PackedSlot + ?Sized> PackedSlot for &T {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        (**self).packed()
    }
}

impl<T: PackedSlot> PackedSlot for Option<T> {
    #[inline]
    fn packed(&self) -> Option<&[u8]> {
        self.as_ref().and_then(PackedSlot::packed)
    }
}

/// A random-access collection of packed strings.
///
/// Object safe, so width-erased codecs can search `&dyn PackedCollection`.
pub trait PackedCollection {
    /// Returns the number of slots.
    fn len(&self) -> usize;

    /// Returns true if there are no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the packed bytes at `index`, or `None` if the slot is absent.
    fn packed(&self, index: usize) -> Option<&[u8]>;
}

impl<S: PackedSlot> PackedCollection for [S] {
    #[inline]
    fn len(&self) -> usize {
        <[S]>::len(self)
    }

    #[inline]
    fn packed(&self, index: usize) -> Option<&[u8]> {
        self.get(index).and_then(PackedSlot::packed)
    }
}

impl<S: PackedSlot> PackedCollection for Vec<S> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn packed(&self, index: usize) -> Option<&[u8]> {
        PackedCollection::packed(self.as_slice(), index)
    }
}

impl<S: PackedSlot, const N: usize> PackedCollection for [S; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn packed(&self, index: usize) -> Option<&[u8]> {
        PackedCollection::packed(self.as_slice(), index)
    }
}

/// How a candidate whose leading symbols equal the whole key is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Lengths must be equal as well.
    #[default]
    Exact,
    /// Any candidate starting with the key matches.
    Prefix,
}

/// Binary search for `key` in a sorted packed collection.
///
/// Probes follow the classic `mid = (low + high) / 2` sequence over
/// inclusive bounds, so on collections with duplicates the returned index is
/// deterministic. Returns `Ok(index)` on a match and `Err(insertion_point)`
/// otherwise.
pub fn locate<L, C>(
    alphabet: &Alphabet,
    collection: &C,
    key: &[u8],
    mode: SearchMode,
) -> Result<usize, usize>
where
    L: Layout,
    C: PackedCollection + ?Sized,
{
    let mut low = 0;
    let mut high = collection.len();
    while low < high {
        let mid = low + (high - 1 - low) / 2;
        match probe::<L>(alphabet, collection.packed(mid), key, mode) {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Ok(mid),
        }
    }
    Err(low)
}

/// Orders one candidate against the key.
fn probe<L: Layout>(
    alphabet: &Alphabet,
    candidate: Option<&[u8]>,
    key: &[u8],
    mode: SearchMode,
) -> Ordering {
    let Some(packed) = candidate else {
        return Ordering::Greater;
    };

    let len = L::decoded_len(packed);
    for (code, &expected) in L::codes(packed).zip(key) {
        match alphabet.symbol(code).cmp(&expected) {
            Ordering::Equal => {}
            other => return other,
        }
    }

    match mode {
        SearchMode::Prefix if key.len() <= len => Ordering::Equal,
        _ => len.cmp(&key.len()),
    }
}

/// Converts a search result to the signed form `index` or
/// `-(insertion_point) - 1`.
#[must_use]
pub fn signed_index(result: Result<usize, usize>) -> isize {
    let to_signed = |i: usize| isize::try_from(i).unwrap_or(isize::MAX);
    match result {
        Ok(index) => to_signed(index),
        Err(insertion_point) => -to_signed(insertion_point) - 1,
    }
}
