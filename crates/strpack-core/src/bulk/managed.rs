//! Cursor-tracking bulk packing.

use strpack_common::utils::error::{Error, Result};

use super::BulkCompressor;
use crate::codec::Compressor;

/// Appends batches to a destination, tracking where the next one goes.
///
/// The cursor only moves when a batch succeeds, so a rejected batch can be
/// fixed and retried at the same position.
///
/// # Example
///
/// ```
/// use strpack_core::bulk::ManagedBulkCompressor;
/// use strpack_core::codec::SixBitCodec;
///
/// let codec = SixBitCodec::new();
/// let mut destination = vec![None; 4];
/// let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);
/// managed.add_all(&["ALPHA", "BRAVO"])?;
/// managed.add_all(&["CHARLIE"])?;
/// assert_eq!(managed.position(), 3);
/// assert_eq!(managed.remaining(), 1);
///
/// assert_eq!(codec.search(&destination, "BRAVO"), Ok(1));
/// # Ok::<(), strpack_common::Error>(())
/// ```
pub struct ManagedBulkCompressor<'a, C: Compressor + ?Sized> {
    bulk: BulkCompressor<'a, C>,
    position: usize,
}

impl<'a, C: Compressor + ?Sized> ManagedBulkCompressor<'a, C> {
    /// Creates a managed compressor starting at the first slot.
    pub fn new(codec: &'a C, destination: &'a mut [Option<Vec<u8>>]) -> Self {
        Self {
            bulk: BulkCompressor::new(codec, destination),
            position: 0,
        }
    }

    /// Returns the index the next batch starts at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of free slots.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bulk.capacity() - self.position
    }

    /// Returns the destination, filled up to [`position`](Self::position).
    #[must_use]
    pub fn destination(&self) -> &[Option<Vec<u8>>] {
        self.bulk.destination()
    }

    /// Packs `source` at the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::Capacity`] if the batch does not fit, or a strict-mode
    /// rejection. The cursor is unchanged on error.
    pub fn add_all<T>(&mut self, source: &[T]) -> Result<()>
    where
        T: AsRef<[u8]> + Sync,
    {
        self.fits(source.len())?;
        self.bulk.compress_into(source, self.position)?;
        self.position += source.len();
        Ok(())
    }

    /// Packs `source` at the cursor, calling `callback(index, original,
    /// packed)` after each item.
    ///
    /// # Errors
    ///
    /// Same as [`add_all`](Self::add_all).
    pub fn add_all_with<T, F>(&mut self, source: &[T], callback: F) -> Result<()>
    where
        T: AsRef<[u8]> + Sync,
        F: Fn(usize, &[u8], &[u8]) + Sync,
    {
        self.fits(source.len())?;
        self.bulk.compress_into_with(source, self.position, callback)?;
        self.position += source.len();
        Ok(())
    }

    /// Packs owned strings at the cursor; see
    /// [`BulkCompressor::compress_owned_into`].
    ///
    /// # Errors
    ///
    /// Same as [`add_all`](Self::add_all).
    pub fn add_all_owned(&mut self, source: &mut [Option<Vec<u8>>]) -> Result<()> {
        self.fits(source.len())?;
        self.bulk.compress_owned_into(source, self.position)?;
        self.position += source.len();
        Ok(())
    }

    /// Packs owned strings at the cursor with a per-item callback.
    ///
    /// # Errors
    ///
    /// Same as [`add_all`](Self::add_all).
    pub fn add_all_owned_with<F>(&mut self, source: &mut [Option<Vec<u8>>], callback: F) -> Result<()>
    where
        F: Fn(usize, &[u8], &[u8]) + Sync,
    {
        self.fits(source.len())?;
        self.bulk
            .compress_owned_into_with(source, self.position, callback)?;
        self.position += source.len();
        Ok(())
    }

    fn fits(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(Error::Capacity {
                requested: len,
                offset: self.position,
                capacity: self.bulk.capacity(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{FiveBitCodec, FourBitCodec, SixBitCodec};
    use crate::search::signed_index;
    use strpack_common::CodecOptions;

    #[test]
    fn test_batches_append() {
        let codec = FourBitCodec::new();
        let mut destination = vec![None; 5];
        let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);

        managed.add_all(&["01", "02"]).unwrap();
        assert_eq!(managed.position(), 2);
        managed.add_all(&["03"]).unwrap();
        managed.add_all::<&str>(&[]).unwrap();
        assert_eq!(managed.position(), 3);
        assert_eq!(managed.remaining(), 2);

        let unpacked: Vec<Vec<u8>> = managed.destination()[..3]
            .iter()
            .map(|slot| codec.unpack(slot.as_deref().unwrap()))
            .collect();
        assert_eq!(unpacked, vec![b"01".to_vec(), b"02".to_vec(), b"03".to_vec()]);
    }

    #[test]
    fn test_overflow_keeps_cursor() {
        let codec = FiveBitCodec::new();
        let mut destination = vec![None; 3];
        let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);

        managed.add_all(&["A", "B"]).unwrap();
        let err = managed.add_all(&["C", "D"]).unwrap_err();
        assert_eq!(
            err,
            Error::Capacity {
                requested: 2,
                offset: 2,
                capacity: 3,
            }
        );
        assert_eq!(managed.position(), 2);

        managed.add_all(&["C"]).unwrap();
        assert_eq!(managed.remaining(), 0);
        assert!(managed.add_all(&["D"]).is_err());
    }

    #[test]
    fn test_strict_rejection_keeps_cursor() {
        let codec = FiveBitCodec::with_options(CodecOptions::default().with_strict(true));
        let mut destination = vec![None; 4];
        let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);

        assert!(managed.add_all(&["OK", "nope"]).is_err());
        assert_eq!(managed.position(), 0);
        managed.add_all(&["OK", "NOPE"]).unwrap();
        assert_eq!(managed.position(), 2);
    }

    #[test]
    fn test_owned_batches() {
        let codec = SixBitCodec::new();
        let mut destination = vec![None; 4];
        let mut first = vec![Some(b"APPLE".to_vec()), Some(b"BANANA".to_vec())];
        let mut second = vec![Some(b"CHERRY".to_vec())];

        let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);
        managed.add_all_owned(&mut first).unwrap();
        managed
            .add_all_owned_with(&mut second, |index, original, _| {
                assert_eq!(index, 0);
                assert_eq!(original, b"CHERRY");
            })
            .unwrap();
        assert_eq!(managed.position(), 3);
        assert!(first.iter().chain(&second).all(Option::is_none));

        assert_eq!(codec.search(&destination, "BANANA"), Ok(1));
        assert_eq!(codec.prefix_search(&destination, "CH"), Ok(2));
        assert_eq!(signed_index(codec.search(&destination, "DATE")), -4);
    }

    #[test]
    fn test_filled_destination_is_searchable() {
        let codec = FiveBitCodec::new();
        let mut words: Vec<String> = (0..1000).map(|i| format!("WORD {}", to_letters(i))).collect();
        words.sort();

        let mut destination = vec![None; words.len() + 10];
        let mut managed = ManagedBulkCompressor::new(&codec, &mut destination);
        for chunk in words.chunks(128) {
            managed
                .add_all_with(chunk, |_, original, packed| {
                    assert_eq!(codec.decoded_len(packed), original.len());
                })
                .unwrap();
        }
        assert_eq!(managed.remaining(), 10);

        for (i, word) in words.iter().enumerate() {
            assert_eq!(codec.search(&destination, word), Ok(i));
        }
    }

    /// Spells `n` with letters so every word stays inside the 5-bit alphabet.
    fn to_letters(mut n: usize) -> String {
        let mut out = Vec::new();
        loop {
            out.push(b'A' + (n % 26) as u8);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        out.reverse();
        String::from_utf8(out).unwrap()
    }
}
