//! Offset-addressed bulk packing.

use rayon::prelude::*;
use strpack_common::utils::error::{Error, Result};

use crate::codec::Compressor;

/// Packs batches of strings in parallel into a destination slice.
///
/// Every item is packed on the rayon pool into its own destination slot;
/// the call returns once the whole batch is done. Callbacks run on the
/// worker threads, so the index they receive arrives in no particular order.
pub struct BulkCompressor<'a, C: Compressor + ?Sized> {
    codec: &'a C,
    destination: &'a mut [Option<Vec<u8>>],
}

impl<'a, C: Compressor + ?Sized> BulkCompressor<'a, C> {
    /// Creates a bulk compressor writing into `destination`.
    pub fn new(codec: &'a C, destination: &'a mut [Option<Vec<u8>>]) -> Self {
        Self { codec, destination }
    }

    /// Returns the codec.
    #[must_use]
    pub fn codec(&self) -> &C {
        self.codec
    }

    /// Returns the destination.
    #[must_use]
    pub fn destination(&self) -> &[Option<Vec<u8>>] {
        self.destination
    }

    /// Returns the number of destination slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.destination.len()
    }

    /// Packs `source` into `destination[start..start + source.len()]`.
    ///
    /// # Errors
    ///
    /// [`Error::Capacity`] if the batch does not fit, before anything is
    /// written. In strict mode, the error of a rejected item; other items
    /// of the batch may already have been written.
    pub fn compress_into<T>(&mut self, source: &[T], start: usize) -> Result<()>
    where
        T: AsRef<[u8]> + Sync,
    {
        self.compress_into_with(source, start, |_, _, _| {})
    }

    /// Like [`compress_into`](Self::compress_into), calling
    /// `callback(index, original, packed)` after each item.
    ///
    /// `index` is relative to the batch, not to the destination.
    ///
    /// # Errors
    ///
    /// Same as [`compress_into`](Self::compress_into).
    pub fn compress_into_with<T, F>(&mut self, source: &[T], start: usize, callback: F) -> Result<()>
    where
        T: AsRef<[u8]> + Sync,
        F: Fn(usize, &[u8], &[u8]) + Sync,
    {
        let codec = self.codec;
        let slots = self.batch_slots(start, source.len())?;

        slots
            .par_iter_mut()
            .zip(source.par_iter())
            .enumerate()
            .try_for_each(|(index, (slot, item))| {
                let original = item.as_ref();
                let packed = codec
                    .pack(original)
                    .inspect_err(|e| tracing::warn!(index, error = %e, "bulk item rejected"))?;
                callback(index, original, packed.as_slice());
                *slot = Some(packed);
                Ok(())
            })?;

        tracing::trace!(items = source.len(), start, "bulk batch packed");
        Ok(())
    }

    /// Packs owned strings into `destination[start..start + source.len()]`.
    ///
    /// Unless the codec preserves originals, each source slot is taken and
    /// its allocation reused for the packed form. Absent source slots leave
    /// the matching destination slot absent.
    ///
    /// # Errors
    ///
    /// Same as [`compress_into`](Self::compress_into). A rejected item keeps
    /// its source slot.
    pub fn compress_owned_into(&mut self, source: &mut [Option<Vec<u8>>], start: usize) -> Result<()> {
        self.compress_owned_batch(source, start, None::<&fn(usize, &[u8], &[u8])>)
    }

    /// Like [`compress_owned_into`](Self::compress_owned_into), calling
    /// `callback(index, original, packed)` after each present item.
    ///
    /// The original has to stay alive for the callback, so packing happens
    /// in a fresh buffer even when the source slot is consumed.
    ///
    /// # Errors
    ///
    /// Same as [`compress_owned_into`](Self::compress_owned_into).
    pub fn compress_owned_into_with<F>(
        &mut self,
        source: &mut [Option<Vec<u8>>],
        start: usize,
        callback: F,
    ) -> Result<()>
    where
        F: Fn(usize, &[u8], &[u8]) + Sync,
    {
        self.compress_owned_batch(source, start, Some(&callback))
    }

    fn compress_owned_batch<F>(
        &mut self,
        source: &mut [Option<Vec<u8>>],
        start: usize,
        callback: Option<&F>,
    ) -> Result<()>
    where
        F: Fn(usize, &[u8], &[u8]) + Sync,
    {
        let items = source.len();
        let codec = self.codec;
        let slots = self.batch_slots(start, items)?;
        let preserve = codec.options().preserve_original;

        slots
            .par_iter_mut()
            .zip(source.par_iter_mut())
            .enumerate()
            .try_for_each(|(index, (slot, item))| {
                let Some(original) = item.take() else {
                    *slot = None;
                    return Ok(());
                };

                let packed = if preserve || callback.is_some() {
                    match codec.pack(&original) {
                        Ok(packed) => {
                            if let Some(callback) = callback {
                                callback(index, original.as_slice(), packed.as_slice());
                            }
                            if preserve {
                                *item = Some(original);
                            }
                            packed
                        }
                        Err(e) => {
                            *item = Some(original);
                            return Err(e);
                        }
                    }
                } else {
                    if let Err(e) = check_strict(codec, &original) {
                        *item = Some(original);
                        return Err(e);
                    }
                    codec.pack_owned(original)?
                };

                *slot = Some(packed);
                Ok(())
            })
            .inspect_err(|e| tracing::warn!(error = %e, start, "owned bulk batch rejected"))?;

        tracing::trace!(items, start, preserve, "owned bulk batch packed");
        Ok(())
    }

    /// Returns the destination window for a batch, or a capacity error.
    fn batch_slots(&mut self, start: usize, len: usize) -> Result<&mut [Option<Vec<u8>>]> {
        let capacity = self.destination.len();
        let end = start
            .checked_add(len)
            .filter(|&end| end <= capacity)
            .ok_or(Error::Capacity {
                requested: len,
                offset: start,
                capacity,
            })?;

        tracing::debug!(
            items = len,
            start,
            capacity,
            width = %self.codec.width(),
            "dispatching bulk batch"
        );
        Ok(&mut self.destination[start..end])
    }
}

/// Rejects `input` up front in strict mode, before its buffer is consumed.
fn check_strict<C: Compressor + ?Sized>(codec: &C, input: &[u8]) -> Result<()> {
    if !codec.options().strict {
        return Ok(());
    }
    match codec.alphabet().position_of_unsupported(input) {
        Some(position) => Err(Error::rejected_character(input, position)),
        None => Ok(()),
    }
}
