//! Contains the declaration of [`OffsetsBuilder`].

use crate::error::{GeoColumnError, Result};

/// A wrapper type of [`Vec<i32>`] representing the invariants of an offset array.
/// It is guaranteed to (sound to assume that):
/// * the first element is 0
/// * every element is `>= 0`
/// * element at position `i` is >= than element at position `i-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetsBuilder(Vec<i32>);

impl Default for OffsetsBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetsBuilder {
    /// Returns an empty [`OffsetsBuilder`] (i.e. with a single element, the zero)
    #[inline]
    pub fn new() -> Self {
        Self(vec![0])
    }

    /// Returns a new [`OffsetsBuilder`] with a capacity, allocating at least `capacity + 1`
    /// entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut offsets = Vec::with_capacity(capacity + 1);
        offsets.push(0);
        Self(offsets)
    }

    /// Pushes a new element with a given length.
    ///
    /// # Errors
    ///
    /// This function errors iff the new last item does not fit in an `i32`.
    #[inline]
    pub fn try_push_usize(&mut self, length: usize) -> Result<()> {
        let length = i32::try_from(length).map_err(|_| GeoColumnError::Overflow)?;
        let new_length = self
            .last()
            .checked_add(length)
            .ok_or(GeoColumnError::Overflow)?;
        self.0.push(new_length);
        Ok(())
    }

    /// Extends itself with `additional` elements equal to the last offset.
    /// This is useful to extend offsets with empty values, e.g. for empty geometries.
    #[inline]
    pub fn extend_constant(&mut self, additional: usize) {
        let offset = self.last();
        if additional == 1 {
            self.0.push(offset)
        } else {
            self.0.resize(self.len() + additional, offset)
        }
    }

    /// Returns the last offset of this container.
    #[inline]
    pub fn last(&self) -> i32 {
        match self.0.last() {
            Some(element) => *element,
            // The inner Vec always holds at least the leading zero.
            None => unreachable!(),
        }
    }

    /// Returns a range (start, end) corresponding to the position `index`
    ///
    /// # Panics
    ///
    /// This function panics iff `index >= self.len_proxy()`
    #[inline]
    pub fn start_end(&self, index: usize) -> (usize, usize) {
        assert!(index < self.len_proxy());
        (self.0[index] as usize, self.0[index + 1] as usize)
    }

    /// Returns the length an array with these offsets would be.
    #[inline]
    pub fn len_proxy(&self) -> usize {
        self.0.len() - 1
    }

    /// Returns the number of offsets in this container.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len_proxy() == 0
    }

    /// Returns the inner [`Vec`].
    #[inline]
    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_and_ranges() {
        let mut offsets = OffsetsBuilder::new();
        offsets.try_push_usize(2).unwrap();
        offsets.try_push_usize(0).unwrap();
        offsets.try_push_usize(3).unwrap();

        assert_eq!(offsets.len_proxy(), 3);
        assert_eq!(offsets.start_end(0), (0, 2));
        assert_eq!(offsets.start_end(1), (2, 2));
        assert_eq!(offsets.start_end(2), (2, 5));
        assert_eq!(offsets.into_inner(), vec![0, 2, 2, 5]);
    }

    #[test]
    fn extend_constant_keeps_last() {
        let mut offsets = OffsetsBuilder::new();
        offsets.try_push_usize(4).unwrap();
        offsets.extend_constant(2);
        assert_eq!(offsets.into_inner(), vec![0, 4, 4, 4]);
    }

    #[test]
    fn overflow() {
        let mut offsets = OffsetsBuilder::new();
        assert!(matches!(
            offsets.try_push_usize(usize::MAX),
            Err(GeoColumnError::Overflow)
        ));
    }
}
