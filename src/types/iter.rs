use core::{fmt, iter::FusedIterator};

use super::array::GrowableArray;

/// Owning iterator over a [GrowableArray], created by its `into_iter`.
///
/// Takes elements from the front with [GrowableArray::move_front], so each step is constant time.
pub struct IntoIter<T> {
  array: GrowableArray<T>,
}

impl<T> IntoIter<T> {
  pub(crate) fn new(array: GrowableArray<T>) -> Self {
    Self { array }
  }

  /// The elements that have not been yielded yet.
  pub fn as_slice(&self) -> &[T] {
    self.array.as_slice()
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.array.is_empty() {
      return None;
    }

    Some(self.array.move_front())
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.array.len(), Some(self.array.len()))
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  fn next_back(&mut self) -> Option<T> {
    self.array.pop()
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
  }
}
