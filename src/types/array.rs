use alloc::{boxed::Box, vec::Vec};
use core::{
  cmp, fmt::{self, Debug}, hash::{Hash, Hasher}, iter::Enumerate, mem::{self, MaybeUninit}, ops::{Bound, Deref, DerefMut, RangeBounds}, ptr, slice
};

use log::{debug, trace};
use zerocopy::FromZeros;

use crate::{error::IndexOutOfRange, types::{GrowthStrategy, iter::IntoIter}};

/// A contiguous, growable array of `T`.
///
/// The live elements occupy `buffer[head .. head + length]`. Slots outside that window are
/// uninitialised or hold values that have already been moved out or zeroed, and are never read as `T`.
/// `pop_front` advances `head`; appends compact the window back to slot 0 before they reallocate.
pub struct GrowableArray<T> {
  buffer: Box<[MaybeUninit<T>]>,
  head: usize,
  length: usize,
  growth_strategy: GrowthStrategy,
}

impl<T> GrowableArray<T> {
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  /// Creates an empty array with exactly `capacity` slots.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buffer: Box::new_uninit_slice(capacity),
      head: 0,
      length: 0,
      growth_strategy: GrowthStrategy::default(),
    }
  }

  /// Creates an array holding clones of `items`, with capacity equal to their count.
  pub fn from_slice(items: &[T]) -> Self
  where
    T: Clone,
  {
    Self::with_capacity_from(items.len(), items)
  }

  /// Creates an array with `capacity` slots holding clones of `items`.
  ///
  /// # Panics
  ///
  /// Panics if `capacity` is smaller than `items.len()`.
  pub fn with_capacity_from(capacity: usize, items: &[T]) -> Self
  where
    T: Clone,
  {
    assert!(
      capacity >= items.len(),
      "capacity {capacity} cannot hold {} initial items",
      items.len()
    );

    let mut array = Self::with_capacity(capacity);
    array.add_all(items);
    array
  }

  pub fn with_growth_strategy(mut self, strategy: GrowthStrategy) -> Self {
    self.growth_strategy = strategy;
    self
  }

  pub fn growth_strategy(&self) -> GrowthStrategy {
    self.growth_strategy
  }

  pub fn set_growth_strategy(&mut self, strategy: GrowthStrategy) {
    self.growth_strategy = strategy;
  }

  pub fn len(&self) -> usize {
    self.length
  }

  pub fn capacity(&self) -> usize {
    self.buffer.len()
  }

  /// Number of appends that can happen before the next reallocation.
  pub fn free_capacity(&self) -> usize {
    self.buffer.len() - self.length
  }

  pub fn is_empty(&self) -> bool {
    self.length == 0
  }

  pub fn is_full(&self) -> bool {
    self.buffer.len() <= self.length
  }

  pub fn as_ptr(&self) -> *const T {
    // Safety: head <= buffer.len(), so the result is in bounds or one past the end
    unsafe { self.buffer.as_ptr().cast::<T>().add(self.head) }
  }

  pub fn as_mut_ptr(&mut self) -> *mut T {
    // Safety: see as_ptr
    unsafe { self.buffer.as_mut_ptr().cast::<T>().add(self.head) }
  }

  pub fn as_slice(&self) -> &[T] {
    // Safety: the slots in head..head + length are initialised
    unsafe { slice::from_raw_parts(self.as_ptr(), self.length) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [T] {
    // Safety: see as_slice
    unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.length) }
  }

  /// The slots after the last element.
  pub fn spare_capacity(&self) -> &[MaybeUninit<T>] {
    &self.buffer[self.head + self.length..]
  }

  /// Makes room for `additional` more elements at the end of the array.
  ///
  /// Slots released by [pop_front](Self::pop_front) are reused by moving the elements back to the
  /// start of the buffer. Only when the whole buffer is too small is it reallocated, to the
  /// capacity picked by the array's [GrowthStrategy].
  pub fn reserve(&mut self, additional: usize) {
    if self.buffer.len() - self.head - self.length >= additional {
      return;
    }

    let required = self.length.checked_add(additional).expect("capacity overflow");
    if required <= self.buffer.len() {
      self.compact();
      return;
    }

    let capacity = self
      .growth_strategy
      .calculate_new_capacity(self.buffer.len(), required - self.buffer.len())
      .expect("capacity overflow");

    self.reallocate(capacity);
  }

  fn compact(&mut self) {
    if self.head == 0 {
      return;
    }

    trace!("compacting {} elements from slot {} to slot 0", self.length, self.head);

    // Safety: both ranges lie inside the buffer; ptr::copy allows them to overlap
    unsafe {
      let base = self.buffer.as_mut_ptr().cast::<T>();
      ptr::copy(base.add(self.head), base, self.length);
    }
    self.head = 0;
  }

  fn reallocate(&mut self, capacity: usize) {
    debug_assert!(capacity >= self.length);
    trace!("reallocating buffer from {} to {} slots", self.buffer.len(), capacity);

    let mut buffer: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(capacity);

    // Safety: the new buffer is a separate allocation with room for every live element.
    // The old buffer is freed without dropping anything, so each element now lives only in the new one.
    unsafe { ptr::copy_nonoverlapping(self.as_ptr(), buffer.as_mut_ptr().cast::<T>(), self.length) };

    self.buffer = buffer;
    self.head = 0;
  }

  /// Appends `value` without reallocating, handing it back if the array is full.
  ///
  /// Slots freed at the front still count: the elements are moved back to slot 0 to reach them.
  pub fn push_within_capacity(&mut self, value: T) -> Result<(), T> {
    if self.is_full() {
      return Err(value);
    }

    self.reserve(1);
    // Safety: reserve(1) left a free slot directly after the last element
    unsafe { self.as_mut_ptr().add(self.length).write(value) };
    self.length += 1;

    Ok(())
  }

  pub fn add(&mut self, item: T) {
    self.reserve(1);
    // Safety: reserve(1) left a free slot directly after the last element
    unsafe { self.as_mut_ptr().add(self.length).write(item) };
    self.length += 1;
  }

  /// Appends clones of `items`.
  ///
  /// The items that fit in the free capacity are written in place first; the remainder is
  /// appended after a single reallocation.
  pub fn add_all(&mut self, items: &[T])
  where
    T: Clone,
  {
    let (prefix, remainder) = items.split_at(cmp::min(items.len(), self.free_capacity()));

    for item in prefix {
      let Ok(_) = self.push_within_capacity(item.clone()) else {
        unreachable!("prefix exceeded the free capacity");
      };
    }

    if remainder.is_empty() {
      return;
    }

    self.reserve(remainder.len());
    for item in remainder {
      let Ok(_) = self.push_within_capacity(item.clone()) else {
        unreachable!("not enough space after reserving");
      };
    }
  }

  pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
    IndexOutOfRange::check(index, self.length)?;
    Ok(&self.as_slice()[index])
  }

  pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
    IndexOutOfRange::check(index, self.length)?;
    Ok(&mut self.as_mut_slice()[index])
  }

  /// Overwrites the element at `index`, returning the element it replaced.
  pub fn set(&mut self, value: T, index: usize) -> Result<T, IndexOutOfRange> {
    let slot = self.get_mut(index)?;
    Ok(mem::replace(slot, value))
  }

  /// Inserts `item` at `index`, shifting every later element one slot to the right.
  ///
  /// `index == len()` appends. Anything past that fails with the range `0 <= i < len() + 1`.
  pub fn insert(&mut self, item: T, index: usize) -> Result<(), IndexOutOfRange> {
    if index > self.length {
      return Err(IndexOutOfRange::new(index, 0, self.length + 1));
    }

    self.reserve(1);
    // Safety: reserve(1) guarantees a free slot after the last element to shift into
    unsafe {
      let slot = self.as_mut_ptr().add(index);
      ptr::copy(slot, slot.add(1), self.length - index);
      slot.write(item);
    }
    self.length += 1;

    Ok(())
  }

  /// Removes the element at `index`, shifting every later element one slot to the left.
  pub fn remove_nth(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
    IndexOutOfRange::check(index, self.length)?;

    // Safety: index < length; the removed slot is overwritten by the shift, and the last slot
    // leaves the live window
    let item = unsafe {
      let slot = self.as_mut_ptr().add(index);
      let item = slot.read();
      ptr::copy(slot.add(1), slot, self.length - index - 1);
      item
    };
    self.length -= 1;

    Ok(item)
  }

  pub fn pop(&mut self) -> Option<T> {
    if self.is_empty() {
      return None;
    }

    self.length -= 1;
    // Safety: the slot just left the live window and is read exactly once
    Some(unsafe { self.as_ptr().add(self.length).read() })
  }

  /// Keeps only the elements for which `keep` returns true, preserving their order.
  /// Returns how many elements were removed.
  pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
    // a panicking predicate or destructor leaks the remaining elements instead of double dropping them
    let length = mem::replace(&mut self.length, 0);
    let base = self.as_mut_ptr();

    let mut kept = 0;
    for index in 0..length {
      // Safety: index < length, and every slot below `kept` already holds a kept element
      unsafe {
        let slot = base.add(index);
        if keep(&*slot) {
          if kept != index {
            ptr::copy_nonoverlapping(slot, base.add(kept), 1);
          }
          kept += 1;
        } else {
          ptr::drop_in_place(slot);
        }
      }
    }

    self.length = kept;
    length - kept
  }

  /// Removes every element equal to `item`. Returns how many were removed.
  pub fn remove_all_of(&mut self, item: &T) -> usize
  where
    T: PartialEq,
  {
    self.retain(|element| element != item)
  }

  pub fn contains(&self, item: &T) -> bool
  where
    T: PartialEq,
  {
    self.as_slice().contains(item)
  }

  pub fn index_of(&self, item: &T) -> Option<usize>
  where
    T: PartialEq,
  {
    self.as_slice().iter().position(|element| element == item)
  }

  fn drop_elements(&mut self) {
    let elements: *mut [T] = self.as_mut_slice();
    self.length = 0;
    self.head = 0;

    // Safety: the elements left the live window above, so they are dropped exactly once
    unsafe { ptr::drop_in_place(elements) };
  }

  /// Drops every element and replaces the buffer with one of exactly `new_capacity` slots.
  pub fn clear(&mut self, new_capacity: usize) {
    debug!("clearing {} elements, new capacity {}", self.length, new_capacity);

    self.drop_elements();
    self.buffer = Box::new_uninit_slice(new_capacity);
  }

  /// Drops every element but keeps the buffer and its capacity.
  pub fn purge(&mut self) {
    debug!("purging {} elements, keeping capacity {}", self.length, self.buffer.len());
    self.drop_elements();
  }

  /// Like [purge](Self::purge), then fills every slot with the all-zero value of `T`
  /// (`None` for `Option<Box<_>>`, `0` for integers).
  pub fn purge_zeroed(&mut self)
  where
    T: FromZeros,
  {
    self.purge();

    for slot in self.buffer.iter_mut() {
      slot.write(T::new_zeroed());
    }
  }

  /// # Panics
  ///
  /// Panics if the array is empty.
  pub fn front(&self) -> &T {
    assert!(!self.is_empty(), "front of an empty array");
    &self.as_slice()[0]
  }

  /// # Panics
  ///
  /// Panics if the array is empty.
  pub fn front_mut(&mut self) -> &mut T {
    assert!(!self.is_empty(), "front of an empty array");
    &mut self.as_mut_slice()[0]
  }

  /// Drops the first element.
  ///
  /// # Panics
  ///
  /// Panics if the array is empty.
  pub fn pop_front(&mut self) {
    assert!(!self.is_empty(), "pop_front on an empty array");
    mem::drop(self.take_front());
  }

  /// Removes and returns the first element in constant time.
  ///
  /// # Panics
  ///
  /// Panics if the array is empty.
  pub fn move_front(&mut self) -> T {
    assert!(!self.is_empty(), "move_front on an empty array");
    self.take_front()
  }

  fn take_front(&mut self) -> T {
    debug_assert!(!self.is_empty());

    // Safety: callers checked the array is not empty, and the slot leaves the live window right after the read
    let item = unsafe { self.as_ptr().read() };
    self.length -= 1;
    self.head = if self.length == 0 { 0 } else { self.head + 1 };

    item
  }

  /// Element-wise comparison against any sequence that can be viewed as a slice.
  pub fn equals<U>(&self, other: &[U]) -> bool
  where
    T: PartialEq<U>,
  {
    self.as_slice() == other
  }

  /// Borrows the elements in `range`.
  ///
  /// # Panics
  ///
  /// Panics if the lower bound is greater than the upper bound.
  pub fn slice(&self, range: impl RangeBounds<usize>) -> Result<&[T], IndexOutOfRange> {
    let (lower, upper) = self.bounds(range)?;
    Ok(&self.as_slice()[lower..upper])
  }

  /// Mutably borrows the elements in `range`.
  ///
  /// # Panics
  ///
  /// Panics if the lower bound is greater than the upper bound.
  pub fn slice_mut(&mut self, range: impl RangeBounds<usize>) -> Result<&mut [T], IndexOutOfRange> {
    let (lower, upper) = self.bounds(range)?;
    Ok(&mut self.as_mut_slice()[lower..upper])
  }

  fn bounds(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize), IndexOutOfRange> {
    let lower = match range.start_bound() {
      Bound::Included(&lower) => lower,
      Bound::Excluded(&lower) => lower.saturating_add(1),
      Bound::Unbounded => 0,
    };
    let upper = match range.end_bound() {
      // saturating: usize::MAX is past any length, so it is reported below rather than overflowing
      Bound::Included(&upper) => upper.saturating_add(1),
      Bound::Excluded(&upper) => upper,
      Bound::Unbounded => self.length,
    };

    assert!(lower <= upper, "slice lower bound {lower} is greater than upper bound {upper}");

    if upper > self.length {
      return Err(IndexOutOfRange::new(upper, 0, self.length + 1));
    }

    Ok((lower, upper))
  }

  /// Copies the elements into a new [Vec] that shares nothing with the array.
  pub fn to_array(&self) -> Vec<T>
  where
    T: Clone,
  {
    self.as_slice().to_vec()
  }

  /// An independent copy with the same capacity, growth strategy and elements.
  pub fn dup(&self) -> Self
  where
    T: Clone,
  {
    self.clone()
  }

  /// Iterates over `(index, element)` pairs.
  pub fn indexed(&self) -> Enumerate<slice::Iter<'_, T>> {
    self.as_slice().iter().enumerate()
  }
}

impl<T> Drop for GrowableArray<T> {
  fn drop(&mut self) {
    let elements: *mut [T] = self.as_mut_slice();
    // Safety: the array is never used again
    unsafe { ptr::drop_in_place(elements) };
  }
}

impl<T> Default for GrowableArray<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone> Clone for GrowableArray<T> {
  fn clone(&self) -> Self {
    let mut copy = Self::with_capacity(self.capacity()).with_growth_strategy(self.growth_strategy);
    copy.add_all(self.as_slice());
    copy
  }
}

impl<T> Deref for GrowableArray<T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> DerefMut for GrowableArray<T> {
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
  fn as_ref(&self) -> &[T] {
    self
  }
}

impl<T> AsMut<[T]> for GrowableArray<T> {
  fn as_mut(&mut self) -> &mut [T] {
    self
  }
}

impl<T: Debug> Debug for GrowableArray<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.as_slice().fmt(f)
  }
}

impl<T: PartialEq<U>, U> PartialEq<GrowableArray<U>> for GrowableArray<T> {
  fn eq(&self, other: &GrowableArray<U>) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for GrowableArray<T> {
  fn eq(&self, other: &[U]) -> bool {
    self.as_slice() == other
  }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for GrowableArray<T> {
  fn eq(&self, other: &&[U]) -> bool {
    self.as_slice() == *other
  }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for GrowableArray<T> {
  fn eq(&self, other: &[U; N]) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for GrowableArray<T> {
  fn eq(&self, other: &Vec<U>) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: Hash> Hash for GrowableArray<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.as_slice().hash(state)
  }
}

impl<T> Extend<T> for GrowableArray<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
    let items = items.into_iter();
    self.reserve(items.size_hint().0);

    for item in items {
      self.add(item);
    }
  }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowableArray<T> {
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, items: I) {
    self.extend(items.into_iter().copied());
  }
}

impl<T> FromIterator<T> for GrowableArray<T> {
  fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
    let mut array = Self::new();
    array.extend(items);
    array
  }
}

impl<T> From<Vec<T>> for GrowableArray<T> {
  fn from(items: Vec<T>) -> Self {
    items.into_iter().collect()
  }
}

impl<T, const N: usize> From<[T; N]> for GrowableArray<T> {
  fn from(items: [T; N]) -> Self {
    items.into_iter().collect()
  }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
  fn from(items: &[T]) -> Self {
    Self::from_slice(items)
  }
}

impl<T> IntoIterator for GrowableArray<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> slice::Iter<'a, T> {
    self.as_slice().iter()
  }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> slice::IterMut<'a, T> {
    self.as_mut_slice().iter_mut()
  }
}
