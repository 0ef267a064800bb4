use thiserror::Error;

/// An index or bound fell outside `lower <= i < upper`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("Index {value} is out of range ({lower} <= i < {upper}).")]
pub struct IndexOutOfRange {
  pub value: usize,
  pub lower: usize,
  pub upper: usize,
}

impl IndexOutOfRange {
  pub fn new(value: usize, lower: usize, upper: usize) -> Self {
    Self { value, lower, upper }
  }

  /// Fails unless `index < length`.
  pub fn check(index: usize, length: usize) -> Result<(), Self> {
    if index < length { Ok(()) } else { Err(Self::new(index, 0, length)) }
  }
}
