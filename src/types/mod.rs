use core::cmp;

pub mod array;
pub mod iter;

/// How a [GrowableArray](array::GrowableArray) picks its new capacity when an append does not fit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthStrategy {
  /// Grow the capacity of the array by exactly the amount that is needed
  #[default]
  Exact,
  /// Grow the capacity of the array to 2 * the previous capacity, or the exact capacity that is required, whichever is larger.
  Exponential,
}

impl GrowthStrategy {
  pub fn calculate_new_capacity(&self, capacity: usize, additional: usize) -> Option<usize> {
    let min_capacity = capacity.checked_add(additional)?;
    match self {
      GrowthStrategy::Exact => Some(min_capacity),
      GrowthStrategy::Exponential => Some(cmp::max(capacity.checked_mul(2)?, min_capacity)),
    }
  }
}
