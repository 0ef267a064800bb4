#![no_std]

extern crate alloc;
#[cfg(test)]
#[macro_use]
#[allow(unused)]
extern crate std;

pub mod error;
pub mod types;

pub use zerocopy;

pub mod prelude {
  pub use crate::{
    error::IndexOutOfRange, types::{GrowthStrategy, array::GrowableArray, iter::IntoIter}
  };
  pub use zerocopy::FromZeros;
}

#[doc(inline)]
pub use prelude::*;
