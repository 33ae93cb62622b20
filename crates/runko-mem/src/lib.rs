pub mod vec_types;

mod macros;
mod capacity_error;
mod raw_block;

pub use capacity_error::CapacityError;
pub use raw_block::RawBlock;
pub use vec_types::{DynVec, Iter, IterMut, MemoryStrategy};
