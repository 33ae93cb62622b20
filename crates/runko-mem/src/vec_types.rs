mod dyn_array;
mod iter;
mod strategies;

pub use dyn_array::DynVec;
pub use iter::{Iter, IterMut};
pub use strategies::MemoryStrategy;
