use core::ptr::NonNull;

use std::alloc::{Layout, alloc, dealloc};

use crate::{
    CapacityError,
    const_assert,
    size_of,
};

use CapacityError::{AllocFailed, ZeroSizedElement};

/// An owned allocation with room for exactly `capacity` elements.
/// Never constructs or drops elements in its slots.
pub struct RawBlock<T> {
    data: NonNull<T>,
    capacity: usize,
}

const_assert!(size_of!(RawBlock<u32>) == size_of!(Option<RawBlock<u32>>));

impl<T> RawBlock<T> {

    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
        }
    }

    pub fn allocate(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Ok(Self::new())
        }
        if size_of::<T>() == 0 {
            return Err(ZeroSizedElement)
        }
        let layout = match Layout::array::<T>(capacity) {
            Ok(l) => l,
            Err(_) => return Err(AllocFailed { new_capacity: capacity }),
        };
        let ptr = unsafe { alloc(layout) };
        let data = match NonNull::new(ptr) {
            Some(p) => p.cast::<T>(),
            None => return Err(AllocFailed { new_capacity: capacity }),
        };
        Ok(Self {
            data,
            capacity,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.data
    }

    /// Address of slot `offset`. One past the end is allowed.
    #[inline(always)]
    pub unsafe fn slot(&self, offset: usize) -> NonNull<T> {
        debug_assert!(offset <= self.capacity);
        unsafe { self.data.add(offset) }
    }

    #[inline(always)]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.data, &mut other.data);
        core::mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Transfers ownership of the allocation out, leaving `self` empty.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::new())
    }
}

impl<T> Default for RawBlock<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {

    fn drop(&mut self) {
        if self.capacity == 0 { return }
        let layout = match Layout::array::<T>(self.capacity) {
            Ok(l) => l,
            Err(_) => return,
        };
        unsafe { dealloc(self.data.as_ptr().cast::<u8>(), layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_empty() {
        let block = RawBlock::<u64>::new();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn allocate_zero_is_empty() {
        let block = RawBlock::<u64>::allocate(0).unwrap();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn allocate_reports_zero_sized_elements() {
        assert!(matches!(
            RawBlock::<()>::allocate(4),
            Err(ZeroSizedElement)
        ));
    }

    #[test]
    fn allocate_gives_writable_slots() {
        let block = RawBlock::<u32>::allocate(8).unwrap();
        assert_eq!(block.capacity(), 8);
        unsafe {
            for i in 0..8 {
                block.slot(i).write(i as u32);
            }
            for i in 0..8 {
                assert_eq!(block.slot(i).read(), i as u32);
            }
        }
    }

    #[test]
    fn swap_exchanges_ownership() {
        let mut a = RawBlock::<u32>::allocate(4).unwrap();
        let mut b = RawBlock::<u32>::new();
        let ptr = a.as_ptr();
        a.swap(&mut b);
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.capacity(), 4);
        assert_eq!(b.as_ptr(), ptr);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = RawBlock::<u32>::allocate(4).unwrap();
        let ptr = a.as_ptr();
        let b = a.take();
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.capacity(), 4);
        assert_eq!(b.as_ptr(), ptr);
    }
}
