//! Owned handles to tracked allocations.

use crate::tracking::TrackingAllocator;
use std::alloc::{GlobalAlloc, System};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// A block of memory obtained from a [`TrackingAllocator`].
///
/// The block remembers its requested size, so releasing it (explicitly or by
/// dropping it) decrements the owner's live-byte counter by exactly that
/// amount. The handle dereferences to the user region only.
pub struct Block<'a, A: GlobalAlloc = System> {
    ptr: NonNull<u8>,
    size: usize,
    owner: &'a TrackingAllocator<A>,
}

impl<'a, A: GlobalAlloc> Block<'a, A> {
    pub(crate) fn empty(owner: &'a TrackingAllocator<A>) -> Self {
        Self {
            ptr: NonNull::dangling(),
            size: 0,
            owner,
        }
    }

    pub(crate) fn from_raw(ptr: NonNull<u8>, size: usize, owner: &'a TrackingAllocator<A>) -> Self {
        Self { ptr, size, owner }
    }

    /// Take the pointer out without freeing it.
    pub(crate) fn into_raw(self) -> NonNull<u8> {
        let ptr = self.ptr;
        std::mem::forget(self);
        ptr
    }

    pub(crate) fn is_owned_by(&self, allocator: &TrackingAllocator<A>) -> bool {
        std::ptr::eq(self.owner, allocator)
    }

    /// The requested size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if this block holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<A: GlobalAlloc> Deref for Block<'_, A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` initialised bytes (dangling only
        // when `size` is zero).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl<A: GlobalAlloc> DerefMut for Block<'_, A> {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as in `deref`, and the block is uniquely owned.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl<A: GlobalAlloc> Drop for Block<'_, A> {
    fn drop(&mut self) {
        // SAFETY: the pointer and size came from `owner.allocate` or
        // `owner.reallocate`.
        unsafe { self.owner.free_block(self.ptr, self.size) }
    }
}

impl<A: GlobalAlloc> fmt::Debug for Block<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block").field("size", &self.size).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::TrackingAllocator;

    #[test]
    fn test_block_is_zeroed_and_writable() {
        let tracker = TrackingAllocator::system();
        let mut block = tracker.allocate(6).unwrap();
        assert!(block.iter().all(|&b| b == 0));

        block[..3].copy_from_slice(b"abc");
        assert_eq!(&block[..], b"abc\0\0\0");
        assert_eq!(block.size(), 6);
    }

    #[test]
    fn test_drop_releases() {
        let tracker = TrackingAllocator::system();
        {
            let _block = tracker.allocate(10).unwrap();
            assert_eq!(tracker.used(), 10);
        }
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_debug_shows_size() {
        let tracker = TrackingAllocator::system();
        let block = tracker.allocate(3).unwrap();
        assert_eq!(format!("{:?}", block), "Block { size: 3 }");
    }
}
