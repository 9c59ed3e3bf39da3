//! The tracking allocator and its counters.

use crate::block::Block;
use crate::error::AllocError;
use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Alignment used for blocks handed out through [`TrackingAllocator::allocate`].
const BLOCK_ALIGN: usize = std::mem::align_of::<usize>();

/// An allocator that counts live and peak bytes.
///
/// The size of every allocation is known when it is freed (either from the
/// [`Layout`] passed to [`GlobalAlloc::dealloc`] or from the [`Block`] that
/// carries it), so callers never need to track sizes themselves.
pub struct TrackingAllocator<A = System> {
    inner: A,
    used: AtomicUsize,
    peak: AtomicUsize,
}

/// A snapshot of the allocator counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Bytes currently allocated.
    pub used: usize,
    /// Highest value `used` has reached.
    pub peak: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} bytes used, {} peak)", self.used, self.peak)
    }
}

impl TrackingAllocator<System> {
    /// Create a tracking allocator over the system allocator.
    pub const fn system() -> Self {
        Self::new(System)
    }
}

impl Default for TrackingAllocator<System> {
    fn default() -> Self {
        Self::system()
    }
}

impl<A> TrackingAllocator<A> {
    /// Wrap an allocator.
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            used: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Bytes currently allocated through this allocator.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }

    /// The historical maximum of [`used`](Self::used).
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Read both counters.
    pub fn stats(&self) -> Stats {
        Stats {
            used: self.used(),
            peak: self.peak(),
        }
    }

    fn record_alloc(&self, size: usize) {
        let used = self.used.fetch_add(size, Ordering::Relaxed) + size;
        self.peak.fetch_max(used, Ordering::Relaxed);
    }

    fn record_free(&self, size: usize) {
        self.used.fetch_sub(size, Ordering::Relaxed);
    }
}

impl<A: GlobalAlloc> TrackingAllocator<A> {
    /// Allocate a zero-initialised block of `size` bytes.
    pub fn allocate(&self, size: usize) -> Result<Block<'_, A>, AllocError> {
        if size == 0 {
            return Ok(Block::empty(self));
        }

        let layout = block_layout(size)?;
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { self.alloc_zeroed(layout) };

        match std::ptr::NonNull::new(ptr) {
            Some(ptr) => Ok(Block::from_raw(ptr, size, self)),
            None => Err(AllocError::OutOfMemory { size }),
        }
    }

    /// Resize a block, or allocate a fresh one when `block` is `None`.
    ///
    /// The contents up to the smaller of the two sizes are preserved and any
    /// newly exposed bytes are zeroed. On failure the old block is released.
    pub fn reallocate<'a>(
        &'a self,
        block: Option<Block<'a, A>>,
        new_size: usize,
    ) -> Result<Block<'a, A>, AllocError> {
        let Some(block) = block else {
            return self.allocate(new_size);
        };

        if !block.is_owned_by(self) {
            return Err(AllocError::ForeignBlock);
        }

        let old_size = block.size();
        if old_size == 0 {
            return self.allocate(new_size);
        }
        if new_size == 0 {
            self.release(block);
            return Ok(Block::empty(self));
        }

        let old_layout = block_layout(old_size)?;
        block_layout(new_size)?;

        let old_ptr = block.into_raw();
        // SAFETY: `old_ptr` was allocated by `self` with `old_layout`, and
        // `new_size` was validated to form a layout with the same alignment.
        let ptr = unsafe { self.realloc(old_ptr.as_ptr(), old_layout, new_size) };

        match std::ptr::NonNull::new(ptr) {
            Some(ptr) => {
                if new_size > old_size {
                    // SAFETY: the block now spans `new_size` bytes.
                    unsafe { ptr.as_ptr().add(old_size).write_bytes(0, new_size - old_size) };
                }
                Ok(Block::from_raw(ptr, new_size, self))
            }
            None => {
                // The old allocation stays live when realloc fails.
                drop(Block::from_raw(old_ptr, old_size, self));
                Err(AllocError::OutOfMemory { size: new_size })
            }
        }
    }

    /// Give a block back to the allocator.
    pub fn release(&self, block: Block<'_, A>) {
        drop(block);
    }

    /// Free a block previously produced by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with a block of `size` bytes.
    pub(crate) unsafe fn free_block(&self, ptr: std::ptr::NonNull<u8>, size: usize) {
        if size == 0 {
            return;
        }
        let layout = Layout::from_size_align_unchecked(size, BLOCK_ALIGN);
        self.dealloc(ptr.as_ptr(), layout);
    }
}

fn block_layout(size: usize) -> Result<Layout, AllocError> {
    Layout::from_size_align(size, BLOCK_ALIGN).map_err(|_| AllocError::InvalidLayout { size })
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        self.record_free(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            self.record_free(layout.size());
            self.record_alloc(new_size);
        }
        new_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An allocator that refuses every request.
    struct Exhausted;

    unsafe impl GlobalAlloc for Exhausted {
        unsafe fn alloc(&self, _layout: Layout) -> *mut u8 {
            std::ptr::null_mut()
        }

        unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {}
    }

    #[test]
    fn test_allocate_and_release() {
        let tracker = TrackingAllocator::system();
        let a = tracker.allocate(100).unwrap();
        let b = tracker.allocate(28).unwrap();
        assert_eq!(tracker.used(), 128);
        assert_eq!(tracker.peak(), 128);

        tracker.release(a);
        assert_eq!(tracker.used(), 28);
        tracker.release(b);
        assert_eq!(tracker.used(), 0);
        assert_eq!(tracker.peak(), 128);
    }

    #[test]
    fn test_peak_never_decreases() {
        let tracker = TrackingAllocator::system();
        let mut last_peak = 0;

        for size in [64, 8, 512, 16, 1024, 1] {
            let block = tracker.allocate(size).unwrap();
            assert!(tracker.peak() >= last_peak);
            last_peak = tracker.peak();
            tracker.release(block);
            assert_eq!(tracker.peak(), last_peak);
        }

        assert_eq!(tracker.used(), 0);
        assert_eq!(tracker.peak(), 1024);
    }

    #[test]
    fn test_reallocate_from_none() {
        let tracker = TrackingAllocator::system();
        let block = tracker.reallocate(None, 40).unwrap();
        assert_eq!(block.size(), 40);
        assert_eq!(tracker.used(), 40);
        drop(block);
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_reallocate_grow_keeps_contents() {
        let tracker = TrackingAllocator::system();
        let mut block = tracker.allocate(4).unwrap();
        block.copy_from_slice(b"leaf");

        let block = tracker.reallocate(Some(block), 8).unwrap();
        assert_eq!(&block[..], b"leaf\0\0\0\0");
        assert_eq!(tracker.used(), 8);
        assert_eq!(tracker.peak(), 8);

        tracker.release(block);
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_reallocate_shrink() {
        let tracker = TrackingAllocator::system();
        let block = tracker.allocate(256).unwrap();
        let block = tracker.reallocate(Some(block), 16).unwrap();
        assert_eq!(tracker.used(), 16);
        assert_eq!(tracker.peak(), 256);

        let block = tracker.reallocate(Some(block), 0).unwrap();
        assert!(block.is_empty());
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_growing_sequence_like_token_list() {
        let tracker = TrackingAllocator::system();
        let mut block = None;

        for count in 1..=32 {
            block = Some(tracker.reallocate(block, count * 24).unwrap());
            assert_eq!(tracker.used(), count * 24);
        }

        drop(block);
        assert_eq!(tracker.used(), 0);
        assert_eq!(tracker.peak(), 32 * 24);
    }

    #[test]
    fn test_zero_sized_allocation() {
        let tracker = TrackingAllocator::new(Exhausted);
        let block = tracker.allocate(0).unwrap();
        assert!(block.is_empty());
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_out_of_memory() {
        let tracker = TrackingAllocator::new(Exhausted);
        let err = tracker.allocate(32).unwrap_err();
        assert_eq!(err, AllocError::OutOfMemory { size: 32 });
        assert_eq!(err.size(), Some(32));
        assert_eq!(tracker.used(), 0);
        assert_eq!(tracker.peak(), 0);
    }

    #[test]
    fn test_invalid_layout() {
        let tracker = TrackingAllocator::system();
        let err = tracker.allocate(usize::MAX).unwrap_err();
        assert_eq!(err, AllocError::InvalidLayout { size: usize::MAX });
    }

    #[test]
    fn test_foreign_block_rejected() {
        let first = TrackingAllocator::system();
        let second = TrackingAllocator::system();
        let block = first.allocate(8).unwrap();

        let err = second.reallocate(Some(block), 16).unwrap_err();
        assert_eq!(err, AllocError::ForeignBlock);
        assert_eq!(first.used(), 0);
        assert_eq!(second.used(), 0);
    }

    #[test]
    fn test_global_alloc_interface() {
        let tracker = TrackingAllocator::system();
        let layout = Layout::from_size_align(48, 8).unwrap();

        unsafe {
            let ptr = tracker.alloc(layout);
            assert!(!ptr.is_null());
            assert_eq!(tracker.used(), 48);

            let ptr = tracker.realloc(ptr, layout, 96);
            assert!(!ptr.is_null());
            assert_eq!(tracker.used(), 96);

            tracker.dealloc(ptr, Layout::from_size_align(96, 8).unwrap());
        }

        assert_eq!(tracker.used(), 0);
        assert_eq!(tracker.peak(), 96);
    }

    #[test]
    fn test_counters_across_threads() {
        let tracker = TrackingAllocator::system();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for size in 1..64 {
                        let block = tracker.allocate(size).unwrap();
                        tracker.release(block);
                    }
                });
            }
        });

        assert_eq!(tracker.used(), 0);
        assert!(tracker.peak() >= 63);
    }

    #[test]
    fn test_stats_display() {
        let stats = Stats { used: 0, peak: 1234 };
        assert_eq!(stats.to_string(), "(0 bytes used, 1234 peak)");
    }
}
