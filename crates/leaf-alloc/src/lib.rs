//! # Leaf Alloc
//!
//! A size-tracking allocator for the Leaf toolchain.
//!
//! [`TrackingAllocator`] wraps another allocator and keeps two counters: the
//! number of bytes currently live and the highest value that number has ever
//! reached. It can be installed process-wide with `#[global_allocator]`, in
//! which case every `Vec` growth (the token list included) is accounted for,
//! or used directly through the safe [`Block`] handle API.
//!
//! ## Example
//!
//! ```
//! use leaf_alloc::TrackingAllocator;
//!
//! let tracker = TrackingAllocator::system();
//! let block = tracker.allocate(64).unwrap();
//! assert_eq!(tracker.used(), 64);
//!
//! tracker.release(block);
//! assert_eq!(tracker.used(), 0);
//! assert_eq!(tracker.peak(), 64);
//! ```

mod block;
mod error;
mod tracking;

pub use block::Block;
pub use error::AllocError;
pub use tracking::{Stats, TrackingAllocator};
