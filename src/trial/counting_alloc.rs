//! Global allocator wrapper that counts heap allocations
//!
//! Install it in a binary or test crate to enable allocation reporting:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: protobench::trial::CountingAllocator = protobench::trial::CountingAllocator::new();
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATION_COUNT: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);

/// Point-in-time reading of the allocation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    /// Number of allocations (including reallocations)
    pub allocations: u64,
    /// Bytes requested by those allocations
    pub bytes: u64,
}

impl AllocSnapshot {
    /// Counts accumulated since `earlier`
    pub fn since(self, earlier: AllocSnapshot) -> AllocSnapshot {
        AllocSnapshot {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// Counting wrapper around the system allocator
#[derive(Debug, Default)]
pub struct CountingAllocator;

impl CountingAllocator {
    /// Create the allocator, usable in a `static`
    pub const fn new() -> Self {
        CountingAllocator
    }

    /// Read the process-wide counters
    pub fn snapshot() -> AllocSnapshot {
        AllocSnapshot {
            allocations: ALLOCATION_COUNT.load(Ordering::Relaxed),
            bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
        }
    }

    /// Whether this allocator is the process's global allocator
    pub fn is_installed() -> bool {
        let before = Self::snapshot();
        let probe = black_box(Vec::<u8>::with_capacity(16));
        drop(probe);
        Self::snapshot().allocations > before.allocations
    }

    #[inline]
    fn record(size: usize) {
        ALLOCATION_COUNT.fetch_add(1, Ordering::Relaxed);
        ALLOCATED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    }
}

// SAFETY: every operation is forwarded to `System` with unchanged arguments;
// the counters never influence pointer ownership or layout.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        Self::record(layout.size());
        // SAFETY: delegates to the system allocator with unchanged `layout`.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: delegates to the system allocator with unchanged arguments.
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        Self::record(layout.size());
        // SAFETY: delegates to the system allocator with unchanged `layout`.
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        Self::record(new_size);
        // SAFETY: delegates to the system allocator with unchanged arguments.
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_difference() {
        let earlier = AllocSnapshot { allocations: 3, bytes: 100 };
        let later = AllocSnapshot { allocations: 5, bytes: 164 };
        assert_eq!(later.since(earlier), AllocSnapshot { allocations: 2, bytes: 64 });
        assert_eq!(earlier.since(later), AllocSnapshot::default());
    }

    #[test]
    fn test_not_installed_in_unit_tests() {
        // the library test binary keeps the system allocator
        assert!(!CountingAllocator::is_installed());
    }
}
