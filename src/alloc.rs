//! Optional allocator instrumentation for `bytes_allocated`/`allocations`.
//!
//! Grounded in `divan`'s [`AllocProfiler`], but considerably simplified:
//! spec §5 makes the engine single-threaded and sequential, so there is no
//! need for divan's per-thread tallying and thread-termination reuse list.
//! A pair of process-wide atomics is enough, at the cost of misattributing
//! allocations from any other thread the host process happens to run during
//! a benchmark (documented in DESIGN.md; spec §5 already places thread and
//! process hygiene outside this system's responsibility).

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

// Use `AllocProfiler` as this crate's own test allocator, so its tallying is
// exercised by every test binary rather than only by a dedicated unit test.
#[cfg(test)]
#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

static BYTES_REQUESTED: AtomicU64 = AtomicU64::new(0);
static ALLOC_OPS: AtomicU64 = AtomicU64::new(0);

/// Wraps a [`GlobalAlloc`] to tally bytes requested and allocator operation
/// counts for consumption by the sampling engine.
///
/// # Examples
///
/// ```
/// use benchkit::AllocProfiler;
///
/// #[global_allocator]
/// static ALLOC: AllocProfiler = AllocProfiler::system();
/// ```
///
/// If nothing installs an [`AllocProfiler`] as the global allocator, the
/// engine's `bytes_allocated`/`allocations` columns stay at zero, which is
/// not a violation of any invariant (spec §9: "The gc_time column can be
/// zero in non-tracing environments without violating any invariant"; the
/// same reasoning applies to these two columns absent instrumentation).
#[derive(Debug, Default)]
pub struct AllocProfiler<A = System> {
    alloc: A,
}

impl AllocProfiler {
    /// Profiles the [`System`] allocator.
    pub const fn system() -> Self {
        Self::new(System)
    }
}

impl<A> AllocProfiler<A> {
    /// Profiles an arbitrary [`GlobalAlloc`].
    pub const fn new(alloc: A) -> Self {
        Self { alloc }
    }
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for AllocProfiler<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        BYTES_REQUESTED.fetch_add(layout.size() as u64, Relaxed);
        ALLOC_OPS.fetch_add(1, Relaxed);
        unsafe { self.alloc.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        BYTES_REQUESTED.fetch_add(layout.size() as u64, Relaxed);
        ALLOC_OPS.fetch_add(1, Relaxed);
        unsafe { self.alloc.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if new_size > layout.size() {
            BYTES_REQUESTED.fetch_add((new_size - layout.size()) as u64, Relaxed);
        }
        ALLOC_OPS.fetch_add(1, Relaxed);
        unsafe { self.alloc.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // Not tallied: `bytes_allocated`/`allocations` track bytes
        // *requested*, which frees don't contribute to (spec §3).
        unsafe { self.alloc.dealloc(ptr, layout) }
    }
}

/// Current process-wide (bytes requested, allocation operation count).
pub(crate) fn snapshot() -> (u64, u64) {
    (BYTES_REQUESTED.load(Relaxed), ALLOC_OPS.load(Relaxed))
}

/// Difference between `start` (an earlier [`snapshot`]) and now.
pub(crate) fn delta(start: (u64, u64)) -> (u64, u64) {
    let end = snapshot();
    (end.0.saturating_sub(start.0), end.1.saturating_sub(start.1))
}
