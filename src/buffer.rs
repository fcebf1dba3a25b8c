//! Scoped unmanaged buffer for records crossing the FFI boundary.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
static LIVE_ALLOCATIONS: AtomicIsize = AtomicIsize::new(0);
#[cfg(test)]
static FAIL_NEXT_ALLOCATION: AtomicBool = AtomicBool::new(false);

/// Serializes tests that observe the allocation counter or inject an
/// allocation failure.
#[cfg(test)]
pub(crate) static ALLOCATION_TEST_LOCK: Mutex<()> = Mutex::new(());

/// Makes the next [`ScopedBuffer`] constructor report an allocation
/// failure. Callers must hold [`ALLOCATION_TEST_LOCK`].
#[cfg(test)]
pub(crate) fn fail_next_allocation() {
  FAIL_NEXT_ALLOCATION.store(true, Ordering::SeqCst);
}

#[cfg(test)]
pub(crate) fn live_allocations() -> isize {
  LIVE_ALLOCATIONS.load(Ordering::SeqCst)
}

/// An unmanaged, zero-initialized allocation with the exact size and
/// alignment of one record. Released exactly once, by `Drop`, on every
/// path out of the owning scope, panic unwind included.
pub struct ScopedBuffer {
  ptr: NonNull<u8>,
  layout: Layout,
}

impl ScopedBuffer {
  /// Allocates a buffer shaped for one `T`.
  pub fn for_value<T>() -> std::io::Result<Self> {
    Self::new(Layout::new::<T>())
  }

  pub fn new(layout: Layout) -> std::io::Result<Self> {
    if layout.size() == 0 {
      return Err(std::io::ErrorKind::InvalidInput.into());
    }
    #[cfg(test)]
    if FAIL_NEXT_ALLOCATION.swap(false, Ordering::SeqCst) {
      return Err(std::io::ErrorKind::OutOfMemory.into());
    }
    let ptr = unsafe { alloc_zeroed(layout) };
    let Some(ptr) = NonNull::new(ptr) else {
      return Err(std::io::ErrorKind::OutOfMemory.into());
    };
    #[cfg(test)]
    LIVE_ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
    Ok(Self { ptr, layout })
  }

  pub fn len(&self) -> usize {
    self.layout.size()
  }

  pub fn is_empty(&self) -> bool {
    self.layout.size() == 0
  }

  pub fn as_ptr(&self) -> *const u8 {
    self.ptr.as_ptr()
  }

  pub fn as_slice(&self) -> &[u8] {
    unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [u8] {
    unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
  }
}

impl Drop for ScopedBuffer {
  fn drop(&mut self) {
    #[cfg(test)]
    LIVE_ALLOCATIONS.fetch_sub(1, Ordering::SeqCst);
    unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
  }
}
