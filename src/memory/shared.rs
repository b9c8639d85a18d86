//! Single-writer wrapper for sharing a memory across threads.
//!
//! Writes (`add`, `encode`, `clear`, ...) go through [`SharedMemory::write`]
//! and are serialised by the lock. Reads take `&self` on the wrapped memory,
//! so any number of them can run concurrently and always see a state between
//! two complete writes.

use std::sync::Arc;

use parking_lot::RwLock;

/// Cloneable handle to a lock-protected memory.
#[derive(Debug)]
pub struct SharedMemory<M> {
    inner: Arc<RwLock<M>>,
}

impl<M> Clone for SharedMemory<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> SharedMemory<M> {
    pub fn new(memory: M) -> Self {
        Self {
            inner: Arc::new(RwLock::new(memory)),
        }
    }

    /// Run `f` under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Run `f` under the exclusive write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Number of live handles.
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Take the memory back if this is the last handle.
    pub fn into_inner(self) -> Result<M, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner()),
            Err(inner) => Err(Self { inner }),
        }
    }
}
