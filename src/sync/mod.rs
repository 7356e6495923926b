// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrency primitives: the work queue and the read/write lock.
//!
//! Both are built on `parking_lot` mutexes and condition variables. The lock
//! lets its active writer re-enter; the pool's `finish()` also waits for tasks
//! that running tasks submit.
//!
//! The index doesn't care which lock it runs under. It holds a
//! `Box<dyn LockStrategy>`: `NoLock` for single-threaded builds, `ReadWriteLock`
//! when builders, crawlers and queries share it.

mod rwlock;
mod work_queue;

pub use rwlock::*;
pub use work_queue::*;

use std::fmt;
use std::marker::PhantomData;

/// Locking policy plugged into an index at construction.
///
/// Implementations only coordinate access; they never own the data they guard.
/// Unlock calls must come from the thread that locked.
pub trait LockStrategy: Send + Sync + fmt::Debug {
    fn lock_read(&self);
    fn unlock_read(&self);
    fn lock_write(&self);
    fn unlock_write(&self);
}

impl<'s> dyn LockStrategy + 's {
    /// Acquire shared access, released when the guard drops.
    pub fn read(&self) -> LockGuard<'_> {
        self.lock_read();
        LockGuard::new(self, Access::Read)
    }

    /// Acquire exclusive access, released when the guard drops.
    pub fn write(&self) -> LockGuard<'_> {
        self.lock_write();
        LockGuard::new(self, Access::Write)
    }
}

/// The no-op strategy for indexes that are never shared across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl LockStrategy for NoLock {
    fn lock_read(&self) {}
    fn unlock_read(&self) {}
    fn lock_write(&self) {}
    fn unlock_write(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// RAII guard for a lock taken through a [`LockStrategy`].
///
/// Not `Send`: the lock tracks owners by thread, so the guard must be dropped
/// on the thread that created it.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    lock: &'a dyn LockStrategy,
    access: Access,
    _not_send: PhantomData<*const ()>,
}

impl<'a> LockGuard<'a> {
    fn new(lock: &'a dyn LockStrategy, access: Access) -> Self {
        Self {
            lock,
            access,
            _not_send: PhantomData,
        }
    }

    pub fn access(&self) -> Access {
        self.access
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        match self.access {
            Access::Read => self.lock.unlock_read(),
            Access::Write => self.lock.unlock_write(),
        }
    }
}

impl fmt::Debug for LockGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("access", &self.access)
            .finish()
    }
}
