// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Writer-reentrant read/write lock.
//!
//! Any number of readers, or exactly one writer. The thread holding the write
//! lock may take the read or write lock again without blocking, which lets a
//! locked composite operation (`add_all`) call locked primitives (`add_element`)
//! on the same index. Readers are not reentrant in that sense: a reader asking
//! for the write lock waits on itself forever.
//!
//! # INVARIANTS
//!
//! 1. `readers > 0` implies no active writer
//! 2. an active writer implies `readers == 0`
//! 3. read acquisitions by the active writer are tracked apart from `readers`
//!    and become ordinary read holds if the writer releases first
//!
//! Unlocking a lock you don't hold is a bug in the caller. Both unlock paths
//! panic immediately instead of letting the counters drift.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::thread::{self, ThreadId};

use super::{Access, LockGuard, LockStrategy};

#[derive(Debug, Default)]
struct LockState {
    /// Read holds per thread, so a release from a non-holder is caught.
    read_holds: HashMap<ThreadId, usize>,
    readers: usize,
    /// Write acquisitions by the active writer (its reentrancy depth).
    write_holds: usize,
    /// Read acquisitions made by the active writer while it held the write lock.
    nested_reads: usize,
    active_writer: Option<ThreadId>,
}

impl LockState {
    fn is_active_writer(&self, thread: ThreadId) -> bool {
        self.active_writer == Some(thread)
    }
}

/// A multi-reader, single-writer lock whose writer may re-enter.
#[derive(Debug, Default)]
pub struct ReadWriteLock {
    state: Mutex<LockState>,
    changed: Condvar,
}

impl ReadWriteLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active read holds, excluding reads taken by the active writer.
    pub fn readers(&self) -> usize {
        self.state.lock().readers
    }

    /// Number of threads holding the write lock: 0 or 1.
    pub fn writers(&self) -> usize {
        usize::from(self.state.lock().write_holds > 0)
    }

    /// True if the calling thread currently holds the write lock.
    pub fn is_active_writer(&self) -> bool {
        self.state.lock().is_active_writer(thread::current().id())
    }

    /// Block until no other thread holds the write lock, then take a read hold.
    pub fn lock_read(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();

        if state.is_active_writer(me) {
            state.nested_reads += 1;
            return;
        }

        while state.write_holds > 0 {
            tracing::trace!("waiting for read lock");
            self.changed.wait(&mut state);
        }

        debug_assert!(state.active_writer.is_none());
        *state.read_holds.entry(me).or_insert(0) += 1;
        state.readers += 1;
    }

    /// Release one read hold taken by the calling thread.
    ///
    /// # Panics
    ///
    /// If the calling thread holds no read lock.
    pub fn unlock_read(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();

        if state.is_active_writer(me) && state.nested_reads > 0 {
            state.nested_reads -= 1;
        } else {
            let holds = state.read_holds.get(&me).copied().unwrap_or(0);
            if holds == 0 {
                drop(state);
                panic!("read unlock by {:?}, which holds no read lock", me);
            }
            if holds == 1 {
                state.read_holds.remove(&me);
            } else {
                state.read_holds.insert(me, holds - 1);
            }
            state.readers -= 1;
        }

        drop(state);
        self.changed.notify_all();
    }

    /// Block until there are no readers and no other writer, then take the
    /// write lock. The active writer re-enters without blocking.
    pub fn lock_write(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();

        if state.is_active_writer(me) {
            state.write_holds += 1;
            return;
        }

        while state.readers > 0 || state.write_holds > 0 {
            tracing::trace!(readers = state.readers, "waiting for write lock");
            self.changed.wait(&mut state);
        }

        debug_assert_eq!(state.nested_reads, 0);
        state.write_holds = 1;
        state.active_writer = Some(me);
    }

    /// Release one write hold.
    ///
    /// # Panics
    ///
    /// If nobody holds the write lock, or if the caller isn't the thread that does.
    pub fn unlock_write(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();

        if state.write_holds == 0 {
            drop(state);
            panic!("write unlock by {:?}, but the write lock is not held", me);
        }
        if !state.is_active_writer(me) {
            let owner = state.active_writer;
            drop(state);
            panic!("write unlock by {:?}, but the write lock is owned by {:?}", me, owner);
        }

        state.write_holds -= 1;
        if state.write_holds == 0 {
            state.active_writer = None;
            // Reads the writer took while writing outlive the write hold.
            let nested = std::mem::take(&mut state.nested_reads);
            if nested > 0 {
                *state.read_holds.entry(me).or_insert(0) += nested;
                state.readers += nested;
            }
        }

        drop(state);
        self.changed.notify_all();
    }

    /// Take a read hold released when the guard drops.
    pub fn read(&self) -> LockGuard<'_> {
        self.lock_read();
        LockGuard::new(self, Access::Read)
    }

    /// Take the write lock, released when the guard drops.
    pub fn write(&self) -> LockGuard<'_> {
        self.lock_write();
        LockGuard::new(self, Access::Write)
    }
}

impl LockStrategy for ReadWriteLock {
    fn lock_read(&self) {
        ReadWriteLock::lock_read(self);
    }

    fn unlock_read(&self) {
        ReadWriteLock::unlock_read(self);
    }

    fn lock_write(&self) {
        ReadWriteLock::lock_write(self);
    }

    fn unlock_write(&self) {
        ReadWriteLock::unlock_write(self);
    }
}
