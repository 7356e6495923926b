// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size worker pool with a completion barrier.
//!
//! Tasks are plain closures drained FIFO by N worker threads. The pool counts
//! outstanding tasks (queued or running), and `submit` bumps that count
//! *before* the task is queued. A crawl task that submits its children does so
//! while it is itself still counted, so the count can't touch zero between
//! generations and `finish()` waits for the whole tree of work.
//!
//! Tasks reach the queue through a [`WorkHandle`], which is what you capture in
//! a task that needs to submit more work. Capturing the `WorkQueue` itself
//! would make a worker thread responsible for joining its own pool.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Worker count used when the configured count is unusable.
pub const DEFAULT_THREADS: usize = 5;

type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct QueueState {
    tasks: VecDeque<Task>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<QueueState>,
    available: Condvar,
    /// Tasks submitted but not yet completed. Lock order: `queue` before `pending`.
    pending: Mutex<usize>,
    drained: Condvar,
}

impl Shared {
    fn complete(&self, finished: usize) {
        if finished == 0 {
            return;
        }
        let mut pending = self.pending.lock();
        *pending -= finished;
        if *pending == 0 {
            self.drained.notify_all();
        }
    }
}

/// Cloneable submission handle onto a [`WorkQueue`].
#[derive(Clone)]
pub struct WorkHandle {
    shared: Arc<Shared>,
}

impl WorkHandle {
    /// Queue a task. Counted as outstanding before it becomes visible to workers.
    ///
    /// Tasks submitted after `shutdown()` are dropped with a warning.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.shared.queue.lock();
        if queue.shutdown {
            tracing::warn!("work queue is shut down; dropping submitted task");
            return;
        }
        *self.shared.pending.lock() += 1;
        queue.tasks.push_back(Box::new(task));
        drop(queue);
        self.shared.available.notify_one();
    }

    /// Block until every submitted task, including tasks submitted by running
    /// tasks, has completed. The queue stays usable afterwards.
    ///
    /// Calling this from inside a task deadlocks: the caller is itself pending.
    pub fn finish(&self) {
        let mut pending = self.shared.pending.lock();
        while *pending > 0 {
            self.shared.drained.wait(&mut pending);
        }
    }

    /// Tasks queued or running right now.
    pub fn pending(&self) -> usize {
        *self.shared.pending.lock()
    }
}

/// A pool of worker threads draining a FIFO task queue.
pub struct WorkQueue {
    handle: WorkHandle,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl WorkQueue {
    /// Start `threads` workers. Zero falls back to [`DEFAULT_THREADS`].
    ///
    /// # Panics
    ///
    /// If the OS refuses to spawn a worker thread, like `std::thread::spawn`.
    pub fn new(threads: usize) -> Self {
        let size = if threads == 0 { DEFAULT_THREADS } else { threads };
        let shared = Arc::new(Shared {
            queue: Mutex::new(QueueState::default()),
            available: Condvar::new(),
            pending: Mutex::new(0),
            drained: Condvar::new(),
        });

        let workers = (0..size)
            .map(|id| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("crawldex-worker-{}", id))
                    .spawn(move || run_worker(&shared))
                    .expect("failed to spawn work queue worker")
            })
            .collect();

        tracing::debug!(threads = size, "work queue initialized");

        Self {
            handle: WorkHandle { shared },
            workers: Mutex::new(workers),
            size,
        }
    }

    /// A handle tasks can capture to submit follow-up work.
    pub fn handle(&self) -> WorkHandle {
        self.handle.clone()
    }

    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.submit(task);
    }

    /// See [`WorkHandle::finish`].
    pub fn finish(&self) {
        self.handle.finish();
    }

    pub fn pending(&self) -> usize {
        self.handle.pending()
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stop workers from taking new tasks. Running tasks finish normally;
    /// tasks still queued are discarded and no longer count as outstanding.
    pub fn shutdown(&self) {
        let discarded = {
            let mut queue = self.handle.shared.queue.lock();
            queue.shutdown = true;
            let discarded = queue.tasks.len();
            queue.tasks.clear();
            discarded
        };
        if discarded > 0 {
            tracing::warn!(discarded, "work queue shut down with tasks still queued");
        }
        self.handle.shared.available.notify_all();
        self.handle.shared.complete(discarded);
        tracing::debug!("work queue shutting down");
    }

    /// Wait for outstanding work, shut down, and wait for every worker to exit.
    /// The queue accepts no work afterwards.
    pub fn join(&self) {
        self.finish();
        self.shutdown();
        self.join_workers();
        tracing::debug!("all worker threads terminated");
    }

    fn join_workers(&self) {
        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            if worker.join().is_err() {
                tracing::warn!("work queue worker exited abnormally");
            }
        }
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new(DEFAULT_THREADS)
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
        self.join_workers();
    }
}

fn run_worker(shared: &Shared) {
    loop {
        let task = {
            let mut queue = shared.queue.lock();
            while queue.tasks.is_empty() && !queue.shutdown {
                shared.available.wait(&mut queue);
            }
            if queue.shutdown {
                break;
            }
            match queue.tasks.pop_front() {
                Some(task) => task,
                None => continue,
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::warn!(%message, "work queue task panicked");
        }
        shared.complete(1);
    }
}
