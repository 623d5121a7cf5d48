use crossbeam::sync::WaitGroup;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Work performed for every dispatched directory
///
/// Implementors receive the scheduler so that they can dispatch the
/// subdirectories they discover.
pub trait DirectoryVisitor: Send + Sync + Sized + 'static {
    fn visit(&self, dir: &str, scheduler: &Scheduler<Self>);
}

struct Shared<V> {
    visitor: V,
    running: Mutex<usize>,
    max_concurrency: usize,
}

/// Dispatch-or-inline scheduler for recursive directory scans
///
/// Every dispatch either starts a new worker thread, when fewer than
/// `max_concurrency` workers are running, or visits the directory on the
/// calling thread. There is no queue: a busy scheduler degrades into a plain
/// recursive walk on the worker that found the directory.
///
/// Each handle owns a [`WaitGroup`] registration, and each worker owns a
/// handle, so [`Scheduler::wait`] returns only once every worker, including
/// workers started by other workers, has finished.
pub struct Scheduler<V: DirectoryVisitor> {
    shared: Arc<Shared<V>>,
    pending: WaitGroup,
}

impl<V: DirectoryVisitor> Clone for Scheduler<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            pending: self.pending.clone(),
        }
    }
}

impl<V: DirectoryVisitor> Scheduler<V> {
    pub fn new(visitor: V, max_concurrency: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                visitor,
                running: Mutex::new(0),
                max_concurrency,
            }),
            pending: WaitGroup::new(),
        }
    }

    /// Visit `dir` on a new worker if a slot is free, otherwise inline
    pub fn dispatch(&self, dir: &str) {
        let Some(running) = self.try_acquire() else {
            tracing::trace!("inline scan: {}", dir);
            self.shared.visitor.visit(dir, self);
            return;
        };

        tracing::trace!("worker {} scan: {}", running, dir);

        let worker = self.clone();
        let owned_dir = dir.to_string();
        let spawned = thread::Builder::new()
            .name("prols-scan".to_string())
            .spawn(move || {
                worker.shared.visitor.visit(&owned_dir, &worker);
                worker.release();
            });

        if let Err(err) = spawned {
            tracing::warn!("unable to start scan worker, scanning {} inline: {}", dir, err);
            self.release();
            self.shared.visitor.visit(dir, self);
        }
    }

    /// Block until every dispatched worker has finished
    pub fn wait(self) {
        self.pending.wait();
    }

    /// Take a worker slot; returns the post-increment running count
    fn try_acquire(&self) -> Option<usize> {
        let mut running = self
            .shared
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if *running < self.shared.max_concurrency {
            *running += 1;
            Some(*running)
        } else {
            None
        }
    }

    fn release(&self) {
        let mut running = self
            .shared
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *running -= 1;
    }
}
