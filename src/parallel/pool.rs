//! Rayon thread pool configuration for batch detail computation.
//!
//! Use [WorkerPool::install] to run a parallel job (e.g. the CSV export) with a fixed number
//! of threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;
use tracing::warn;

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a thread pool with this worker count. If [workers](WorkerPool::workers) is 0,
    /// or a dedicated pool cannot be built, runs on the global Rayon pool.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                warn!(workers = self.workers, error = %err, "falling back to global rayon pool");
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn dedicated_pool_uses_requested_thread_count() {
        let threads = WorkerPool::with_workers(2).install(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }

    #[test]
    fn default_pool_runs_inline_on_global_pool() {
        let sum: u64 = WorkerPool::default().install(|| (1..=100_u64).into_par_iter().sum());
        assert_eq!(sum, 5050);
    }
}
