// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, trace};

use crate::concurrence::bag::ResultBag;
use crate::concurrence::{chunk, Concurrence};
use crate::{Error, Result};

pub static WORKER_NAME_PREFIX: &str = "berserker-worker";

/// Runs work items on a bounded pool of OS threads, one thread per chunk.
///
/// Even `threads == 1` spawns a worker; the calling thread only waits at the join barrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadConcurrence {
    threads: usize,
}

impl ThreadConcurrence {
    pub const DEFAULT_THREADS: usize = 1024;

    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::invalid_argument("number of threads must be positive"));
        }
        Ok(ThreadConcurrence { threads })
    }

    /// Maximum number of concurrently running workers per `execute`.
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for ThreadConcurrence {
    fn default() -> Self {
        ThreadConcurrence {
            threads: ThreadConcurrence::DEFAULT_THREADS,
        }
    }
}

impl Concurrence for ThreadConcurrence {
    fn execute<T, R, F>(&self, items: &[T], work: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        if items.is_empty() {
            debug!("Nothing to execute; spawning no workers.");
            return Ok(Vec::new());
        }

        let bag = ResultBag::with_capacity(items.len());
        let chunk_size = chunk::chunk_size(items.len(), self.threads);
        debug!(
            "Executing {} items on at most {} workers with {} items each.",
            items.len(),
            self.threads,
            chunk_size
        );

        thread::scope(|scope| {
            let mut workers = Vec::new();
            let mut spawn_error = None;

            for (index, chunk) in chunk::chunks(items, self.threads).enumerate() {
                let name = format!("{}-{}", WORKER_NAME_PREFIX, index);
                let bag = &bag;
                let work = &work;
                let spawned = thread::Builder::new().name(name.clone()).spawn_scoped(scope, move || {
                    trace!("Worker started with {} items.", chunk.len());
                    for item in chunk {
                        bag.push(work(item));
                    }
                    trace!("Worker finished.");
                });
                match spawned {
                    Ok(handle) => workers.push((name, handle)),
                    Err(err) => {
                        spawn_error = Some(err);
                        break;
                    }
                }
            }
            debug!("Spawned {} workers.", workers.len());

            // Always join what has been spawned before reporting a spawn failure.
            let joined = join_all(workers);
            match spawn_error {
                Some(err) => Err(Error::from(err)),
                None => joined,
            }
        })?;

        let results = bag.into_inner();
        debug!("Collected {} results.", results.len());

        Ok(results)
    }
}

fn join_all(workers: Vec<(String, ScopedJoinHandle<'_, ()>)>) -> Result<()> {
    let mut panicked = None;
    for (name, handle) in workers {
        if handle.join().is_err() && panicked.is_none() {
            panicked = Some(name);
        }
    }

    match panicked {
        Some(worker) => Err(Error::WorkerPanicked { worker }),
        None => Ok(()),
    }
}
