// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Unordered collection of worker results.
///
/// Workers push through a shared reference; callers never lock themselves. One bag belongs to exactly one
/// `execute` call and is drained once all workers have been joined.
#[derive(Debug)]
pub struct ResultBag<R> {
    inner: Mutex<Vec<R>>,
}

impl<R> ResultBag<R> {
    pub fn new() -> Self {
        ResultBag::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ResultBag {
            inner: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn push(&self, result: R) {
        self.lock().push(result)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains the bag.
    pub fn into_inner(self) -> Vec<R> {
        // A worker that panicked can only have poisoned the lock while pushing; the Vec is still intact.
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R> Default for ResultBag<R> {
    fn default() -> Self {
        ResultBag::new()
    }
}
