// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;

use serde::Serialize;

use crate::concurrence::chunk::chunk_size;
use crate::concurrence::{Sequential, Strategy, ThreadConcurrence};
use crate::resolver::{Backend, QueryOpts, Resolver};

/// Predicts the work of a `resolve` call without sending anything.
pub trait Estimate {
    fn estimate(&self, domains: usize, query_opts: &QueryOpts) -> Estimation;
}

/// Number of workers a strategy starts for `items` work items.
pub trait Workers {
    fn workers(&self, items: usize) -> usize;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Estimation {
    pub attempts: usize,
    pub backend_calls: usize,
    pub workers: usize,
}

impl fmt::Display for Estimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = format!(
            "[attempts={}, backend calls={}, workers={}]",
            self.attempts, self.backend_calls, self.workers
        );
        f.write_str(&str)
    }
}

impl Workers for Sequential {
    fn workers(&self, _: usize) -> usize {
        0
    }
}

impl Workers for ThreadConcurrence {
    fn workers(&self, items: usize) -> usize {
        let size = chunk_size(items, self.threads());
        if size == 0 {
            0
        } else {
            items.div_ceil(size)
        }
    }
}

impl Workers for Strategy {
    fn workers(&self, items: usize) -> usize {
        match self {
            Strategy::Sequential(x) => x.workers(items),
            Strategy::Concurrent(x) => x.workers(items),
        }
    }
}

impl<B: Backend, C: Workers> Estimate for Resolver<B, C> {
    // Preprocessing may add domains, so this is a lower bound if a preprocessor is set.
    fn estimate(&self, domains: usize, query_opts: &QueryOpts) -> Estimation {
        let attempts = domains * self.opts().tries * self.opts().name_servers.len();
        let backend_calls = attempts * query_opts.record_types().len();

        Estimation {
            attempts,
            backend_calls,
            workers: self.concurrence().workers(attempts),
        }
    }
}
