// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Execution strategies for lists of independent work items.
//!
//! [`ThreadConcurrence`] partitions the items into contiguous chunks and runs one OS thread per chunk; [`Sequential`]
//! runs every item on the calling thread. Both return one result per item.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

pub use bag::ResultBag;
pub use threads::ThreadConcurrence;

use crate::{Error, Result};

pub mod bag;
pub mod chunk;
pub mod threads;

/// Executes `work` for every item and returns all results, in no particular order.
///
/// `work` must absorb its own failures and always return a result. A panicking `work` is a bug and fails the whole
/// execution.
pub trait Concurrence {
    fn execute<T, R, F>(&self, items: &[T], work: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync;
}

/// Runs all items on the calling thread; results keep the order of the items.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sequential;

impl Concurrence for Sequential {
    fn execute<T, R, F>(&self, items: &[T], work: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        debug!("Executing {} items sequentially.", items.len());
        Ok(items.iter().map(work).collect())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Sequential,
    #[default]
    Concurrent,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            "concurrent" => Ok(Mode::Concurrent),
            _ => Err(Error::ParserError {
                what: s.to_string(),
                to: "Mode",
                why: "no such mode".to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            Mode::Sequential => "sequential",
            Mode::Concurrent => "concurrent",
        };
        f.write_str(str)
    }
}

/// Strategy chosen at run time, e.g. from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Sequential(Sequential),
    Concurrent(ThreadConcurrence),
}

impl Strategy {
    pub fn new(mode: Mode, threads: usize) -> Result<Strategy> {
        match mode {
            Mode::Sequential => Ok(Strategy::Sequential(Sequential)),
            Mode::Concurrent => ThreadConcurrence::new(threads).map(Strategy::Concurrent),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Strategy::Sequential(_) => Mode::Sequential,
            Strategy::Concurrent(_) => Mode::Concurrent,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Concurrent(ThreadConcurrence::default())
    }
}

impl Concurrence for Strategy {
    fn execute<T, R, F>(&self, items: &[T], work: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        match self {
            Strategy::Sequential(sequential) => sequential.execute(items, work),
            Strategy::Concurrent(concurrent) => concurrent.execute(items, work),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;

    #[test]
    fn sequential_keeps_order() {
        let items = vec!["c", "a", "b"];

        let results = Sequential.execute(&items, |x| x.to_uppercase());

        assert_that(&results)
            .is_ok()
            .is_equal_to(vec!["C".to_string(), "A".to_string(), "B".to_string()]);
    }

    #[test]
    fn sequential_stays_on_calling_thread() {
        let main = std::thread::current().id();
        let items: Vec<usize> = (0..10).collect();

        let results = Sequential
            .execute(&items, |_| std::thread::current().id())
            .expect("failed to execute");

        assert!(results.iter().all(|id| *id == main));
    }

    #[test]
    fn mode_from_str() {
        assert_that(&Mode::from_str("sequential")).is_ok().is_equal_to(Mode::Sequential);
        assert_that(&Mode::from_str("concurrent")).is_ok().is_equal_to(Mode::Concurrent);
        assert_that(&Mode::from_str("parallel")).is_err();
    }

    #[test]
    fn strategy_from_mode() {
        let strategy = Strategy::new(Mode::Concurrent, 8).expect("failed to create strategy");

        assert_that(&strategy).is_equal_to(Strategy::Concurrent(ThreadConcurrence::new(8).unwrap()));
        assert_that(&strategy.mode()).is_equal_to(Mode::Concurrent);
        assert_that(&Strategy::new(Mode::Concurrent, 0)).is_err();
        assert_that(&Strategy::new(Mode::Sequential, 0)).is_ok();
    }
}
