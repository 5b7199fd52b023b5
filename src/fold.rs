// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Aggregation of per-attempt results into one answer per domain.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// One aggregated record collection per domain.
pub type FinalMapping<R> = IndexMap<String, Vec<R>>;

/// Merges `(domain, partial result)` pairs of all attempts into a `FinalMapping`.
///
/// Every domain occurring in `pairs` must be a key of the mapping, even if all its partial results are empty.
pub trait Fold<R>: Send + Sync {
    fn fold(&self, pairs: Vec<(String, Vec<R>)>) -> FinalMapping<R>;
}

impl<R, F> Fold<R> for F
where
    F: Fn(Vec<(String, Vec<R>)>) -> FinalMapping<R> + Send + Sync,
{
    fn fold(&self, pairs: Vec<(String, Vec<R>)>) -> FinalMapping<R> {
        self(pairs)
    }
}

/// Merges all partial results of a domain and drops duplicates; records keep the order they were first seen in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueFold;

impl<R: Clone + Eq + Hash> Fold<R> for UniqueFold {
    fn fold(&self, pairs: Vec<(String, Vec<R>)>) -> FinalMapping<R> {
        let mut folded: IndexMap<String, IndexSet<R>> = IndexMap::new();
        for (domain, records) in pairs {
            folded.entry(domain).or_default().extend(records);
        }

        folded
            .into_iter()
            .map(|(domain, records)| (domain, records.into_iter().collect()))
            .collect()
    }
}

/// Concatenates all partial results of a domain as they are, duplicates included.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcatFold;

impl<R> Fold<R> for ConcatFold {
    fn fold(&self, pairs: Vec<(String, Vec<R>)>) -> FinalMapping<R> {
        let mut folded: FinalMapping<R> = IndexMap::new();
        for (domain, records) in pairs {
            folded.entry(domain).or_default().extend(records);
        }

        folded
    }
}
