// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::slice::Chunks;

/// Number of items each worker gets when `len` items are spread across at most `threads` workers.
pub fn chunk_size(len: usize, threads: usize) -> usize {
    if len == 0 || threads == 0 {
        return 0;
    }
    len.div_ceil(threads)
}

/// Splits `items` into contiguous, non-overlapping chunks of `chunk_size(items.len(), threads)` items.
///
/// The last chunk may be shorter. An empty slice yields no chunks at all.
pub fn chunks<T>(items: &[T], threads: usize) -> Chunks<'_, T> {
    // `slice::chunks` panics on 0; an empty slice yields no chunks anyway.
    let size = chunk_size(items.len(), threads).max(1);
    items.chunks(size)
}
