// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! berserker resolves a batch of domain names by sending every domain to several nameservers several times on a
//! bounded pool of worker threads and merging all answers per domain.
//!
//! # Example
//! ```no_run
//! use berserker::concurrence::ThreadConcurrence;
//! use berserker::resolver::{HickoryBackend, QueryOpts, Resolver, ResolverOpts};
//!
//! let backend = HickoryBackend::new().expect("failed to create backend");
//! let resolver = Resolver::new(backend, ThreadConcurrence::default(), ResolverOpts::default());
//! let mapping = resolver
//!     .resolve(&["example.com", "example.net"], &QueryOpts::default())
//!     .expect("failed to resolve");
//! println!("{:?}", mapping);
//! ```

pub use hickory_resolver::proto::rr::RecordType;

pub use error::Error;

#[cfg(feature = "app-cli")]
pub mod app;
pub mod concurrence;
pub mod error;
pub mod estimate;
pub mod fold;
pub mod nameserver;
pub mod preprocess;
pub mod resolver;
pub mod resources;
pub(crate) mod system_config;
pub mod utils;

pub type Result<T> = std::result::Result<T, Error>;
