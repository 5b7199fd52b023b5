// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Resolves batches of domains.
//!
//! A `resolve` call plans `tries × nameservers` attempts per domain, executes them with a `Concurrence` strategy,
//! and folds all attempt results into one answer per domain.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

pub use backend::{Backend, HickoryBackend};
pub use error::Error;
pub use lookup::AttemptResult;
pub use query::{attach_tries_and_name_servers, Attempt, QueryOpts};

use crate::concurrence::{Concurrence, Strategy};
use crate::fold::{FinalMapping, Fold, UniqueFold};
use crate::nameserver::{predefined, NameServer, NameServerGroup};
use crate::preprocess::Preprocess;
use crate::{system_config, Result};

pub mod backend;
pub mod error;
pub mod lookup;
pub mod query;

pub type ResolverResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOpts {
    /// Number of attempts per domain and nameserver
    pub tries: usize,
    pub name_servers: Vec<NameServer>,
    /// Timeout of each single backend lookup
    pub lifetime: Duration,
}

impl ResolverOpts {
    pub const DEFAULT_TRIES: usize = 2;
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(1);

    /// Creates `ResolverOpts` from local system configuration.
    ///
    /// Unix: Parses `/etc/resolv.conf`.
    pub fn from_system_config() -> Result<ResolverOpts> {
        system_config::load_from_system_config()
    }

    pub fn from_system_config_path<P: AsRef<Path>>(path: P) -> Result<ResolverOpts> {
        system_config::load_from_system_config_path(path)
    }
}

impl Default for ResolverOpts {
    fn default() -> Self {
        ResolverOpts {
            tries: ResolverOpts::DEFAULT_TRIES,
            name_servers: predefined::default_name_servers(),
            lifetime: ResolverOpts::DEFAULT_LIFETIME,
        }
    }
}

#[doc(hidden)]
impl From<resolv_conf::Config> for ResolverOpts {
    fn from(config: resolv_conf::Config) -> Self {
        let tries = config.attempts.max(1) as usize;
        let lifetime = Duration::from_secs(config.timeout.max(1) as u64);
        let name_servers: Vec<NameServer> = NameServerGroup::from(config).into();

        let defaults = ResolverOpts::default();
        ResolverOpts {
            tries,
            name_servers: if name_servers.is_empty() {
                defaults.name_servers
            } else {
                name_servers
            },
            lifetime,
        }
    }
}

/// Resolution orchestrator.
///
/// Composes a DNS `Backend`, an execution strategy, an aggregator, and an optional domain preprocessor.
pub struct Resolver<B: Backend, C = Strategy> {
    backend: B,
    concurrence: C,
    opts: ResolverOpts,
    fold: Box<dyn Fold<B::Record>>,
    preprocessor: Option<Box<dyn Preprocess>>,
}

impl<B: Backend, C> Resolver<B, C> {
    /// Creates a `Resolver` that de-duplicates records per domain.
    pub fn new(backend: B, concurrence: C, opts: ResolverOpts) -> Self {
        Resolver {
            backend,
            concurrence,
            opts,
            fold: Box::new(UniqueFold),
            preprocessor: None,
        }
    }

    pub fn with_fold<F: Fold<B::Record> + 'static>(mut self, fold: F) -> Self {
        self.fold = Box::new(fold);
        self
    }

    pub fn with_preprocessor<P: Preprocess + 'static>(mut self, preprocessor: P) -> Self {
        self.preprocessor = Some(Box::new(preprocessor));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn concurrence(&self) -> &C {
        &self.concurrence
    }

    pub fn opts(&self) -> &ResolverOpts {
        &self.opts
    }
}

impl<B: Backend, C: Concurrence> Resolver<B, C> {
    /// Resolves `domains` and folds all answers per domain.
    ///
    /// Returns `None` for an empty domain list without any lookup or validation of the options. A domain whose
    /// attempts all failed maps to an empty record list. Domains are used verbatim, both for the lookups and as keys
    /// of the mapping.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for a blank domain name, zero tries, or no nameservers -- before any lookup is sent.
    /// `Error::WorkerPanicked` if executing an attempt panicked.
    pub fn resolve<S: AsRef<str>>(
        &self,
        domains: &[S],
        query_opts: &QueryOpts,
    ) -> Result<Option<FinalMapping<B::Record>>> {
        if domains.is_empty() {
            debug!("No domains to resolve.");
            return Ok(None);
        }
        self.check(domains)?;

        let domains: Vec<String> = domains.iter().map(|x| x.as_ref().to_string()).collect();
        let domains = match &self.preprocessor {
            Some(preprocessor) => preprocessor.preprocess(domains),
            None => domains,
        };

        let attempts = self.attach_tries_and_name_servers(&domains);
        debug!("Expanded {} domains to {} attempts.", domains.len(), attempts.len());

        let resolved = self.resolve_middleware(&attempts, query_opts)?;
        debug!("Folding {} attempt results.", resolved.len());

        let pairs = resolved.into_iter().map(AttemptResult::into_pair).collect();
        Ok(Some(self.fold.fold(pairs)))
    }

    pub fn attach_tries_and_name_servers<S: AsRef<str>>(&self, domains: &[S]) -> Vec<Attempt> {
        query::attach_tries_and_name_servers(domains, self.opts.tries, &self.opts.name_servers)
    }

    /// Executes all attempts; one result per attempt.
    pub fn resolve_middleware(
        &self,
        attempts: &[Attempt],
        query_opts: &QueryOpts,
    ) -> Result<Vec<AttemptResult<B::Record>>> {
        let backend = &self.backend;
        let record_types = query_opts.record_types();
        let lifetime = self.opts.lifetime;

        self.concurrence
            .execute(attempts, |attempt| lookup::query(backend, attempt, record_types, lifetime))
    }

    /// Runs a single attempt; never fails.
    pub fn query(&self, attempt: &Attempt, query_opts: &QueryOpts) -> AttemptResult<B::Record> {
        lookup::query(&self.backend, attempt, query_opts.record_types(), self.opts.lifetime)
    }

    fn check<S: AsRef<str>>(&self, domains: &[S]) -> Result<()> {
        if self.opts.tries == 0 {
            return Err(crate::Error::invalid_argument("number of tries must be positive"));
        }
        if self.opts.name_servers.is_empty() {
            return Err(crate::Error::invalid_argument("at least one nameserver is required"));
        }
        if let Some(index) = domains.iter().position(|x| x.as_ref().trim().is_empty()) {
            return Err(crate::Error::invalid_argument(format!(
                "domain at position {} is blank",
                index
            )));
        }

        Ok(())
    }
}

impl<B: Backend, C: fmt::Debug> fmt::Debug for Resolver<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("concurrence", &self.concurrence)
            .field("opts", &self.opts)
            .field("preprocessor", &self.preprocessor.is_some())
            .finish()
    }
}
