// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::nameserver::NameServer;
use crate::resolver::{Attempt, Backend};
use crate::utils::serialize::ser_to_string;
use crate::RecordType;

/// Outcome of one `Attempt`.
///
/// An empty `result` means the attempt yielded nothing, whether the nameserver had no records or the lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptResult<R> {
    domain: String,
    #[serde(serialize_with = "ser_to_string")]
    name_server: NameServer,
    result: Vec<R>,
}

impl<R> AttemptResult<R> {
    pub fn new<S: Into<String>>(domain: S, name_server: NameServer, result: Vec<R>) -> Self {
        AttemptResult {
            domain: domain.into(),
            name_server,
            result,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn name_server(&self) -> &NameServer {
        &self.name_server
    }

    pub fn result(&self) -> &[R] {
        &self.result
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn into_pair(self) -> (String, Vec<R>) {
        (self.domain, self.result)
    }
}

/// Looks up every record type for `attempt` at the attempt's nameserver only.
///
/// Never fails: if any lookup fails, the whole attempt yields an empty result. All record types are queried
/// regardless, so the number of backend calls does not depend on failures.
pub fn query<B: Backend>(
    backend: &B,
    attempt: &Attempt,
    record_types: &[RecordType],
    timeout: Duration,
) -> AttemptResult<B::Record> {
    let domain = attempt.domain();
    let name_server = attempt.name_server();
    trace!("Querying '{}' for {:?} at {}.", domain, record_types, name_server);

    let mut records = Vec::new();
    let mut failed = false;
    for record_type in record_types {
        match backend.query(domain, name_server, *record_type, timeout) {
            Ok(answers) => records.extend(answers),
            Err(err) => {
                debug!(
                    "Lookup of '{}', record type {} at {} failed: {}",
                    domain, record_type, name_server, err
                );
                failed = true;
            }
        }
    }
    if failed {
        records.clear();
    }

    AttemptResult::new(domain, name_server.clone(), records)
}
