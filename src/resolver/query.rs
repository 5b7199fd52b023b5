// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::Serialize;

use crate::nameserver::NameServer;
use crate::utils::serialize::ser_to_string;
use crate::RecordType;

/// One planned lookup of a domain against one nameserver.
///
/// A domain has one `Attempt` per try and nameserver; they are not de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    domain: String,
    #[serde(serialize_with = "ser_to_string")]
    name_server: NameServer,
}

impl Attempt {
    pub fn new<S: Into<String>>(domain: S, name_server: NameServer) -> Self {
        Attempt {
            domain: domain.into(),
            name_server,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn name_server(&self) -> &NameServer {
        &self.name_server
    }
}

/// Plans `tries` attempts per nameserver for every domain.
///
/// Order is domain-major, then try, then nameserver, so the result is reproducible.
pub fn attach_tries_and_name_servers<S: AsRef<str>>(
    domains: &[S],
    tries: usize,
    name_servers: &[NameServer],
) -> Vec<Attempt> {
    let mut attempts = Vec::with_capacity(domains.len() * tries * name_servers.len());
    for domain in domains {
        for _ in 0..tries {
            for name_server in name_servers {
                attempts.push(Attempt::new(domain.as_ref(), name_server.clone()));
            }
        }
    }

    attempts
}

/// Options of one `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOpts {
    pub record_types: Vec<RecordType>,
}

impl QueryOpts {
    pub fn new<T: Into<Vec<RecordType>>>(record_types: T) -> Self {
        QueryOpts {
            record_types: record_types.into(),
        }
    }

    /// Requested record types; address records if none are set.
    pub fn record_types(&self) -> &[RecordType] {
        if self.record_types.is_empty() {
            &[RecordType::A]
        } else {
            &self.record_types
        }
    }
}

impl Default for QueryOpts {
    fn default() -> Self {
        QueryOpts {
            record_types: vec![RecordType::A],
        }
    }
}

impl From<RecordType> for QueryOpts {
    fn from(record_type: RecordType) -> Self {
        QueryOpts::new(vec![record_type])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;
    use std::net::Ipv4Addr;

    fn ns(last: u8) -> NameServer {
        NameServer::udp((Ipv4Addr::new(10, 0, 0, last), 53))
    }

    #[test]
    fn attempts_are_domain_major_then_try_then_name_server() {
        let name_servers = vec![ns(1), ns(2)];

        let attempts = attach_tries_and_name_servers(&["a.com", "b.com"], 2, &name_servers);

        let planned: Vec<(&str, NameServer)> = attempts
            .iter()
            .map(|a| (a.domain(), a.name_server().clone()))
            .collect();
        assert_that(&planned).is_equal_to(vec![
            ("a.com", ns(1)),
            ("a.com", ns(2)),
            ("a.com", ns(1)),
            ("a.com", ns(2)),
            ("b.com", ns(1)),
            ("b.com", ns(2)),
            ("b.com", ns(1)),
            ("b.com", ns(2)),
        ]);
    }

    #[test]
    fn attempts_count() {
        let name_servers = vec![ns(1), ns(2), ns(3)];
        let domains: Vec<String> = (0..5).map(|i| format!("{}.example.com", i)).collect();

        let attempts = attach_tries_and_name_servers(&domains, 4, &name_servers);

        assert_that(&attempts).has_length(5 * 4 * 3);
    }

    #[test]
    fn empty_record_types_default_to_a() {
        let opts = QueryOpts::new(Vec::<RecordType>::new());

        assert_that(&opts.record_types().to_vec()).is_equal_to(vec![RecordType::A]);
    }
}
