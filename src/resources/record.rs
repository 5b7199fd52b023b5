// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::RecordType;

/// A decoded answer as returned by `HickoryBackend`.
///
/// Equality and hashing ignore the TTL, so the same answer from different nameservers or tries counts once.
#[derive(Debug, Eq, Clone, Serialize)]
pub struct Record {
    name: String,
    #[serde(rename = "type")]
    record_type: RecordType,
    ttl: u32,
    data: String,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.record_type == other.record_type && self.data == other.data
    }
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.record_type().hash(state);
        // Do not take self.ttl() into account
        self.data().hash(state);
    }
}

impl Record {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, record_type: RecordType, ttl: u32, data: D) -> Self {
        Record {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Textual rdata, e.g. `93.184.216.34` for an A record.
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[doc(hidden)]
impl From<&hickory_resolver::proto::rr::Record> for Record {
    fn from(record: &hickory_resolver::proto::rr::Record) -> Self {
        Record {
            name: record.name().to_string(),
            record_type: record.record_type(),
            ttl: record.ttl(),
            data: record.data().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use hickory_resolver::proto::rr::rdata::{A, CNAME};
    use hickory_resolver::proto::rr::{Name, RData};

    #[test]
    fn ttl_is_ignored_for_equality() {
        let a = Record::new("example.com.", RecordType::A, 300, "93.184.216.34");
        let b = Record::new("example.com.", RecordType::A, 17, "93.184.216.34");

        assert_that(&a).is_equal_to(&b);

        let set: HashSet<Record> = vec![a, b].into_iter().collect();
        assert_that(&set.len()).is_equal_to(1);
    }

    #[test]
    fn display_is_data() {
        let record = Record::new("example.com.", RecordType::AAAA, 300, "2606:2800:220:1:248:1893:25c8:1946");

        assert_that(&record.to_string()).is_equal_to("2606:2800:220:1:248:1893:25c8:1946".to_string());
    }

    #[test]
    fn from_hickory_record() {
        let name = Name::from_str("example.com.").unwrap();
        let a = hickory_resolver::proto::rr::Record::from_rdata(
            name.clone(),
            300,
            RData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
        );
        let cname = hickory_resolver::proto::rr::Record::from_rdata(
            Name::from_str("www.example.com.").unwrap(),
            60,
            RData::CNAME(CNAME(name)),
        );

        let a = Record::from(&a);
        let cname = Record::from(&cname);

        assert_that(&a.name()).is_equal_to("example.com.");
        assert_that(&a.record_type()).is_equal_to(RecordType::A);
        assert_that(&a.ttl()).is_equal_to(300);
        assert_that(&a.data()).is_equal_to("93.184.216.34");
        assert_that(&cname.record_type()).is_equal_to(RecordType::CNAME);
        assert_that(&cname.data()).is_equal_to("example.com.");
    }
}
