// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol as HickoryProtocol;
use hickory_resolver::TokioResolver;
use tokio::runtime::{self, Runtime};
use tracing::trace;

use crate::nameserver::{NameServer, Protocol};
use crate::resolver::{Error, ResolverResult};
use crate::resources::Record;
use crate::RecordType;

/// Performs one DNS lookup of one record type against exactly one nameserver.
///
/// Implementations may block and may fail; callers running many lookups absorb failures themselves.
pub trait Backend: Send + Sync {
    type Record: Debug + Clone + Eq + Hash + Send;

    fn query(
        &self,
        domain: &str,
        name_server: &NameServer,
        record_type: RecordType,
        timeout: Duration,
    ) -> ResolverResult<Vec<Self::Record>>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    type Record = B::Record;

    fn query(
        &self,
        domain: &str,
        name_server: &NameServer,
        record_type: RecordType,
        timeout: Duration,
    ) -> ResolverResult<Vec<Self::Record>> {
        (**self).query(domain, name_server, record_type, timeout)
    }
}

/// `Backend` based on hickory-resolver.
///
/// Lookups run on an internal tokio runtime; callers block until the answer arrives. Do not call from within an
/// async context.
#[derive(Debug)]
pub struct HickoryBackend {
    runtime: Runtime,
}

impl HickoryBackend {
    pub fn new() -> crate::Result<Self> {
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("berserker-io")
            .build()
            .map_err(|e| Error::RuntimeError { reason: e.to_string() })?;

        Ok(HickoryBackend { runtime })
    }

    fn resolver(name_server: &NameServer, timeout: Duration) -> TokioResolver {
        let config = ResolverConfig::from_parts(None, vec![], vec![name_server.into()]);

        let mut opts = ResolverOpts::default();
        // Retries are planned by the caller as separate attempts.
        opts.attempts = 1;
        // The outer timeout in `query` bounds the lookup; hickory's own must not fire first.
        opts.timeout = timeout + Duration::from_millis(100);
        opts.cache_size = 0;
        opts.ndots = 0;
        // Only the answer records of the requested type, not the CNAME chain leading to them.
        opts.preserve_intermediates = false;

        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }
}

impl Backend for HickoryBackend {
    type Record = Record;

    fn query(
        &self,
        domain: &str,
        name_server: &NameServer,
        record_type: RecordType,
        timeout: Duration,
    ) -> ResolverResult<Vec<Record>> {
        trace!("Sending query for '{}', record type {} to {}.", domain, record_type, name_server);
        let lookup = self.runtime.block_on(async {
            let resolver = HickoryBackend::resolver(name_server, timeout);
            tokio::time::timeout(timeout, resolver.lookup(domain, record_type)).await
        })?;

        match lookup {
            Ok(lookup) => Ok(lookup
                .record_iter()
                .filter(|x| x.record_type() == record_type)
                .map(Record::from)
                .collect()),
            // NODATA and NXDOMAIN are answers, not failures.
            Err(err) if err.is_no_records_found() || err.is_nx_domain() => Ok(Vec::new()),
            Err(err) => Err(Error::from(err)),
        }
    }
}

#[doc(hidden)]
impl From<&NameServer> for hickory_resolver::config::NameServerConfig {
    fn from(name_server: &NameServer) -> Self {
        let protocol = match name_server.protocol() {
            Protocol::Udp => HickoryProtocol::Udp,
            Protocol::Tcp => HickoryProtocol::Tcp,
        };
        hickory_resolver::config::NameServerConfig::new(name_server.socket_addr(), protocol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;
    use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
    use std::str::FromStr;
    use std::thread::{self, JoinHandle};

    use hickory_resolver::config::NameServerConfig;
    use hickory_resolver::proto::op::{Message, MessageType, ResponseCode};
    use hickory_resolver::proto::rr::rdata::{A, CNAME};
    use hickory_resolver::proto::rr::{Name, RData, Record as HickoryRecord};

    use crate::utils::tests::logging;

    const LIFETIME: Duration = Duration::from_millis(500);

    /// Answers from `zone` on a loopback UDP socket until no query arrives for a while.
    ///
    /// `zone` returns the response code and answers for a query name and type; `None` drops the query unanswered.
    fn serve<F>(zone: F) -> (NameServer, JoinHandle<()>)
    where
        F: Fn(&str, RecordType) -> Option<(ResponseCode, Vec<HickoryRecord>)> + Send + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("failed to bind");
        socket
            .set_read_timeout(Some(Duration::from_secs(3)))
            .expect("failed to set read timeout");
        let addr: SocketAddr = socket.local_addr().expect("no local address");

        let handle = thread::spawn(move || {
            let mut buf = [0u8; 4096];
            while let Ok((len, peer)) = socket.recv_from(&mut buf) {
                let request = match Message::from_vec(&buf[..len]) {
                    Ok(request) => request,
                    Err(_) => continue,
                };
                let query = match request.queries().first() {
                    Some(query) => query.clone(),
                    None => continue,
                };
                let (response_code, answers) = match zone(&query.name().to_string(), query.query_type()) {
                    Some(answer) => answer,
                    None => continue,
                };

                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(request.op_code())
                    .set_recursion_desired(request.recursion_desired())
                    .set_recursion_available(true)
                    .set_response_code(response_code)
                    .add_query(query);
                response.add_answers(answers);

                let bytes = response.to_vec().expect("failed to encode response");
                let _ = socket.send_to(&bytes, peer);
            }
        });

        (NameServer::udp(addr), handle)
    }

    fn name(str: &str) -> Name {
        Name::from_str(str).expect("invalid name")
    }

    fn a(owner: &str, ip: Ipv4Addr) -> HickoryRecord {
        HickoryRecord::from_rdata(name(owner), 300, RData::A(A(ip)))
    }

    fn cname(owner: &str, target: &str) -> HickoryRecord {
        HickoryRecord::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
    }

    fn example_zone(qname: &str, record_type: RecordType) -> Option<(ResponseCode, Vec<HickoryRecord>)> {
        let answer = match (qname, record_type) {
            ("a.com.", RecordType::A) => (ResponseCode::NoError, vec![a("a.com.", Ipv4Addr::new(1, 2, 3, 4))]),
            ("www.a.com.", RecordType::A) => (
                ResponseCode::NoError,
                vec![cname("www.a.com.", "a.com."), a("a.com.", Ipv4Addr::new(1, 2, 3, 4))],
            ),
            ("a.com.", _) => (ResponseCode::NoError, Vec::new()),
            ("silent.com.", _) => return None,
            _ => (ResponseCode::NXDomain, Vec::new()),
        };

        Some(answer)
    }

    #[test]
    fn answer_is_converted_to_records() {
        logging::init();
        let (name_server, _server) = serve(example_zone);
        let backend = HickoryBackend::new().expect("failed to create backend");

        let records = backend.query("a.com", &name_server, RecordType::A, LIFETIME);

        assert_that(&records)
            .is_ok()
            .is_equal_to(vec![Record::new("a.com.", RecordType::A, 300, "1.2.3.4")]);
    }

    #[test]
    fn cname_chain_yields_only_requested_type() {
        logging::init();
        let (name_server, _server) = serve(example_zone);
        let backend = HickoryBackend::new().expect("failed to create backend");

        let records = backend
            .query("www.a.com", &name_server, RecordType::A, LIFETIME)
            .expect("failed to query");

        assert_that(&records.is_empty()).is_false();
        assert!(records.iter().all(|x| x.record_type() == RecordType::A));
        assert_that(&records[0].data()).is_equal_to("1.2.3.4");
    }

    #[test]
    fn nodata_is_an_empty_answer() {
        logging::init();
        let (name_server, _server) = serve(example_zone);
        let backend = HickoryBackend::new().expect("failed to create backend");

        let records = backend.query("a.com", &name_server, RecordType::MX, LIFETIME);

        assert_that(&records).is_ok().is_empty();
    }

    #[test]
    fn nxdomain_is_an_empty_answer() {
        logging::init();
        let (name_server, _server) = serve(example_zone);
        let backend = HickoryBackend::new().expect("failed to create backend");

        let records = backend.query("nowhere.com", &name_server, RecordType::A, LIFETIME);

        assert_that(&records).is_ok().is_empty();
    }

    #[test]
    fn silent_name_server_times_out() {
        logging::init();
        let (name_server, _server) = serve(example_zone);
        let backend = HickoryBackend::new().expect("failed to create backend");

        let records = backend.query("silent.com", &name_server, RecordType::A, Duration::from_millis(200));

        assert!(matches!(records, Err(Error::Timeout)));
    }

    #[test]
    fn name_server_to_hickory_config() {
        let udp = NameServer::udp((Ipv4Addr::new(10, 0, 0, 1), 5353));
        let tcp = NameServer::tcp((Ipv4Addr::new(10, 0, 0, 2), 53));

        let udp = NameServerConfig::from(&udp);
        let tcp = NameServerConfig::from(&tcp);

        assert_that(&udp.socket_addr).is_equal_to(SocketAddr::from((Ipv4Addr::new(10, 0, 0, 1), 5353)));
        assert_that(&udp.protocol).is_equal_to(HickoryProtocol::Udp);
        assert_that(&tcp.socket_addr).is_equal_to(SocketAddr::from((Ipv4Addr::new(10, 0, 0, 2), 53)));
        assert_that(&tcp.protocol).is_equal_to(HickoryProtocol::Tcp);
    }
}
