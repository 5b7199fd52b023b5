// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

use resolv_conf::ScopedIp;
use serde::Serialize;

use crate::{system_config, Error, Result};

mod parser;
pub mod predefined;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "udp" => Ok(Protocol::Udp),
            "tcp" => Ok(Protocol::Tcp),
            _ => Err(Error::ParserError {
                what: s.to_string(),
                to: "Protocol",
                why: "invalid protocol".to_string(),
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
        };
        fmt.write_str(str)
    }
}

/// A single nameserver an attempt is sent to.
///
/// Parses from and displays as `udp:8.8.8.8:53`, `tcp:[2001:4860:4860::8888]:53,name=Google`; protocol and port
/// default to `udp` and `53`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize)]
pub struct NameServer {
    protocol: Protocol,
    ip_addr: IpAddr,
    port: u16,
    name: Option<String>,
}

impl NameServer {
    pub fn udp<T: Into<SocketAddr>>(socket_addr: T) -> Self {
        NameServer::udp_with_name(socket_addr, None)
    }

    pub fn udp_with_name<T: Into<SocketAddr>, S: Into<Option<String>>>(socket_addr: T, name: S) -> Self {
        NameServer::new(Protocol::Udp, socket_addr, name)
    }

    pub fn tcp<T: Into<SocketAddr>>(socket_addr: T) -> Self {
        NameServer::tcp_with_name(socket_addr, None)
    }

    pub fn tcp_with_name<T: Into<SocketAddr>, S: Into<Option<String>>>(socket_addr: T, name: S) -> Self {
        NameServer::new(Protocol::Tcp, socket_addr, name)
    }

    fn new<T: Into<SocketAddr>, S: Into<Option<String>>>(protocol: Protocol, socket_addr: T, name: S) -> Self {
        let socket_addr = socket_addr.into();
        NameServer {
            protocol,
            ip_addr: socket_addr.ip(),
            port: socket_addr.port(),
            name: name.into(),
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn ip_addr(&self) -> IpAddr {
        self.ip_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip_addr, self.port)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for NameServer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let str = format!(
            "{}:{}:{}{}",
            self.protocol,
            format_ip_addr(&self.ip_addr),
            self.port,
            format_name(&self.name)
        );
        fmt.write_str(&str)
    }
}

fn format_ip_addr(ip_addr: &IpAddr) -> String {
    match ip_addr {
        IpAddr::V4(ip) => ip.to_string(),
        IpAddr::V6(ip) => format!("[{}]", ip),
    }
}

fn format_name(name: &Option<String>) -> String {
    name.as_ref()
        .map(|name| format!(",name={}", name))
        .unwrap_or_else(|| "".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameServerGroup {
    name_servers: Vec<NameServer>,
}

impl NameServerGroup {
    pub fn new(name_servers: Vec<NameServer>) -> NameServerGroup {
        NameServerGroup { name_servers }
    }

    pub fn from_system_config() -> Result<Self> {
        system_config::load_from_system_config()
    }

    pub fn from_system_config_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        system_config::load_from_system_config_path(path)
    }

    /// Merges this `NameServerGroup` with another
    pub fn merge(&mut self, other: Self) {
        self.name_servers.extend(other.name_servers)
    }

    pub fn len(&self) -> usize {
        self.name_servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_servers.is_empty()
    }
}

impl IntoIterator for NameServerGroup {
    type Item = NameServer;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.name_servers.into_iter()
    }
}

impl From<NameServerGroup> for Vec<NameServer> {
    fn from(group: NameServerGroup) -> Self {
        group.name_servers
    }
}

#[doc(hidden)]
impl From<resolv_conf::Config> for NameServerGroup {
    fn from(config: resolv_conf::Config) -> Self {
        let tcp = config.use_vc;
        let name_servers = config
            .nameservers
            .into_iter()
            .map(|x| match x {
                ScopedIp::V4(ipv4) if tcp => NameServer::tcp_with_name((ipv4, 53), "System".to_string()),
                ScopedIp::V4(ipv4) => NameServer::udp_with_name((ipv4, 53), "System".to_string()),
                ScopedIp::V6(ipv6, _) if tcp => NameServer::tcp_with_name((ipv6, 53), "System".to_string()),
                ScopedIp::V6(ipv6, _) => NameServer::udp_with_name((ipv6, 53), "System".to_string()),
            })
            .collect();

        NameServerGroup::new(name_servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn display_udp_ipv4() {
        let name_server = NameServer::udp((Ipv4Addr::new(8, 8, 8, 8), 53));

        assert_that(&name_server.to_string()).is_equal_to("udp:8.8.8.8:53".to_string());
    }

    #[test]
    fn display_tcp_ipv6_with_name() {
        let name_server = NameServer::tcp_with_name((Ipv6Addr::LOCALHOST, 5353), "Local".to_string());

        assert_that(&name_server.to_string()).is_equal_to("tcp:[::1]:5353,name=Local".to_string());
    }

    #[test]
    fn from_resolv_conf() {
        let resolv_conf = b"nameserver 127.0.0.53\nnameserver ::1\noptions edns0\n";

        let group: NameServerGroup = system_config::parse(resolv_conf).expect("failed to parse resolv.conf");

        assert_that(&Vec::from(group)).is_equal_to(vec![
            NameServer::udp_with_name((Ipv4Addr::new(127, 0, 0, 53), 53), "System".to_string()),
            NameServer::udp_with_name((Ipv6Addr::LOCALHOST, 53), "System".to_string()),
        ]);
    }

    #[test]
    fn from_resolv_conf_use_vc() {
        let resolv_conf = b"nameserver 127.0.0.53\noptions use-vc\n";

        let group: NameServerGroup = system_config::parse(resolv_conf).expect("failed to parse resolv.conf");

        assert_that(&Vec::from(group)).is_equal_to(vec![NameServer::tcp_with_name(
            (Ipv4Addr::new(127, 0, 0, 53), 53),
            "System".to_string(),
        )]);
    }
}
