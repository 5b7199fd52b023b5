// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::nameserver::NameServer;

/// Nameservers used when none are configured: Google's public resolver pair.
pub fn default_name_servers() -> Vec<NameServer> {
    vec![google::udp_primary(), google::udp_secondary()]
}

pub fn name_servers() -> Vec<NameServer> {
    vec![
        cloudflare::udp(),
        cloudflare::tcp(),
        google::udp_primary(),
        google::udp_secondary(),
        google::tcp(),
        quad9::udp(),
        quad9::tcp(),
    ]
}

pub mod cloudflare {
    use std::net::Ipv4Addr;

    use crate::nameserver::NameServer;

    static IPV4: Ipv4Addr = Ipv4Addr::new(1, 1, 1, 1);

    pub fn udp() -> NameServer {
        NameServer::udp_with_name((IPV4, 53), "Cloudflare".to_string())
    }

    pub fn tcp() -> NameServer {
        NameServer::tcp_with_name((IPV4, 53), "Cloudflare".to_string())
    }
}

pub mod google {
    use std::net::Ipv4Addr;

    use crate::nameserver::NameServer;

    static IPV4_PRIMARY: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);
    static IPV4_SECONDARY: Ipv4Addr = Ipv4Addr::new(8, 8, 4, 4);

    pub fn udp_primary() -> NameServer {
        NameServer::udp_with_name((IPV4_PRIMARY, 53), "Google".to_string())
    }

    pub fn udp_secondary() -> NameServer {
        NameServer::udp_with_name((IPV4_SECONDARY, 53), "Google".to_string())
    }

    pub fn tcp() -> NameServer {
        NameServer::tcp_with_name((IPV4_PRIMARY, 53), "Google".to_string())
    }
}

pub mod quad9 {
    use std::net::Ipv4Addr;

    use crate::nameserver::NameServer;

    static IPV4: Ipv4Addr = Ipv4Addr::new(9, 9, 9, 9);

    pub fn udp() -> NameServer {
        NameServer::udp_with_name((IPV4, 53), "Quad9".to_string())
    }

    pub fn tcp() -> NameServer {
        NameServer::tcp_with_name((IPV4, 53), "Quad9".to_string())
    }
}
