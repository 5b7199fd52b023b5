// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! This file is used by the build script. Therefore the command line parser must only depend on `clap` and `std`.

use clap::{value_parser, Arg, ArgAction, Command};

pub static SUPPORTED_RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "ANAME", "CAA", "CNAME", "MX", "NS", "NULL", "PTR", "SOA", "SRV", "TXT",
];

pub static SUPPORTED_OUTPUT_FORMATS: &[&str] = &["summary", "json"];

pub static SUPPORTED_MODES: &[&str] = &["concurrent", "sequential"];

pub fn create_parser() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .disable_help_subcommand(true)
        .arg(
            Arg::new("domains")
                .value_name("DOMAIN")
                .num_args(1..)
                .required_unless_present("list-predefined")
                .help("Domain names to resolve"),
        )
        .arg(
            Arg::new("record-types")
                .short('t')
                .long("record-type")
                .value_name("RECORD TYPE")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_value("A")
                .ignore_case(true)
                .value_parser(SUPPORTED_RECORD_TYPES.to_vec())
                .help("Sets record types to lookup"),
        )
        .arg(
            Arg::new("nameservers")
                .short('s')
                .long("nameserver")
                .value_name("IP ADDR")
                .action(ArgAction::Append)
                .help("Adds nameserver for lookups")
                .long_help(
                    r#"Adds nameserver for lookups. A nameserver is specified by protocol, IP address, and port number, delimited by colons, e.g., udp:8.8.8.8:53. Supported protocols are udp and tcp.
Additionally, a name may be added separated by a comma. If protocol or port number are omitted, the defaults udp and 53 are used, respectively.
Examples:
* 127.0.0.1 is udp:127.0.0.1:53
* ::1 is udp:[::1]:53
* tcp:127.0.0.1 is tcp:127.0.0.1:53
* udp:8.8.8.8:53,name=Google
"#,
                ),
        )
        .arg(
            Arg::new("system-nameservers")
                .long("system-nameservers")
                .action(ArgAction::SetTrue)
                .help("Adds nameservers from resolv.conf for lookups"),
        )
        .arg(
            Arg::new("predefined")
                .short('p')
                .long("predefined")
                .action(ArgAction::SetTrue)
                .help("Adds predefined nameservers for lookups"),
        )
        .arg(
            Arg::new("list-predefined")
                .long("list-predefined")
                .action(ArgAction::SetTrue)
                .help("Lists all predefined nameservers"),
        )
        .arg(
            Arg::new("system-resolv-opt")
                .long("system-resolv-opt")
                .action(ArgAction::SetTrue)
                .help("Uses attempts and timeout set in resolv.conf as tries and lifetime"),
        )
        .arg(
            Arg::new("resolv-conf")
                .long("resolv-conf")
                .value_name("FILE")
                .help("Uses alternative resolv.conf file"),
        )
        .arg(
            Arg::new("tries")
                .long("tries")
                .value_name("NUMBER")
                .value_parser(value_parser!(u64).range(1..))
                .help("Sets number of tries per domain and nameserver [default: 2]"),
        )
        .arg(
            Arg::new("lifetime")
                .long("lifetime")
                .value_name("DURATION")
                .help("Sets timeout of each single lookup, e.g., 500ms, 2s [default: 1s]"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("NUMBER")
                .default_value("1024")
                .value_parser(value_parser!(u64).range(1..))
                .help("Sets max. number of worker threads"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .default_value("concurrent")
                .value_parser(SUPPORTED_MODES.to_vec())
                .help("Sets execution mode"),
        )
        .arg(
            Arg::new("www")
                .long("www")
                .action(ArgAction::SetTrue)
                .help("Adds www. variant of each domain"),
        )
        .arg(
            Arg::new("no-dedup")
                .long("no-dedup")
                .action(ArgAction::SetTrue)
                .help("Keeps duplicate records received from different nameservers and tries"),
        )
        .arg(
            Arg::new("estimate")
                .long("estimate")
                .action(ArgAction::SetTrue)
                .help("Prints estimation of attempts, lookups, and workers before resolving"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .default_value("summary")
                .value_parser(SUPPORTED_OUTPUT_FORMATS.to_vec())
                .help("Sets the output format for result presentation"),
        )
        .arg(
            Arg::new("v")
                .short('v')
                .action(ArgAction::Count)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Uses debug formatting for logging -- much more verbose"),
        )
}
