// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::app::output::OutputType;
use crate::concurrence::Mode;
use crate::nameserver::NameServer;
use crate::system_config::RESOLV_CONF_PATH;
use crate::RecordType;

#[derive(Debug)]
pub struct AppConfig {
    pub domains: Vec<String>,
    pub record_types: Vec<RecordType>,
    pub nameservers: Vec<NameServer>,
    pub use_system_nameservers: bool,
    pub predefined: bool,
    pub list_predefined: bool,
    pub use_system_resolv_opt: bool,
    pub resolv_conf_path: String,
    /// `None` if not set on the command line
    pub tries: Option<usize>,
    /// `None` if not set on the command line
    pub lifetime: Option<Duration>,
    pub threads: usize,
    pub mode: Mode,
    pub www: bool,
    pub dedup: bool,
    pub estimate: bool,
    pub output: OutputType,
}

impl TryFrom<&ArgMatches> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let domains = args
            .get_many::<String>("domains")
            .map(|xs| xs.cloned().collect())
            .unwrap_or_default();
        let record_types = args
            .get_many::<String>("record-types")
            .map(|xs| xs.map(|x| parse_record_type(x)).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_else(|| vec![RecordType::A]);
        let nameservers = args
            .get_many::<String>("nameservers")
            .map(|xs| {
                xs.map(|x| NameServer::from_str(x).with_context(|| format!("failed to parse nameserver '{}'", x)))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();
        let lifetime = args
            .get_one::<String>("lifetime")
            .map(|x| humantime::parse_duration(x).with_context(|| format!("failed to parse lifetime '{}'", x)))
            .transpose()?;
        let mode = args
            .get_one::<String>("mode")
            .map(|x| Mode::from_str(x).context("failed to parse mode"))
            .transpose()?
            .unwrap_or_default();
        let output = args
            .get_one::<String>("output")
            .map(|x| OutputType::try_from(x.as_str()).context("failed to parse output type"))
            .transpose()?
            .unwrap_or(OutputType::Summary);

        let config = AppConfig {
            domains,
            record_types,
            nameservers,
            use_system_nameservers: args.get_flag("system-nameservers"),
            predefined: args.get_flag("predefined"),
            list_predefined: args.get_flag("list-predefined"),
            use_system_resolv_opt: args.get_flag("system-resolv-opt"),
            resolv_conf_path: args
                .get_one::<String>("resolv-conf")
                .cloned()
                .unwrap_or_else(|| RESOLV_CONF_PATH.to_string()),
            tries: args.get_one::<u64>("tries").map(|x| *x as usize),
            lifetime,
            threads: args.get_one::<u64>("threads").map(|x| *x as usize).unwrap_or(1024),
            mode,
            www: args.get_flag("www"),
            dedup: !args.get_flag("no-dedup"),
            estimate: args.get_flag("estimate"),
            output,
        };

        Ok(config)
    }
}

fn parse_record_type(str: &str) -> Result<RecordType> {
    RecordType::from_str(&str.to_uppercase()).with_context(|| format!("failed to parse record type '{}'", str))
}
