// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use resolv_conf::Config;
use tracing::debug;

use crate::{Error, Result};

pub static RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

pub fn load_from_system_config<T: From<Config>>() -> Result<T> {
    load_from_system_config_path(RESOLV_CONF_PATH)
}

pub fn load_from_system_config_path<T: From<Config>, P: AsRef<Path>>(path: P) -> Result<T> {
    let mut buf = Vec::with_capacity(4096);
    let mut f = File::open(path.as_ref())?;
    f.read_to_end(&mut buf)?;
    debug!("Read {} bytes from '{}'.", buf.len(), path.as_ref().display());

    parse(&buf)
}

pub(crate) fn parse<T: From<Config>>(buf: &[u8]) -> Result<T> {
    let cfg = resolv_conf::Config::parse(buf).map_err(|e| Error::ParserError {
        what: "resolv.conf".to_string(),
        to: "resolv_conf::Config",
        why: e.to_string(),
    })?;

    Ok(cfg.into())
}
