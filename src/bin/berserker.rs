// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::env;
use std::io::IsTerminal;
use std::process;

use clap::error::ErrorKind;
use clap::ArgMatches;
use tracing::{debug, error, info};

use berserker::app::cli_parser::create_parser;
use berserker::app::logging::Logging;
use berserker::app::{run, AppConfig, ExitStatus};

fn main() {
    let args = match create_parser().try_get_matches() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            let _ = err.print();
            process::exit(ExitStatus::CliParsingFailed as i32);
        }
    };

    if let Err(err) = start_logging(&args) {
        eprintln!("Failed to start logging: {:#}", err);
        process::exit(ExitStatus::UnrecoverableError as i32);
    }
    debug!("Parsed args and set up logging.");

    let config = match AppConfig::try_from(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to parse configuration: {:#}", err);
            eprintln!("Failed to parse configuration: {:#}", err);
            process::exit(ExitStatus::ConfigParsingFailed as i32);
        }
    };
    debug!("Parsed config {:?}.", config);

    let exit_status = match run::run(&config) {
        Ok(exit_status) => exit_status,
        Err(err) => {
            eprintln!("Failed: {:#}", err);
            ExitStatus::Failed
        }
    };
    info!("Exiting with {:?}.", exit_status);

    process::exit(exit_status as i32);
}

fn start_logging(args: &ArgMatches) -> anyhow::Result<()> {
    let color = std::io::stderr().is_terminal();
    Logging::new(args.get_count("v"), env::var_os("RUST_LOG"), color, args.get_flag("debug")).start()
}
