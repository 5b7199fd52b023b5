// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use thiserror::Error;

/// Main Error type of this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {msg}")]
    InvalidArgument { msg: String },
    #[error("resolver failed")]
    ResolverError {
        #[from]
        source: crate::resolver::Error,
    },
    #[error("worker thread '{worker}' panicked")]
    WorkerPanicked { worker: String },
    #[error("failed to parse '{what}' to {to} because {why}")]
    ParserError {
        what: String,
        to: &'static str,
        why: String,
    },
    #[error("failed to execute IO operation")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        Error::InvalidArgument { msg: msg.into() }
    }
}
