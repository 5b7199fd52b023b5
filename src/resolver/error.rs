// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use hickory_resolver::proto::{ProtoError, ProtoErrorKind};
use hickory_resolver::{ResolveError, ResolveErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Failure of a single backend lookup.
///
/// These never leave an attempt: the per-attempt query turns them into an empty result.
#[derive(Debug, Clone, Error, Serialize)]
pub enum Error {
    #[error("request timed out")]
    Timeout,
    #[error("no connection to nameserver available")]
    NoConnections,
    #[error("resolver error: {reason}")]
    ResolveError { reason: String },
    #[error("protocol error: {reason}")]
    ProtoError { reason: String },
    #[error("backend runtime error: {reason}")]
    RuntimeError { reason: String },
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Self {
        match error.kind() {
            ResolveErrorKind::Proto(proto_error) => Self::from(proto_error.clone()),
            _ => Error::ResolveError {
                reason: error.to_string(),
            },
        }
    }
}

impl From<ProtoError> for Error {
    fn from(error: ProtoError) -> Self {
        match error.kind() {
            ProtoErrorKind::Timeout => Error::Timeout,
            ProtoErrorKind::NoConnections => Error::NoConnections,
            _ => Error::ProtoError {
                reason: error.to_string(),
            },
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;

    #[test]
    fn proto_timeout_is_timeout() {
        let error = Error::from(ProtoError::from(ProtoErrorKind::Timeout));

        assert!(matches!(error, Error::Timeout));
    }

    #[test]
    fn proto_no_connections_is_no_connections() {
        let error = Error::from(ProtoError::from(ProtoErrorKind::NoConnections));

        assert!(matches!(error, Error::NoConnections));
    }

    #[test]
    fn resolve_error_wrapping_proto_error_is_unwrapped() {
        let error = Error::from(ResolveError::from(ProtoError::from(ProtoErrorKind::Timeout)));

        assert!(matches!(error, Error::Timeout));
    }

    #[test]
    fn other_proto_error_keeps_reason() {
        let error = Error::from(ProtoError::from(ProtoErrorKind::Message("bad label")));

        match error {
            Error::ProtoError { reason } => assert_that(&reason).contains("bad label"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn other_resolve_error_keeps_reason() {
        let error = Error::from(ResolveError::from(ResolveErrorKind::Message("no upstream")));

        match error {
            Error::ResolveError { reason } => assert_that(&reason).contains("no upstream"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn runtime_error_is_a_resolver_error() {
        let error = crate::Error::from(Error::RuntimeError {
            reason: "no threads".to_string(),
        });

        assert!(matches!(
            error,
            crate::Error::ResolverError {
                source: Error::RuntimeError { .. }
            }
        ));
    }
}
