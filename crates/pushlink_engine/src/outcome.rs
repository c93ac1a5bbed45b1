//! Response classification and the caller-facing completion type.

use crate::error::SyncError;
use crate::transport::HttpExchange;
use std::convert::Infallible;

/// The only status code the service uses to signal acceptance.
pub const SUCCESS_STATUS: u16 = 200;

/// Raw outcome of one exchange, exposed to callers regardless of domain result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportStatus {
    /// HTTP status code, if a response arrived.
    pub code: Option<u16>,
    /// Whether the exchange was classified as a success.
    pub success: bool,
    /// Transport error message, if one occurred.
    pub transport_error: Option<String>,
}

/// Classified exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// Status 200 with no transport error.
    Success {
        /// Response body.
        body: Vec<u8>,
        /// Status metadata.
        status: TransportStatus,
    },
    /// Anything else: non-200 status, transport error, or no response at all.
    Failure {
        /// Whatever body bytes were received.
        body: Vec<u8>,
        /// Status metadata.
        status: TransportStatus,
    },
}

impl NetworkOutcome {
    /// Classifies an exchange.
    ///
    /// Success iff the status is exactly 200 and no transport error occurred.
    /// A transport error wins over a 200 status.
    pub fn classify(exchange: HttpExchange) -> Self {
        let success = exchange.status == Some(SUCCESS_STATUS) && exchange.error.is_none();
        let status = TransportStatus {
            code: exchange.status,
            success,
            transport_error: exchange.error.map(|e| e.message),
        };

        if success {
            NetworkOutcome::Success {
                body: exchange.body,
                status,
            }
        } else {
            NetworkOutcome::Failure {
                body: exchange.body,
                status,
            }
        }
    }

    /// Returns true for [`NetworkOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, NetworkOutcome::Success { .. })
    }

    /// Returns the status metadata.
    pub fn status(&self) -> &TransportStatus {
        match self {
            NetworkOutcome::Success { status, .. } | NetworkOutcome::Failure { status, .. } => {
                status
            }
        }
    }
}

/// What an operation hands to its completion callback.
#[derive(Debug)]
pub enum Completion<T> {
    /// One exchange took place.
    ///
    /// `value` is present only when the service accepted the call and the
    /// response carried a decodable value for this operation.
    Completed {
        /// Decoded domain value, if any.
        value: Option<T>,
        /// Transport status of the exchange.
        status: TransportStatus,
    },
    /// Metadata matched the last synced snapshot; nothing was sent.
    Unchanged,
    /// The operation was abandoned.
    ///
    /// `status` is present if the abandonment happened after an exchange.
    Aborted {
        /// Why the operation was abandoned.
        error: SyncError,
        /// Transport status, if an exchange took place.
        status: Option<TransportStatus>,
    },
}

/// Completion for operations that never carry a domain value.
pub type StatusCompletion = Completion<Infallible>;

impl<T> Completion<T> {
    /// Returns the transport status, if an exchange took place.
    pub fn status(&self) -> Option<&TransportStatus> {
        match self {
            Completion::Completed { status, .. } => Some(status),
            Completion::Aborted { status, .. } => status.as_ref(),
            Completion::Unchanged => None,
        }
    }

    /// Returns true if an exchange completed and the service accepted it.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Completion::Completed { status, .. } if status.success)
    }

    /// Returns the decoded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Completion::Completed { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    /// Consumes the completion and returns the decoded value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Completion::Completed { value, .. } => value,
            _ => None,
        }
    }

    /// Returns the abort reason, if any.
    pub fn error(&self) -> Option<&SyncError> {
        match self {
            Completion::Aborted { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl StatusCompletion {
    /// Builds the completion for a status-only exchange.
    pub(crate) fn from_status(status: TransportStatus) -> Self {
        Completion::Completed {
            value: None,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    #[test]
    fn status_200_is_success_for_any_body() {
        for body in [Vec::new(), b"{}".to_vec(), b"not json".to_vec()] {
            let outcome = NetworkOutcome::classify(HttpExchange::response(200, body));
            assert!(outcome.is_success());
            assert_eq!(outcome.status().code, Some(200));
            assert!(outcome.status().success);
        }
    }

    #[test]
    fn other_statuses_fail() {
        for code in [201, 204, 299, 400, 404, 500, 503] {
            let outcome = NetworkOutcome::classify(HttpExchange::response(code, b"{}".to_vec()));
            assert!(!outcome.is_success(), "status {code}");
            assert!(!outcome.status().success);
        }
    }

    #[test]
    fn transport_error_wins_over_200() {
        let exchange = HttpExchange::response(200, b"partial".to_vec())
            .with_error(TransportError::new("connection reset"));
        let outcome = NetworkOutcome::classify(exchange);

        match outcome {
            NetworkOutcome::Failure { body, status } => {
                assert_eq!(body, b"partial");
                assert_eq!(status.code, Some(200));
                assert_eq!(status.transport_error.as_deref(), Some("connection reset"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn no_response_fails() {
        let outcome = NetworkOutcome::classify(HttpExchange::failed(TransportError::new("dns")));
        assert!(!outcome.is_success());
        assert_eq!(outcome.status().code, None);
    }

    #[test]
    fn completion_accessors() {
        let status = TransportStatus {
            code: Some(200),
            success: true,
            transport_error: None,
        };
        let done: Completion<u32> = Completion::Completed {
            value: Some(7),
            status: status.clone(),
        };
        assert!(done.is_accepted());
        assert_eq!(done.value(), Some(&7));
        assert_eq!(done.status(), Some(&status));

        let unchanged: StatusCompletion = Completion::Unchanged;
        assert!(!unchanged.is_accepted());
        assert!(unchanged.status().is_none());

        let aborted: StatusCompletion = Completion::Aborted {
            error: SyncError::MissingPublishId,
            status: None,
        };
        assert!(matches!(aborted.error(), Some(SyncError::MissingPublishId)));
        assert!(aborted.into_value().is_none());
    }
}
