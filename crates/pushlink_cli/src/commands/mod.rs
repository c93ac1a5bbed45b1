//! CLI command implementations.

pub mod interests;
pub mod metadata;
pub mod register;
pub mod track;

use pushlink_engine::{
    Completion, ReqwestTransport, SyncEngine, SystemEnvironment, TransportStatus,
};
use pushlink_store::FileMetadataStore;
use std::fmt::Display;
use thiserror::Error;

/// Engine wired to a live service and an on-disk snapshot.
pub type CliEngine = SyncEngine<ReqwestTransport, FileMetadataStore, SystemEnvironment>;

/// Command failures reported through the exit code.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The service did not accept the call.
    #[error("request not accepted ({0})")]
    NotAccepted(String),

    /// The operation was abandoned.
    #[error("operation aborted: {0}")]
    Aborted(#[from] pushlink_engine::SyncError),
}

/// Prints a completion and converts anything but acceptance into an error.
pub fn report<T: Display>(completion: Completion<T>) -> Result<(), CommandError> {
    match completion {
        Completion::Completed { value, status } => {
            println!("  Status: {}", describe(&status));
            if let Some(value) = value {
                println!("  Value: {}", value);
            }
            if status.success {
                println!("✓ Accepted");
                Ok(())
            } else {
                Err(CommandError::NotAccepted(describe(&status)))
            }
        }
        Completion::Unchanged => {
            println!("✓ Nothing to sync");
            Ok(())
        }
        Completion::Aborted { error, status } => {
            if let Some(status) = status {
                println!("  Status: {}", describe(&status));
            }
            Err(error.into())
        }
    }
}

fn describe(status: &TransportStatus) -> String {
    match (&status.code, &status.transport_error) {
        (Some(code), None) => format!("HTTP {}", code),
        (Some(code), Some(err)) => format!("HTTP {} ({})", code, err),
        (None, Some(err)) => format!("no response ({})", err),
        (None, None) => "no response".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushlink_engine::{StatusCompletion, SyncError};

    fn status(code: Option<u16>, success: bool, err: Option<&str>) -> TransportStatus {
        TransportStatus {
            code,
            success,
            transport_error: err.map(str::to_string),
        }
    }

    #[test]
    fn describe_statuses() {
        assert_eq!(describe(&status(Some(200), true, None)), "HTTP 200");
        assert_eq!(
            describe(&status(Some(200), false, Some("reset"))),
            "HTTP 200 (reset)"
        );
        assert_eq!(
            describe(&status(None, false, Some("dns"))),
            "no response (dns)"
        );
    }

    #[test]
    fn report_maps_outcomes() {
        let accepted: StatusCompletion = Completion::Completed {
            value: None,
            status: status(Some(200), true, None),
        };
        assert!(report(accepted).is_ok());

        let rejected: StatusCompletion = Completion::Completed {
            value: None,
            status: status(Some(500), false, None),
        };
        assert!(matches!(report(rejected), Err(CommandError::NotAccepted(_))));

        let unchanged: StatusCompletion = Completion::Unchanged;
        assert!(report(unchanged).is_ok());

        let aborted: StatusCompletion = Completion::Aborted {
            error: SyncError::MissingPublishId,
            status: None,
        };
        assert!(matches!(report(aborted), Err(CommandError::Aborted(_))));
    }
}
