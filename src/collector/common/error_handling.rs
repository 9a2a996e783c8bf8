// Common error types and result aliases for collector passes.

use std::io;

use thiserror::Error;

/// Failure of one aggregation pass.
///
/// Only command execution can fail a pass. Lines that do not parse are
/// skipped and fields that do not decode fall back to zero, so there is no
/// parse variant here.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Command failed: '{command}' (code: {code:?}) stderr: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{0}")]
    Other(String),
}

pub type CollectorResult<T> = Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = CollectorError::CommandFailed {
            command: "squeue -h".to_string(),
            code: Some(1),
            stderr: "slurm_load_jobs error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: 'squeue -h' (code: Some(1)) stderr: slurm_load_jobs error"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "sinfo not found");
        let err: CollectorError = io_err.into();
        assert!(matches!(err, CollectorError::Io(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CollectorError>();
    }
}
