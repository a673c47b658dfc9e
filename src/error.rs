//! Error types for moveit-merge

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a consolidation run
#[derive(Debug, Error)]
pub enum Error {
    /// An external command exited with a non-zero status
    #[error("command failed with {}: {command}", describe_code(.code))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` if the process was killed by a signal
        code: Option<i32>,
    },

    /// An external program could not be started at all
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Filesystem operation failed
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template file could not be rendered
    #[error("template error: {0}")]
    Template(String),

    /// The merge plan is inconsistent
    #[error("invalid merge plan: {0}")]
    InvalidPlan(String),

    /// A repository has no address to pull from
    #[error("no source address resolved for repository '{0}'")]
    UnresolvedSource(String),

    /// The operator declined a destructive step
    #[error("aborted: {0}")]
    Aborted(String),
}

impl Error {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code the process should terminate with for this error
    ///
    /// Failed external commands propagate their own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

#[allow(clippy::ref_option)] // thiserror hands fields over by reference
fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("exit code {c}"))
}
