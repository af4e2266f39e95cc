//! Error types for the remapping daemon.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mouse-remapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration or running the
/// interception channel.
///
/// Nothing in here is produced on the event path: failures inside the tap
/// callback are absorbed and turned into a pass-through.
#[derive(Debug, Error)]
pub enum Error {
    /// The interception channel is already running.
    #[error("interception channel is already running")]
    AlreadyRunning,

    /// The process is not trusted for input monitoring.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The host refused to create the event tap.
    #[error("failed to create event tap: {0}")]
    TapCreateFailed(String),

    /// Attaching the tap to the run loop failed.
    #[error("run loop error: {0}")]
    RunLoop(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Reading or writing the configuration file failed.
    #[error("config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`crate::Config`].
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Thread-related error.
    #[error("thread error: {0}")]
    ThreadError(String),
}
