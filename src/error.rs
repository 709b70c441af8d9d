//! Error surface of the device session.

use thiserror::Error;

/// Failures visible at the session boundary.
///
/// Transient per-dispatch failures never appear here; they are absorbed by
/// the session's one-shot reopen-and-retry cycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Operation invoked after [`DeviceSession::dispose`](crate::DeviceSession::dispose).
    #[error("device session is disposed")]
    Disposed,

    /// Discovery exhausted every candidate instance without opening one.
    #[error("no device instance could be opened")]
    DeviceUnavailable,
}
