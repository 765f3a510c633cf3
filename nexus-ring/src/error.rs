//! Error kinds for queue operations.

use thiserror::Error;

use crate::Full;

/// Reasons a queue operation could not complete.
///
/// Insertion failures that must hand the rejected value back use
/// [`Full<T>`](crate::Full) instead; it converts into
/// [`QueueError::Full`] once the value is no longer needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The operation needs at least one element.
    #[error("queue is empty")]
    Empty,
    /// Storage has no free slot left.
    #[error("storage is full")]
    Full,
}

impl<T> From<Full<T>> for QueueError {
    #[inline]
    fn from(_: Full<T>) -> Self {
        QueueError::Full
    }
}
