use thiserror::Error;

/// Raised when a position is outside the range an operation accepts.
///
/// Every list operation validates its index before touching any node, so
/// receiving this error means the list was left exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("list is empty")]
    Empty,

    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("insertion index {index} out of range 0..={len}")]
    InsertOutOfRange { index: usize, len: usize },
}

impl IndexError {
    /// Error for a read or overwrite of a node that does not exist.
    pub(crate) fn existing(index: usize, len: usize) -> IndexError {
        if len == 0 {
            IndexError::Empty
        } else {
            IndexError::OutOfRange { index, len }
        }
    }
}
