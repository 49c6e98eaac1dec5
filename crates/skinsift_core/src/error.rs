use thiserror::Error;

use crate::types::FileId;

/// Failure reported by a [`FindingStore`](crate::FindingStore) collaborator.
///
/// The store is outside this crate; all we can do with its failures is carry
/// the reason along.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("result store rejected finding for file {file_id}")]
    ResultStore {
        file_id: FileId,
        #[source]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
