//! Persistence seams.
//!
//! The local store holds one JSON blob per device; the remote store holds
//! one snapshot per user. Both are traits so sessions can run against
//! in-memory fakes.

pub mod error;
pub mod local;
pub mod remote;

pub use error::{RemoteError, StoreError};
pub use local::{BlobStore, FileBlobStore, LoadOutcome, LocalSnapshots, MemoryBlobStore};
pub use remote::{DirRemoteStore, MemoryRemoteStore, RemoteStore, UserId};
