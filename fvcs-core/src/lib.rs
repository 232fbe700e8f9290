//! fvcs Core Library
//!
//! Minimal single-file versioning:
//! - Revision model with SHA-256 content-derived identifiers
//! - Append-only in-memory revision log
//! - Commit (snapshot), log listing, and revert-by-identifier
//! - Pluggable whole-file I/O backends (local filesystem, in-memory)
//!
//! History is kept in memory only and ends with the `Repository` value.

pub mod clock;
pub mod config;
pub mod error;
pub mod object;
pub mod repository;
pub mod revlog;
pub mod storage;


pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DEFAULT_TIMESTAMP_FORMAT, ReadPolicy, RepositoryConfig};
pub use error::{RepositoryError, Result};
pub use object::{Revision, RevisionId, RevisionSummary, compute_identifier};
pub use repository::{Repository, RevertOutcome};
pub use revlog::RevisionLog;
pub use storage::{FileIo, LocalFs, MemoryFs};
