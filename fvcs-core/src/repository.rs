//! In-memory single-file repository
//!
//! Ties the revision log to a file I/O backend and a clock. History lives only
//! as long as the `Repository` value does.

use crate::clock::{Clock, SystemClock};
use crate::config::{DEFAULT_TIMESTAMP_FORMAT, ReadPolicy, RepositoryConfig};
use crate::error::{RepositoryError, Result};
use crate::object::{Revision, RevisionId, RevisionSummary};
use crate::revlog::RevisionLog;
use crate::storage::FileIo;
use bytes::Bytes;
use std::fmt::Write;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Result of a successful revert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertOutcome {
    pub filename: String,
    /// Identifier of the revision whose content was restored
    pub identifier: RevisionId,
    pub bytes_written: usize,
}

/// Single-file repository
///
/// The revision log sits behind one `RwLock`: commits take the write side only
/// for the append, listings and revert scans take the read side.
pub struct Repository<F: FileIo, C: Clock = SystemClock> {
    fs: F,
    clock: C,
    config: RepositoryConfig,
    log: RwLock<RevisionLog>,
}

impl<F: FileIo> Repository<F, SystemClock> {
    /// Create a repository with default configuration
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, RepositoryConfig::default())
    }

    /// Create a repository stamping revisions with the system clock
    pub fn with_config(fs: F, config: RepositoryConfig) -> Self {
        let clock = SystemClock::new(config.use_utc);
        Self::with_clock(fs, clock, config)
    }
}

impl<F: FileIo, C: Clock> Repository<F, C> {
    pub fn with_clock(fs: F, clock: C, config: RepositoryConfig) -> Self {
        Self {
            fs,
            clock,
            config,
            log: RwLock::new(RevisionLog::new()),
        }
    }

    /// Announce the repository; there is nothing to set up
    pub fn initialize(&self) {
        info!("Repository initialized.");
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// The file backend revisions are read from and restored to
    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Snapshot `filename` and append the revision
    ///
    /// The file is read whole. Under [`ReadPolicy::Lenient`] an unreadable
    /// file is committed as empty content; under [`ReadPolicy::Strict`] the
    /// commit fails with [`RepositoryError::ReadFailure`] and the log is left
    /// untouched.
    pub fn commit(&self, filename: &str, message: &str) -> Result<RevisionId> {
        if filename.is_empty() {
            return Err(RepositoryError::InvalidFilename);
        }

        let content = match self.fs.read_all(filename) {
            Ok(content) => content,
            Err(source) => match self.config.read_policy {
                ReadPolicy::Strict => {
                    return Err(RepositoryError::ReadFailure {
                        filename: filename.to_string(),
                        source,
                    });
                }
                ReadPolicy::Lenient => {
                    warn!(
                        "Could not read '{}', committing empty content: {}",
                        filename, source
                    );
                    Bytes::new()
                }
            },
        };

        let timestamp = self.timestamp();
        let revision = Revision::new(
            filename.to_string(),
            content,
            timestamp,
            message.to_string(),
        );
        let identifier = revision.identifier();

        let count = {
            let mut log = self.write_log();
            log.append(revision);
            log.len()
        };

        info!(
            "Changes committed to '{}' ({}, {} revisions)",
            filename, identifier, count
        );
        Ok(identifier)
    }

    /// Every revision, in commit order
    pub fn log(&self) -> Vec<Revision> {
        self.read_log().list_all()
    }

    /// Revisions of one file, in commit order
    pub fn history(&self, filename: &str) -> Vec<Revision> {
        self.read_log().history(filename)
    }

    /// Content-free listing of every revision, in commit order
    pub fn summaries(&self) -> Vec<RevisionSummary> {
        self.read_log().iter().map(Revision::summary).collect()
    }

    /// Number of revisions recorded
    pub fn len(&self) -> usize {
        self.read_log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_log().is_empty()
    }

    /// Overwrite `filename` with the content of revision `identifier`
    ///
    /// The newest revision matching both keys wins. Nothing is written and
    /// the log is unchanged when no revision matches. Reverting does not
    /// record a revision of its own.
    pub fn revert(&self, filename: &str, identifier: &str) -> Result<RevertOutcome> {
        let not_found = || RepositoryError::not_found(filename, identifier);

        // Identifiers are lowercase hex digests; any other spelling names nothing
        let id = RevisionId::from_hex(identifier).map_err(|_| not_found())?;
        if id.to_hex() != identifier {
            return Err(not_found());
        }

        let content = {
            let log = self.read_log();
            debug!(
                "Scanning {} revisions for {} in '{}'",
                log.len(), id, filename
            );
            log.find_latest(filename, &id)
                .map(|revision| revision.content().clone())
                .ok_or_else(not_found)?
        };

        self.fs
            .write_all(filename, &content)
            .map_err(|source| RepositoryError::WriteFailure {
                filename: filename.to_string(),
                source,
            })?;

        info!(
            "File '{}' reverted to the state at revision {}.",
            filename, id
        );
        Ok(RevertOutcome {
            filename: filename.to_string(),
            identifier: id,
            bytes_written: content.len(),
        })
    }

    /// Most recent revision of `filename`
    pub fn latest(&self, filename: &str) -> Option<Revision> {
        self.read_log().latest(filename).cloned()
    }

    fn timestamp(&self) -> String {
        let now = self.clock.now();
        let layout = match self.config.validate() {
            Ok(()) => self.config.timestamp_format.as_str(),
            Err(e) => {
                warn!("{}, using default timestamp layout", e);
                DEFAULT_TIMESTAMP_FORMAT
            }
        };
        let mut out = String::new();
        if write!(out, "{}", now.format(layout)).is_err() {
            out.clear();
            // The default layout is always renderable
            let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        out
    }

    fn read_log(&self) -> RwLockReadGuard<'_, RevisionLog> {
        self.log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_log(&self) -> RwLockWriteGuard<'_, RevisionLog> {
        self.log.write().unwrap_or_else(PoisonError::into_inner)
    }
}
