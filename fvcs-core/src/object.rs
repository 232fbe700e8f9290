//! Revision object model
//!
//! A revision is a full snapshot of one tracked file plus the metadata that
//! names it. Identifiers are SHA-256 digests over the revision's own fields.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-derived identifier of a revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionId([u8; 32]);

impl RevisionId {
    /// Create a new RevisionId from raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Convert to lowercase hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hexadecimal string (either case)
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex_str)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for RevisionId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Digest `filename ‖ content ‖ timestamp ‖ message`, in that order.
///
/// Pure: the same four inputs always produce the same identifier.
pub fn compute_identifier(
    filename: &str,
    content: &[u8],
    timestamp: &str,
    message: &str,
) -> RevisionId {
    let mut hasher = Sha256::new();
    hasher.update(filename.as_bytes());
    hasher.update(content);
    hasher.update(timestamp.as_bytes());
    hasher.update(message.as_bytes());
    RevisionId(hasher.finalize().into())
}

/// Immutable full-content snapshot of a tracked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    identifier: RevisionId,
    timestamp: String,
    message: String,
    filename: String,
    content: Bytes,
}

impl Revision {
    /// Create a revision, computing its identifier from the other fields
    pub fn new(filename: String, content: Bytes, timestamp: String, message: String) -> Self {
        let identifier = compute_identifier(&filename, &content, &timestamp, &message);
        Self {
            identifier,
            timestamp,
            message,
            filename,
            content,
        }
    }

    pub fn identifier(&self) -> RevisionId {
        self.identifier
    }

    /// Capture time, formatted when the revision was built
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Snapshot bytes (cheap to clone)
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Whether this revision tracks `filename` and carries `identifier`
    pub fn matches(&self, filename: &str, identifier: &RevisionId) -> bool {
        self.filename == filename && self.identifier == *identifier
    }

    /// Metadata view without the content
    pub fn summary(&self) -> RevisionSummary {
        RevisionSummary {
            identifier: self.identifier.to_hex(),
            timestamp: self.timestamp.clone(),
            message: self.message.clone(),
            filename: self.filename.clone(),
            size: self.content.len() as u64,
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Identifier: {} | Timestamp: {} | Message: {} | File: {}",
            self.identifier, self.timestamp, self.message, self.filename
        )
    }
}

/// Serializable listing entry for a revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSummary {
    /// Lowercase hex identifier
    pub identifier: String,
    pub timestamp: String,
    pub message: String,
    pub filename: String,
    /// Content length in bytes
    pub size: u64,
}
