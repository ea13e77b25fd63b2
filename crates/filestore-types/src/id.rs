use std::fmt;

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Length of a generated [`FileId`] in characters.
pub const FILE_ID_LEN: usize = 16;

/// Upper bound on caller-supplied IDs. Keeps `<id><extension>` under the
/// usual 255-byte filename limit.
const MAX_ID_LEN: usize = 128;

/// Server-generated identifier for a stored file.
///
/// Generated IDs are [`FILE_ID_LEN`] characters drawn uniformly from
/// `[A-Za-z0-9]` using the operating system's CSPRNG, giving roughly 95 bits
/// of entropy. IDs received from callers are only checked for path safety:
/// the store never synthesizes an ID outside [`FileId::generate`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileId(String);

impl FileId {
    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        let id: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(FILE_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Parse a caller-supplied ID.
    ///
    /// Rejects anything that would resolve outside the storage root when
    /// joined onto it: empty strings, `.` and `..`, path separators, and NUL.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::EmptyId);
        }
        if s.len() > MAX_ID_LEN {
            return Err(TypeError::IdTooLong {
                len: s.len(),
                max: MAX_ID_LEN,
            });
        }
        if s == "." || s == ".." || s.contains(['/', '\\', '\0']) {
            return Err(TypeError::InvalidId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FileId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FileId> for String {
    fn from(id: FileId) -> Self {
        id.0
    }
}

impl std::str::FromStr for FileId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
