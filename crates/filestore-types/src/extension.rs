use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Extension used when a create request carries none.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Dotted filename suffix of a stored file (e.g. `.txt`).
///
/// Two constructors exist because the two sides of the lifecycle treat the
/// suffix differently:
///
/// - [`Extension::normalize`] runs on create: empty becomes `.txt`, a missing
///   leading dot is prepended.
/// - [`Extension::verbatim`] runs on read/update/delete: the caller must pass
///   back exactly what create returned, so nothing is rewritten. An empty
///   extension addresses a file with no suffix at all.
///
/// Both reject path separators and NUL.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Extension(String);

impl Extension {
    /// Normalize an optional caller-supplied extension for create.
    pub fn normalize(raw: Option<&str>) -> Result<Self, TypeError> {
        let raw = raw.unwrap_or_default();
        if raw.is_empty() {
            return Ok(Self(DEFAULT_EXTENSION.to_string()));
        }
        validate(raw)?;
        if raw.starts_with('.') {
            Ok(Self(raw.to_string()))
        } else {
            Ok(Self(format!(".{raw}")))
        }
    }

    /// Accept an extension exactly as supplied.
    pub fn verbatim(raw: &str) -> Result<Self, TypeError> {
        validate(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// The `.txt` default.
    pub fn default_txt() -> Self {
        Self(DEFAULT_EXTENSION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn validate(raw: &str) -> Result<(), TypeError> {
    if raw.contains(['/', '\\', '\0']) {
        return Err(TypeError::InvalidExtension(raw.to_string()));
    }
    Ok(())
}

impl Default for Extension {
    fn default() -> Self {
        Self::default_txt()
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extension({:?})", self.0)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Extension {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::verbatim(&s)
    }
}

impl From<Extension> for String {
    fn from(ext: Extension) -> Self {
        ext.0
    }
}
