use std::fmt;

use serde::{Deserialize, Serialize};

/// Status taxonomy surfaced to callers.
///
/// Every failure maps to exactly one code; nothing is retried or masked on
/// the server side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    Ok,
    /// A read targeted a file that does not exist.
    NotFound,
    /// The request was malformed: undecodable body, or an id/extension that
    /// would escape the storage root.
    InvalidArgument,
    /// Any other storage failure.
    Internal,
}

impl StatusCode {
    /// HTTP status used by the HTTP transport.
    pub fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
            Self::InvalidArgument => 400,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_mapping() {
        assert_eq!(StatusCode::Ok.http_status(), 200);
        assert_eq!(StatusCode::NotFound.http_status(), 404);
        assert_eq!(StatusCode::InvalidArgument.http_status(), 400);
        assert_eq!(StatusCode::Internal.http_status(), 500);
    }

    #[test]
    fn display_names() {
        assert_eq!(StatusCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(StatusCode::Internal.to_string(), "INTERNAL");
    }
}
