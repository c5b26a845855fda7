//! Opaque identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier exactly as the backend sent it.
///
/// The backend encodes some identifiers as JSON numbers and others (64-bit
/// values) as JSON strings. Both forms are kept as received so that a value
/// re-serializes byte-for-byte; `Int(5)` and `Str("5")` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// JSON integer.
    Int(i64),
    /// JSON string.
    Str(String),
}

impl RawId {
    /// Whether two identifiers name the same entity regardless of encoding.
    ///
    /// A string matches an integer only when it is the integer's canonical
    /// decimal rendering, so `"09"` and `"+9"` never match `9`. Used only for
    /// comparisons across message kinds (for example the `my_id` option
    /// against a user id); cache keys never go through it.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Str(b)) | (Self::Str(b), Self::Int(a)) => {
                *b == a.to_string()
            },
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// User identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub RawId);

/// Chat identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub RawId);

/// File identifier, unique within one backend session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub i64);

macro_rules! raw_id_conversions {
    ($name:ident) => {
        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(RawId::Int(value))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(RawId::from(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

raw_id_conversions!(UserId);
raw_id_conversions!(ChatId);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
