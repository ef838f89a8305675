//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building breakdowns and evaluations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A code token is not part of the vocabulary.
    #[error("invalid code: {token:?}")]
    InvalidCode { token: String },

    /// A time field did not parse as a time of day.
    #[error("malformed time: {value:?}")]
    MalformedTime { value: String },

    /// A row ends before it starts, even after widening.
    #[error("end {end} is before start {start}")]
    EndBeforeStart { start: String, end: String },

    /// A breakdown was built without any code.
    #[error("a breakdown needs at least one code")]
    EmptyCodes,

    /// A raw row could not be turned into a breakdown.
    #[error("row {row}: {source}")]
    Row {
        /// 1-based data row number (header excluded).
        row: usize,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Wraps this error with the row it came from.
    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        Self::Row {
            row,
            source: Box::new(self),
        }
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(CoreError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated observer identifier.
    ///
    /// Names the evaluation a breakdown belongs to (usually the file stem of
    /// the observer's coding sheet).
    ObserverId, "observer ID"
);
