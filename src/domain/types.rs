//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, `Y`/`N`
//! flags) so that once a value reaches the domain layer it can be treated as
//! trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided flag was neither `Y` nor `N`.
    #[error("invalid flag value: {0}")]
    InvalidFlag(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Single-character boolean code persisted by the upstream API.
///
/// The API never sees real booleans; conversion happens only at the form
/// boundary through the `From<bool>` implementations.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum YesNo {
    #[default]
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl YesNo {
    /// Returns the wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Y",
            YesNo::No => "N",
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }

    /// Returns the opposite flag.
    pub const fn toggled(self) -> Self {
        match self {
            YesNo::Yes => YesNo::No,
            YesNo::No => YesNo::Yes,
        }
    }
}

impl Display for YesNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Y" | "y" => Ok(YesNo::Yes),
            "N" | "n" => Ok(YesNo::No),
            other => Err(TypeConstraintError::InvalidFlag(other.to_string())),
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

impl From<YesNo> for bool {
    fn from(value: YesNo) -> Self {
        value.is_yes()
    }
}

/// Macro to generate newtypes for the opaque string identifiers issued by the
/// upstream API.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            ///
            /// `.` and `..` are refused since they would name a different
            /// upstream resource once used as a path segment.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                match trimmed.as_str() {
                    "" => Err(TypeConstraintError::EmptyString),
                    "." | ".." => Err(TypeConstraintError::InvalidValue(trimmed)),
                    _ => Ok(Self(trimmed)),
                }
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(BookId, "Identifier of a book record.");
id_newtype!(TopicId, "Identifier of a topic record.");
id_newtype!(QueryId, "Identifier of a Q&A question.");
id_newtype!(UserId, "Identifier of a user account.");

/// Trims the value and maps blank strings to `None`.
pub fn non_blank<S: AsRef<str>>(value: S) -> Option<String> {
    let trimmed = value.as_ref().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
