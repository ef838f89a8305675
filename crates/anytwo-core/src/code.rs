//! Code vocabulary as the single source of truth for code tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::CoreError;

/// Categorical codes an observer can attach to a breakdown.
///
/// The vocabulary is closed: any other token is rejected with
/// [`CoreError::InvalidCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Code {
    Ace,
    Acp,
    Ant,
    Con,
    Dis,
    Env,
    Exp,
    Fru,
    Int,
    Mis,
    Nav,
    Obs,
    Per,
    Sys,
}

impl Code {
    /// Every code in the vocabulary, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Ace,
        Self::Acp,
        Self::Ant,
        Self::Con,
        Self::Dis,
        Self::Env,
        Self::Exp,
        Self::Fru,
        Self::Int,
        Self::Mis,
        Self::Nav,
        Self::Obs,
        Self::Per,
        Self::Sys,
    ];

    /// The token as written in coding sheets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ace => "ACE",
            Self::Acp => "ACP",
            Self::Ant => "ANT",
            Self::Con => "CON",
            Self::Dis => "DIS",
            Self::Env => "ENV",
            Self::Exp => "EXP",
            Self::Fru => "FRU",
            Self::Int => "INT",
            Self::Mis => "MIS",
            Self::Nav => "NAV",
            Self::Obs => "OBS",
            Self::Per => "PER",
            Self::Sys => "SYS",
        }
    }

    /// Validates a single token, ignoring surrounding whitespace.
    pub fn validate(token: &str) -> Result<Self, CoreError> {
        token.trim().parse()
    }

    /// Parses a `/`-delimited code field such as `"ACE / CON"`.
    ///
    /// Order and duplicates are preserved. A single invalid token fails the
    /// whole field.
    pub fn parse_list(field: &str) -> Result<Vec<Self>, CoreError> {
        field.split('/').map(Self::validate).collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Code {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| CoreError::InvalidCode {
                token: s.to_string(),
            })
    }
}

impl Serialize for Code {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Joins codes back into their `/`-delimited sheet form.
pub fn join_codes(codes: &[Code]) -> String {
    codes
        .iter()
        .copied()
        .map(Code::as_str)
        .collect::<Vec<_>>()
        .join("/")
}
