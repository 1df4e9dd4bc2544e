//! Identifier types
//!
//! The backend is inconsistent about identifier encoding: book ids arrive as
//! `"100"` in feed items but as `100` in search results, author ids are numeric
//! in the catalog but strings once followed. [`RefId`] keeps whatever form the
//! backend used so it can be echoed back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated user's opaque reference string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Book or author reference as sent by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefId {
    Numeric(i64),
    Text(String),
}

impl RefId {
    /// Parse user-supplied text, preferring the numeric form
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => RefId::Numeric(n),
            Err(_) => RefId::Text(raw.to_string()),
        }
    }

    /// Numeric value if the reference is (or spells) an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RefId::Numeric(n) => Some(*n),
            RefId::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Same reference regardless of string/number encoding
    pub fn same_as(&self, other: &RefId) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefId::Numeric(n) => write!(f, "{}", n),
            RefId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RefId {
    fn from(n: i64) -> Self {
        RefId::Numeric(n)
    }
}

impl From<&str> for RefId {
    fn from(s: &str) -> Self {
        RefId::Text(s.to_string())
    }
}
