use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the user who owns a list view, its presets and its fetches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Explicit per-operation context.
///
/// Every operation that depends on who is asking receives this value as a
/// parameter; nothing in the engine looks the current user up on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerContext {
    pub owner: OwnerId,
}

impl OwnerContext {
    pub fn new(owner: impl Into<OwnerId>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    /// Context used by local tools that have no authenticated user
    pub fn local() -> Self {
        Self::new("local")
    }
}
