//! Identifier newtypes.
//!
//! The portal backend assigns opaque string ids (Mongo-style `_id`
//! values). Wrapping them keeps portal ids and user ids from being
//! swapped at call sites; on the wire both are plain strings.
//!
//! View layers key rows by these ids and never fabricate their own;
//! a record that arrives without one is malformed input, handled at the
//! parsing boundary (see `models::roster`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of a portal (a community space).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalId(String);

impl PortalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortalId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PortalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Id of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
