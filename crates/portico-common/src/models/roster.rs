//! Roster slots: the member list as delivered to the sidebar.
//!
//! The portal API serializes rosters loosely: alongside full member
//! objects a slot may hold `null` or a bare id string (a record the
//! backend has not hydrated yet). Consumers get one slot per input
//! element so positional counts survive the cleanup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::member::MemberRecord;

/// One hydrated-or-not slot of a portal roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterEntry {
    /// A full member object.
    Record(MemberRecord),
    /// A bare id string the backend never hydrated.
    Bare(String),
}

impl RosterEntry {
    /// The member record, when this slot holds one.
    pub fn record(&self) -> Option<&MemberRecord> {
        match self {
            RosterEntry::Record(member) => Some(member),
            RosterEntry::Bare(_) => None,
        }
    }
}

/// Tolerant roster parser.
///
/// `null` slots stay as `None`; bare strings and well-formed member
/// objects are kept; anything else (including objects missing a stable
/// id) is logged and replaced with `None` so the slot still occupies
/// its position.
pub fn parse_roster(values: Vec<Value>) -> Vec<Option<RosterEntry>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Null => None,
            Value::String(id) => Some(RosterEntry::Bare(id)),
            Value::Object(_) => match serde_json::from_value::<MemberRecord>(value) {
                Ok(member) => Some(RosterEntry::Record(member)),
                Err(error) => {
                    warn!(index, %error, "Dropping malformed roster entry");
                    None
                }
            },
            other => {
                warn!(index, kind = json_kind(&other), "Dropping non-member roster entry");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
