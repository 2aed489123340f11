//! Member model: how the portal API describes a user inside a portal.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Shown when neither a display name nor a username is present.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// Optional profile block nested inside member payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Profile-level avatar reference, used when the member-level one is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Preferred display name, overrides the username when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Presence states the clients recognize.
///
/// The wire carries a free-form string; anything unrecognized maps to
/// [`Presence::Unknown`] instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
    Idle,
    Offline,
    Unknown,
}

/// A member record as the portal API serializes it.
///
/// The backend historically emitted Mongo-style `_id` keys; newer
/// responses use `id`. Both are accepted. A stable id is mandatory;
/// view layers key rows by it and never generate one at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(alias = "_id")]
    pub id: UserId,

    /// May legitimately be empty for half-provisioned accounts.
    #[serde(default)]
    pub username: String,

    /// Member-level avatar reference (wins over `profile.avatar`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Free-form presence string; see [`MemberRecord::presence`].
    #[serde(default)]
    pub status: String,

    /// Portal-scoped role name (`"owner"`, `"admin"`, …).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub is_admin: bool,
}

impl MemberRecord {
    /// Name to render for this member.
    ///
    /// First non-empty of `profile.displayName` and `username`, else
    /// [`UNKNOWN_MEMBER`]. Empty strings fall through, matching how the
    /// web client treats them.
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.profile.as_ref().and_then(|p| p.display_name.as_deref())
            && !name.is_empty()
        {
            return name;
        }
        if !self.username.is_empty() {
            return &self.username;
        }
        UNKNOWN_MEMBER
    }

    /// Stored avatar reference, if any.
    ///
    /// The member-level field wins over the profile one; empty strings
    /// count as absent.
    pub fn avatar_ref(&self) -> Option<&str> {
        if let Some(avatar) = self.avatar.as_deref()
            && !avatar.is_empty()
        {
            return Some(avatar);
        }
        self.profile
            .as_ref()
            .and_then(|p| p.avatar.as_deref())
            .filter(|a| !a.is_empty())
    }

    /// Placeholder glyph shown when no avatar is stored: the uppercased
    /// first character of the username, `'?'` when the username is empty.
    pub fn initial(&self) -> char {
        self.username
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Typed view of the free-form `status` string.
    pub fn presence(&self) -> Presence {
        match self.status.as_str() {
            "online" => Presence::Online,
            "idle" | "away" => Presence::Idle,
            "offline" | "" => Presence::Offline,
            _ => Presence::Unknown,
        }
    }

    /// Whether this member gets the owner/admin marker next to their name.
    pub fn is_privileged(&self) -> bool {
        self.is_admin || matches!(self.role.as_deref(), Some("owner") | Some("admin"))
    }
}
