//! Wire models for the portal notifications payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::id::UserId;
use crate::models::member::MemberRecord;

/// A pending request to join a portal.
///
/// Member-shaped on the wire with the request creation time alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(flatten)]
    pub member: MemberRecord,

    /// When the user asked to join. Garbage timestamps decode as `None`
    /// rather than failing the payload.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A member who recently joined the portal. Read-only in this view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMember {
    #[serde(flatten)]
    pub member: MemberRecord,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// Response body of `GET /api/portals/{portalId}/notifications`.
///
/// Either list may be absent entirely; absent means empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalNotifications {
    #[serde(default)]
    pub join_requests: Vec<JoinRequest>,

    #[serde(default)]
    pub recent_members: Vec<RecentMember>,
}

impl PortalNotifications {
    /// Ids present in both lists at once.
    ///
    /// The backend owns the invariant that a user is never simultaneously
    /// pending and recently joined; callers log when a payload breaks it.
    pub fn overlapping_ids(&self) -> Vec<&UserId> {
        self.join_requests
            .iter()
            .map(|r| &r.member.id)
            .filter(|id| self.recent_members.iter().any(|m| m.member.id == **id))
            .collect()
    }
}

/// Accepts an RFC 3339 timestamp, `null`, an absent field, or garbage.
/// Anything unparseable becomes `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value::<DateTime<Utc>>(value).ok()))
}
