//! Members sidebar: the online/offline roster next to the chat view.
//!
//! Pure builder: member records in, render-ready groups out. The viewer
//! is the one member known to be online (they are looking at the
//! screen); everyone else in the roster lands in the offline group.

use tracing::debug;

use portico_common::id::UserId;
use portico_common::media::AvatarUrlBuilder;
use portico_common::models::{MemberRecord, Presence, RosterEntry};

use crate::avatar::AvatarView;

/// One render-ready member row.
#[derive(Debug, Clone)]
pub struct MemberRow {
    /// Stable render key: the member's backend id, never generated here.
    pub key: UserId,
    pub display_name: String,
    pub avatar: AvatarView,
    /// Presence dot for the row; follows the group it renders under.
    pub presence: Presence,
    /// Draw the owner/admin marker next to the name.
    pub privileged: bool,
}

/// A labeled group of rows with its live count.
#[derive(Debug, Clone)]
pub struct MemberGroup {
    pub label: &'static str,
    pub rows: Vec<MemberRow>,
}

impl MemberGroup {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Header text, e.g. `Online (1)`.
    pub fn header(&self) -> String {
        format!("{} ({})", self.label, self.rows.len())
    }
}

/// The whole sidebar, ready to draw.
#[derive(Debug, Clone)]
pub struct SidebarView {
    pub online: MemberGroup,
    pub offline: MemberGroup,
}

impl SidebarView {
    /// Build the sidebar for `viewer` over an optional roster.
    ///
    /// `None` falls back to [`sample_roster`]. Roster input is taken as
    /// delivered: empty slots render nothing, bare-id entries are
    /// skipped in the offline group, and the viewer is never listed
    /// twice. Skips are omissions, not errors.
    pub fn build(
        viewer: &MemberRecord,
        roster: Option<&[Option<RosterEntry>]>,
        urls: &dyn AvatarUrlBuilder,
    ) -> Self {
        let fallback;
        let slots = match roster {
            Some(slots) => slots,
            None => {
                fallback = sample_roster();
                &fallback
            }
        };

        let mut offline_rows = Vec::new();
        for (index, slot) in slots.iter().enumerate() {
            let Some(entry) = slot else {
                debug!(index, "Skipping empty roster slot");
                continue;
            };
            let Some(member) = entry.record() else {
                debug!(index, "Skipping unhydrated roster entry");
                continue;
            };
            if member.id == viewer.id {
                continue;
            }
            offline_rows.push(Self::row(member, Presence::Offline, urls));
        }

        SidebarView {
            online: MemberGroup {
                label: "Online",
                rows: vec![Self::row(viewer, Presence::Online, urls)],
            },
            offline: MemberGroup {
                label: "Offline",
                rows: offline_rows,
            },
        }
    }

    fn row(member: &MemberRecord, presence: Presence, urls: &dyn AvatarUrlBuilder) -> MemberRow {
        MemberRow {
            key: member.id.clone(),
            display_name: member.display_name().to_owned(),
            avatar: AvatarView::resolve(member, urls),
            presence,
            privileged: member.is_privileged(),
        }
    }
}

/// Placeholder roster shown when no live data is wired up yet.
pub fn sample_roster() -> Vec<Option<RosterEntry>> {
    ["aria", "bruno", "cass"]
        .into_iter()
        .enumerate()
        .map(|(i, username)| {
            Some(RosterEntry::Record(MemberRecord {
                id: UserId::new(format!("sample-{}", i + 1)),
                username: username.to_owned(),
                avatar: None,
                profile: None,
                status: "offline".to_owned(),
                role: None,
                is_admin: false,
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_common::media::CdnUrlBuilder;

    fn cdn() -> CdnUrlBuilder {
        CdnUrlBuilder::new("https://cdn.portico.test")
    }

    fn member(id: &str, username: &str) -> MemberRecord {
        serde_json::from_value(serde_json::json!({ "_id": id, "username": username })).unwrap()
    }

    fn slot(id: &str, username: &str) -> Option<RosterEntry> {
        Some(RosterEntry::Record(member(id, username)))
    }

    #[test]
    fn online_plus_offline_covers_every_distinct_member() {
        let viewer = member("u0", "viewer");
        let roster = vec![
            slot("u0", "viewer"),
            slot("u1", "ada"),
            slot("u2", "bea"),
            slot("u3", "cem"),
        ];

        let view = SidebarView::build(&viewer, Some(&roster), &cdn());

        assert_eq!(view.online.count(), 1);
        assert_eq!(view.offline.count(), 3);
        assert_eq!(view.online.count() + view.offline.count(), 4);
        assert_eq!(view.online.rows[0].key, UserId::from("u0"));
        assert!(view.offline.rows.iter().all(|r| r.key != UserId::from("u0")));
    }

    #[test]
    fn empty_slots_render_nothing() {
        let viewer = member("u0", "viewer");
        let roster = vec![slot("u1", "ada"), None, slot("u2", "bea")];

        let view = SidebarView::build(&viewer, Some(&roster), &cdn());
        assert_eq!(view.offline.count(), 2);
    }

    #[test]
    fn bare_id_entries_are_skipped_offline() {
        let viewer = member("u0", "viewer");
        let roster = vec![
            Some(RosterEntry::Bare("u9".to_owned())),
            slot("u1", "ada"),
        ];

        let view = SidebarView::build(&viewer, Some(&roster), &cdn());
        assert_eq!(view.offline.count(), 1);
        assert_eq!(view.offline.rows[0].key, UserId::from("u1"));
        assert_eq!(view.offline.rows[0].presence, Presence::Offline);
    }

    #[test]
    fn missing_roster_falls_back_to_sample_data() {
        let viewer = member("u0", "viewer");
        let view = SidebarView::build(&viewer, None, &cdn());

        assert_eq!(view.offline.count(), sample_roster().len());
        assert_eq!(view.online.count(), 1);
    }

    #[test]
    fn rows_resolve_names_avatars_and_markers() {
        let viewer: MemberRecord = serde_json::from_value(serde_json::json!({
            "_id": "u0",
            "username": "root",
            "avatar": "avatars/root.png",
            "profile": { "displayName": "The Root" },
            "role": "owner"
        }))
        .unwrap();

        let view = SidebarView::build(&viewer, Some(&[]), &cdn());
        let row = &view.online.rows[0];

        assert_eq!(row.display_name, "The Root");
        assert_eq!(
            row.avatar,
            AvatarView::Url("https://cdn.portico.test/avatars/root.png".into())
        );
        assert_eq!(row.presence, Presence::Online);
        assert!(row.privileged);
    }

    #[test]
    fn group_headers_carry_live_counts() {
        let viewer = member("u0", "viewer");
        let roster = vec![slot("u1", "ada")];

        let view = SidebarView::build(&viewer, Some(&roster), &cdn());
        assert_eq!(view.online.header(), "Online (1)");
        assert_eq!(view.offline.header(), "Offline (1)");
    }
}
