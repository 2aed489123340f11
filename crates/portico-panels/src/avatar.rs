//! Avatar presentation resolution.

use portico_common::media::AvatarUrlBuilder;
use portico_common::models::MemberRecord;

/// How a renderer should draw a member's avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarView {
    /// Fetch and draw this image.
    Url(String),
    /// No stored avatar; draw the placeholder glyph instead.
    Initial(char),
}

impl AvatarView {
    /// Stored reference through the URL builder, else the username initial.
    pub fn resolve(member: &MemberRecord, urls: &dyn AvatarUrlBuilder) -> Self {
        match member.avatar_ref() {
            Some(reference) => AvatarView::Url(urls.avatar_url(reference)),
            None => AvatarView::Initial(member.initial()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_common::media::CdnUrlBuilder;

    fn member(json: serde_json::Value) -> MemberRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn stored_reference_resolves_through_cdn() {
        let cdn = CdnUrlBuilder::new("https://cdn.portico.test");
        let m = member(serde_json::json!({
            "_id": "u1",
            "username": "ada",
            "avatar": "avatars/u1.png"
        }));
        assert_eq!(
            AvatarView::resolve(&m, &cdn),
            AvatarView::Url("https://cdn.portico.test/avatars/u1.png".into())
        );
    }

    #[test]
    fn missing_avatar_falls_back_to_initial() {
        let cdn = CdnUrlBuilder::new("https://cdn.portico.test");
        let m = member(serde_json::json!({ "_id": "u1", "username": "ada" }));
        assert_eq!(AvatarView::resolve(&m, &cdn), AvatarView::Initial('A'));

        let m = member(serde_json::json!({ "_id": "u1", "username": "" }));
        assert_eq!(AvatarView::resolve(&m, &cdn), AvatarView::Initial('?'));
    }
}
