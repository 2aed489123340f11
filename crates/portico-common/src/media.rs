//! Avatar URL resolution.
//!
//! Member records store avatar *references* (storage keys or absolute
//! URLs), never final URLs. View layers resolve them through an
//! [`AvatarUrlBuilder`] so the CDN layout stays out of the models.

/// Turns a stored avatar reference into a fetchable absolute URL.
pub trait AvatarUrlBuilder {
    fn avatar_url(&self, reference: &str) -> String;
}

/// Production resolver: prefixes references with the public CDN base.
#[derive(Debug, Clone)]
pub struct CdnUrlBuilder {
    base: String,
}

impl CdnUrlBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl AvatarUrlBuilder for CdnUrlBuilder {
    fn avatar_url(&self, reference: &str) -> String {
        // Already-absolute references pass through untouched.
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }
}
