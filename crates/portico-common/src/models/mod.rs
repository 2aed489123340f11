//! Wire models for the portal API.
//!
//! These mirror what the backend serializes: camelCase keys, with
//! optional fields tolerated and legacy `_id` keys accepted. Anything the clients
//! derive from them (display names, presence, avatar fallbacks) lives as
//! accessors here so every view resolves them the same way.

pub mod member;
pub mod notifications;
pub mod roster;

pub use member::*;
pub use notifications::*;
pub use roster::*;
