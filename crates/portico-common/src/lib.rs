//! # portico-common
//!
//! Shared types and contracts used across the Portico client crates.
//! This is the foundation layer: identifiers, wire models, and the media
//! URL contract. No I/O, no UI.

pub mod id;
pub mod media;
pub mod models;
