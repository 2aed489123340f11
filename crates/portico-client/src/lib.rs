//! Portico portal API client.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use portico_client::{ClientConfig, PortalClient};
//! use portico_common::id::PortalId;
//!
//! #[tokio::main]
//! async fn main() -> portico_client::Result<()> {
//!     let client = PortalClient::new(
//!         ClientConfig::new("https://portico.example.com").with_bearer_token("token"),
//!     )?;
//!
//!     let portal = PortalId::from("p1");
//!     let payload = client.notifications(&portal).await?;
//!     for request in &payload.join_requests {
//!         client.approve_member(&portal, &request.member.id).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{ClientConfig, PortalClient};
pub use error::{ClientError, Result};
