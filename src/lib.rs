//! # Instagram Client Library
//!
//! A client for the Instagram legacy API's users endpoints:
//! - Profile lookup by ID, by username, or for the authenticated user
//! - User search
//! - Follower / following lists with cursor pass-through
//! - Feed, recent media, and liked media
//!
//! Responses come back as dynamically keyed [`ApiResponse`] values: the crate
//! forwards paths, query parameters, and the credential, but imposes no schema
//! on what the API returns. Pagination cursors are passed through verbatim and
//! never followed automatically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use instagram_client::{InstagramClient, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InstagramClient::builder()
//!         .access_token("fb2e77d.47a0479900504cb3ab4a1f626d174d2d")
//!         .build()?;
//!
//!     // List the users the authenticated user follows
//!     let follows = client.users().follows(UserId::Me).await?;
//!     if let Some(users) = follows.data_array() {
//!         for user in users {
//!             println!("{}", user["username"]);
//!         }
//!     }
//!
//!     // Look up a profile by username (resolved through search)
//!     let profile = client.users().get("mikeyk").await?;
//!     println!("{:?}", profile.data());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// API Services
pub mod services;

// Re-exports for convenience
pub use auth::{AuthManager, AuthMethod};
pub use client::{InstagramClient, InstagramClientBuilder};
pub use config::{InstagramConfig, InstagramConfigBuilder};
pub use errors::{InstagramError, InstagramErrorKind, InstagramResult};
pub use services::{PageParams, UserId, UserRef, UsersService};
pub use types::ApiResponse;
