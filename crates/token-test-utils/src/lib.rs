//! # Token Test Utilities
//!
//! Shared test utilities for the room access token service.
//!
//! This crate provides:
//! - Deterministic configuration fixtures (fixed SIDs and secret)
//! - Server test harness (TestTokenServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestTokenServer::spawn().await?;
//!
//!     let body: serde_json::Value = reqwest::Client::new()
//!         .get(format!("{}/token?identity=alice&roomName=room42", server.url()))
//!         .send()
//!         .await?
//!         .json()
//!         .await?;
//!
//!     body["token"]
//!         .as_str()
//!         .unwrap()
//!         .to_string()
//!         .assert_valid_access_token()
//!         .assert_identity("alice")
//!         .assert_room("room42");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;
