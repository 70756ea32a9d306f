//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for issued access tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::fixtures::TEST_API_KEY_SECRET;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
    #[serde(default)]
    pub cty: Option<String>,
}

/// Decoded grants claim
#[derive(Debug, Deserialize)]
struct Grants {
    pub identity: String,
    pub video: VideoGrant,
}

#[derive(Debug, Deserialize)]
struct VideoGrant {
    pub room: String,
}

/// Decoded access token claims
#[derive(Debug, Deserialize)]
pub struct DecodedAccessToken {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    grants: Grants,
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_access_token()
///     .assert_identity("alice")
///     .assert_room("room42");
/// ```
pub trait TokenAssertions {
    /// Assert the token is a well-formed provider access token: three JWT
    /// segments, HS256, `cty: twilio-fpa;v=1`, and a signature that
    /// verifies against the test secret.
    fn assert_valid_access_token(&self) -> &Self;

    /// Assert the token's participant identity
    fn assert_identity(&self, identity: &str) -> &Self;

    /// Assert the token's video grant room
    fn assert_room(&self, room: &str) -> &Self;

    /// Assert the token's lifetime (`exp - iat`) in seconds
    fn assert_ttl(&self, ttl_seconds: i64) -> &Self;

    /// Decode the claims for ad-hoc assertions
    fn decode_access_token(&self) -> DecodedAccessToken;
}

impl TokenAssertions for String {
    fn assert_valid_access_token(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        // Decode and validate the header
        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");

        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");
        assert_eq!(
            header.cty.as_deref(),
            Some("twilio-fpa;v=1"),
            "Expected provider access token content type"
        );

        // Signature must verify against the test secret
        self.decode_access_token();

        self
    }

    fn assert_identity(&self, identity: &str) -> &Self {
        let decoded = self.decode_access_token();
        assert_eq!(
            decoded.grants.identity, identity,
            "Token identity mismatch"
        );
        self
    }

    fn assert_room(&self, room: &str) -> &Self {
        let decoded = self.decode_access_token();
        assert_eq!(decoded.grants.video.room, room, "Token room mismatch");
        self
    }

    fn assert_ttl(&self, ttl_seconds: i64) -> &Self {
        let decoded = self.decode_access_token();
        assert_eq!(
            decoded.exp - decoded.iat,
            ttl_seconds,
            "Token TTL mismatch"
        );
        self
    }

    fn decode_access_token(&self) -> DecodedAccessToken {
        decode::<DecodedAccessToken>(
            self,
            &DecodingKey::from_secret(TEST_API_KEY_SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Token should verify against the test secret")
        .claims
    }
}

impl DecodedAccessToken {
    /// The participant identity carried in the grants claim.
    pub fn identity(&self) -> &str {
        &self.grants.identity
    }

    /// The room scoped by the token's sole video grant.
    pub fn room(&self) -> &str {
        &self.grants.video.room
    }
}
