use crate::errors::TokenError;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type marker for the provider's first-person access token format.
/// The media provider rejects tokens without this header.
pub const ACCESS_TOKEN_CTY: &str = "twilio-fpa;v=1";

/// Capability scoping a token to exactly one video room. No wildcard or
/// multi-room variant exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGrant {
    pub room: String,
}

/// The `grants` claim body: the participant identity plus the single video
/// grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenGrants {
    pub identity: String,
    pub video: VideoGrant,
}

/// Custom Debug implementation that redacts the participant identity.
///
/// Identities are user-chosen display names and must not end up in logs
/// or debug output.
impl fmt::Debug for AccessTokenGrants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenGrants")
            .field("identity", &"[REDACTED]")
            .field("video", &self.video)
            .finish()
    }
}

/// Access token payload in the provider's wire format.
///
/// `iss` is the API key SID (identifies the signing key), `sub` is the
/// account SID (identifies the issuing account), and the participant
/// identity rides inside `grants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: AccessTokenGrants,
}

impl AccessTokenClaims {
    /// Build the claims for one issuance.
    ///
    /// Pure function of its inputs: `exp` is always `issued_at + ttl_seconds`
    /// and the grant scopes exactly the requested room.
    pub fn new(
        account_sid: &str,
        api_key_sid: &str,
        identity: &str,
        room: &str,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            // Provider convention: jti is the signing key SID plus the
            // issuance timestamp.
            jti: format!("{api_key_sid}-{issued_at}"),
            iss: api_key_sid.to_string(),
            sub: account_sid.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            grants: AccessTokenGrants {
                identity: identity.to_string(),
                video: VideoGrant {
                    room: room.to_string(),
                },
            },
        }
    }
}

/// Sign access token claims with the API key secret (HS256).
///
/// The output is the compact serialized JWT the provider expects, with the
/// `cty: twilio-fpa;v=1` header marking the token format version.
pub fn sign_access_token(
    claims: &AccessTokenClaims,
    api_key_secret: &[u8],
) -> Result<String, TokenError> {
    if api_key_secret.is_empty() {
        return Err(TokenError::Signing(
            "Signing secret is empty".to_string(),
        ));
    }

    let encoding_key = EncodingKey::from_secret(api_key_secret);

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    header.cty = Some(ACCESS_TOKEN_CTY.to_string());

    encode(&header, claims, &encoding_key)
        .map_err(|e| TokenError::Signing(format!("JWT signing operation failed: {e}")))
}
