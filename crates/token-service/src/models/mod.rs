use serde::{Deserialize, Serialize};

/// Token issuance request.
///
/// Carried as query parameters on GET and as a JSON body on POST. Both
/// fields are optional at the wire level so an absent field surfaces as a
/// structured validation error instead of a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuanceRequest {
    pub identity: Option<String>,
    #[serde(rename = "roomName")]
    pub room_name: Option<String>,
}

/// Successful issuance response.
///
/// Echoes `identity` and `roomName` for client-side correlation; only the
/// token itself is security-relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub identity: String,
    #[serde(rename = "roomName")]
    pub room_name: String,
}
