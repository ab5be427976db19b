use serde::{Deserialize, Serialize};

/// Access token claims as issued by the identity provider. `sub` is the numeric user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    #[serde(default)]
    pub jti: Option<String>,
    /// Double-submit token, required on unsafe methods when the token travels in a cookie.
    #[serde(default)]
    pub csrf: Option<String>,
}
