use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token payload issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub exp: usize,    // expires at (unix timestamp)
    #[serde(default)]
    pub iat: usize,    // issued at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
