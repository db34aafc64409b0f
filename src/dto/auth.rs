use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer token payload issued by the identity provider.
#[derive(Debug, Deserialize, Serialize)]
pub struct OwnerClaims {
    pub sub: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}
