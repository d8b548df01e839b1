use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

pub fn encode(secret: &str, claims: &Claims) -> Result<String, AppError> {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("cannot sign token: {e}")))
}

pub fn decode(secret: &str, token: &str) -> Result<Claims, AppError> {
    Ok(jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Forbidden(format!("invalid token: {e}")))?
    .claims)
}

pub fn gen_token(
    lifetime_secs: i64,
    secret: &str,
    name: &str,
    roles: &[String],
) -> Result<String, AppError> {
    let claims = Claims {
        sub: name.to_string(),
        exp: (Utc::now() + Duration::seconds(lifetime_secs)).timestamp(),
        roles: roles.to_vec(),
    };
    encode(secret, &claims)
}
