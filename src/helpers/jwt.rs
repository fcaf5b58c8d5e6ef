//! HS256 bearer tokens.
//!
//! Tokens are issued by the identity side (or by `console token issue` for
//! local use); the API only verifies them.

use crate::models;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    /// User id.
    pub sub: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    /// Expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum JwtError {
    #[error("Invalid JWT format: expected 3 parts (header.payload.signature)")]
    Format,
    #[error("Unsupported JWT algorithm: {0}")]
    Algorithm(String),
    #[error("Failed to decode JWT: {0}")]
    Decode(String),
    #[error("JWT signature mismatch")]
    Signature,
    #[error("JWT token expired (exp: {exp}, now: {now})")]
    Expired { exp: i64, now: i64 },
}

impl From<JwtClaims> for models::User {
    fn from(claims: JwtClaims) -> Self {
        models::User {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

fn mac(secret: &str) -> Result<HmacSha256, JwtError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|err| JwtError::Decode(err.to_string()))
}

pub fn encode(claims: &JwtClaims, secret: &str) -> Result<String, JwtError> {
    let header = JwtHeader {
        alg: ALGORITHM.to_string(),
        typ: Some("JWT".to_string()),
    };
    let header = serde_json::to_vec(&header).map_err(|err| JwtError::Decode(err.to_string()))?;
    let payload = serde_json::to_vec(claims).map_err(|err| JwtError::Decode(err.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Verifies signature and expiry, returning the claims.
pub fn decode(token: &str, secret: &str, now: i64) -> Result<JwtClaims, JwtError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(JwtError::Format);
    };

    let header: JwtHeader = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|err| JwtError::Decode(err.to_string()))
        .and_then(|bytes| {
            serde_json::from_slice(&bytes).map_err(|err| JwtError::Decode(err.to_string()))
        })?;
    if header.alg != ALGORITHM {
        return Err(JwtError::Algorithm(header.alg));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|err| JwtError::Decode(err.to_string()))?;
    let mut mac = mac(secret)?;
    mac.update(format!("{}.{}", header_part(token), payload).as_bytes());
    mac.verify_slice(&signature).map_err(|_| JwtError::Signature)?;

    let claims: JwtClaims = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| JwtError::Decode(err.to_string()))
        .and_then(|bytes| {
            serde_json::from_slice(&bytes).map_err(|err| JwtError::Decode(err.to_string()))
        })?;

    if claims.exp < now {
        return Err(JwtError::Expired {
            exp: claims.exp,
            now,
        });
    }

    Ok(claims)
}

fn header_part(token: &str) -> &str {
    token.split('.').next().unwrap_or_default()
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let parts: Vec<&str> = authorization.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        [_, _] => Err("Expected Bearer scheme in Authorization header".to_string()),
        _ => Err("Invalid Authorization header format".to_string()),
    }
}
