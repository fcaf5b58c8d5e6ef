use crate::configuration::Settings;
use crate::helpers::jwt;
use crate::middleware::authentication::get_header;
use crate::models;
use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage};
use std::sync::Arc;

/// `Ok(false)` when no bearer token is present, so the next method runs.
/// A bearer token that fails verification is an error, never a fallback.
#[tracing::instrument(name = "Authenticate with JWT", skip(req))]
pub fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let Some(authorization) = get_header::<String>(req, "authorization")? else {
        return Ok(false);
    };

    let token = match jwt::extract_bearer_token(&authorization) {
        Ok(token) => token,
        Err(err) => {
            tracing::debug!("Not a bearer token: {}", err);
            return Ok(false);
        }
    };

    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or_else(|| "Authentication is not configured".to_string())?;
    let now = chrono::Utc::now().timestamp();
    let claims = jwt::decode(token, &settings.auth.jwt_secret, now).map_err(|err| {
        tracing::warn!("JWT validation failed: {}", err);
        "Invalid or expired token".to_string()
    })?;

    let user: models::User = claims.into();
    tracing::debug!("ACL check for JWT role: {}", user.role);
    let acl_vals = actix_casbin_auth::CasbinVals {
        subject: user.role.clone(),
        domain: None,
    };

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    if req.extensions_mut().insert(acl_vals).is_some() {
        return Err("Something wrong with access control".to_string());
    }

    Ok(true)
}
