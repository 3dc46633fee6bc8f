//! Request extractors for the auth library's session cookie and the admin
//! Basic credentials.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine};
use pana_persist::SESSION_COOKIE;
use std::sync::Arc;
use tracing::warn;

use crate::config::AdminCredentials;
use crate::error::{ApiError, ResultExt};
use crate::state::AppState;

/// Prefix the auth library adds to cookie names on HTTPS deployments
const SECURE_PREFIX: &str = "__Secure-";

/// Value of the session cookie, if the request carries one
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| {
            let name = name.trim();
            name == SESSION_COOKIE || name.strip_prefix(SECURE_PREFIX) == Some(SESSION_COOKIE)
        })
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<String>, pana_persist::PersistError> {
    match session_cookie(&parts.headers) {
        Some(cookie) => state.persist.resolve_session(&cookie).await,
        None => Ok(None),
    }
}

/// Signed-in user id; rejects with 401 when there is no live session
pub struct SessionUser(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await
            .or_fail("Failed to resolve session")?
            .map(SessionUser)
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Signed-in user id when present; lookup failures count as signed out
pub struct MaybeSessionUser(pub Option<String>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeSessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await {
            Ok(user) => Ok(MaybeSessionUser(user)),
            Err(err) => {
                warn!(error = %err, "session lookup failed");
                Ok(MaybeSessionUser(None))
            }
        }
    }
}

/// Request authenticated with the configured admin Basic credentials
pub struct AdminAuth;

fn check_basic(header: &str, expected: Option<&AdminCredentials>) -> bool {
    let Some(expected) = expected else {
        return false;
    };
    let Some(encoded) = header.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    match decoded.split_once(':') {
        Some((user, pass)) => user == expected.username && pass == expected.password,
        None => false,
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization Header".to_string()))?;

        if check_basic(header, state.config.admin.as_ref()) {
            Ok(AdminAuth)
        } else {
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}
