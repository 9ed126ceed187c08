use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Role, User};
use crate::AppState;

/// Bearer token claims. The token carries the actor's current role snapshot;
/// whoever mints it must re-issue after a role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "leadingClubId", default, skip_serializing_if = "Option::is_none")]
    pub leading_club_id: Option<String>,
    #[serde(rename = "joinedClubIds", default)]
    pub joined_club_ids: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// The authenticated actor, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        let mut user = User::new(claims.sub, claims.role);
        user.leading_club_id = claims.leading_club_id.filter(|id| !id.is_empty());
        for club_id in claims.joined_club_ids {
            user = user.joined(club_id);
        }
        AuthUser(user)
    }
}

pub fn generate_token(user: &User, secret: &str, expiry_secs: i64) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        role: user.role,
        leading_club_id: user.leading_club_id.clone(),
        joined_club_ids: user.joined_club_ids.clone(),
        exp: now + expiry_secs,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.sub.trim().is_empty() {
        return Err(AppError::Unauthorized("Invalid token subject".into()));
    }
    Ok(data.claims)
}

pub(crate) fn extract_bearer(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

/// Middleware: requires a valid JWT. Sets AuthUser in extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&req)
        .ok_or_else(|| AppError::Unauthorized("No token provided".into()))?;

    let claims = verify_token(&token, &state.config.jwt.secret)?;
    req.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(req).await)
}

/// Middleware: sets AuthUser when a valid token is present, otherwise the
/// request continues anonymously.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_bearer(&req) {
        match verify_token(&token, &state.config.jwt.secret) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(e) => tracing::debug!("Ignoring invalid optional token: {e}"),
        }
    }
    Ok(next.run(req).await)
}
