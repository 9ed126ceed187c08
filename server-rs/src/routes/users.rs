use axum::{extract::Path, Extension, Json};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::models::*;
use crate::services::roles;

fn ensure_path_matches(path_id: &str, target: &User) -> AppResult<()> {
    if path_id != target.id {
        return Err(AppError::BadRequest(format!(
            "Path user {path_id} does not match target {}",
            target.id
        )));
    }
    Ok(())
}

pub async fn provision(Json(body): Json<ProvisionUserRequest>) -> AppResult<Json<User>> {
    let user = roles::provision_user(body.user, body.existing_user_count)?;
    Ok(Json(user))
}

pub async fn normalize(Json(body): Json<StoredUser>) -> Json<User> {
    Json(roles::normalize_record(body))
}

pub async fn change_role(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<ChangeRoleRequest>,
) -> AppResult<Json<User>> {
    ensure_path_matches(&id, &body.target)?;
    let role = Role::parse(&body.role)?;
    let updated = roles::change_role(Some(&actor), &body.target, role)?;
    Ok(Json(updated))
}

pub async fn grant_badge(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<GrantBadgeRequest>,
) -> AppResult<Json<User>> {
    ensure_path_matches(&id, &body.target)?;
    let updated = roles::grant_badge(
        Some(&actor),
        &body.target,
        body.badge_type,
        &body.name,
        chrono::Utc::now(),
    )?;
    Ok(Json(updated))
}
