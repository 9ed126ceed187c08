use axum::{extract::Path, Extension, Json};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::models::*;
use crate::services::clubs;

fn ensure_path_matches(path_id: &str, club: &Club) -> AppResult<()> {
    if path_id != club.id {
        return Err(AppError::BadRequest(format!(
            "Path club {path_id} does not match club {}",
            club.id
        )));
    }
    Ok(())
}

pub async fn create_club(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Json(body): Json<CreateClubRequest>,
) -> AppResult<Json<ClubCreation>> {
    let created = clubs::create_club(Some(&actor), body.club, &body.leader)?;
    Ok(Json(created))
}

pub async fn delete_club(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<DeleteClubRequest>,
) -> AppResult<Json<ClubDeletion>> {
    ensure_path_matches(&id, &body.club)?;
    let plan = clubs::delete_club(Some(&actor), &body.club, body.members)?;
    Ok(Json(plan))
}

pub async fn kick_member(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<KickMemberRequest>,
) -> AppResult<Json<MembershipChange>> {
    ensure_path_matches(&id, &body.club)?;
    let change = clubs::kick_member(Some(&actor), &body.club, &body.target)?;
    Ok(Json(change))
}
