use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::models::{Announcement, AnnouncementDraft, Event, EventDraft};
use crate::services::clubs;
use crate::AppState;

pub async fn publish_announcement(
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Json(draft): Json<AnnouncementDraft>,
) -> AppResult<Json<Announcement>> {
    let announcement = clubs::publish_announcement(Some(&actor), draft, Utc::now())?;
    Ok(Json(announcement))
}

pub async fn plan_event(
    State(state): State<AppState>,
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Json(draft): Json<EventDraft>,
) -> AppResult<Json<Event>> {
    let event = clubs::plan_event(
        Some(&actor),
        draft,
        &state.config.authz.event_planner_roles,
        Utc::now(),
    )?;
    Ok(Json(event))
}
