use axum::{extract::State, Extension, Json};

use crate::authz::{self, CapabilitySummary};
use crate::middleware::auth::AuthUser;
use crate::models::{AuthzCheck, AuthzDecision, User};
use crate::AppState;

fn actor_of(auth: &Option<Extension<AuthUser>>) -> Option<&User> {
    auth.as_ref().map(|Extension(AuthUser(user))| user)
}

pub async fn capabilities(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Json<CapabilitySummary> {
    Json(CapabilitySummary::for_actor(
        actor_of(&auth),
        &state.config.authz.event_planner_roles,
    ))
}

/// Answers a single permission question. A denial is a normal answer, not an
/// error status.
pub async fn check(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(body): Json<AuthzCheck>,
) -> Json<AuthzDecision> {
    let actor = actor_of(&auth);
    let allowed = match &body {
        AuthzCheck::AccessAdminPanel => authz::can_access_admin_panel(actor),
        AuthzCheck::AnnounceGlobally => authz::can_announce_globally(actor),
        AuthzCheck::CreateClub => authz::can_create_club(actor),
        AuthzCheck::DeleteClub => authz::can_delete_club(actor),
        AuthzCheck::PlanEvents => {
            authz::can_plan_events_with(actor, &state.config.authz.event_planner_roles)
        }
        AuthzCheck::ManageClub { club_id } => authz::can_manage_club(actor, club_id),
        AuthzCheck::ManageUser { target } => authz::can_manage_user(actor, target),
        AuthzCheck::ViewSensitiveData { target } => authz::can_view_sensitive_data(actor, target),
        AuthzCheck::GrantBadge { badge_type } => authz::can_grant_badge(actor, *badge_type),
        AuthzCheck::KickFromClub { target, club_id } => {
            authz::can_kick_from_club(actor, target, club_id)
        }
        AuthzCheck::AccessRestrictedClub { club } => authz::can_access_restricted_club(actor, club),
        AuthzCheck::OpenClubChat { club } => authz::can_open_club_chat(actor, club),
    };

    tracing::debug!(
        user = actor.map(|a| a.id.as_str()).unwrap_or("anonymous"),
        action = body.name(),
        allowed,
        "authorization check"
    );

    Json(AuthzDecision {
        action: body.name(),
        allowed,
    })
}
