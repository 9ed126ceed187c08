use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::authz;
use crate::error::{AppError, AppResult};
use crate::models::{
    Announcement, AnnouncementDraft, Club, ClubCreation, ClubDeletion, Event, EventDraft,
    MembershipChange, NewClub, Role, User,
};

fn require_actor(actor: Option<&User>) -> AppResult<&User> {
    actor.ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
}

/// Creates a club led by `leader`. A plain member becomes `CLUB_LEADER`;
/// staff keep their role but still lead the club.
pub fn create_club(actor: Option<&User>, draft: NewClub, leader: &User) -> AppResult<ClubCreation> {
    let actor = require_actor(actor)?;
    if !authz::can_create_club(Some(actor)) {
        tracing::warn!(actor = %actor.id, "club creation rejected");
        return Err(AppError::Forbidden("Not allowed to create clubs".into()));
    }

    let name = draft.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Club name required".into()));
    }

    let club_id = draft
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Some(current) = leader.leading_club_id.as_deref() {
        if current != club_id {
            return Err(AppError::Conflict(format!(
                "User {} already leads club {current}",
                leader.id
            )));
        }
    }

    let mut club = Club::new(club_id.clone(), name).with_leader(leader.id.clone());
    club.description = draft.description;
    club.is_hidden = draft.is_hidden;

    let mut leader = leader.clone().joined(club_id.clone());
    leader.leading_club_id = Some(club_id);
    if matches!(leader.role, Role::Member | Role::ClubLeader) {
        leader.role = Role::ClubLeader;
    }

    tracing::info!(actor = %actor.id, club = %club.id, leader = %leader.id, "club created");
    Ok(ClubCreation { club, leader })
}

/// Best-effort cleanup plan for deleting `club`: every affected user loses
/// the membership, and its leader loses the leadership.
pub fn delete_club(actor: Option<&User>, club: &Club, affected: Vec<User>) -> AppResult<ClubDeletion> {
    let actor = require_actor(actor)?;
    if !authz::can_delete_club(Some(actor)) {
        tracing::warn!(actor = %actor.id, club = %club.id, "club deletion rejected");
        return Err(AppError::Forbidden("Only the OWNER can delete clubs".into()));
    }

    let mut users = Vec::new();
    for user in affected {
        let mut patched = user.clone();
        patched.joined_club_ids.retain(|id| *id != club.id);
        if patched.leads(&club.id) {
            patched.leading_club_id = None;
            if patched.role == Role::ClubLeader {
                patched.role = Role::Member;
            }
        }
        if patched != user {
            users.push(patched);
        }
    }

    tracing::info!(actor = %actor.id, club = %club.id, updated = users.len(), "club deleted");
    Ok(ClubDeletion {
        club_id: club.id.clone(),
        users,
    })
}

pub fn kick_member(actor: Option<&User>, club: &Club, target: &User) -> AppResult<MembershipChange> {
    let actor = require_actor(actor)?;
    if !authz::can_kick_from_club(Some(actor), target, &club.id) {
        tracing::warn!(actor = %actor.id, club = %club.id, target = %target.id, "kick rejected");
        return Err(AppError::Forbidden("Not allowed to remove this member".into()));
    }
    if club.is_leader(&target.id) || target.leads(&club.id) {
        return Err(AppError::Conflict(
            "The club leader cannot be removed; assign a new leader first".into(),
        ));
    }
    if !target.is_member_of(club) {
        return Err(AppError::NotFound(format!(
            "User {} is not a member of club {}",
            target.id, club.id
        )));
    }

    let mut club = club.clone();
    club.remove_member(&target.id);
    let mut user = target.clone();
    user.joined_club_ids.retain(|id| *id != club.id);

    tracing::info!(actor = %actor.id, club = %club.id, target = %user.id, "member removed");
    Ok(MembershipChange { club, user })
}

pub fn publish_announcement(
    actor: Option<&User>,
    draft: AnnouncementDraft,
    now: DateTime<Utc>,
) -> AppResult<Announcement> {
    let actor = require_actor(actor)?;
    if draft.title.trim().is_empty() || draft.body.trim().is_empty() {
        return Err(AppError::BadRequest("Announcement title and body required".into()));
    }

    let allowed = match draft.club_id.as_deref() {
        None => authz::can_announce_globally(Some(actor)),
        Some(club_id) => {
            authz::can_manage_club(Some(actor), club_id) || authz::can_announce_globally(Some(actor))
        }
    };
    if !allowed {
        tracing::warn!(actor = %actor.id, club = ?draft.club_id, "announcement rejected");
        return Err(AppError::Forbidden("Not allowed to post this announcement".into()));
    }

    Ok(Announcement {
        id: Uuid::new_v4(),
        title: draft.title.trim().to_string(),
        body: draft.body,
        club_id: draft.club_id,
        author_id: actor.id.clone(),
        created_at: now,
    })
}

pub fn plan_event(
    actor: Option<&User>,
    draft: EventDraft,
    planner_roles: &[Role],
    now: DateTime<Utc>,
) -> AppResult<Event> {
    let actor = require_actor(actor)?;
    if !authz::can_plan_events_with(Some(actor), planner_roles) {
        tracing::warn!(actor = %actor.id, role = %actor.role, "event planning rejected");
        return Err(AppError::Forbidden("Not allowed to plan events".into()));
    }
    if let Some(club_id) = draft.club_id.as_deref() {
        if !authz::can_manage_club(Some(actor), club_id) && !authz::can_announce_globally(Some(actor)) {
            return Err(AppError::Forbidden(format!("Cannot plan events for club {club_id}")));
        }
    }
    if draft.title.trim().is_empty() {
        return Err(AppError::BadRequest("Event title required".into()));
    }
    if matches!(draft.ends_at, Some(ends_at) if ends_at < draft.starts_at) {
        return Err(AppError::BadRequest("Event ends before it starts".into()));
    }

    Ok(Event {
        id: Uuid::new_v4(),
        title: draft.title.trim().to_string(),
        description: draft.description,
        club_id: draft.club_id,
        starts_at: draft.starts_at,
        ends_at: draft.ends_at,
        planner_id: actor.id.clone(),
        created_at: now,
    })
}
