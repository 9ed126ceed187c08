use chrono::{DateTime, Utc};

use crate::authz;
use crate::error::{AppError, AppResult};
use crate::models::{Badge, BadgeType, NewUser, Role, StoredUser, User};

/// The very first account on the portal becomes its owner.
pub fn initial_role(existing_user_count: u64) -> Role {
    if existing_user_count == 0 {
        Role::Owner
    } else {
        Role::Member
    }
}

pub fn provision_user(draft: NewUser, existing_user_count: u64) -> AppResult<User> {
    let id = draft.id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("User id required".into()));
    }
    let role = initial_role(existing_user_count);
    if role == Role::Owner {
        tracing::info!(user = %id, "first registrant promoted to OWNER");
    }

    let mut user = User::new(id, role);
    user.display_name = draft.display_name.filter(|n| !n.trim().is_empty());
    user.email = draft.email;
    Ok(user)
}

pub fn normalize_record(stored: StoredUser) -> User {
    stored.normalize()
}

/// Applies a role change requested by `actor`. Admins may only move users
/// between `MEMBER` and `CLUB_LEADER`.
pub fn change_role(actor: Option<&User>, target: &User, new_role: Role) -> AppResult<User> {
    let actor = actor.ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    if actor.id == target.id {
        return Err(AppError::Forbidden("Users cannot change their own role".into()));
    }
    if !authz::can_manage_user(Some(actor), target) {
        tracing::warn!(actor = %actor.id, target = %target.id, "role change rejected");
        return Err(AppError::Forbidden(format!(
            "{} cannot manage {} users",
            actor.role, target.role
        )));
    }
    if !actor.role.has(authz::Capability::ManageAnyUser) && new_role.is_staff() {
        tracing::warn!(actor = %actor.id, target = %target.id, role = %new_role, "role escalation rejected");
        return Err(AppError::Forbidden(format!("{} cannot assign {new_role}", actor.role)));
    }

    let mut updated = target.clone();
    if updated.role == Role::ClubLeader && new_role != Role::ClubLeader {
        updated.leading_club_id = None;
    }
    updated.role = new_role;
    tracing::info!(actor = %actor.id, target = %target.id, from = %target.role, to = %new_role, "role changed");
    Ok(updated)
}

pub fn grant_badge(
    actor: Option<&User>,
    target: &User,
    badge_type: BadgeType,
    name: &str,
    now: DateTime<Utc>,
) -> AppResult<User> {
    let actor = actor.ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Badge name required".into()));
    }
    if !authz::can_grant_badge(Some(actor), badge_type) {
        tracing::warn!(actor = %actor.id, target = %target.id, ?badge_type, "badge grant rejected");
        return Err(AppError::Forbidden("Not allowed to grant this badge".into()));
    }

    let mut updated = target.clone();
    updated
        .badges
        .push(Badge::new(badge_type, name, Some(actor.id.as_str()), now));
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registrant_is_owner() {
        assert_eq!(initial_role(0), Role::Owner);
        assert_eq!(initial_role(1), Role::Member);
        assert_eq!(initial_role(500), Role::Member);
    }

    #[test]
    fn provisioning_requires_an_id() {
        let draft = NewUser {
            id: "  ".into(),
            display_name: None,
            email: None,
        };
        assert!(matches!(provision_user(draft, 0), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn provisioned_user_starts_clean() {
        let draft = NewUser {
            id: "u1".into(),
            display_name: Some("Ada".into()),
            email: Some("ada@example.org".into()),
        };
        let user = provision_user(draft, 3).unwrap();
        assert_eq!(user.role, Role::Member);
        assert!(user.badges.is_empty() && user.joined_club_ids.is_empty());
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn nobody_changes_their_own_role() {
        let owner = User::new("o1", Role::Owner);
        let err = change_role(Some(&owner), &owner, Role::Member).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn anonymous_role_change_is_unauthorized() {
        let target = User::new("u1", Role::Member);
        assert!(matches!(
            change_role(None, &target, Role::ClubLeader),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn admin_promotes_member_to_club_leader_only() {
        let admin = User::new("a1", Role::Admin);
        let member = User::new("u1", Role::Member);
        assert_eq!(change_role(Some(&admin), &member, Role::ClubLeader).unwrap().role, Role::ClubLeader);
        for role in [Role::Admin, Role::Owner, Role::Dev] {
            assert!(matches!(change_role(Some(&admin), &member, role), Err(AppError::Forbidden(_))));
        }
    }

    #[test]
    fn admin_cannot_touch_other_admins() {
        let admin = User::new("a1", Role::Admin);
        let other = User::new("a2", Role::Admin);
        assert!(matches!(change_role(Some(&admin), &other, Role::Member), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn dev_can_promote_to_admin() {
        let dev = User::new("d1", Role::Dev);
        let member = User::new("u1", Role::Member);
        assert_eq!(change_role(Some(&dev), &member, Role::Admin).unwrap().role, Role::Admin);
    }

    #[test]
    fn demoting_a_leader_clears_leadership() {
        let owner = User::new("o1", Role::Owner);
        let leader = User::new("l1", Role::ClubLeader).leading("c1").joined("c1");
        let demoted = change_role(Some(&owner), &leader, Role::Member).unwrap();
        assert_eq!(demoted.leading_club_id, None);
        assert_eq!(demoted.joined_club_ids, vec!["c1".to_string()]);
    }

    #[test]
    fn owner_badge_needs_owner_or_dev() {
        let admin = User::new("a1", Role::Admin);
        let target = User::new("u1", Role::Member);
        let now = Utc::now();
        assert!(matches!(
            grant_badge(Some(&admin), &target, BadgeType::Owner, "Founder", now),
            Err(AppError::Forbidden(_))
        ));

        let granted = grant_badge(Some(&admin), &target, BadgeType::Mentioned, " Helper ", now).unwrap();
        let badge = &granted.badges[0];
        assert_eq!(badge.name, "Helper");
        assert_eq!(badge.granted_by.as_deref(), Some("a1"));
        assert_eq!(badge.granted_at, now);
    }

    #[test]
    fn blank_badge_names_are_rejected() {
        let dev = User::new("d1", Role::Dev);
        let target = User::new("u1", Role::Member);
        assert!(matches!(
            grant_badge(Some(&dev), &target, BadgeType::Custom, "   ", Utc::now()),
            Err(AppError::BadRequest(_))
        ));
    }
}
