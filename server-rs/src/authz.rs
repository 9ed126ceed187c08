//! Role-based permission checks for the club portal.
//!
//! Every function here is a pure predicate over caller-supplied snapshots.
//! The actor is `Option<&User>`; `None` is an anonymous caller and is denied
//! everything. Roles grant [`Capability`] values through an explicit table
//! rather than a rank, because `OWNER` and `DEV` are not uniformly "above"
//! `ADMIN` (`DEV` has no admin panel but manages every user).

use serde::Serialize;

use crate::models::{BadgeType, Club, Role, User};

/// Club names reserved for the developer team, compared after
/// [`Club::normalized_name`].
pub const DEV_ONLY_CLUB_NAMES: [&str; 2] = ["dev team", "dev club"];

pub const DEFAULT_EVENT_PLANNER_ROLES: [Role; 3] = [Role::ClubLeader, Role::Admin, Role::Owner];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AccessAdminPanel,
    AnnounceGlobally,
    CreateClub,
    DeleteClub,
    /// Manage any club.
    ManageAnyClub,
    /// Manage the club named by `leadingClubId`.
    ManageLedClub,
    ManageAnyUser,
    /// Manage `MEMBER` and `CLUB_LEADER` users only.
    ManageNonStaffUser,
    ViewAnySensitiveData,
    ViewNonStaffSensitiveData,
    GrantOwnerBadge,
    /// Trusted staff: sees hidden clubs and every club chat.
    StaffAccess,
    SeeDevOnlyClubs,
}

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Member => &[],
            Role::ClubLeader => &[ManageLedClub],
            Role::Admin => &[
                AccessAdminPanel,
                AnnounceGlobally,
                CreateClub,
                ManageNonStaffUser,
                ViewNonStaffSensitiveData,
                StaffAccess,
            ],
            Role::Owner => &[
                AccessAdminPanel,
                AnnounceGlobally,
                CreateClub,
                DeleteClub,
                ManageAnyClub,
                ManageAnyUser,
                ViewAnySensitiveData,
                GrantOwnerBadge,
                StaffAccess,
            ],
            Role::Dev => &[
                ManageAnyUser,
                ViewAnySensitiveData,
                GrantOwnerBadge,
                StaffAccess,
                SeeDevOnlyClubs,
            ],
        }
    }

    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Roles that the staff-restricted user checks refuse to touch for admins.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Owner | Role::Dev)
    }
}

fn grants(actor: Option<&User>, capability: Capability) -> bool {
    actor.is_some_and(|a| a.role.has(capability))
}

pub fn is_privileged(actor: Option<&User>) -> bool {
    grants(actor, Capability::StaffAccess)
}

pub fn can_access_admin_panel(actor: Option<&User>) -> bool {
    grants(actor, Capability::AccessAdminPanel)
}

pub fn can_announce_globally(actor: Option<&User>) -> bool {
    grants(actor, Capability::AnnounceGlobally)
}

pub fn can_create_club(actor: Option<&User>) -> bool {
    grants(actor, Capability::CreateClub)
}

pub fn can_delete_club(actor: Option<&User>) -> bool {
    grants(actor, Capability::DeleteClub)
}

/// Owners manage every club; a club leader manages only the club they lead.
/// Admins manage none.
pub fn can_manage_club(actor: Option<&User>, target_club_id: &str) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    actor.role.has(Capability::ManageAnyClub)
        || (actor.role.has(Capability::ManageLedClub) && actor.leads(target_club_id))
}

pub fn can_manage_user(actor: Option<&User>, target: &User) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    actor.role.has(Capability::ManageAnyUser)
        || (actor.role.has(Capability::ManageNonStaffUser) && !target.role.is_staff())
}

/// Same shape as [`can_manage_user`] but gates inspection rather than
/// mutation; the two may diverge.
pub fn can_view_sensitive_data(actor: Option<&User>, target: &User) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    actor.role.has(Capability::ViewAnySensitiveData)
        || (actor.role.has(Capability::ViewNonStaffSensitiveData) && !target.role.is_staff())
}

/// `OWNER` badges need `OWNER` or `DEV`; every other badge needs staff.
pub fn can_grant_badge(actor: Option<&User>, badge_type: BadgeType) -> bool {
    match badge_type {
        BadgeType::Owner => grants(actor, Capability::GrantOwnerBadge),
        _ => is_privileged(actor),
    }
}

/// Owners can never be kicked, not even by another owner.
pub fn can_kick_from_club(actor: Option<&User>, target: &User, club_id: &str) -> bool {
    if target.role == Role::Owner {
        return false;
    }
    can_manage_club(actor, club_id)
}

pub fn is_dev_only_club(club: &Club) -> bool {
    let name = club.normalized_name();
    DEV_ONLY_CLUB_NAMES.contains(&name.as_str())
}

/// Developer-team clubs are visible to `DEV` only, whatever their hidden flag
/// or member list says. Other hidden clubs admit staff and members.
pub fn can_access_restricted_club(actor: Option<&User>, club: &Club) -> bool {
    let Some(user) = actor else {
        return false;
    };
    if is_dev_only_club(club) {
        return user.role.has(Capability::SeeDevOnlyClubs);
    }
    if club.is_hidden {
        return is_privileged(actor) || user.is_member_of(club);
    }
    true
}

pub fn can_open_club_chat(actor: Option<&User>, club: &Club) -> bool {
    actor.is_some_and(|user| user.is_member_of(club)) || is_privileged(actor)
}

pub fn can_plan_events(actor: Option<&User>) -> bool {
    can_plan_events_with(actor, &DEFAULT_EVENT_PLANNER_ROLES)
}

/// The planner set is product configuration, see `EVENT_PLANNER_ROLES`.
pub fn can_plan_events_with(actor: Option<&User>, planner_roles: &[Role]) -> bool {
    actor.is_some_and(|user| planner_roles.contains(&user.role))
}

/// Derived flags for the portal UI, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySummary {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub role: Option<Role>,
    #[serde(rename = "isOwner")]
    pub is_owner: bool,
    #[serde(rename = "isDev")]
    pub is_dev: bool,
    #[serde(rename = "isPrivileged")]
    pub is_privileged: bool,
    #[serde(rename = "canAccessAdminPanel")]
    pub can_access_admin_panel: bool,
    #[serde(rename = "canAnnounceGlobally")]
    pub can_announce_globally: bool,
    #[serde(rename = "canCreateClub")]
    pub can_create_club: bool,
    #[serde(rename = "canDeleteClub")]
    pub can_delete_club: bool,
    #[serde(rename = "canPlanEvents")]
    pub can_plan_events: bool,
}

impl CapabilitySummary {
    pub fn for_actor(actor: Option<&User>, planner_roles: &[Role]) -> Self {
        let role = actor.map(|a| a.role);
        Self {
            user_id: actor.map(|a| a.id.clone()),
            role,
            is_owner: role == Some(Role::Owner),
            is_dev: role == Some(Role::Dev),
            is_privileged: is_privileged(actor),
            can_access_admin_panel: can_access_admin_panel(actor),
            can_announce_globally: can_announce_globally(actor),
            can_create_club: can_create_club(actor),
            can_delete_club: can_delete_club(actor),
            can_plan_events: can_plan_events_with(actor, planner_roles),
        }
    }
}
