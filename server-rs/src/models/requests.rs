use serde::{Deserialize, Serialize};

use super::club::Club;
use super::user::{BadgeType, User};

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProvisionUserRequest {
    #[serde(flatten)]
    pub user: NewUser,
    #[serde(rename = "existingUserCount")]
    pub existing_user_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub target: User,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct GrantBadgeRequest {
    pub target: User,
    #[serde(rename = "badgeType")]
    pub badge_type: BadgeType,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClub {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "isHidden", default)]
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateClubRequest {
    pub club: NewClub,
    pub leader: User,
}

#[derive(Debug, Deserialize)]
pub struct DeleteClubRequest {
    pub club: Club,
    /// Members and the leader whose records reference the club.
    #[serde(default)]
    pub members: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct KickMemberRequest {
    pub club: Club,
    pub target: User,
}

#[derive(Debug, Serialize)]
pub struct ClubCreation {
    pub club: Club,
    pub leader: User,
}

#[derive(Debug, Serialize)]
pub struct ClubDeletion {
    #[serde(rename = "clubId")]
    pub club_id: String,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct MembershipChange {
    pub club: Club,
    pub user: User,
}

/// One permission question, tagged by `action`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AuthzCheck {
    AccessAdminPanel,
    AnnounceGlobally,
    CreateClub,
    DeleteClub,
    PlanEvents,
    ManageClub {
        #[serde(rename = "clubId")]
        club_id: String,
    },
    ManageUser {
        target: User,
    },
    ViewSensitiveData {
        target: User,
    },
    GrantBadge {
        #[serde(rename = "badgeType")]
        badge_type: BadgeType,
    },
    KickFromClub {
        target: User,
        #[serde(rename = "clubId")]
        club_id: String,
    },
    AccessRestrictedClub {
        club: Club,
    },
    OpenClubChat {
        club: Club,
    },
}

impl AuthzCheck {
    pub fn name(&self) -> &'static str {
        match self {
            AuthzCheck::AccessAdminPanel => "accessAdminPanel",
            AuthzCheck::AnnounceGlobally => "announceGlobally",
            AuthzCheck::CreateClub => "createClub",
            AuthzCheck::DeleteClub => "deleteClub",
            AuthzCheck::PlanEvents => "planEvents",
            AuthzCheck::ManageClub { .. } => "manageClub",
            AuthzCheck::ManageUser { .. } => "manageUser",
            AuthzCheck::ViewSensitiveData { .. } => "viewSensitiveData",
            AuthzCheck::GrantBadge { .. } => "grantBadge",
            AuthzCheck::KickFromClub { .. } => "kickFromClub",
            AuthzCheck::AccessRestrictedClub { .. } => "accessRestrictedClub",
            AuthzCheck::OpenClubChat { .. } => "openClubChat",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthzDecision {
    pub action: &'static str,
    pub allowed: bool,
}
