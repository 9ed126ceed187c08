use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::club::Club;
use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeType {
    Owner,
    Admin,
    Dev,
    Mentioned,
    ClubLeader,
    Custom,
}

/// Decorative credential on a profile. Holding a badge grants nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    pub name: String,
    #[serde(rename = "grantedAt")]
    pub granted_at: DateTime<Utc>,
    #[serde(rename = "grantedBy", default, skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,
}

impl Badge {
    pub fn new(
        badge_type: BadgeType,
        name: impl Into<String>,
        granted_by: Option<&str>,
        granted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            badge_type,
            name: name.into(),
            granted_at,
            granted_by: granted_by.map(String::from),
        }
    }
}

/// A normalized user record. Anything deserialized into this type has already
/// been through the legacy migration in [`StoredUser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredUser")]
pub struct User {
    pub id: String,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(rename = "leadingClubId", skip_serializing_if = "Option::is_none")]
    pub leading_club_id: Option<String>,
    #[serde(rename = "joinedClubIds")]
    pub joined_club_ids: Vec<String>,
    pub badges: Vec<Badge>,
}

impl User {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            email: None,
            role,
            leading_club_id: None,
            joined_club_ids: Vec::new(),
            badges: Vec::new(),
        }
    }

    pub fn leading(mut self, club_id: impl Into<String>) -> Self {
        self.leading_club_id = Some(club_id.into());
        self
    }

    pub fn joined(mut self, club_id: impl Into<String>) -> Self {
        let club_id = club_id.into();
        if !self.joined_club_ids.contains(&club_id) {
            self.joined_club_ids.push(club_id);
        }
        self
    }

    pub fn is_member_of(&self, club: &Club) -> bool {
        club.has_member(&self.id) || self.joined_club_ids.iter().any(|id| *id == club.id)
    }

    pub fn leads(&self, club_id: &str) -> bool {
        self.leading_club_id.as_deref() == Some(club_id)
    }
}

/// User document as it may exist in the backend, including legacy fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredUser {
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "leadingClubId", default)]
    pub leading_club_id: Option<String>,
    #[serde(rename = "joinedClubIds", default)]
    pub joined_club_ids: Vec<String>,
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde(rename = "clubBadges", default)]
    pub club_badges: Option<Vec<Badge>>,
}

impl StoredUser {
    /// One-time migration: `clubBadges` becomes `badges`, and the role has
    /// already been folded through [`Role::from_stored`].
    pub fn normalize(self) -> User {
        let badges = match (self.badges, self.club_badges) {
            (Some(badges), _) => badges,
            (None, Some(legacy)) => legacy,
            (None, None) => Vec::new(),
        };
        let mut joined_club_ids = Vec::with_capacity(self.joined_club_ids.len());
        for id in self.joined_club_ids {
            if !joined_club_ids.contains(&id) {
                joined_club_ids.push(id);
            }
        }
        User {
            id: self.id,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            leading_club_id: self.leading_club_id.filter(|id| !id.is_empty()),
            joined_club_ids,
            badges,
        }
    }
}

impl From<StoredUser> for User {
    fn from(stored: StoredUser) -> Self {
        stored.normalize()
    }
}
