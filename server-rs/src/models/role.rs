use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Portal role of a user.
///
/// `MEMBER < CLUB_LEADER < ADMIN` is the informal staff ladder, while `OWNER`
/// and `DEV` sit beside it. Nothing is inferred from that ordering; what each
/// role may do is listed in [`crate::authz::Capability`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Member,
    ClubLeader,
    Admin,
    Owner,
    Dev,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Member,
        Role::ClubLeader,
        Role::Admin,
        Role::Owner,
        Role::Dev,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::ClubLeader => "CLUB_LEADER",
            Role::Admin => "ADMIN",
            Role::Owner => "OWNER",
            Role::Dev => "DEV",
        }
    }

    fn lookup(value: &str) -> Option<Role> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MEMBER" => Some(Role::Member),
            "CLUB_LEADER" => Some(Role::ClubLeader),
            "ADMIN" => Some(Role::Admin),
            "OWNER" => Some(Role::Owner),
            "DEV" => Some(Role::Dev),
            _ => None,
        }
    }

    /// Reads a role as stored on a user record. Never fails: the retired
    /// `TEACHER` role and anything unrecognised become `MEMBER`.
    pub fn from_stored(value: &str) -> Role {
        match Self::lookup(value) {
            Some(role) => role,
            None => {
                if !value.trim().eq_ignore_ascii_case("TEACHER") {
                    tracing::debug!(role = value, "unknown stored role, treating as MEMBER");
                }
                Role::Member
            }
        }
    }

    /// Strict parse for roles that are about to be assigned.
    pub fn parse(value: &str) -> AppResult<Role> {
        Self::lookup(value).ok_or_else(|| AppError::BadRequest(format!("Unknown role: {value}")))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Stored records are not schema-checked; a non-string role is as
        // unrecognised as an unknown name.
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Ok(Role::from_stored(&raw)),
            serde_json::Value::Null => Ok(Role::Member),
            other => {
                tracing::debug!(role = %other, "non-string stored role, treating as MEMBER");
                Ok(Role::Member)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_roles_round_trip_through_as_str() {
        for role in Role::ALL {
            assert_eq!(Role::from_stored(role.as_str()), role);
        }
    }

    #[test]
    fn legacy_and_unknown_roles_become_member() {
        assert_eq!(Role::from_stored("TEACHER"), Role::Member);
        assert_eq!(Role::from_stored("teacher "), Role::Member);
        assert_eq!(Role::from_stored("SUPERUSER"), Role::Member);
        assert_eq!(Role::from_stored(""), Role::Member);
    }

    #[test]
    fn stored_roles_are_case_insensitive() {
        assert_eq!(Role::from_stored(" club_leader"), Role::ClubLeader);
        assert_eq!(Role::from_stored("Owner"), Role::Owner);
    }

    #[test]
    fn strict_parse_rejects_legacy_roles() {
        assert!(matches!(Role::parse("TEACHER"), Err(AppError::BadRequest(_))));
        assert_eq!(Role::parse("ADMIN").ok(), Some(Role::Admin));
    }

    #[test]
    fn json_deserialization_is_lenient() {
        let role: Role = serde_json::from_str("\"TEACHER\"").unwrap();
        assert_eq!(role, Role::Member);
        let role: Role = serde_json::from_str("null").unwrap();
        assert_eq!(role, Role::Member);
        let role: Role = serde_json::from_str("\"DEV\"").unwrap();
        assert_eq!(role, Role::Dev);
        assert_eq!(serde_json::to_string(&Role::ClubLeader).unwrap(), "\"CLUB_LEADER\"");
    }

    #[test]
    fn non_string_roles_become_member() {
        for raw in ["7", "{}", "[]", "true", "[\"ADMIN\"]"] {
            let role: Role = serde_json::from_str(raw).unwrap();
            assert_eq!(role, Role::Member, "{raw}");
        }
    }
}
