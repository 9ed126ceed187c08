use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "leaderId", default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<String>,
    #[serde(rename = "memberIds", default)]
    pub member_ids: Vec<String>,
    #[serde(rename = "isHidden", default)]
    pub is_hidden: bool,
}

impl Club {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            leader_id: None,
            member_ids: Vec::new(),
            is_hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn with_member(mut self, user_id: impl Into<String>) -> Self {
        self.add_member(user_id);
        self
    }

    /// Sets the leader and keeps them in the member set.
    pub fn with_leader(mut self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        self.add_member(user_id.clone());
        self.leader_id = Some(user_id);
        self
    }

    pub fn add_member(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if !self.has_member(&user_id) {
            self.member_ids.push(user_id);
        }
    }

    /// Returns whether the user was listed.
    pub fn remove_member(&mut self, user_id: &str) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|id| id != user_id);
        before != self.member_ids.len()
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }

    pub fn is_leader(&self, user_id: &str) -> bool {
        self.leader_id.as_deref() == Some(user_id)
    }

    pub fn leader_is_member(&self) -> bool {
        match &self.leader_id {
            Some(leader) => self.has_member(leader),
            None => true,
        }
    }

    /// Lower-cased name with whitespace runs collapsed, for name-based rules.
    pub fn normalized_name(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_is_added_to_members() {
        let club = Club::new("c1", "Robotics").with_leader("u1");
        assert!(club.has_member("u1"));
        assert!(club.leader_is_member());
    }

    #[test]
    fn removing_the_leader_breaks_the_invariant() {
        let mut club = Club::new("c1", "Robotics").with_leader("u1");
        assert!(club.remove_member("u1"));
        assert!(!club.leader_is_member());
        assert!(!club.remove_member("u1"));
    }

    #[test]
    fn name_normalization_folds_case_and_spaces() {
        assert_eq!(Club::new("c", "  Dev   TEAM ").normalized_name(), "dev team");
        assert_eq!(Club::new("c", "Dev\tClub").normalized_name(), "dev club");
    }

    #[test]
    fn missing_flags_default_when_deserializing() {
        let club: Club = serde_json::from_str(r#"{"id":"c9","name":"Art"}"#).unwrap();
        assert!(!club.is_hidden);
        assert!(club.member_ids.is_empty());
    }
}
