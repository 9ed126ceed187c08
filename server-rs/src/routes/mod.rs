pub mod authz;
pub mod clubs;
pub mod content;
pub mod health;
pub mod users;
