pub mod clubs;
pub mod roles;
