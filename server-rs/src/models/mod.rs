pub mod club;
pub mod content;
pub mod requests;
pub mod role;
pub mod user;

pub use club::*;
pub use content::*;
pub use requests::*;
pub use role::*;
pub use user::*;
