pub mod auth;
pub mod health;
pub mod home;
pub mod token;

pub use auth::*;
pub use health::*;
pub use home::*;
pub use token::*;
