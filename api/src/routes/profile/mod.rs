//! Profile route handlers
//!
//! - `POST /profile/register` creates a profile
//! - `POST /profile/login` exchanges credentials for a bearer token
//! - `GET /profile` and `PUT /profile` read and replace the caller's profile

pub mod get;
pub mod login;
pub mod register;
pub mod update;

pub use get::get_profile;
pub use login::login;
pub use register::register;
pub use update::update_profile;
