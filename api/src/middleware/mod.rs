pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use security::SecurityHeaders;
