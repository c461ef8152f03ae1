pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

#[cfg(test)]
mod tests;

pub use mock::{MockOperation, MockProfileRepository, MockProfileTransaction};
pub use r#trait::{commit_or_rollback, ProfileRepository, ProfileTransaction};
