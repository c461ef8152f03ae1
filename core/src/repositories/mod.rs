pub mod profile;

pub use profile::{
    commit_or_rollback, MockOperation, MockProfileRepository, MockProfileTransaction,
    ProfileRepository, ProfileTransaction,
};
