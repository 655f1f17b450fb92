//! ProfileStore port - Persistence of scored user profiles.
//!
//! The store is a plain key-value repository keyed by user id. Writes
//! replace the whole record: the last `upsert` for a user wins and nothing
//! is merged.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Profile;

/// Port for reading and writing user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for a user.
    ///
    /// Returns `None` when the user has never submitted a survey.
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Insert or fully replace the profile for `profile.user_id()`.
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError>;
}
