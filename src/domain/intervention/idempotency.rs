//! Deduplication keys for intervention triggers.

use std::fmt;

use crate::domain::foundation::UserId;

/// Identifies the (user, app) pair a trigger calls about.
///
/// The key carries no time component. How long a claim on it lasts is the
/// guard's TTL, so the dedup window slides from the first placed call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterventionKey(String);

impl InterventionKey {
    pub fn new(user_id: &UserId, app_name: &str) -> Self {
        // Length prefix keeps ("a:b", "c") and ("a", "b:c") apart
        Self(format!(
            "{}:{}:{}",
            user_id.as_str().len(),
            user_id,
            app_name
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterventionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
