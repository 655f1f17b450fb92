//! InterventionGuard port - at most one call per deduplication slot.
//!
//! A trigger first claims its slot, then either completes it with the
//! provider's call id or releases it when the provider refused the call.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{CallSessionId, DomainError};
use crate::domain::intervention::InterventionKey;

/// Result of trying to claim a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The caller owns the slot and should place the call.
    Claimed,

    /// Another trigger owns the slot and has not finished yet.
    InFlight,

    /// A call was already placed for this slot.
    AlreadyPlaced(CallSessionId),
}

/// Port for claim-based deduplication of call triggers.
#[async_trait]
pub trait InterventionGuard: Send + Sync {
    /// Atomically claim a slot for `ttl`.
    async fn claim(&self, key: &InterventionKey, ttl: Duration)
        -> Result<ClaimOutcome, DomainError>;

    /// Record the placed call on a claimed slot.
    async fn complete(
        &self,
        key: &InterventionKey,
        call_sid: &CallSessionId,
        ttl: Duration,
    ) -> Result<(), DomainError>;

    /// Drop a claim so the slot can be retried.
    async fn release(&self, key: &InterventionKey) -> Result<(), DomainError>;
}
