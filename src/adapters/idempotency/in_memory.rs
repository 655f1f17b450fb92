//! In-memory intervention guard for testing and single-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::domain::foundation::{CallSessionId, DomainError};
use crate::domain::intervention::InterventionKey;
use crate::ports::{ClaimOutcome, InterventionGuard};

/// Claim state of one slot.
#[derive(Debug, Clone)]
enum SlotState {
    Pending,
    Placed(CallSessionId),
}

#[derive(Debug, Clone)]
struct Slot {
    state: SlotState,
    expires_at: Instant,
}

/// Process-local guard. Claims are not shared between servers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterventionGuard {
    slots: Arc<Mutex<HashMap<InterventionKey, Slot>>>,
}

impl InMemoryInterventionGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterventionGuard for InMemoryInterventionGuard {
    async fn claim(
        &self,
        key: &InterventionKey,
        ttl: Duration,
    ) -> Result<ClaimOutcome, DomainError> {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        slots.retain(|_, slot| slot.expires_at > now);

        if let Some(slot) = slots.get(key) {
            return Ok(match &slot.state {
                SlotState::Pending => ClaimOutcome::InFlight,
                SlotState::Placed(sid) => ClaimOutcome::AlreadyPlaced(sid.clone()),
            });
        }

        slots.insert(
            key.clone(),
            Slot {
                state: SlotState::Pending,
                expires_at: now + ttl,
            },
        );
        Ok(ClaimOutcome::Claimed)
    }

    async fn complete(
        &self,
        key: &InterventionKey,
        call_sid: &CallSessionId,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        self.slots.lock().await.insert(
            key.clone(),
            Slot {
                state: SlotState::Placed(call_sid.clone()),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn release(&self, key: &InterventionKey) -> Result<(), DomainError> {
        self.slots.lock().await.remove(key);
        Ok(())
    }
}
