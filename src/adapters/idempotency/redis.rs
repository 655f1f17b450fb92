//! Redis-backed intervention guard for multi-server deployments.
//!
//! Each slot is one key. `SET NX EX` takes the claim atomically; the value
//! is `pending` until the call is placed, then `placed:<call sid>`. Keys
//! expire with the dedup window.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::{CallSessionId, DomainError};
use crate::domain::intervention::InterventionKey;
use crate::ports::{ClaimOutcome, InterventionGuard};

const PENDING: &str = "pending";
const PLACED_PREFIX: &str = "placed:";

/// Redis-backed guard.
#[derive(Clone)]
pub struct RedisInterventionGuard {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisInterventionGuard {
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    fn redis_key(&self, key: &InterventionKey) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

fn redis_error(e: redis::RedisError) -> DomainError {
    tracing::warn!(error = %e, "Redis intervention guard error");
    DomainError::storage(format!("Redis error: {}", e))
}

fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// Interprets the value held by an already-claimed slot.
fn outcome_for(value: &str) -> ClaimOutcome {
    value
        .strip_prefix(PLACED_PREFIX)
        .and_then(|sid| CallSessionId::new(sid).ok())
        .map(ClaimOutcome::AlreadyPlaced)
        .unwrap_or(ClaimOutcome::InFlight)
}

#[async_trait]
impl InterventionGuard for RedisInterventionGuard {
    async fn claim(
        &self,
        key: &InterventionKey,
        ttl: Duration,
    ) -> Result<ClaimOutcome, DomainError> {
        let redis_key = self.redis_key(key);
        let mut conn = self.conn.clone();

        let set: Option<String> = redis::cmd("SET")
            .arg(&redis_key)
            .arg(PENDING)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        if set.is_some() {
            return Ok(ClaimOutcome::Claimed);
        }

        let existing: Option<String> = conn.get(&redis_key).await.map_err(redis_error)?;
        // A key that expired between SET and GET is treated as in flight
        Ok(existing
            .as_deref()
            .map(outcome_for)
            .unwrap_or(ClaimOutcome::InFlight))
    }

    async fn complete(
        &self,
        key: &InterventionKey,
        call_sid: &CallSessionId,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(self.redis_key(key))
            .arg(format!("{}{}", PLACED_PREFIX, call_sid))
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(redis_error)
    }

    async fn release(&self, key: &InterventionKey) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.redis_key(key))
            .await
            .map_err(redis_error)
    }
}

impl std::fmt::Debug for RedisInterventionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisInterventionGuard")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_value_is_in_flight() {
        assert_eq!(outcome_for(PENDING), ClaimOutcome::InFlight);
    }

    #[test]
    fn placed_value_carries_sid() {
        assert_eq!(
            outcome_for("placed:CA42"),
            ClaimOutcome::AlreadyPlaced(CallSessionId::new("CA42").unwrap())
        );
    }

    #[test]
    fn malformed_values_are_in_flight() {
        assert_eq!(outcome_for("placed:"), ClaimOutcome::InFlight);
        assert_eq!(outcome_for("garbage"), ClaimOutcome::InFlight);
    }

    #[test]
    fn ttl_never_zero() {
        assert_eq!(ttl_secs(Duration::from_millis(200)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(300)), 300);
    }
}
