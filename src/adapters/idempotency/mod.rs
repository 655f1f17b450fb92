//! InterventionGuard adapters (in-memory, Redis).

mod in_memory;
mod redis;

pub use self::redis::RedisInterventionGuard;
pub use in_memory::InMemoryInterventionGuard;
