//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - Per-user profile persistence
//! - `TelephonyProvider` - Outbound call placement
//! - `InterventionGuard` - Duplicate-call protection

mod intervention_guard;
mod profile_store;
mod telephony_provider;

pub use intervention_guard::{ClaimOutcome, InterventionGuard};
pub use profile_store::ProfileStore;
pub use telephony_provider::{
    CallbackMethod, OutboundCallRequest, PlacedCall, TelephonyError, TelephonyErrorCode,
    TelephonyProvider,
};
