//! Adapters - Implementations of the ports and the HTTP surface.
//!
//! - `http` - axum endpoints
//! - `profile` - `ProfileStore` (in-memory, PostgreSQL)
//! - `telephony` - `TelephonyProvider` (Twilio, mock) and voice markup
//! - `idempotency` - `InterventionGuard` (in-memory, Redis)

pub mod http;
pub mod idempotency;
pub mod profile;
pub mod telephony;
