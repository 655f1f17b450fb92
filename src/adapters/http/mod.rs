//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes; `app_router`
//! mounts them all behind the shared middleware.

mod error;
mod health;
pub mod intervention;
mod router;
mod state;
pub mod survey;

pub use error::{ApiError, ErrorResponse};
pub use health::HealthResponse;
pub use router::app_router;
pub use state::AppState;
