//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, command metadata and error types
//! that form the vocabulary of the rest of the domain.

mod command;
mod errors;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CallSessionId, UserId};
pub use timestamp::Timestamp;
