//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `survey` - Question bank and trait scoring
//! - `user` - Contact details and stored profiles
//! - `intervention` - Call scripts, callback signing, deduplication keys

pub mod foundation;
pub mod intervention;
pub mod survey;
pub mod user;
