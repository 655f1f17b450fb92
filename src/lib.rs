//! DetoxDial - Personality-aware screen-time interventions.
//!
//! Scores a short yes/no personality survey into a four-letter type,
//! stores it per user, and places a phone call with a personalised nudge
//! when the user opens an app they are trying to avoid.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
