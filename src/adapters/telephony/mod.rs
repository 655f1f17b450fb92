//! Telephony adapters.
//!
//! - `TwilioTelephonyAdapter` - Twilio REST API
//! - `MockTelephonyProvider` - Recording provider for development and tests
//! - `VoiceResponse` - TwiML rendering for call scripts

mod mock;
mod twilio;
mod twiml;

pub use mock::MockTelephonyProvider;
pub use twilio::{TwilioConfig, TwilioTelephonyAdapter};
pub use twiml::{VoiceResponse, DEFAULT_VOICE, TWIML_CONTENT_TYPE};
