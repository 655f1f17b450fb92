//! Intervention domain: call scripts, callback signing and deduplication keys.

mod call_script;
mod callback;
mod idempotency;

pub use call_script::{
    CallScriptComposer, DEFAULT_SCRIPT_APP_NAME, DEFAULT_TRIGGER_APP_NAME, UNKNOWN_TYPE,
};
pub use callback::CallbackSigner;
pub use idempotency::InterventionKey;
