//! Spoken message composition for nudge calls.

/// App name used when a trigger does not say which app was opened.
pub const DEFAULT_TRIGGER_APP_NAME: &str = "this app";

/// App name used when the provider's callback carries none.
pub const DEFAULT_SCRIPT_APP_NAME: &str = "that app";

/// Type label spoken when no profile type is available.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Renders the deterministic nudge script.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallScriptComposer;

impl CallScriptComposer {
    /// Composes the message spoken to the user. Never fails: a missing or
    /// empty type is spoken as "Unknown".
    pub fn compose(mbti_type: Option<&str>, app_name: &str) -> String {
        let mbti_type = mbti_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TYPE);
        format!(
            "Hey there! It looks like you're about to use {} again. As a {}, remember your goals! \
             Let's take a step back and focus. You got this!",
            app_name, mbti_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_full_script() {
        let script = CallScriptComposer::compose(Some("INTJ"), "TikTok");
        assert_eq!(
            script,
            "Hey there! It looks like you're about to use TikTok again. As a INTJ, remember your goals! \
             Let's take a step back and focus. You got this!"
        );
    }

    #[test]
    fn missing_type_is_unknown() {
        let script = CallScriptComposer::compose(None, "Instagram");
        assert!(script.contains("Instagram"));
        assert!(script.contains("As a Unknown,"));
    }

    #[test]
    fn blank_type_is_unknown() {
        let script = CallScriptComposer::compose(Some("  "), DEFAULT_SCRIPT_APP_NAME);
        assert!(script.contains("use that app again"));
        assert!(script.contains(UNKNOWN_TYPE));
    }
}
