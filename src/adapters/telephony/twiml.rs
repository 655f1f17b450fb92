//! TwiML voice markup.

/// Voice used for spoken scripts.
pub const DEFAULT_VOICE: &str = "alice";

/// Content type of rendered markup.
pub const TWIML_CONTENT_TYPE: &str = "application/xml";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verb {
    Say { voice: String, text: String },
    Hangup,
}

/// Builder for a `<Response>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, voice: &str, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say {
            voice: voice.to_string(),
            text: text.into(),
        });
        self
    }

    pub fn hangup(mut self) -> Self {
        self.verbs.push(Verb::Hangup);
        self
    }

    /// Speak a script once and end the call.
    pub fn speak_and_hang_up(script: impl Into<String>) -> Self {
        Self::new().say(DEFAULT_VOICE, script).hangup()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for verb in &self.verbs {
            match verb {
                Verb::Say { voice, text } => {
                    xml.push_str(&format!(
                        r#"<Say voice="{}">{}</Say>"#,
                        escape_xml(voice),
                        escape_xml(text)
                    ));
                }
                Verb::Hangup => xml.push_str("<Hangup/>"),
            }
        }
        xml.push_str("</Response>");
        xml
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
