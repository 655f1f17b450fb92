//! Builds the URL the telephony provider fetches the call script from.

use reqwest::Url;

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::intervention::CallbackSigner;

/// Path of the call-script endpoint, relative to the public base URL.
pub const CALL_SCRIPT_PATH: &str = "call-response";

/// Callback URL factory bound to the public base URL.
#[derive(Debug, Clone)]
pub struct CallbackUrlBuilder {
    base: Url,
    signer: Option<CallbackSigner>,
}

impl CallbackUrlBuilder {
    pub fn new(public_base_url: &str, signer: Option<CallbackSigner>) -> Result<Self, ValidationError> {
        let base = Url::parse(public_base_url)
            .map_err(|e| ValidationError::invalid_format("public_base_url", e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ValidationError::invalid_format(
                "public_base_url",
                "URL cannot be used as a base",
            ));
        }
        Ok(Self { base, signer })
    }

    pub fn signer(&self) -> Option<&CallbackSigner> {
        self.signer.as_ref()
    }

    /// `{base}/call-response?user_id=..&app_name=..[&sig=..]`, URL-encoded.
    pub fn build(&self, user_id: &UserId, app_name: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(CALL_SCRIPT_PATH);
        }
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("user_id", user_id.as_str())
                .append_pair("app_name", app_name);
            if let Some(signer) = &self.signer {
                query.append_pair("sig", &signer.sign(user_id.as_str(), app_name));
            }
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn user() -> UserId {
        UserId::new("user 1&2").unwrap()
    }

    #[test]
    fn encodes_query_values() {
        let builder = CallbackUrlBuilder::new("https://dial.example.com", None).unwrap();
        let url = builder.build(&user(), "Candy Crush");

        assert_eq!(
            url,
            "https://dial.example.com/call-response?user_id=user+1%262&app_name=Candy+Crush"
        );
    }

    #[test]
    fn keeps_base_path() {
        let builder = CallbackUrlBuilder::new("https://dial.example.com/api/", None).unwrap();
        let url = builder.build(&UserId::new("u").unwrap(), "X");
        assert!(url.starts_with("https://dial.example.com/api/call-response?"));
    }

    #[test]
    fn appends_verifiable_signature() {
        let signer = CallbackSigner::new(&SecretString::new("k".to_string())).unwrap();
        let builder = CallbackUrlBuilder::new("https://dial.example.com", Some(signer.clone())).unwrap();
        let url = Url::parse(&builder.build(&user(), "TikTok")).unwrap();

        let sig = url
            .query_pairs()
            .find(|(k, _)| k == "sig")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(signer.verify("user 1&2", "TikTok", &sig));
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(CallbackUrlBuilder::new("not a url", None).is_err());
        assert!(CallbackUrlBuilder::new("mailto:ops@example.com", None).is_err());
    }
}
