use std::fmt;

/// Client registration used to talk to Google's OAuth endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Everything the upload path needs to mint a fresh access token.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCredentials {
    pub oauth: OAuthCredentials,
    pub refresh_token: String,
}

impl fmt::Debug for UploadCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCredentials")
            .field("oauth", &self.oauth)
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let creds = UploadCredentials {
            oauth: OAuthCredentials {
                client_id: "client".into(),
                client_secret: "very-secret".into(),
                redirect_uri: "http://localhost/cb".into(),
            },
            refresh_token: "refresh-me".into(),
        };

        let rendered = format!("{creds:?}");
        assert!(rendered.contains("client"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("refresh-me"));
    }
}
