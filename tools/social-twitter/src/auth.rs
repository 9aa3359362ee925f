use {
    oauth1_request::{post, signature_method::HmacSha1, Token},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// OAuth 1.0a user-context credentials for one Twitter account.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TwitterAuth {
    /// Consumer API key for Twitter API application
    pub consumer_key: String,
    /// Consumer Secret key for Twitter API application
    pub consumer_secret_key: String,
    /// Access Token for user's Twitter account
    pub access_token: String,
    /// Access Token Secret for user's Twitter account
    pub access_token_secret: String,
}

impl TwitterAuth {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret_key: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret_key: consumer_secret_key.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Create an OAuth token from the credentials
    pub fn to_token(&self) -> Token {
        Token::from_parts(
            self.consumer_key.clone(),
            self.consumer_secret_key.clone(),
            self.access_token.clone(),
            self.access_token_secret.clone(),
        )
    }

    /// Generate an OAuth authorization header for a POST request with a JSON
    /// body. JSON bodies are not part of the OAuth 1.0a signature base, so
    /// only the URL is signed.
    pub fn generate_auth_header(&self, url: &str) -> String {
        let token = self.to_token();
        post(url, &(), &token, HmacSha1::new())
    }
}

/// Secrets stay out of logs and panic messages.
impl fmt::Debug for TwitterAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterAuth")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}
