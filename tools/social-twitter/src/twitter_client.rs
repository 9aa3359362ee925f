//! Twitter API client implementation
//!
//! This module provides a client for interacting with the Twitter API v2.

use {
    crate::{
        auth::TwitterAuth,
        error::{parse_twitter_response, TwitterError, TwitterErrorResponse},
    },
    reqwest::Client,
    serde::{de::DeserializeOwned, Serialize},
    std::{sync::Arc, time::Duration},
};

pub const TWITTER_API_BASE: &str = "https://api.twitter.com/2";

/// Twitter API client for making authenticated requests
#[derive(Clone, Debug)]
pub struct TwitterClient {
    /// HTTP client for making requests
    client: Arc<Client>,
    /// URL for Twitter API
    api_base: String,
}

impl TwitterClient {
    /// Creates a new Twitter client instance
    ///
    /// Optionally takes an endpoint suffix to append to the API base
    pub fn new(
        endpoint_suffix: Option<&str>,
        base_url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, TwitterError> {
        let base = base_url.unwrap_or(TWITTER_API_BASE).trim_end_matches('/');
        let api_base = match endpoint_suffix {
            Some(suffix) => format!("{}/{}", base, suffix),
            None => base.to_string(),
        };

        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            api_base,
        })
    }

    /// Returns the base API URL
    pub fn get_base_api_url(&self) -> &str {
        &self.api_base
    }

    /// Makes a POST request to the Twitter API
    pub async fn post<T, U>(
        &self,
        auth: &TwitterAuth,
        body: U,
    ) -> Result<T::Output, TwitterErrorResponse>
    where
        T: TwitterApiParsedResponse + DeserializeOwned,
        U: Serialize,
    {
        let raw_response: T = self.make_request(auth, body).await?;
        raw_response.parse_twitter_response()
    }

    /// Makes an OAuth1 signed JSON POST request to the Twitter API.
    async fn make_request<T, B>(&self, auth: &TwitterAuth, body: B) -> Result<T, TwitterErrorResponse>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let auth_header = auth.generate_auth_header(&self.api_base);

        log::debug!("POST {}", self.api_base);

        let request = self
            .client
            .post(&self.api_base)
            .header("Authorization", auth_header)
            .json(&body);

        // Network/connection errors
        let response = request
            .send()
            .await
            .map_err(|e| TwitterError::Network(e).to_error_response())?;

        // API errors (status codes, parsing, etc.)
        parse_twitter_response::<T>(response)
            .await
            .map_err(|e| e.to_error_response())
    }
}

/// Turns a raw `{ data, errors }` envelope into its payload or an error.
pub trait TwitterApiParsedResponse {
    type Output;

    fn parse_twitter_response(self) -> Result<Self::Output, TwitterErrorResponse>;
}

/// Macro to implement [TwitterApiParsedResponse] for a given response type
/// and data type. The response type must have `data: Option<$data_ty>` and
/// `errors: Option<Vec<TwitterApiError>>` fields.
#[macro_export]
macro_rules! impl_twitter_response_parser {
    ($response_ty:ty, $data_ty:ty) => {
        impl $crate::twitter_client::TwitterApiParsedResponse for $response_ty {
            type Output = $data_ty;

            fn parse_twitter_response(
                self,
            ) -> Result<Self::Output, $crate::error::TwitterErrorResponse> {
                if let Some(first_error) = self.errors.as_ref().and_then(|errors| errors.first()) {
                    return Err(
                        $crate::error::TwitterError::from_api_error(first_error)
                            .to_error_response(),
                    );
                }

                match self.data {
                    Some(data) => Ok(data),
                    None => Err($crate::error::TwitterError::Other(
                        "Twitter API response validation failed - no data or errors found in response"
                            .to_string(),
                    )
                    .to_error_response()),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_suffix_is_joined() {
        let client = TwitterClient::new(Some("tweets"), Some("http://localhost:1234/2/"), None)
            .unwrap();

        assert_eq!(client.get_base_api_url(), "http://localhost:1234/2/tweets");
    }

    #[test]
    fn test_default_base() {
        let client = TwitterClient::new(None, None, Some(Duration::from_secs(5))).unwrap();

        assert_eq!(client.get_base_api_url(), TWITTER_API_BASE);
    }
}
