//! Posts a text tweet on behalf of the authenticated user.

use {
    super::models::{CreateTweetRequest, CreateTweetResponse, PostedTweet},
    crate::{
        auth::TwitterAuth,
        error::{TwitterError, TwitterErrorResponse},
        twitter_client::TwitterClient,
    },
    std::time::Duration,
};

#[derive(Clone, Debug)]
pub struct PostTweet {
    client: TwitterClient,
}

impl PostTweet {
    /// Creates the operation against `api_base` (e.g. `https://api.twitter.com/2`).
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self, TwitterError> {
        Ok(Self {
            client: TwitterClient::new(Some("tweets"), Some(api_base), timeout)?,
        })
    }

    /// Publishes `text` as a new tweet of the account behind `auth`.
    pub async fn invoke(
        &self,
        auth: &TwitterAuth,
        text: &str,
    ) -> Result<PostedTweet, TwitterErrorResponse> {
        self.client
            .post::<CreateTweetResponse, _>(auth, CreateTweetRequest { text })
            .await
    }
}
