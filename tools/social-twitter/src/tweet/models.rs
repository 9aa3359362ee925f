use {
    crate::{error::TwitterApiError, impl_twitter_response_parser},
    serde::{Deserialize, Serialize},
};

/// Body of `POST /2/tweets`.
#[derive(Debug, Serialize)]
pub struct CreateTweetRequest<'a> {
    pub text: &'a str,
}

/// Response envelope of `POST /2/tweets`.
#[derive(Debug, Deserialize)]
pub struct CreateTweetResponse {
    pub data: Option<PostedTweet>,
    pub errors: Option<Vec<TwitterApiError>>,
}

/// A tweet that Twitter accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTweet {
    pub id: String,
    pub text: String,
    /// List of tweet IDs in the edit history
    #[serde(default)]
    pub edit_history_tweet_ids: Vec<String>,
}

impl_twitter_response_parser!(CreateTweetResponse, PostedTweet);
