//! # Social Twitter
//!
//! Minimal Twitter API v2 client: OAuth 1.0a user-context signing, a JSON
//! POST client with classified errors and the "create tweet" operation.

pub mod auth;
pub mod error;
pub mod tweet;
pub mod twitter_client;

pub use {
    auth::TwitterAuth,
    error::{TwitterError, TwitterErrorKind, TwitterErrorResponse},
    tweet::{models::PostedTweet, post_tweet::PostTweet},
    twitter_client::{TwitterClient, TWITTER_API_BASE},
};
