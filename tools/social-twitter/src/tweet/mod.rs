//! Tweet operations.

pub mod models;
pub mod post_tweet;
