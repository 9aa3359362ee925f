//! The publish operation: every post from every account, strictly in order.
//!
//! Each account runs in two states, `publishing` and then either completed or
//! failed. A failure ends that account's run only. Nothing is retried or
//! rolled back.

use {
    crate::credentials::Credential,
    social_twitter::{PostTweet, TwitterAuth, TwitterErrorKind, TwitterErrorResponse},
    std::{future::Future, time::Duration},
    thiserror::Error,
};

/// Failure to authenticate as, or publish from, one account.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct PublishError {
    pub reason: String,
    pub kind: Option<TwitterErrorKind>,
}

impl PublishError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            kind: None,
        }
    }
}

impl From<TwitterErrorResponse> for PublishError {
    fn from(e: TwitterErrorResponse) -> Self {
        Self {
            reason: e.reason,
            kind: Some(e.kind),
        }
    }
}

/// Downstream service that posts on behalf of an account.
///
/// `authenticate` turns a credential record into a session, `publish` sends
/// one post through that session.
pub trait Publisher: Send + Sync + 'static {
    type Session: Send + Sync;

    fn authenticate(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Self::Session, PublishError>> + Send;

    fn publish(
        &self,
        session: &Self::Session,
        text: &str,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

/// [Publisher] backed by the Twitter API v2 `POST /tweets` endpoint.
#[derive(Clone, Debug)]
pub struct TwitterPublisher {
    post_tweet: PostTweet,
}

impl TwitterPublisher {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, social_twitter::TwitterError> {
        Ok(Self {
            post_tweet: PostTweet::new(api_base, Some(timeout))?,
        })
    }
}

impl Publisher for TwitterPublisher {
    type Session = TwitterAuth;

    /// OAuth 1.0a user context needs no handshake once the access token is
    /// known, so this only builds the signing key material.
    async fn authenticate(&self, credential: &Credential) -> Result<TwitterAuth, PublishError> {
        Ok(credential.to_twitter_auth())
    }

    async fn publish(&self, session: &TwitterAuth, text: &str) -> Result<(), PublishError> {
        let tweet = self.post_tweet.invoke(session, text).await?;

        log::debug!("Published tweet {}", tweet.id);

        Ok(())
    }
}

/// How one account's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    /// Every post went out.
    Completed { posted: usize },
    /// `posted` posts went out before `reason` stopped the run.
    Failed { posted: usize, reason: String },
}

impl AccountOutcome {
    pub fn posted(&self) -> usize {
        match self {
            AccountOutcome::Completed { posted } | AccountOutcome::Failed { posted, .. } => *posted,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            AccountOutcome::Failed { reason, .. } => Some(reason),
            AccountOutcome::Completed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// Successful individual post calls over all accounts.
    pub total: usize,
    /// Accounts attempted.
    pub accounts: usize,
    /// One entry per account, in input order.
    pub outcomes: Vec<AccountOutcome>,
}

impl PublishReport {
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(AccountOutcome::failure)
    }
}

/// Publishes every post from one account, stopping at the first error.
pub async fn publish_account<P: Publisher>(
    publisher: &P,
    credential: &Credential,
    posts: &[String],
) -> AccountOutcome {
    let session = match publisher.authenticate(credential).await {
        Ok(session) => session,
        Err(e) => {
            return AccountOutcome::Failed {
                posted: 0,
                reason: e.reason,
            }
        }
    };

    let mut posted = 0;

    for post in posts {
        if let Err(e) = publisher.publish(&session, post).await {
            return AccountOutcome::Failed {
                posted,
                reason: e.reason,
            };
        }

        posted += 1;
    }

    AccountOutcome::Completed { posted }
}

/// Publishes every post from every account, one call at a time.
pub async fn publish_all<P: Publisher>(
    publisher: &P,
    credentials: &[Credential],
    posts: &[String],
) -> PublishReport {
    let mut report = PublishReport {
        accounts: credentials.len(),
        ..Default::default()
    };

    for (index, credential) in credentials.iter().enumerate() {
        let outcome = publish_account(publisher, credential, posts).await;

        match &outcome {
            AccountOutcome::Completed { posted } => log::info!(
                "Account #{} ({}) published {} posts",
                index + 1,
                credential.masked_key(),
                posted
            ),
            AccountOutcome::Failed { posted, reason } => log::warn!(
                "Account #{} ({}) failed after {} posts: {}",
                index + 1,
                credential.masked_key(),
                posted,
                reason
            ),
        }

        report.total += outcome.posted();
        report.outcomes.push(outcome);
    }

    report
}
