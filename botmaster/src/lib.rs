//! Botmaster is a small web form that publishes a list of tweets from many
//! Twitter accounts at once. Credentials come from an uploaded or pasted CSV
//! table, tweets are one per line, and every tweet is sent from every account.

pub mod conf;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod i18n;
pub mod notice;
pub mod posts;
pub(crate) mod prelude;
pub mod publish;
pub mod render;
pub mod runtime;
pub mod session;

pub use {
    conf::BotmasterConf,
    controller::{Action, FormController, Page, Submission},
    credentials::{Credential, CredentialSource},
    error::BotmasterError,
    i18n::Language,
    publish::{Publisher, PublishError, TwitterPublisher},
    runtime::{routes, serve, App},
};
