//! The form controller: turns a form submission into the page to display,
//! publishing along the way when asked to.

use {
    crate::{
        credentials::{ingest, CredentialSource},
        i18n::{Labels, Language, LANGUAGE_SELECTOR_LABEL},
        notice::Notice,
        posts::collect_posts,
        prelude::*,
        publish::{publish_all, Publisher},
        session::{SessionId, SessionStore},
    },
    strum_macros::EnumString,
};

/// Which submit button was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Re-render with credential feedback and the post preview.
    #[default]
    Preview,
    /// Everything [Action::Preview] does, then publish.
    Post,
}

/// Decoded form fields.
#[derive(Debug, Default)]
pub struct Submission {
    pub lang: Option<String>,
    /// Uploaded credential table, when a file was chosen.
    pub credentials_file: Option<Vec<u8>>,
    /// Pasted credential table.
    pub credentials_text: Option<String>,
    pub tweets: String,
    pub action: Action,
}

/// Everything the page template needs.
#[derive(Debug, Serialize)]
pub struct Page {
    pub lang: Language,
    pub languages: Vec<Language>,
    pub selector_label: &'static str,
    /// Labels of [Page::lang].
    pub t: &'static Labels,
    pub show_help: bool,
    /// Pasted credentials and tweet text, echoed back into their fields.
    pub credentials_text: String,
    pub tweets_text: String,
    pub credential_notices: Vec<Notice>,
    /// Preview of the posts that would be published.
    pub posts: Vec<String>,
    pub publish_notices: Vec<Notice>,
    /// Shown when there are no posts yet.
    pub prompt: Option<String>,
}

pub struct FormController<P> {
    publisher: P,
    sessions: SessionStore,
    default_language: Language,
}

impl<P: Publisher> FormController<P> {
    pub fn new(publisher: P, default_language: Language) -> Self {
        Self {
            publisher,
            sessions: SessionStore::new(),
            default_language,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn language(&self, code: Option<&str>) -> Language {
        Language::from_code_or(code, self.default_language)
    }

    /// The empty form.
    pub fn show(&self, session: &SessionId, lang: Option<&str>) -> Page {
        let language = self.language(lang);
        let mut page = self.blank_page(session, language);

        page.prompt = Some(language.labels().tweet_prompt());

        page
    }

    /// Hides the help panel for this session.
    pub fn close_help(&self, session: &SessionId) {
        self.sessions.close_help(session);
    }

    /// Handles a submitted form. Credentials are ingested, posts collected and,
    /// for [Action::Post], every post is published from every account before
    /// the page is returned.
    pub async fn submit(&self, session: &SessionId, submission: Submission) -> Page {
        let Submission {
            lang,
            credentials_file,
            credentials_text,
            tweets,
            action,
        } = submission;

        let language = self.language(lang.as_deref());
        let labels = language.labels();
        let mut page = self.blank_page(session, language);

        let (source, file_ignored) =
            CredentialSource::choose(credentials_file, credentials_text.clone());

        if file_ignored {
            page.credential_notices.push(Notice::info(labels.file_ignored));
        }

        let credentials = match source {
            Some(source) => {
                let ingestion = ingest(&source, labels);
                page.credential_notices.extend(ingestion.notices);
                ingestion.credentials
            }
            None => vec![],
        };

        page.credentials_text = credentials_text.unwrap_or_default();
        page.posts = collect_posts(&tweets);
        page.tweets_text = tweets;

        log::info!(
            "Submission in {language}: {action:?} with {} records and {} posts",
            credentials.len(),
            page.posts.len()
        );

        if page.posts.is_empty() {
            page.prompt = Some(labels.tweet_prompt());

            return page;
        }

        if action != Action::Post {
            return page;
        }

        if credentials.is_empty() {
            page.publish_notices.push(Notice::warning(labels.no_creds));

            return page;
        }

        let report = publish_all(&self.publisher, &credentials, &page.posts).await;

        page.publish_notices.extend(
            report
                .failures()
                .map(|reason| Notice::error(format!("❌ Error: {reason}"))),
        );
        page.publish_notices
            .push(Notice::success(labels.post_success(report.total, report.accounts)));

        log::info!(
            "Published {} posts from {} accounts, {} accounts failed",
            report.total,
            report.accounts,
            report.failures().count()
        );

        page
    }

    fn blank_page(&self, session: &SessionId, language: Language) -> Page {
        Page {
            lang: language,
            languages: Language::all().collect(),
            selector_label: LANGUAGE_SELECTOR_LABEL,
            t: language.labels(),
            show_help: self.sessions.get(session).show_help,
            credentials_text: String::new(),
            tweets_text: String::new(),
            credential_notices: vec![],
            posts: vec![],
            publish_notices: vec![],
            prompt: None,
        }
    }
}
