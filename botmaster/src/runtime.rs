//! HTTP surface of the form: routes, form decoding and the server loop.

use {
    crate::{
        conf::BotmasterConf,
        controller::{Action, FormController, Page, Submission},
        prelude::*,
        publish::{Publisher, TwitterPublisher},
        render::Renderer,
        session::SessionId,
    },
    bytes::BufMut,
    futures_util::TryStreamExt,
    std::sync::Arc,
    warp::{
        http::{
            header::{HeaderValue, LOCATION, SET_COOKIE},
            StatusCode,
        },
        multipart::{FormData, Part},
        reply::Response,
        Filter,
        Rejection,
        Reply,
    },
};

/// Largest accepted `/help/close` body.
const CLOSE_HELP_MAX_BYTES: u64 = 1024;

/// Everything a request handler needs.
pub struct App<P> {
    controller: FormController<P>,
    renderer: Renderer,
    max_upload_bytes: u64,
}

impl<P: Publisher> App<P> {
    pub fn new(controller: FormController<P>, renderer: Renderer, max_upload_bytes: u64) -> Self {
        Self {
            controller,
            renderer,
            max_upload_bytes,
        }
    }

    pub fn controller(&self) -> &FormController<P> {
        &self.controller
    }
}

#[derive(Debug, Default, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// Generates the routes of the form.
///
/// - `GET /health` always answers 200.
/// - `GET /` shows the empty form, `?lang=` picks the language.
/// - `POST /` takes the multipart form and answers with the updated page.
/// - `POST /help/close` hides the help panel for the session and redirects
///   back to the form.
pub fn routes<P: Publisher>(
    app: Arc<App<P>>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let max_upload_bytes = app.max_upload_bytes;
    let with_app = warp::any().map(move || app.clone());
    let session = warp::header::optional::<String>("cookie");

    let health_route = warp::get()
        .and(warp::path("health"))
        .and(warp::path::end())
        .map(|| warp::reply::with_status("", StatusCode::OK));

    let show_route = warp::get()
        .and(warp::path::end())
        .and(with_app.clone())
        .and(session.clone())
        .and(warp::query::<LangQuery>())
        .and_then(show_handler::<P>);

    let submit_route = warp::post()
        .and(warp::path::end())
        .and(with_app.clone())
        .and(session.clone())
        .and(warp::multipart::form().max_length(max_upload_bytes))
        .and_then(submit_handler::<P>);

    let close_help_route = warp::post()
        .and(warp::path!("help" / "close"))
        .and(with_app)
        .and(session)
        .and(warp::body::content_length_limit(CLOSE_HELP_MAX_BYTES))
        .and(warp::body::form::<LangQuery>())
        .and_then(close_help_handler::<P>);

    health_route
        .or(show_route)
        .or(submit_route)
        .or(close_help_route)
        .with(warp::log("botmaster::http"))
}

/// Binds to the configured address and serves the form until Ctrl-C.
pub async fn serve(conf: BotmasterConf) -> Result<(), BotmasterError> {
    let publisher =
        TwitterPublisher::new(&conf.twitter.api_base, conf.twitter.request_timeout())?;
    let controller = FormController::new(publisher, conf.ui.default_language);
    let app = Arc::new(App::new(
        controller,
        Renderer::new()?,
        conf.server.max_upload_bytes,
    ));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    let (addr, server) =
        warp::serve(routes(app)).try_bind_with_graceful_shutdown(conf.server.bind, shutdown)?;

    log::info!("Botmaster listening on http://{addr}");
    log::info!("Publishing through {}", conf.twitter.api_base);

    server.await;

    log::info!("Botmaster stopped");

    Ok(())
}

/// The session of the request and whether it was just created.
fn resolve_session(cookie: Option<String>) -> (SessionId, bool) {
    match cookie.as_deref().and_then(SessionId::from_cookie_header) {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    }
}

/// Sets the session cookie on a reply when the session is new.
fn with_session(mut response: Response, session: &SessionId, is_new: bool) -> Response {
    if is_new {
        if let Ok(cookie) = HeaderValue::from_str(&session.cookie()) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
    }

    response
}

fn page_reply<P: Publisher>(app: &App<P>, page: &Page) -> Response {
    match app.renderer.page(page) {
        Ok(html) => warp::reply::html(html).into_response(),
        Err(e) => {
            log::error!("Failed to render page: {e}");

            warp::reply::with_status("Failed to render page", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        }
    }
}

async fn show_handler<P: Publisher>(
    app: Arc<App<P>>,
    cookie: Option<String>,
    query: LangQuery,
) -> Result<Response, Rejection> {
    let (session, is_new) = resolve_session(cookie);

    let page = app.controller.show(&session, query.lang.as_deref());

    Ok(with_session(page_reply(&app, &page), &session, is_new))
}

async fn submit_handler<P: Publisher>(
    app: Arc<App<P>>,
    cookie: Option<String>,
    form: FormData,
) -> Result<Response, Rejection> {
    let (session, is_new) = resolve_session(cookie);

    let submission = match read_submission(form).await {
        Ok(submission) => submission,
        Err(e) => {
            log::warn!("Rejected malformed form submission: {e}");

            let reply =
                warp::reply::with_status("Malformed form submission", StatusCode::BAD_REQUEST);

            return Ok(reply.into_response());
        }
    };

    let page = app.controller.submit(&session, submission).await;

    Ok(with_session(page_reply(&app, &page), &session, is_new))
}

async fn close_help_handler<P: Publisher>(
    app: Arc<App<P>>,
    cookie: Option<String>,
    form: LangQuery,
) -> Result<Response, Rejection> {
    let (session, is_new) = resolve_session(cookie);

    // Only sessions the browser already holds are remembered.
    if is_new {
        log::debug!("Ignoring help close without a session cookie");
    } else {
        app.controller.close_help(&session);
    }

    let lang = app.controller.language(form.lang.as_deref());
    let reply = warp::reply::with_header(
        warp::reply::with_status(warp::reply(), StatusCode::SEE_OTHER),
        LOCATION,
        format!("/?lang={lang}"),
    );

    Ok(with_session(reply.into_response(), &session, is_new))
}

/// Reads the multipart form into a [Submission]. Unknown fields are ignored.
/// Parts are consumed in order since the body is a single stream. A file input
/// left empty arrives with no file name and no content and counts as no file.
async fn read_submission(form: FormData) -> Result<Submission, warp::Error> {
    let mut form = std::pin::pin!(form);
    let mut submission = Submission::default();

    while let Some(part) = form.try_next().await? {
        let name = part.name().to_string();
        let has_filename = part.filename().is_some_and(|filename| !filename.is_empty());
        let bytes = read_part(part).await?;

        match name.as_str() {
            "lang" => submission.lang = Some(into_text(bytes)),
            "credentials_file" if has_filename || !bytes.is_empty() => {
                submission.credentials_file = Some(bytes)
            }
            "credentials_text" => submission.credentials_text = Some(into_text(bytes)),
            "tweets" => submission.tweets = into_text(bytes),
            "action" => submission.action = parse_action(&into_text(bytes)),
            _ => (),
        }
    }

    Ok(submission)
}

/// Unknown button values fall back to [Action::Preview], which never publishes.
fn parse_action(value: &str) -> Action {
    value.trim().parse().unwrap_or_else(|_| {
        log::debug!("Unknown form action {value:?}, previewing instead");

        Action::default()
    })
}

async fn read_part(part: Part) -> Result<Vec<u8>, warp::Error> {
    part.stream()
        .try_fold(Vec::new(), |mut bytes, chunk| async move {
            bytes.put(chunk);

            Ok(bytes)
        })
        .await
}

fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
