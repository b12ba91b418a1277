//! HTTP surface: routes, cookie sessions, and page handlers.
//!
//! Every request resolves its `Session` from the `desk_session` cookie and
//! works on that explicit context. Changes go through
//! `SessionRegistry::update`, and only the login handler registers a session
//! and sets the cookie, so cookieless traffic leaves the registry untouched.

use crate::html::{self, Notice};
use axum::{
    extract::{Form, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use channel_desk_core::{
    desk::Desk,
    error::DeskError,
    form::FormFields,
    page::Page,
    session::{Session, SessionRegistry},
    types::SessionId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "desk_session";

#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<Desk>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(desk: Desk) -> Self {
        Self {
            desk: Arc::new(desk),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    fn title(&self) -> &str {
        &self.desk.config.title
    }

    fn session(&self, headers: &HeaderMap) -> Session {
        self.sessions.resume(session_id(headers))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
    /// Slug of the page the visitor asked for before logging in.
    #[serde(default)]
    pub page: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/{page}", get(show_page).post(submit_page))
        .with_state(state)
}

fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// Attach the session cookie to a response.
fn with_session(session: &Session, response: impl IntoResponse) -> Response {
    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict",
        session.id
    );
    ([(header::SET_COOKIE, cookie)], response).into_response()
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn not_found(state: &AppState, err: &DeskError) -> Response {
    let body = html::error_page(state.title(), "Page not found", &err.to_string());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn failure(state: &AppState, err: &DeskError) -> Response {
    log::error!("request failed: {err}");
    let body = html::error_page(state.title(), "Something went wrong", &err.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

fn login_prompt(state: &AppState, session: &Session, page: Page, status: StatusCode) -> Response {
    let body = html::login_page(state.title(), session.gate, page);
    (status, Html(body)).into_response()
}

// ── Handlers ───────────────────────────────────────────────────

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    Redirect::to(&format!("/{}", session.page.slug())).into_response()
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let requested = form.page.parse::<Page>().ok();
    let (session, unlocked) = state.sessions.update(&state.session(&headers), |session| {
        if let Some(page) = requested {
            session.select(page);
        }
        state.desk.login(session, &form.password)
    });
    if unlocked {
        let target = format!("/{}", session.page.slug());
        with_session(&session, Redirect::to(&target))
    } else {
        let prompt = login_prompt(&state, &session, session.page, StatusCode::UNAUTHORIZED);
        with_session(&session, prompt)
    }
}

async fn show_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = state.session(&headers);
    let page: Page = match slug.parse() {
        Ok(page) => page,
        Err(err) => return not_found(&state, &err),
    };
    if !session.is_unlocked() {
        return login_prompt(&state, &session, page, StatusCode::OK);
    }
    state.sessions.update(&session, |session| session.select(page));

    match state.desk.view(page) {
        Ok(view) => Html(html::desk_page(state.title(), page, &view, None, today())).into_response(),
        Err(err) => failure(&state, &err),
    }
}

async fn submit_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let session = state.session(&headers);
    let page: Page = match slug.parse() {
        Ok(page) => page,
        Err(err) => return not_found(&state, &err),
    };
    if !session.is_unlocked() {
        return login_prompt(&state, &session, page, StatusCode::UNAUTHORIZED);
    }
    if page.collection().is_none() {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    state.sessions.update(&session, |session| session.select(page));

    let (status, notice) = match state.desk.submit(page, &FormFields::from(fields)) {
        Ok(_) => (StatusCode::OK, Notice::Added),
        Err(err) if err.is_user_input() => {
            (StatusCode::UNPROCESSABLE_ENTITY, Notice::Invalid(err.to_string()))
        }
        Err(err) => return failure(&state, &err),
    };

    match state.desk.view(page) {
        Ok(view) => {
            let body = html::desk_page(state.title(), page, &view, Some(&notice), today());
            (status, Html(body)).into_response()
        }
        Err(err) => failure(&state, &err),
    }
}
