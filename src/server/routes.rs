//! HTTP routes

use super::limiter::LoginLimiter;
use super::prism::VmSource;
use super::session::{self, Session, current_session};
use super::templates;
use crate::config::ServerConfig;
use crate::consts::dashboard_consts::{fetching::VMS_ENDPOINT, session::DEFAULT_LOGIN_PATH};
use axum::extract::{ConnectInfo, FromRef, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use serde::Deserialize;
use serde_json::json;
use sha3::{Digest, Sha3_256, Sha3_512};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    vms: Arc<dyn VmSource>,
    key: Key,
    limiter: Arc<LoginLimiter>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>, vms: Arc<dyn VmSource>) -> Self {
        // Cookie signing needs 64 bytes of key material.
        let key = Key::from(Sha3_512::digest(config.secret_key.as_bytes()).as_slice());
        Self {
            config,
            vms,
            key,
            limiter: Arc::new(LoginLimiter::default()),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route(VMS_ENDPOINT, get(list_vms))
        .route("/health", get(health))
        .nest_service("/static", assets)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

async fn index(jar: SignedCookieJar) -> Response {
    match current_session(&jar) {
        Some(session) => Html(templates::index_page(&session.username)).into_response(),
        None => Redirect::to(DEFAULT_LOGIN_PATH).into_response(),
    }
}

async fn login_form(jar: SignedCookieJar) -> Response {
    if current_session(&jar).is_some() {
        return Redirect::to("/").into_response();
    }
    Html(templates::login_page(None)).into_response()
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    let client = peer.ip().to_string();

    if let Err(retry_in) = state.limiter.check(&client) {
        log::warn!("Login from {} throttled", client);
        let message = format!(
            "Too many login attempts. Try again in {} seconds.",
            retry_in.as_secs().max(1)
        );
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Html(templates::login_page(Some(&message))),
        )
            .into_response();
    }

    let config = &state.config;
    let valid = same_secret(username, &config.dashboard_username)
        & same_secret(&form.password, &config.dashboard_password);
    if !valid {
        state.limiter.record_failure(&client);
        log::warn!("Failed login for {:?} from {}", username, client);
        return (
            StatusCode::UNAUTHORIZED,
            Html(templates::login_page(Some("Invalid username or password."))),
        )
            .into_response();
    }

    state.limiter.reset(&client);
    log::info!("{} signed in", username);
    let session = Session::new(username, config.session_lifetime);
    let jar = session::start(jar, &session, config.profile);
    (jar, Redirect::to("/")).into_response()
}

async fn logout(jar: SignedCookieJar) -> Response {
    if let Some(session) = current_session(&jar) {
        log::info!("{} signed out", session.username);
    }
    (session::end(jar), Redirect::to(DEFAULT_LOGIN_PATH)).into_response()
}

async fn list_vms(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    if current_session(&jar).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Authentication required",
                "redirect": DEFAULT_LOGIN_PATH,
            })),
        )
            .into_response();
    }

    match state.vms.powered_on_vms().await {
        Ok(vms) => Json(vms).into_response(),
        Err(e) => {
            log::error!("Fetching VMs failed: {}", e);
            e.into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Compares fixed-size digests so the comparison time does not depend on
/// where the inputs differ.
fn same_secret(given: &str, expected: &str) -> bool {
    let given = Sha3_256::digest(given.as_bytes());
    let expected = Sha3_256::digest(expected.as_bytes());
    given
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
