//! Session authentication.
//!
//! A successful login returns an HS256 token valid for 30 days, both in the
//! JSON body and as the `cmetrack_session` cookie. [`require_session`] accepts
//! either the cookie or an `Authorization: Bearer` header. Requests without a
//! valid session are redirected to the login page with the original URI as
//! `callbackUrl`.

use super::state::AppState;
use crate::db::admins::Admins;
use crate::libs::admin::AdminSummary;
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const SESSION_COOKIE: &str = "cmetrack_session";
pub const SESSION_DAYS: i64 = 30;
pub const LOGIN_PAGE: &str = "/auth/login";

const PUBLIC_PATHS: [&str; 2] = [LOGIN_PAGE, "/health"];
const PUBLIC_PREFIX: &str = "/api/auth/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Uses the configured secret, or a random one that only lives as long as
    /// the process.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret.filter(|secret| !secret.is_empty()) {
            Some(secret) => Self::new(secret),
            None => {
                tracing::warn!("{}", Message::JwtSecretMissing);
                let secret: String = rand::thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
                Self::new(&secret)
            }
        }
    }

    /// Issues a token for `admin`. Returns the token and its expiry.
    pub fn issue(&self, admin: &AdminSummary) -> RecordResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::days(SESSION_DAYS);
        let claims = Claims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| RecordError::Internal(Message::SessionIssueFailed(e.to_string())))?;
        Ok((token, expires_at))
    }

    pub fn verify(&self, token: &str) -> RecordResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => RecordError::Auth(Message::SessionExpired),
            _ => RecordError::Auth(Message::SessionInvalid(e.to_string())),
        })?;
        Ok(data.claims)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

pub async fn login(State(state): State<AppState>, body: Result<Json<LoginRequest>, JsonRejection>) -> RecordResult<Response> {
    let Json(request) = body?;
    let admin = state
        .with_db(move |conn| Admins::new(conn).authenticate(&request.username, &request.password))
        .await?;
    let (token, expires_at) = state.keys.issue(&admin)?;
    tracing::info!(username = %admin.username, "admin logged in");

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        Duration::days(SESSION_DAYS).num_seconds()
    );
    let body = LoginResponse {
        token,
        expires_at,
        username: admin.username,
    };
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)).into_response())
}

pub async fn logout() -> Response {
    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "message": Message::LoggedOut.to_string() })),
    )
        .into_response()
}

pub async fn admins(State(state): State<AppState>) -> RecordResult<Json<Vec<AdminSummary>>> {
    let admins = state.with_db(|conn| Admins::new(conn).list()).await?;
    Ok(Json(admins))
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if PUBLIC_PATHS.contains(&path) || path.starts_with(PUBLIC_PREFIX) {
        return next.run(req).await;
    }

    match session_token(req.headers()) {
        Some(token) => match state.keys.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                return next.run(req).await;
            }
            Err(e) => tracing::warn!(error = %e, uri = %req.uri(), "session rejected"),
        },
        None => tracing::debug!(uri = %req.uri(), "{}", Message::SessionRequired),
    }

    let callback = req.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Redirect::temporary(&format!("{}?callbackUrl={}", LOGIN_PAGE, urlencoding::encode(callback))).into_response()
}

/// The bearer token, else the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        return Some(token.trim().to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Sign in</title>
</head>
<body>
<form id="login">
  <p><label>Username <input name="username" autocomplete="username" required></label></p>
  <p><label>Password <input name="password" type="password" autocomplete="current-password" required></label></p>
  <p><button type="submit">Sign in</button></p>
  <p id="error"></p>
</form>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch("/api/auth/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ username: form.get("username"), password: form.get("password") }),
  });
  if (!response.ok) {
    const body = await response.json().catch(() => ({}));
    document.getElementById("error").textContent = body.error || "Sign in failed";
    return;
  }
  const callback = new URLSearchParams(window.location.search).get("callbackUrl") || "/";
  window.location.assign(callback.startsWith("/") ? callback : "/");
});
</script>
</body>
</html>
"#;
