//! Supabase-compatible REST backend.
//!
//! Auth goes through GoTrue (`/auth/v1`), tables through PostgREST
//! (`/rest/v1`). Every request carries the anon key as `apikey`; the bearer
//! is the signed-in user's access token when there is one.

use std::sync::RwLock;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use geoquiz_core::model::Domain;
use geoquiz_core::traits::{AuthSession, IdentityService, Profile, ProgressRecord, ProgressStore};

use crate::error::BackendError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PROFILE_COLUMNS: &str = "id,pseudo,email";
const PROGRESS_COLUMNS: &str = "user_id,domain,level,score,updated_at";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates";

/// Client for a Supabase project.
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    timeout_secs: u64,
    session: RwLock<Option<AuthSession>>,
    client: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str, timeout_secs: Option<u64>) -> Self {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            timeout_secs,
            session: RwLock::new(None),
            client,
        }
    }

    /// The session established by the last successful sign-in.
    pub fn session(&self) -> Option<AuthSession> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    /// Use an existing session for subsequent requests.
    pub fn set_session(&self, session: Option<AuthSession>) {
        if let Ok(mut current) = self.session.write() {
            *current = session;
        }
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> anyhow::Result<Url> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse_with_params(&raw, params).with_context(|| format!("invalid backend url: {raw}"))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .session()
            .map(|s| s.access_token)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.anon_key.clone());
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(self.timeout_secs)
            } else {
                BackendError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        Err(match status {
            401 | 403 => BackendError::AuthenticationFailed(message),
            404 => BackendError::NotFound(message),
            _ => BackendError::ApiError { status, message },
        })
    }

    async fn profiles(&self, filter: (&str, &str)) -> anyhow::Result<Vec<Profile>> {
        let url = self.url("/rest/v1/profiles", &[("select", PROFILE_COLUMNS), filter])?;
        let response = self.send(self.authorized(self.client.get(url))).await?;
        let rows = response
            .json::<Vec<Profile>>()
            .await
            .map_err(|e| parse_error("profiles", e))?;
        Ok(rows)
    }
}

/// Pull a readable message out of a GoTrue or PostgREST error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

fn parse_error(what: &str, e: reqwest::Error) -> BackendError {
    BackendError::ApiError {
        status: 0,
        message: format!("failed to parse {what} response: {e}"),
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    pseudo: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// A `progress` row. Older rows may lack a timestamp.
#[derive(Deserialize)]
struct ProgressRow {
    user_id: Uuid,
    domain: Domain,
    level: u8,
    score: u8,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        ProgressRecord {
            user_id: row.user_id,
            domain: row.domain,
            level: row.level,
            score: row.score,
            updated_at: row.updated_at.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl IdentityService for SupabaseClient {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str, handle: &str) -> anyhow::Result<()> {
        let body = SignUpRequest {
            email,
            password,
            data: SignUpMetadata { pseudo: handle },
        };
        let url = self.url("/auth/v1/signup", &[])?;
        self.send(self.authorized(self.client.post(url)).json(&body))
            .await?;
        tracing::debug!("account created for {email}");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        let url = self.url("/auth/v1/token", &[("grant_type", "password")])?;
        let request = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password });

        let response = match self.send(request).await {
            Ok(response) => response,
            Err(BackendError::ApiError { status: 400, message }) => {
                return Err(BackendError::AuthenticationFailed(message).into())
            }
            Err(e) => return Err(e.into()),
        };
        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| parse_error("token", e))?;

        let session = AuthSession {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: token.access_token,
        };
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn find_profile_by_handle(&self, handle: &str) -> anyhow::Result<Option<Profile>> {
        // `ilike` treats `%`, `_` and `*` as wildcards; valid handles never contain them.
        if handle.is_empty() || !handle.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(None);
        }
        let pattern = format!("ilike.{handle}");
        let rows = self.profiles(("pseudo", pattern.as_str())).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let filter = format!("eq.{user_id}");
        let rows = self.profiles(("id", filter.as_str())).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, profile), fields(id = %profile.id))]
    async fn upsert_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        let url = self.url("/rest/v1/profiles", &[])?;
        let request = self
            .authorized(self.client.post(url))
            .header("Prefer", UPSERT_PREFERENCE)
            .json(profile);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for SupabaseClient {
    fn name(&self) -> &str {
        "supabase"
    }

    #[instrument(skip(self))]
    async fn load_progress(&self, user_id: Uuid) -> anyhow::Result<Vec<ProgressRecord>> {
        let filter = format!("eq.{user_id}");
        let url = self.url(
            "/rest/v1/progress",
            &[("select", PROGRESS_COLUMNS), ("user_id", filter.as_str())],
        )?;
        let response = self.send(self.authorized(self.client.get(url))).await?;
        let rows = response
            .json::<Vec<ProgressRow>>()
            .await
            .map_err(|e| parse_error("progress", e))?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    #[instrument(skip(self, record), fields(domain = %record.domain, level = record.level))]
    async fn save_progress(&self, record: &ProgressRecord) -> anyhow::Result<()> {
        let url = self.url("/rest/v1/progress", &[("on_conflict", "user_id,domain,level")])?;
        let request = self
            .authorized(self.client.post(url))
            .header("Prefer", UPSERT_PREFERENCE)
            .json(record);
        self.send(request).await?;
        Ok(())
    }
}
