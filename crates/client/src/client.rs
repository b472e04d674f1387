//! HTTP client for the Kesfolio backend REST API.
//!
//! The backend keeps the session in a cookie, so a single `ApiClient`
//! instance must be reused across login and subsequent reads.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::session::SessionContext;
use crate::traits::{Parsed, PortfolioApi};
use kesfolio_core::errors::{Error, Result, ValidationError};
use kesfolio_core::ingest::{
    parse_history, parse_investments, parse_referral_summary, parse_user_profile, IngestReport,
};
use kesfolio_core::{Investment, LedgerEvent, ReferralSummary, UserProfile};

/// Fallback message when an error response carries no `error` field.
const GENERIC_FAILURE: &str = "API request failed";

// ─────────────────────────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    phone: &'a str,
    password: &'a str,
}

/// Sign-up form submitted to `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub phone: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelope parsing
// ─────────────────────────────────────────────────────────────────────────────

fn array_field<'a>(body: &'a Value, field: &str) -> &'a [Value] {
    body.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `{ "investments": [...] }`; a missing list is empty.
pub fn investments_from_body(body: &Value) -> Parsed<Vec<Investment>> {
    let mut report = IngestReport::new();
    let investments = parse_investments(array_field(body, "investments"), &mut report);
    report.log_summary("investments");
    Parsed::new(investments, report)
}

/// `{ "history": [...] }`; a missing list is empty.
pub fn history_from_body(body: &Value) -> Parsed<Vec<LedgerEvent>> {
    let mut report = IngestReport::new();
    let history = parse_history(array_field(body, "history"), &mut report);
    report.log_summary("investment history");
    Parsed::new(history, report)
}

/// `{ "earnings": { "total": n }, "counts": {...} }`
pub fn referral_from_body(body: &Value) -> Parsed<ReferralSummary> {
    let mut report = IngestReport::new();
    let summary = parse_referral_summary(body, &mut report);
    report.log_summary("referral stats");
    Parsed::new(summary, report)
}

/// `{ "user": {...} }` as returned by the auth endpoints.
pub fn profile_from_body(body: &Value) -> Result<Parsed<UserProfile>> {
    let user = body
        .get("user")
        .filter(|u| !u.is_null())
        .ok_or_else(|| Error::Validation(ValidationError::MissingField("user".to_string())))?;
    let mut report = IngestReport::new();
    let profile = parse_user_profile(user, &mut report).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(
            "user payload is not an object".to_string(),
        ))
    })?;
    report.log_summary("user profile");
    Ok(Parsed::new(profile, report))
}

/// Message for a failed response, taken from the body's `error` field.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// API Client
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a request may run without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Required,
    Skip,
}

/// HTTP client for the backend API.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let session = SessionContext::from_path(config.session_path.as_deref());
/// let client = ApiClient::new(&config, session)?;
/// client.login("+254700000000", "secret").await?;
/// let investments = client.get_investments().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &Config, session: SessionContext) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    async fn get(&self, path: &str, auth: Auth) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[KesfolioApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("Request failed: {}", e)))?;

        self.parse_response(response, auth).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[KesfolioApi] POST {}", url);

        let mut request = self.client.post(&url).headers(Self::headers());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("Request failed: {}", e)))?;

        self.parse_response(response, auth).await
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response(&self, response: reqwest::Response, auth: Auth) -> Result<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Unexpected(format!("Failed to read response: {}", e)))?;

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Required {
            if let Err(e) = self.session.on_logout() {
                warn!("Failed to clear session after 401: {}", e);
            }
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Unexpected(format!(
                "Failed to parse response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign in and open the session.
    pub async fn login(&self, phone: &str, password: &str) -> Result<UserProfile> {
        let body = self
            .post("/auth/login", Some(&LoginRequest { phone, password }), Auth::Skip)
            .await?;
        let profile = profile_from_body(&body)?.value;
        self.session.on_login(&profile)?;
        Ok(profile)
    }

    /// Create an account and open the session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let body = self.post("/auth/register", Some(request), Auth::Skip).await?;
        let profile = profile_from_body(&body)?.value;
        self.session.on_login(&profile)?;
        Ok(profile)
    }

    /// Check whether the cookie session is still valid, refreshing the
    /// stored profile when it is.
    pub async fn verify(&self) -> Result<UserProfile> {
        let body = self.get("/auth/verify", Auth::Skip).await?;
        let profile = profile_from_body(&body)?.value;
        self.session.on_profile_refresh(&profile)?;
        Ok(profile)
    }

    /// Clear the local session, then tell the backend.
    pub async fn logout(&self) -> Result<()> {
        self.session.on_logout()?;
        self.post::<Value>("/auth/logout", None, Auth::Required)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl PortfolioApi for ApiClient {
    async fn get_profile(&self) -> Result<Parsed<UserProfile>> {
        let body = self.get("/auth/verify", Auth::Required).await?;
        let parsed = profile_from_body(&body)?;
        self.session.on_profile_refresh(&parsed.value)?;
        Ok(parsed)
    }

    async fn get_investments(&self) -> Result<Parsed<Vec<Investment>>> {
        let body = self.get("/investments", Auth::Required).await?;
        Ok(investments_from_body(&body))
    }

    async fn get_investment_history(&self) -> Result<Parsed<Vec<LedgerEvent>>> {
        let body = self.get("/investments/history", Auth::Required).await?;
        Ok(history_from_body(&body))
    }

    async fn get_referral_stats(&self) -> Result<Parsed<ReferralSummary>> {
        let body = self.get("/referral/stats", Auth::Required).await?;
        Ok(referral_from_body(&body))
    }
}
