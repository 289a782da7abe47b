// Hand-crafted async HTTP client for the persona directory REST endpoint.
//
// Base path: /api/persona
// Auth: none (the service sits on a trusted network)

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::Persona;

/// Fallback message for non-2xx responses with an empty body.
const UNKNOWN_ERROR: &str = "Error desconocido";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the persona directory API.
///
/// Communicates via JSON REST endpoints under the configured base path
/// (`/api/persona` in the default deployment).
#[derive(Debug, Clone)]
pub struct PersonaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PersonaClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and ensure a trailing slash, so joining an id
    /// resolves under the collection instead of replacing its last path
    /// segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join a relative path (an id, or `""` for the collection) onto
    /// the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Public API ───────────────────────────────────────────────────

    /// Fetch every persona in the directory.
    pub async fn list(&self) -> Result<Vec<Persona>, Error> {
        let url = self.url("")?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// Create a persona; the server assigns the id.
    pub async fn create(&self, draft: &Persona) -> Result<Persona, Error> {
        let url = self.url("")?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(draft).send().await?;
        Self::handle_response(resp).await
    }

    /// Replace the persona stored under `id`, returning the server's copy.
    pub async fn update(&self, id: &str, persona: &Persona) -> Result<Persona, Error> {
        let url = self.url(id)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(persona).send().await?;
        Self::handle_response(resp).await
    }

    /// Delete the persona stored under `id`. The response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let url = self.url(id)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Map a non-2xx response to [`Error::Api`].
    ///
    /// The message comes from the body's `message` field when the body
    /// parses as JSON, else the raw body; an empty body falls back to
    /// a fixed unknown-error message.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            err.message.unwrap_or_else(|| status.to_string())
        } else if raw.is_empty() {
            UNKNOWN_ERROR.to_owned()
        } else {
            raw
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
