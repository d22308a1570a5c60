//! Reqwest-backed content server client.
//!
//! This adapter owns transport details only: ticket handling, JSON request
//! bodies, status and timeout mapping, and result-key extraction.

use async_trait::async_trait;
use document_data::DocumentRecord;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span};
use url::Url;

use super::config::{AUTH_PATH, ContentServerConfig};
use super::credentials::{AuthTicket, Credentials};
use super::dto::AuthResponseDto;
use super::error::ContentServerError;
use crate::domain::ports::{DocumentCreationError, DocumentSubmitter};

/// Header carrying the session ticket on authenticated requests.
pub const TICKET_HEADER: &str = "OTCSTICKET";

const REDACTED_BODY: &str = "<redacted>";

/// Content server adapter performing JSON requests against one host.
#[derive(Debug)]
pub struct ContentServerClient {
    http: Client,
    config: ContentServerConfig,
    ticket: Option<AuthTicket>,
}

impl ContentServerClient {
    /// Build a client using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when the reqwest
    /// client cannot be constructed.
    pub fn new(config: ContentServerConfig) -> Result<Self, ContentServerError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|error| {
                ContentServerError::invalid_configuration(format!(
                    "failed to build HTTP client: {error}"
                ))
            })?;
        Ok(Self {
            http,
            config,
            ticket: None,
        })
    }

    /// Return the connection settings.
    #[must_use]
    pub const fn config(&self) -> &ContentServerConfig {
        &self.config
    }

    /// Return whether a session ticket is held.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.ticket.is_some()
    }

    /// Exchange credentials for a session ticket and attach it to every
    /// later request.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::Authentication`] when the server refuses
    /// the credentials or answers without a ticket, and a transport error
    /// when no response arrives.
    pub async fn authorize(&mut self, credentials: &Credentials) -> Result<(), ContentServerError> {
        let span = info_span!(
            "content_server.authorize",
            hostname = %self.config.hostname(),
            username = %credentials.username(),
        );
        self.authorize_in_span(credentials).instrument(span).await
    }

    async fn authorize_in_span(
        &mut self,
        credentials: &Credentials,
    ) -> Result<(), ContentServerError> {
        let url = self.config.url_for(AUTH_PATH)?;
        let response = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("username", credentials.username()),
                ("password", credentials.password()),
            ])
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| map_transport_error(&err))?;
        log_response(&Method::POST, &url, status, REDACTED_BODY);
        if !status.is_success() {
            return Err(ContentServerError::authentication(status_message(
                status,
                body.as_ref(),
            )));
        }

        let decoded: AuthResponseDto = serde_json::from_slice(body.as_ref()).map_err(|err| {
            ContentServerError::authentication(format!("malformed auth response: {err}"))
        })?;
        let issued = decoded
            .into_ticket()
            .ok_or_else(|| ContentServerError::authentication("auth response carried no ticket"))?;

        let ticket = AuthTicket::new(self.config.hostname(), issued);
        info!(hostname = %ticket.hostname(), "content server session authorised");
        self.ticket = Some(ticket);
        Ok(())
    }

    /// Issue a GET and return `response[results_key]`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::HttpStatus`] for non-success statuses,
    /// [`ContentServerError::MissingResult`] when the key is absent or null,
    /// and transport or decode errors otherwise.
    pub async fn get(&self, path: &str, results_key: &str) -> Result<Value, ContentServerError> {
        let payload = self.execute::<Value>(Method::GET, path, None).await?;
        extract_result(payload, results_key)
    }

    /// Issue a PUT with a JSON body and return `response[results_key]`.
    ///
    /// # Errors
    ///
    /// See [`ContentServerClient::get`].
    pub async fn put<B>(
        &self,
        path: &str,
        body: &B,
        results_key: &str,
    ) -> Result<Value, ContentServerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let payload = self.execute(Method::PUT, path, Some(body)).await?;
        extract_result(payload, results_key)
    }

    /// Issue a POST with a JSON body and return `response[results_key]`.
    ///
    /// # Errors
    ///
    /// See [`ContentServerClient::get`].
    pub async fn post<B>(
        &self,
        path: &str,
        body: &B,
        results_key: &str,
    ) -> Result<Value, ContentServerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let payload = self.execute(Method::POST, path, Some(body)).await?;
        extract_result(payload, results_key)
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ContentServerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.config.url_for(path)?;
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(ticket) = &self.ticket {
            request = request.header(TICKET_HEADER, ticket.value());
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|err| map_transport_error(&err))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| map_transport_error(&err))?;
        log_response(&method, &url, status, &body_preview(bytes.as_ref()));
        if !status.is_success() {
            return Err(ContentServerError::http_status(
                status.as_u16(),
                status_message(status, bytes.as_ref()),
            ));
        }

        serde_json::from_slice(bytes.as_ref()).map_err(|err| {
            ContentServerError::decode(format!("invalid JSON payload: {err}"))
        })
    }
}

#[async_trait]
impl DocumentSubmitter for ContentServerClient {
    async fn create_document(
        &self,
        record: &DocumentRecord,
    ) -> Result<String, DocumentCreationError> {
        let value = self
            .post(
                self.config.creation_path(),
                record,
                self.config.creation_results_key(),
            )
            .await
            .map_err(|err| map_creation_error(&err))?;
        document_id_from(value)
    }
}

fn extract_result(mut payload: Value, results_key: &str) -> Result<Value, ContentServerError> {
    match payload.get_mut(results_key).map(Value::take) {
        None | Some(Value::Null) => {
            error!(results_key, "no {results_key} returned");
            Err(ContentServerError::missing_result(results_key))
        }
        Some(value) => Ok(value),
    }
}

fn document_id_from(value: Value) -> Result<String, DocumentCreationError> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Ok(id),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        other => Err(DocumentCreationError::missing_identifier(format!(
            "unusable identifier {other}"
        ))),
    }
}

fn map_creation_error(error: &ContentServerError) -> DocumentCreationError {
    let message = error.to_string();
    match error {
        ContentServerError::MissingResult { .. } => {
            DocumentCreationError::missing_identifier(message)
        }
        ContentServerError::Transport { .. } | ContentServerError::Timeout { .. } => {
            DocumentCreationError::unreachable(message)
        }
        ContentServerError::Authentication { .. }
        | ContentServerError::HttpStatus { .. }
        | ContentServerError::Decode { .. }
        | ContentServerError::InvalidConfiguration { .. } => {
            DocumentCreationError::rejected(message)
        }
    }
}

fn map_transport_error(error: &reqwest::Error) -> ContentServerError {
    if error.is_timeout() {
        ContentServerError::timeout(error.to_string())
    } else {
        ContentServerError::transport(error.to_string())
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| format!("status {}", status.as_u16()), str::to_owned)
    } else {
        preview
    }
}

fn log_response(method: &Method, url: &Url, status: StatusCode, preview: &str) {
    debug!(
        method = %method,
        url = %url,
        status = status.as_u16(),
        body = preview,
        "content server response"
    );
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
