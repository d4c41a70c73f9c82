//! Domain-level error type.
//!
//! Errors are transport agnostic: inbound adapters map [`ErrorCode`] to a
//! status code and serialise the payload. The current [`TraceId`] is captured
//! at construction so every failure can be correlated with request logs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed, fails validation or carries an empty upload.
    InvalidRequest,
    /// Credentials were rejected or no authenticated session exists.
    Unauthorized,
    /// Authenticated, but the role does not grant access.
    Forbidden,
    /// The requested record does not exist.
    NotFound,
    /// The write collides with existing state (duplicate email).
    Conflict,
    /// The upload exceeds the configured size limit.
    PayloadTooLarge,
    /// The upload does not declare an image content type.
    UnsupportedMediaType,
    /// A backing service (database, session store) is unavailable.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

/// Error payload shared by domain services and HTTP handlers.
///
/// Serialised as `{"code": "...", "erro": "...", "traceId": "...", "details": {...}}`.
///
/// # Examples
/// ```
/// use agencia::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("pacote 7 não encontrado");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[serde(rename = "erro")]
    #[schema(example = "Credenciais inválidas")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details, typically `{"field": ..., "code": ...}`.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedMediaType, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_message_under_erro() {
        let err = Error::unauthorized("Credenciais inválidas");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(
            value,
            json!({ "code": "unauthorized", "erro": "Credenciais inválidas" })
        );
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[test]
    fn details_round_trip_through_json() {
        let err = Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" }));
        let text = serde_json::to_string(&err).expect("serialise");
        let back: Error = serde_json::from_str(&text).expect("deserialise");
        assert_eq!(back, err);
    }
}
