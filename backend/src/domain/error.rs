//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Authentication failed or is missing.
    Unauthorized,
    /// The request carries a missing field, an invalid reference, or a value
    /// the store rejects.
    UnprocessableEntity,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// Constructors capture the ambient [`TraceId`] when one is in scope, so the
/// serialized payload correlates with the request's log lines without the
/// call site threading identifiers around.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such campaign");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Intended for constructors with literal messages; prefer
    /// [`Error::try_new`] for runtime-sourced text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace identifier captured when the error was built, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the captured trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::unprocessable("bad").with_details(json!({ "field": "email" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::UnprocessableEntity`].
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
            trace_id: value.trace_id,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
            trace_id,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.details = details;
        // Deserialized payloads keep their wire identifier; the ambient
        // scope must not overwrite what the peer recorded.
        error.trace_id = trace_id;
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::unauthorized(Error::unauthorized("no token"), ErrorCode::Unauthorized)]
    #[case::unprocessable(Error::unprocessable("bad input"), ErrorCode::UnprocessableEntity)]
    #[case::not_found(Error::not_found("gone"), ErrorCode::NotFound)]
    #[case::internal(Error::internal("boom"), ErrorCode::InternalError)]
    fn convenience_constructors_set_codes(#[case] err: Error, #[case] expected: ErrorCode) {
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn try_new_rejects_blank_messages(#[case] message: &str) {
        let result = Error::try_new(ErrorCode::InternalError, message);
        assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
    }

    #[rstest]
    fn details_round_trip_through_serde() {
        let err = Error::unprocessable("duplicate signup")
            .with_details(json!({ "errors": ["email already registered"] }));

        let encoded = serde_json::to_string(&err).expect("error serialises");
        let decoded: Error = serde_json::from_str(&encoded).expect("error deserialises");

        assert_eq!(decoded, err);
    }

    #[rstest]
    fn error_codes_serialise_as_snake_case() {
        let encoded =
            serde_json::to_value(ErrorCode::UnprocessableEntity).expect("code serialises");
        assert_eq!(encoded, json!("unprocessable_entity"));
    }

    #[rstest]
    fn display_exposes_the_message() {
        let err = Error::not_found("no such contact");
        assert_eq!(err.to_string(), "no such contact");
    }

    #[rstest]
    fn trace_id_is_none_outside_any_scope() {
        let err = Error::internal("boom");
        assert!(err.trace_id().is_none());
    }

    #[tokio::test]
    async fn constructors_capture_the_scoped_trace_id() {
        let trace_id = TraceId::generate();
        let err = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
        assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[tokio::test]
    async fn deserialisation_keeps_the_wire_trace_id() {
        let encoded = serde_json::to_string(&Error::unprocessable("bad input"))
            .expect("error serialises");

        let ambient = TraceId::generate();
        let decoded: Error = TraceId::scope(ambient, async move {
            serde_json::from_str(&encoded).expect("error deserialises")
        })
        .await;

        // The wire payload had no identifier, so the ambient scope must not
        // smuggle one in.
        assert!(decoded.trace_id().is_none());
    }
}
