//! Error types for Managed Blockchain service calls

use aws_sdk_managedblockchain::error::{BuildError, ProvideErrorMetadata, SdkError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur while talking to Managed Blockchain or Managed Blockchain Query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The request was malformed or referenced an unsupported value
    #[error("Invalid request (InvalidRequestException): {0}")]
    InvalidRequest(String),

    /// The caller lacks permission for the operation
    #[error("Access denied (AccessDeniedException): {0}")]
    AccessDenied(String),

    /// The referenced network, member, node, proposal or accessor does not exist
    #[error("Resource not found (ResourceNotFoundException): {0}")]
    NotFound(String),

    /// A resource with the same identity already exists
    #[error("Resource already exists (ResourceAlreadyExistsException): {0}")]
    AlreadyExists(String),

    /// The resource exists but is not in a state that accepts the operation
    #[error("Resource not ready (ResourceNotReadyException): {0}")]
    NotReady(String),

    /// Request rate exceeded
    #[error("Throttling limit reached (ThrottlingException): {0}")]
    Throttling(String),

    /// Account or network quota exhausted
    #[error("Resource limit exceeded ({code}): {message}")]
    ResourceLimitExceeded { code: String, message: String },

    /// Tag limit for the resource exceeded
    #[error("Too many tags (TooManyTagsException): {0}")]
    TooManyTags(String),

    /// The action is not permitted for the resource
    #[error("Illegal action (IllegalActionException): {0}")]
    IllegalAction(String),

    /// Internal failure on the service side
    #[error("Internal service error ({code}): {message}")]
    InternalService { code: String, message: String },

    /// Query API parameter validation failure
    #[error("Validation failed (ValidationException): {0}")]
    Validation(String),

    /// Any other service error code
    #[error("Service error ({code}): {message}")]
    Service { code: String, message: String },

    /// Request could not be dispatched or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Operation timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// SDK failure that is not a service response (request construction etc.)
    #[error("AWS SDK error: {0}")]
    Sdk(String),

    /// Arguments rejected locally before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation does not support pagination
    #[error("Operation '{0}' is not pageable")]
    NotPageable(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<ServiceError>,
    },
}

impl ServiceError {
    /// Add context to an error
    pub fn context<S: Into<String>>(self, context: S) -> Self {
        ServiceError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Map a remote error code to the matching variant
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "InvalidRequestException" => ServiceError::InvalidRequest(message),
            "AccessDeniedException" => ServiceError::AccessDenied(message),
            "ResourceNotFoundException" => ServiceError::NotFound(message),
            "ResourceAlreadyExistsException" => ServiceError::AlreadyExists(message),
            "ResourceNotReadyException" => ServiceError::NotReady(message),
            "ThrottlingException" => ServiceError::Throttling(message),
            "ResourceLimitExceededException" | "ServiceQuotaExceededException" => {
                ServiceError::ResourceLimitExceeded {
                    code: code.to_string(),
                    message,
                }
            }
            "TooManyTagsException" => ServiceError::TooManyTags(message),
            "IllegalActionException" => ServiceError::IllegalAction(message),
            "InternalServiceErrorException" | "InternalServerException" => {
                ServiceError::InternalService {
                    code: code.to_string(),
                    message,
                }
            }
            "ValidationException" => ServiceError::Validation(message),
            _ => ServiceError::Service {
                code: code.to_string(),
                message,
            },
        }
    }

    /// Remote error code, when the error came from the service
    pub fn code(&self) -> Option<&str> {
        match self {
            ServiceError::InvalidRequest(_) => Some("InvalidRequestException"),
            ServiceError::AccessDenied(_) => Some("AccessDeniedException"),
            ServiceError::NotFound(_) => Some("ResourceNotFoundException"),
            ServiceError::AlreadyExists(_) => Some("ResourceAlreadyExistsException"),
            ServiceError::NotReady(_) => Some("ResourceNotReadyException"),
            ServiceError::Throttling(_) => Some("ThrottlingException"),
            ServiceError::TooManyTags(_) => Some("TooManyTagsException"),
            ServiceError::IllegalAction(_) => Some("IllegalActionException"),
            ServiceError::Validation(_) => Some("ValidationException"),
            ServiceError::ResourceLimitExceeded { code, .. }
            | ServiceError::InternalService { code, .. }
            | ServiceError::Service { code, .. } => Some(code),
            ServiceError::WithContext { source, .. } => source.code(),
            _ => None,
        }
    }

    /// Check if the resource was reported missing
    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::NotFound(_) => true,
            ServiceError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Network(_)
            | ServiceError::Timeout(_)
            | ServiceError::Throttling(_)
            | ServiceError::InternalService { .. }
            | ServiceError::NotReady(_) => true,
            ServiceError::Sdk(msg) => {
                let lower = msg.to_lowercase();
                lower.contains("connection reset")
                    || lower.contains("connection refused")
                    || lower.contains("timed out")
            }
            ServiceError::WithContext { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Check if error is transient (a transport problem, not a service verdict)
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Network(_) | ServiceError::Timeout(_) | ServiceError::Throttling(_) => {
                true
            }
            ServiceError::WithContext { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// Check if retrying with the same arguments can never succeed
    pub fn is_fatal(&self) -> bool {
        match self {
            ServiceError::AccessDenied(_)
            | ServiceError::InvalidRequest(_)
            | ServiceError::Validation(_)
            | ServiceError::InvalidInput(_)
            | ServiceError::NotPageable(_)
            | ServiceError::IllegalAction(_) => true,
            ServiceError::WithContext { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Convert AWS SDK errors to ServiceError
///
/// Both service SDKs share the smithy runtime, so this covers errors from
/// either client.
impl<E, R> From<SdkError<E, R>> for ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        match error {
            SdkError::TimeoutError(_) => {
                ServiceError::Timeout("request exceeded the operation timeout".to_string())
            }
            SdkError::DispatchFailure(e) => {
                ServiceError::Network(format!("Network dispatch failure: {:?}", e))
            }
            SdkError::ResponseError(e) => {
                ServiceError::Network(format!("Response error: {:?}", e))
            }
            SdkError::ServiceError(e) => {
                let err = e.err();
                let code = err.code().unwrap_or("Unknown").to_string();
                let message = err
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                ServiceError::from_code(&code, message)
            }
            other => ServiceError::Sdk(format!("{:?}", other)),
        }
    }
}

/// Nested request shapes missing a required field
impl From<BuildError> for ServiceError {
    fn from(error: BuildError) -> Self {
        ServiceError::InvalidInput(error.to_string())
    }
}

/// Error payload returned in place of a result, serialized as `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ServiceError> for ErrorBody {
    fn from(err: ServiceError) -> Self {
        ErrorBody::new(err.to_string())
    }
}

/// Log an error and turn it into an [`ErrorBody`]
pub fn handle_errors(err: &ServiceError) -> ErrorBody {
    error!(code = err.code().unwrap_or("-"), "Error: {}", err);
    ErrorBody::new(err.to_string())
}

/// Log a caught error for `operation`
///
/// Service verdicts (not found, invalid request, ...) are warnings; transport
/// and internal failures are errors.
pub(crate) fn report(operation: &str, err: &ServiceError) {
    if err.is_transient() || matches!(err, ServiceError::InternalService { .. }) {
        error!(operation, code = err.code().unwrap_or("-"), "{}", err);
    } else {
        warn!(operation, code = err.code().unwrap_or("-"), "{}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_managedblockchain::operation::get_network::GetNetworkError;

    #[test]
    fn test_from_code_classification() {
        assert!(matches!(
            ServiceError::from_code("InvalidRequestException", "bad"),
            ServiceError::InvalidRequest(_)
        ));
        assert!(matches!(
            ServiceError::from_code("AccessDeniedException", "no"),
            ServiceError::AccessDenied(_)
        ));
        assert!(matches!(
            ServiceError::from_code("ResourceNotFoundException", "gone"),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            ServiceError::from_code("ResourceAlreadyExistsException", "dup"),
            ServiceError::AlreadyExists(_)
        ));
        assert!(matches!(
            ServiceError::from_code("ResourceNotReadyException", "wait"),
            ServiceError::NotReady(_)
        ));
        assert!(matches!(
            ServiceError::from_code("ThrottlingException", "slow"),
            ServiceError::Throttling(_)
        ));
        assert!(matches!(
            ServiceError::from_code("TooManyTagsException", "tags"),
            ServiceError::TooManyTags(_)
        ));
        assert!(matches!(
            ServiceError::from_code("ValidationException", "invalid"),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from_code("Teapot", "short and stout"),
            ServiceError::Service { .. }
        ));
    }

    #[test]
    fn test_quota_and_internal_codes_are_kept() {
        let err = ServiceError::from_code("ServiceQuotaExceededException", "quota");
        assert_eq!(err.code(), Some("ServiceQuotaExceededException"));

        let err = ServiceError::from_code("InternalServerException", "boom");
        assert_eq!(err.code(), Some("InternalServerException"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_display_contains_code() {
        let err = ServiceError::from_code("ValidationException", "Invalid request");
        assert_eq!(
            err.to_string(),
            "Validation failed (ValidationException): Invalid request"
        );

        let err = ServiceError::from_code("ResourceNotFoundException", "Member not found");
        assert!(err.to_string().contains("ResourceNotFoundException"));
    }

    #[test]
    fn test_retryable_and_fatal() {
        assert!(ServiceError::Throttling("x".to_string()).is_retryable());
        assert!(ServiceError::Network("x".to_string()).is_transient());
        assert!(!ServiceError::AccessDenied("x".to_string()).is_retryable());
        assert!(ServiceError::AccessDenied("x".to_string()).is_fatal());
        assert!(!ServiceError::NotFound("x".to_string()).is_fatal());
        assert!(ServiceError::Sdk("Connection reset by peer".to_string()).is_retryable());
    }

    #[test]
    fn test_context_unwraps() {
        let err = ServiceError::NotFound("n-1".to_string()).context("get_network");
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("ResourceNotFoundException"));
        assert!(err.to_string().starts_with("get_network: "));
    }

    #[test]
    fn test_sdk_timeout_maps_to_timeout() {
        let sdk_err: SdkError<GetNetworkError, ()> = SdkError::timeout_error("deadline");
        let err: ServiceError = sdk_err.into();
        assert!(matches!(err, ServiceError::Timeout(_)));
    }

    #[test]
    fn test_sdk_construction_failure_maps_to_sdk() {
        let sdk_err: SdkError<GetNetworkError, ()> = SdkError::construction_failure("no region");
        let err: ServiceError = sdk_err.into();
        assert!(matches!(err, ServiceError::Sdk(_)));
    }

    #[test]
    fn test_error_body_shape() {
        let body = handle_errors(&ServiceError::from_code("ValidationException", "Invalid request"));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("ValidationException"));
    }
}
