use thiserror::Error;

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "breakdown.0.tax_amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while constructing, encoding, or submitting VERI*FACTU records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifactuError {
    /// A record violated an invariant. Raised locally; never surfaces to the wire.
    #[error("invalid model: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidModel(Vec<ValidationError>),

    /// The XML response could not be decoded (malformed XML, missing required
    /// element, unparseable date).
    #[error("parse error: {0}")]
    ParseError(String),

    /// The server returned a SOAP fault, or a payload lacking the expected root element.
    #[error("AEAT server error: {0}")]
    AeatServerError(String),

    /// An HTTP, TLS, or timeout failure.
    #[error("transport error: {0}")]
    TransportError(String),

    /// The supplied mTLS credential could not be read, decrypted, or converted.
    #[error("certificate error: {0}")]
    CertificateError(String),
}

impl VerifactuError {
    /// Build an `InvalidModel` error carrying a single field error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel(vec![ValidationError::new(field, message)])
    }
}
