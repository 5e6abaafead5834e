use std::fmt;

/// A single error entry reported by the CIF backend inside a SOAP fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CifError {
    /// The `ErrorNumber` of the entry.
    pub code: Option<i64>,
    /// The `Description` of the entry.
    pub description: Option<String>,
    /// The `ErrorMsg` of the entry.
    pub message: Option<String>,
}

impl fmt::Display for CifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .message
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("unknown error");
        match self.code {
            Some(code) => write!(f, "[{code}] {text}"),
            None => f.write_str(text),
        }
    }
}

fn join_cif_errors(errors: &[CifError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for the postnl-rs crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PostNLError {
    /// The HTTP transport failed (connection, timeout, TLS) before a response was received.
    #[error("HTTP transport failure: {message}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::Transport))]
    Transport {
        /// Description of the failure.
        message: String,
        /// The underlying client error, if the failure came from reqwest.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body could not be parsed or had an unexpected shape.
    #[error("Invalid API response: {message}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::Response))]
    Response {
        /// Description of the problem.
        message: String,
        /// HTTP status code of the offending response, if known.
        status: Option<u16>,
    },

    /// The wrapper key of the expected entity is absent from the decoded body.
    #[error("Entity `{0}` not found in the response")]
    #[diagnostic(code(postnl_rs::error::PostNLError::EntityNotFound))]
    EntityNotFound(String),

    /// Serialization was attempted without a service context the entity is declared for.
    #[error("No service context set for `{0}`")]
    #[diagnostic(code(postnl_rs::error::PostNLError::ServiceContextMissing))]
    ServiceContextMissing(String),

    /// The CIF backend reported that it is unavailable.
    #[error("The CIF backend is unavailable: {0}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::CifDown))]
    CifDown(String),

    /// The CIF backend rejected the request.
    #[error("CIF error: {}", join_cif_errors(.0))]
    #[diagnostic(code(postnl_rs::error::PostNLError::Cif))]
    Cif(Vec<CifError>),

    /// A malformed input value, e.g. an unparsable date.
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::InvalidArgument))]
    InvalidArgument(String),

    /// The API holds no data for the request.
    #[error("Not found: {0}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::NotFound))]
    NotFound(String),

    /// The barcode type, range or serie could not be resolved.
    #[error("Invalid barcode request: {0}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::InvalidBarcode))]
    InvalidBarcode(String),

    /// The cache collaborator failed.
    #[error("Cache failure: {0}")]
    #[diagnostic(code(postnl_rs::error::PostNLError::Cache))]
    Cache(String),

    /// JSON (de)serialization error.
    #[error(transparent)]
    #[diagnostic(code(postnl_rs::error::PostNLError::Json))]
    Json(#[from] serde_json::Error),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(postnl_rs::error::PostNLError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),
}

impl PostNLError {
    /// Creates a `Response` error without a status code.
    pub fn response(message: impl Into<String>) -> Self {
        PostNLError::Response {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a `Transport` error that did not originate from reqwest.
    pub fn transport(message: impl Into<String>) -> Self {
        PostNLError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Returns whether this error means the body did not have the expected shape.
    pub(crate) fn is_decode_failure(&self) -> bool {
        matches!(self, PostNLError::EntityNotFound(_) | PostNLError::Json(_))
    }
}

impl From<reqwest::Error> for PostNLError {
    fn from(error: reqwest::Error) -> Self {
        PostNLError::Transport {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cif_errors_are_listed_in_the_message() {
        let error = PostNLError::Cif(vec![
            CifError {
                code: Some(13),
                description: None,
                message: Some("Check failed".to_string()),
            },
            CifError {
                code: None,
                description: Some("Invalid zipcode".to_string()),
                message: None,
            },
        ]);

        assert_eq!(
            error.to_string(),
            "CIF error: [13] Check failed; Invalid zipcode"
        );
    }
}
