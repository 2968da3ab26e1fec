//! Error types shared by the REST gateway implementation.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`RestGatewayError`] failures.
pub type RestResult<T> = Result<T, RestGatewayError>;

/// Failures that can occur while talking to the hosted table gateway.
#[derive(Debug, Error)]
pub enum RestGatewayError {
    /// Required environment variable is missing.
    #[error("missing gateway environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build gateway client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request to a table endpoint could not be sent.
    #[error("failed to send gateway request to `{table}`")]
    RequestSend {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The gateway returned an unexpected status code for a table endpoint.
    #[error("unexpected gateway response status {status} for `{table}`")]
    RequestStatus {
        table: &'static str,
        status: StatusCode,
    },
    /// Response payload could not be parsed into the expected rows.
    #[error("failed to decode gateway response for `{table}`")]
    DecodeResponse {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
