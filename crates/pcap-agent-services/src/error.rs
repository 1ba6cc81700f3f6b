//! Error type for service calls.
//!
//! Only I/O and network boundaries can fail. Malformed statistics are never
//! an error; they are degraded by the normalizer instead.

use std::fmt;
use std::path::PathBuf;

/// Which external service an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Parser,
    Llm,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Parser => write!(f, "parser service"),
            Service::Llm => write!(f, "LLM service"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("cannot read capture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {service} URL {url:?}: {reason}")]
    InvalidUrl {
        service: Service,
        url: String,
        reason: String,
    },

    #[error("{service} request failed: {source}")]
    Http {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} answered HTTP {status}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },

    #[error("{service} returned a body that is not JSON: {source}")]
    MalformedResponse {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    #[error("LLM response contained no message content")]
    EmptyCompletion,
}

impl ServiceError {
    pub(crate) fn http(service: Service) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ServiceError::Http { service, source }
    }
}
