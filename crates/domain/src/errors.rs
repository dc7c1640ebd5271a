use std::fmt;
use thiserror::Error;

use crate::server_endpoint::ServerEndpoint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid server endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Unknown record type: {0}")]
    InvalidRecordType(String),

    #[error("Unknown record class: {0}")]
    InvalidRecordClass(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure of a single network exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Timeout waiting for {server}")]
    TimedOut { server: String },

    #[error("Network error talking to {server}: {detail}")]
    Network { server: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    IdMismatch,
    NotAResponse,
    QuestionMismatch,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::IdMismatch => "transaction id mismatch",
            RejectReason::NotAResponse => "QR flag not set",
            RejectReason::QuestionMismatch => "question section mismatch",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one try against one server did not produce an answer.
///
/// These never reach the caller on their own: the scheduler records them and
/// moves on, and they only surface aggregated inside [`ResolveError::NoResponse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    #[error("timed out")]
    TimedOut,

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("rejected reply: {0}")]
    Rejected(RejectReason),
}

impl From<TransportError> for AttemptFailure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::TimedOut { .. } => AttemptFailure::TimedOut,
            TransportError::Network { detail, .. } => AttemptFailure::Network(detail),
        }
    }
}

/// Last failure observed for a server once all of its tries were spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub endpoint: ServerEndpoint,
    pub tries: usize,
    pub last_error: AttemptFailure,
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} tries): {}",
            self.endpoint, self.tries, self.last_error
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No usable response from {} server(s): {}", failures.len(), format_failures(failures))]
    NoResponse { failures: Vec<CandidateFailure> },

    #[error("Resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }

    pub fn failures(&self) -> &[CandidateFailure] {
        match self {
            ResolveError::NoResponse { failures } => failures,
            _ => &[],
        }
    }
}

fn format_failures(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
