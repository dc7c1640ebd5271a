//! ferrous-resolv domain layer: DNS message model, wire codec, query
//! options, server endpoints, errors and configuration.
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod message;
pub mod query_options;
pub mod server_endpoint;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{RecordClass, RecordData, RecordType, ResourceRecord};
pub use domain_name::DomainName;
pub use errors::{
    AttemptFailure, CandidateFailure, DomainError, RejectReason, ResolveError, TransportError,
};
pub use message::{
    DnsMessage, Edns, Header, OpCode, Question, ResponseCode,
    CLASSIC_UDP_PAYLOAD_SIZE, DEFAULT_EDNS_PAYLOAD_SIZE,
};
pub use query_options::DnsQueryOptions;
pub use server_endpoint::{ServerEndpoint, DEFAULT_DNS_PORT};
