//! Decides whether a raw reply answers the query that was sent.

use super::wire_codec::WireCodec;
use crate::dns::transport::TransportKind;
use ferrous_resolv_domain::{DnsMessage, RejectReason, ServerEndpoint};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted(DnsMessage),
    Rejected(RejectReason),
    /// TC set on a UDP reply; retry the candidate over TCP.
    Truncated,
    Malformed(String),
}

pub struct ResponseValidator;

impl ResponseValidator {
    /// Checks, in order: decodes, ID matches, QR set, truncation (UDP only),
    /// question echoed. Any RCODE is accepted once those pass.
    ///
    /// A UDP reply cut short mid-record still counts as truncated when its
    /// header alone carries our ID with QR and TC set.
    pub fn validate(
        query: &DnsMessage,
        endpoint: ServerEndpoint,
        transport: TransportKind,
        raw: &[u8],
    ) -> Validation {
        let response = match WireCodec::decode(raw) {
            Ok(msg) => msg,
            Err(e) => {
                if transport == TransportKind::Udp && Self::is_cut_truncated(query, raw) {
                    debug!(server = %endpoint, error = %e, "Truncated UDP response cut mid-record");
                    return Validation::Truncated;
                }
                debug!(server = %endpoint, transport = %transport, error = %e, "Malformed response");
                return Validation::Malformed(e.to_string());
            }
        };

        if response.id() != query.id() {
            return Self::reject(endpoint, RejectReason::IdMismatch);
        }
        if !response.is_response() {
            return Self::reject(endpoint, RejectReason::NotAResponse);
        }
        if response.is_truncated() && transport == TransportKind::Udp {
            debug!(server = %endpoint, "Truncated UDP response");
            return Validation::Truncated;
        }
        if response.questions() != query.questions() {
            return Self::reject(endpoint, RejectReason::QuestionMismatch);
        }

        Validation::Accepted(response)
    }

    fn is_cut_truncated(query: &DnsMessage, raw: &[u8]) -> bool {
        match WireCodec::decode_header(raw) {
            Ok(header) => header.id == query.id() && header.is_response && header.truncated,
            Err(_) => false,
        }
    }

    fn reject(endpoint: ServerEndpoint, reason: RejectReason) -> Validation {
        debug!(server = %endpoint, reason = %reason, "Rejected response");
        Validation::Rejected(reason)
    }
}
