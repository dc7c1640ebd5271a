use super::strategy::QueryContext;
use crate::dns::forwarding::{ResponseValidator, Validation};
use crate::dns::transport::{ExchangeRequest, TransportKind};
use ferrous_resolv_domain::{AttemptFailure, CandidateFailure, DnsMessage, ServerEndpoint};
use tracing::debug;

/// Runs the tries for one candidate, strictly one after another.
///
/// A truncated UDP reply moves the candidate to TCP for the rest of its
/// tries. When the truncated reply used the last try, one extra TCP try is
/// granted so truncation is always followed by a stream retry.
pub async fn query_candidate(
    ctx: &QueryContext<'_>,
    endpoint: ServerEndpoint,
) -> Result<DnsMessage, CandidateFailure> {
    let udp_payload = ctx.query.max_udp_payload();
    let mut use_stream = ctx.options.tcp_only || ctx.query_bytes.len() > udp_payload;
    let mut budget = ctx.options.tries;
    let mut tries = 0;
    let mut last_error = AttemptFailure::TimedOut;

    // A stray or spoofed datagram must not use up the try; only replies
    // that answer the query end a UDP read.
    let answers_query = |raw: &[u8]| {
        matches!(
            ResponseValidator::validate(ctx.query, endpoint, TransportKind::Udp, raw),
            Validation::Accepted(_) | Validation::Truncated
        )
    };

    while tries < budget {
        tries += 1;
        let kind = if use_stream {
            TransportKind::Stream
        } else {
            TransportKind::Udp
        };

        let request = ExchangeRequest {
            endpoint,
            kind,
            query: ctx.query_bytes,
            udp_payload,
            timeout: ctx.options.query_timeout,
            accept: Some(&answers_query),
        };

        let raw = match ctx.exchanger.exchange(request).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(server = %endpoint, transport = %kind, attempt = tries, error = %e, "Attempt failed");
                last_error = e.into();
                continue;
            }
        };

        match ResponseValidator::validate(ctx.query, endpoint, kind, &raw) {
            Validation::Accepted(response) => {
                debug!(
                    server = %endpoint,
                    transport = %kind,
                    attempt = tries,
                    rcode = %response.response_code(),
                    "Response accepted"
                );
                return Ok(response);
            }
            Validation::Truncated => {
                use_stream = true;
                if tries == budget {
                    budget += 1;
                }
            }
            Validation::Rejected(reason) => last_error = AttemptFailure::Rejected(reason),
            Validation::Malformed(detail) => last_error = AttemptFailure::Malformed(detail),
        }
    }

    Err(CandidateFailure {
        endpoint,
        tries,
        last_error,
    })
}
