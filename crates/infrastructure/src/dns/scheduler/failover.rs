use super::candidate::query_candidate;
use super::strategy::QueryContext;
use ferrous_resolv_domain::{DnsMessage, ResolveError, ServerEndpoint};
use tracing::{debug, warn};

/// Tries candidates one at a time, in configured order.
pub struct FailoverStrategy;

impl FailoverStrategy {
    pub fn new() -> Self {
        Self
    }

    pub async fn query(
        &self,
        ctx: &QueryContext<'_>,
        endpoints: &[ServerEndpoint],
    ) -> Result<DnsMessage, ResolveError> {
        debug!(strategy = "failover", servers = endpoints.len(), "Trying sequentially");

        let mut failures = Vec::with_capacity(endpoints.len());
        for (index, endpoint) in endpoints.iter().enumerate() {
            match query_candidate(ctx, *endpoint).await {
                Ok(response) => {
                    debug!(server = %endpoint, position = index, "Server responded");
                    return Ok(response);
                }
                Err(failure) => {
                    warn!(
                        server = %endpoint,
                        tries = failure.tries,
                        error = %failure.last_error,
                        position = index,
                        "Failing over"
                    );
                    failures.push(failure);
                }
            }
        }
        Err(ResolveError::NoResponse { failures })
    }
}

impl Default for FailoverStrategy {
    fn default() -> Self {
        Self::new()
    }
}
