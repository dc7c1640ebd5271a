use super::candidate::query_candidate;
use super::strategy::QueryContext;
use ferrous_resolv_domain::{DnsMessage, ResolveError, ServerEndpoint};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tracing::debug;

/// Races every candidate; the first accepted response wins.
///
/// The candidate futures live in a local `FuturesUnordered`, so returning
/// drops the losers together with their sockets.
pub struct ParallelStrategy;

impl ParallelStrategy {
    pub fn new() -> Self {
        Self
    }

    pub async fn query(
        &self,
        ctx: &QueryContext<'_>,
        endpoints: &[ServerEndpoint],
    ) -> Result<DnsMessage, ResolveError> {
        debug!(strategy = "parallel", servers = endpoints.len(), "Racing all servers");

        let mut futs: FuturesUnordered<_> = endpoints
            .iter()
            .enumerate()
            .map(|(index, endpoint)| async move {
                (index, query_candidate(ctx, *endpoint).await)
            })
            .collect();

        let mut failures = Vec::with_capacity(endpoints.len());
        while let Some((index, result)) = futs.next().await {
            match result {
                Ok(response) => {
                    debug!(server = %endpoints[index], position = index, "Fastest response");
                    return Ok(response);
                }
                Err(failure) => {
                    debug!(server = %failure.endpoint, error = %failure.last_error, "Server failed");
                    failures.push((index, failure));
                }
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        Err(ResolveError::NoResponse {
            failures: failures.into_iter().map(|(_, f)| f).collect(),
        })
    }
}

impl Default for ParallelStrategy {
    fn default() -> Self {
        Self::new()
    }
}
