use super::failover::FailoverStrategy;
use super::parallel::ParallelStrategy;
use crate::dns::transport::QueryExchanger;
use ferrous_resolv_domain::{DnsMessage, DnsQueryOptions, ResolveError, ServerEndpoint};
use std::sync::Arc;

/// Per-resolution inputs shared by every attempt.
pub struct QueryContext<'a> {
    pub query: &'a DnsMessage,
    pub query_bytes: &'a [u8],
    pub options: &'a DnsQueryOptions,
    pub exchanger: &'a dyn QueryExchanger,
}

pub enum Strategy {
    Failover(FailoverStrategy),
    Parallel(ParallelStrategy),
}

impl Strategy {
    pub fn for_options(options: &DnsQueryOptions) -> Self {
        if options.parallel_queries {
            Self::Parallel(ParallelStrategy::new())
        } else {
            Self::Failover(FailoverStrategy::new())
        }
    }

    pub async fn query(
        &self,
        ctx: &QueryContext<'_>,
        endpoints: &[ServerEndpoint],
    ) -> Result<DnsMessage, ResolveError> {
        match self {
            Self::Failover(s) => s.query(ctx, endpoints).await,
            Self::Parallel(s) => s.query(ctx, endpoints).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Failover(_) => "failover",
            Self::Parallel(_) => "parallel",
        }
    }
}

/// Turns one query into the attempts needed to get an accepted response.
pub struct AttemptScheduler {
    exchanger: Arc<dyn QueryExchanger>,
}

impl AttemptScheduler {
    pub fn new(exchanger: Arc<dyn QueryExchanger>) -> Self {
        Self { exchanger }
    }

    /// `query_bytes` is the wire form of `query`. `endpoints` must be
    /// non-empty and `options.tries` at least 1; the resolver facade checks
    /// both.
    pub async fn run(
        &self,
        query: &DnsMessage,
        query_bytes: &[u8],
        endpoints: &[ServerEndpoint],
        options: &DnsQueryOptions,
    ) -> Result<DnsMessage, ResolveError> {
        let ctx = QueryContext {
            query,
            query_bytes,
            options,
            exchanger: self.exchanger.as_ref(),
        };

        Strategy::for_options(options).query(&ctx, endpoints).await
    }
}
