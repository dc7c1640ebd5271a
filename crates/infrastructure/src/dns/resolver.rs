use crate::dns::forwarding::{MessageBuilder, WireCodec};
use crate::dns::scheduler::AttemptScheduler;
use crate::dns::transport::{NetworkExchanger, QueryExchanger};
use async_trait::async_trait;
use ferrous_resolv_application::ports::DnsResolver;
use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainError, DomainName, RecordClass, RecordType, ResolveError,
    ServerEndpoint,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Stub resolver over a fixed list of name servers.
pub struct DnsClient {
    endpoints: Vec<ServerEndpoint>,
    builder: MessageBuilder,
    scheduler: AttemptScheduler,
}

impl DnsClient {
    pub fn new(endpoints: Vec<ServerEndpoint>) -> Self {
        Self::with_exchanger(endpoints, Arc::new(NetworkExchanger::new()))
    }

    /// Client whose attempts go through `exchanger` instead of the network.
    pub fn with_exchanger(
        endpoints: Vec<ServerEndpoint>,
        exchanger: Arc<dyn QueryExchanger>,
    ) -> Self {
        info!(servers = endpoints.len(), "DNS client created");
        Self {
            endpoints,
            builder: MessageBuilder::new(),
            scheduler: AttemptScheduler::new(exchanger),
        }
    }

    pub fn endpoints(&self) -> &[ServerEndpoint] {
        &self.endpoints
    }

    /// `A`/`IN` lookup with default options and no external cancellation.
    pub async fn resolve_default(&self, name: &DomainName) -> Result<DnsMessage, ResolveError> {
        self.resolve(
            name,
            RecordType::A,
            RecordClass::IN,
            &DnsQueryOptions::default(),
            &CancellationToken::new(),
        )
        .await
    }

    pub async fn resolve_str(
        &self,
        name: &str,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
        cancel: &CancellationToken,
    ) -> Result<DnsMessage, ResolveError> {
        let name: DomainName = name
            .parse()
            .map_err(|e: DomainError| ResolveError::InvalidArgument(e.to_string()))?;
        self.resolve(&name, record_type, record_class, options, cancel)
            .await
    }

    fn check_arguments(&self, options: &DnsQueryOptions) -> Result<(), ResolveError> {
        if self.endpoints.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "no name servers configured".into(),
            ));
        }
        if options.tries == 0 {
            return Err(ResolveError::InvalidArgument(
                "tries must be at least 1".into(),
            ));
        }
        if options.query_timeout.is_zero() {
            return Err(ResolveError::InvalidArgument(
                "query timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DnsResolver for DnsClient {
    async fn resolve(
        &self,
        name: &DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
        cancel: &CancellationToken,
    ) -> Result<DnsMessage, ResolveError> {
        self.check_arguments(options)?;

        let query = self
            .builder
            .build_query(name, record_type, record_class, options);
        // Built from the arguments alone, so a failure here is the caller's.
        let query_bytes = WireCodec::encode(&query).map_err(|e| {
            ResolveError::InvalidArgument(format!("query cannot be encoded: {}", e))
        })?;

        debug!(
            domain = %name,
            record_type = %record_type,
            record_class = %record_class,
            id = query.id(),
            tcp_only = options.tcp_only,
            parallel = options.parallel_queries,
            "Resolving"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(domain = %name, "Resolution cancelled");
                Err(ResolveError::Cancelled)
            }
            result = self.scheduler.run(&query, &query_bytes, &self.endpoints, options) => result,
        }
    }
}
