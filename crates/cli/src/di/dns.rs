use ferrous_resolv_application::use_cases::ResolveNameUseCase;
use ferrous_resolv_domain::Config;
use ferrous_resolv_infrastructure::dns::DnsClient;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub resolve_name: ResolveNameUseCase,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let endpoints = config.resolver.endpoints()?;
        info!(
            servers = ?endpoints.iter().map(ToString::to_string).collect::<Vec<_>>(),
            parallel = config.resolver.parallel_queries,
            tcp_only = config.resolver.tcp_only,
            "Initializing DNS client"
        );

        let client = Arc::new(DnsClient::new(endpoints));

        Ok(Self {
            resolve_name: ResolveNameUseCase::new(client),
        })
    }
}
