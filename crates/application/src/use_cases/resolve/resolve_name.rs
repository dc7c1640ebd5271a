use crate::ports::DnsResolver;
use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainError, DomainName, RecordClass, RecordType,
    ResolveError,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// A lookup as typed by a user: textual name plus query parameters.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub name: String,
    pub record_type: RecordType,
    pub record_class: RecordClass,
    pub options: DnsQueryOptions,
}

impl LookupRequest {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            record_class: RecordClass::IN,
            options: DnsQueryOptions::default(),
        }
    }

    pub fn with_class(mut self, record_class: RecordClass) -> Self {
        self.record_class = record_class;
        self
    }

    pub fn with_options(mut self, options: DnsQueryOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Lookup {
    pub response: DnsMessage,
    pub elapsed: Duration,
}

pub struct ResolveNameUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveNameUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        request: &LookupRequest,
        cancel: &CancellationToken,
    ) -> Result<Lookup, ResolveError> {
        let name: DomainName = request
            .name
            .parse()
            .map_err(|e: DomainError| ResolveError::InvalidArgument(e.to_string()))?;
        let start = Instant::now();

        let result = self
            .resolver
            .resolve(
                &name,
                request.record_type,
                request.record_class,
                &request.options,
                cancel,
            )
            .await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                info!(
                    domain = %name,
                    record_type = %request.record_type,
                    rcode = %response.response_code(),
                    answers = response.answers().len(),
                    response_time_ms = elapsed.as_millis() as u64,
                    "Lookup completed"
                );
                Ok(Lookup { response, elapsed })
            }
            Err(e) => {
                warn!(
                    domain = %name,
                    record_type = %request.record_type,
                    error = %e,
                    response_time_ms = elapsed.as_millis() as u64,
                    "Lookup failed"
                );
                Err(e)
            }
        }
    }
}
