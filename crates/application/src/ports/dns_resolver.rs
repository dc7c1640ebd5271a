use async_trait::async_trait;
use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainName, RecordClass, RecordType, ResolveError,
};
use tokio_util::sync::CancellationToken;

/// Sends one question to the configured name servers and returns the first
/// acceptable response, whatever its RCODE.
///
/// Cancelling `cancel` makes the call return [`ResolveError::Cancelled`]
/// promptly and releases every socket it opened.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(
        &self,
        name: &DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
        cancel: &CancellationToken,
    ) -> Result<DnsMessage, ResolveError>;
}
