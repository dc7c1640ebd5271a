use super::{create_transport, ReplyFilter, Transport, TransportKind};
use async_trait::async_trait;
use ferrous_resolv_domain::{ServerEndpoint, TransportError};
use std::fmt;
use std::time::Duration;

/// Everything one attempt needs to put a query on the wire.
#[derive(Clone, Copy)]
pub struct ExchangeRequest<'a> {
    pub endpoint: ServerEndpoint,
    pub kind: TransportKind,
    pub query: &'a [u8],
    /// Receive buffer for UDP replies.
    pub udp_payload: usize,
    pub timeout: Duration,
    /// UDP only: datagrams it refuses are skipped while the socket keeps
    /// listening until `timeout`.
    pub accept: Option<&'a ReplyFilter<'a>>,
}

impl fmt::Debug for ExchangeRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRequest")
            .field("endpoint", &self.endpoint)
            .field("kind", &self.kind)
            .field("query_len", &self.query.len())
            .field("udp_payload", &self.udp_payload)
            .field("timeout", &self.timeout)
            .field("filtered", &self.accept.is_some())
            .finish()
    }
}

/// Seam between the attempt scheduler and the network.
#[async_trait]
pub trait QueryExchanger: Send + Sync {
    async fn exchange(&self, request: ExchangeRequest<'_>) -> Result<Vec<u8>, TransportError>;
}

/// Sends each exchange over a fresh UDP socket or TCP connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkExchanger;

impl NetworkExchanger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QueryExchanger for NetworkExchanger {
    async fn exchange(&self, request: ExchangeRequest<'_>) -> Result<Vec<u8>, TransportError> {
        let transport = create_transport(request.endpoint, request.kind, request.udp_payload);
        let response = match (&transport, request.accept) {
            (Transport::Udp(udp), Some(accept)) => {
                udp.send_matching(request.query, request.timeout, accept)
                    .await?
            }
            _ => transport.send(request.query, request.timeout).await?,
        };
        Ok(response.bytes)
    }
}
