pub mod exchanger;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_resolv_domain::{ServerEndpoint, TransportError};
use std::fmt;
use std::time::Duration;

pub use exchanger::{ExchangeRequest, NetworkExchanger, QueryExchanger};

/// Which wire framing an attempt used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Stream,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "UDP",
            Self::Stream => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a datagram answers the query in flight.
pub type ReplyFilter<'a> = dyn Fn(&[u8]) -> bool + Send + Sync + 'a;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub protocol_used: TransportKind,
}

/// One request/response exchange with a single server.
///
/// Implementations apply `timeout` to the whole exchange and release their
/// socket on every exit path, including when the future is dropped.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    fn kind(&self) -> TransportKind;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            Self::Udp(t) => t.kind(),
            Self::Tcp(t) => t.kind(),
        }
    }
}

/// `udp_payload` sizes the UDP receive buffer; it is ignored for streams.
pub fn create_transport(
    endpoint: ServerEndpoint,
    kind: TransportKind,
    udp_payload: usize,
) -> Transport {
    match kind {
        TransportKind::Udp => Transport::Udp(udp::UdpTransport::new(
            endpoint.socket_addr(),
            udp_payload,
        )),
        TransportKind::Stream => Transport::Tcp(tcp::TcpTransport::new(endpoint.socket_addr())),
    }
}

pub(crate) fn network_error(server: std::net::SocketAddr, detail: impl fmt::Display) -> TransportError {
    TransportError::Network {
        server: server.to_string(),
        detail: detail.to_string(),
    }
}

pub(crate) fn timed_out(server: std::net::SocketAddr) -> TransportError {
    TransportError::TimedOut {
        server: server.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transport_kind() {
        let ep: ServerEndpoint = "127.0.0.1:5300".parse().unwrap();
        assert_eq!(
            create_transport(ep, TransportKind::Udp, 512).kind(),
            TransportKind::Udp
        );
        assert_eq!(
            create_transport(ep, TransportKind::Stream, 512).kind(),
            TransportKind::Stream
        );
        assert_eq!(TransportKind::Stream.to_string(), "TCP");
    }
}
