//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The receive buffer is the payload
//! size the query advertised: 512 bytes without EDNS(0), the OPT size with it.
//! A reply with the TC bit set is left for the caller to escalate to TCP.
//!
//! Datagrams the caller's filter refuses are dropped and the socket keeps
//! listening until the deadline. If nothing acceptable arrives, the last
//! refused datagram is handed back so the caller can classify it.

use super::{
    network_error, timed_out, DnsTransport, ReplyFilter, TransportKind, TransportResponse,
};
use async_trait::async_trait;
use ferrous_resolv_domain::{TransportError, CLASSIC_UDP_PAYLOAD_SIZE};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

pub struct UdpTransport {
    server_addr: SocketAddr,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, max_response_size: usize) -> Self {
        Self {
            server_addr,
            max_response_size: max_response_size.max(CLASSIC_UDP_PAYLOAD_SIZE as usize),
        }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    /// Sends once, then reads datagrams until one passes `accept` or
    /// `timeout` expires.
    pub async fn send_matching(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
        accept: &ReplyFilter<'_>,
    ) -> Result<TransportResponse, TransportError> {
        let mut discarded = None;
        let outcome =
            tokio::time::timeout(timeout, self.exchange(message_bytes, accept, &mut discarded))
                .await;

        let bytes = match outcome {
            Ok(result) => result?,
            Err(_) => discarded.ok_or_else(|| timed_out(self.server_addr))?,
        };

        Ok(TransportResponse {
            bytes,
            protocol_used: TransportKind::Udp,
        })
    }

    async fn exchange(
        &self,
        message_bytes: &[u8],
        accept: &ReplyFilter<'_>,
        discarded: &mut Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| network_error(self.server_addr, format!("bind failed: {}", e)))?;

        // Connected: the kernel drops datagrams from any other source.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| network_error(self.server_addr, format!("connect failed: {}", e)))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| network_error(self.server_addr, format!("send failed: {}", e)))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        loop {
            let mut recv_buf = vec![0u8; self.max_response_size];
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| network_error(self.server_addr, format!("receive failed: {}", e)))?;
            recv_buf.truncate(bytes_received);

            if accept(&recv_buf) {
                debug!(server = %self.server_addr, bytes_received, "UDP response received");
                return Ok(recv_buf);
            }

            debug!(
                server = %self.server_addr,
                bytes_received,
                "Ignoring UDP datagram that does not answer the query"
            );
            *discarded = Some(recv_buf);
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        self.send_matching(message_bytes, timeout, &|_: &[u8]| true)
            .await
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Udp
    }
}
