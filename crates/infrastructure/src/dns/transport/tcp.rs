//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is framed with a 2-byte big-endian length prefix. A fresh
//! connection is opened per query and dropped on every exit path.

use super::{network_error, timed_out, DnsTransport, TransportKind, TransportResponse};
use async_trait::async_trait;
use ferrous_resolv_domain::TransportError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| network_error(self.server_addr, format!("connect failed: {}", e)))?;

        stream
            .set_nodelay(true)
            .map_err(|e| network_error(self.server_addr, format!("TCP_NODELAY: {}", e)))?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| network_error(self.server_addr, format!("send failed: {}", e)))?;

        debug!(server = %self.server_addr, message_len = message_bytes.len(), "TCP query sent");

        let response = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| network_error(self.server_addr, format!("receive failed: {}", e)))?;

        debug!(server = %self.server_addr, response_len = response.len(), "TCP response received");

        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| timed_out(self.server_addr))??;

        Ok(TransportResponse {
            bytes,
            protocol_used: TransportKind::Stream,
        })
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Stream
    }
}

pub(crate) async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message of {} bytes exceeds TCP frame limit", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
