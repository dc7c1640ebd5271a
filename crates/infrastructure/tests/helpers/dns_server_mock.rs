#![allow(dead_code)]
use super::builders::a_answer;
use ferrous_resolv_domain::{
    DnsMessage, Question, RecordClass, RecordType, ResponseCode, ServerEndpoint,
};
use ferrous_resolv_infrastructure::dns::forwarding::WireCodec;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

/// How the mock answers each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Answer(Ipv4Addr),
    NxDomain,
    /// TC with no records over UDP, the full answer over TCP.
    TruncateOverUdp(Ipv4Addr),
    Silent,
    WrongId,
    WrongQuestion,
    Garbage,
    /// Over UDP: a reply with the wrong ID, then the real answer 30 ms later.
    WrongIdThenAnswer(Ipv4Addr),
    /// Over UDP: the answer with TC set and its last 6 bytes cut off. The
    /// full answer over TCP.
    CutTruncatedOverUdp(Ipv4Addr),
}

const STRAY_REPLY_GAP: Duration = Duration::from_millis(30);

/// Loopback DNS server listening on UDP and TCP at the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_hits: Arc<AtomicUsize>,
    tcp_hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: Behavior) -> Result<Self, std::io::Error> {
        Self::start_with_delay(behavior, Duration::ZERO).await
    }

    pub async fn start_with_delay(
        behavior: Behavior,
        delay: Duration,
    ) -> Result<Self, std::io::Error> {
        let (udp, tcp) = Self::bind_pair().await?;
        let addr = udp.local_addr()?;
        let udp = Arc::new(udp);

        let udp_hits = Arc::new(AtomicUsize::new(0));
        let tcp_hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_udp_hits = Arc::clone(&udp_hits);
        let task_tcp_hits = Arc::clone(&tcp_hits);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            task_udp_hits.fetch_add(1, Ordering::SeqCst);
                            let query = buf[..len].to_vec();
                            let socket = Arc::clone(&udp);
                            tokio::spawn(async move {
                                tokio::time::sleep(delay).await;
                                for (index, reply) in respond_udp(behavior, &query).into_iter().enumerate() {
                                    if index > 0 {
                                        tokio::time::sleep(STRAY_REPLY_GAP).await;
                                    }
                                    let _ = socket.send_to(&reply, peer).await;
                                }
                            });
                        }
                    }
                    result = tcp.accept() => {
                        if let Ok((stream, _)) = result {
                            task_tcp_hits.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(serve_tcp(stream, behavior, delay));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_hits,
            tcp_hits,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn bind_pair() -> Result<(UdpSocket, TcpListener), std::io::Error> {
        let mut last_err = None;
        for _ in 0..16 {
            let udp = UdpSocket::bind("127.0.0.1:0").await?;
            match TcpListener::bind(udp.local_addr()?).await {
                Ok(tcp) => return Ok((udp, tcp)),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| std::io::Error::other("no free port pair")))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::from(self.addr)
    }

    pub fn udp_hits(&self) -> usize {
        self.udp_hits.load(Ordering::SeqCst)
    }

    pub fn tcp_hits(&self) -> usize {
        self.tcp_hits.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: TcpStream, behavior: Behavior, delay: Duration) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }

    let Some(reply) = respond(behavior, &query, true) else {
        // hold the connection open so the client times out
        tokio::time::sleep(Duration::from_secs(30)).await;
        return;
    };
    tokio::time::sleep(delay).await;

    let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
    let _ = stream.write_all(&reply).await;
    let _ = stream.flush().await;
}

/// Datagrams sent back for one UDP query, in order.
fn respond_udp(behavior: Behavior, raw: &[u8]) -> Vec<Vec<u8>> {
    let Ok(query) = WireCodec::decode(raw) else {
        return Vec::new();
    };

    match behavior {
        Behavior::WrongIdThenAnswer(ip) => {
            let stray = a_answer(&query, Ipv4Addr::LOCALHOST).with_id(query.id().wrapping_add(1));
            [stray, a_answer(&query, ip)]
                .iter()
                .filter_map(|reply| WireCodec::encode(reply).ok())
                .collect()
        }
        Behavior::CutTruncatedOverUdp(ip) => {
            let Ok(mut bytes) = WireCodec::encode(&a_answer(&query, ip).with_truncated(true))
            else {
                return Vec::new();
            };
            bytes.truncate(bytes.len().saturating_sub(6));
            vec![bytes]
        }
        other => respond(other, raw, false).into_iter().collect(),
    }
}

fn respond(behavior: Behavior, raw: &[u8], over_tcp: bool) -> Option<Vec<u8>> {
    let query = WireCodec::decode(raw).ok()?;

    let reply = match behavior {
        Behavior::Answer(ip) => a_answer(&query, ip),
        Behavior::NxDomain => {
            DnsMessage::response_to(&query).with_response_code(ResponseCode::NXDomain)
        }
        Behavior::TruncateOverUdp(ip) if over_tcp => a_answer(&query, ip),
        Behavior::TruncateOverUdp(_) => DnsMessage::response_to(&query).with_truncated(true),
        Behavior::Silent => return None,
        Behavior::WrongId => a_answer(&query, Ipv4Addr::LOCALHOST).with_id(query.id().wrapping_add(1)),
        Behavior::WrongQuestion => DnsMessage::response_to(&query).with_questions(vec![
            Question::new(
                "unrelated.example.".parse().ok()?,
                RecordType::A,
                RecordClass::IN,
            ),
        ]),
        Behavior::Garbage => return Some(vec![0xde, 0xad, 0xbe, 0xef]),
        Behavior::WrongIdThenAnswer(ip) | Behavior::CutTruncatedOverUdp(ip) => a_answer(&query, ip),
    };

    WireCodec::encode(&reply).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_answers_over_udp() {
        let server = MockDnsServer::start(Behavior::Answer(Ipv4Addr::new(192, 0, 2, 1)))
            .await
            .unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let query = vec![
            0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x01,
        ];
        client.send_to(&query, server.addr()).await.unwrap();

        let mut buf = vec![0u8; 512];
        let (len, _) = client.recv_from(&mut buf).await.unwrap();

        assert!(len > 12);
        assert_eq!(buf[0..2], query[0..2]);
        assert_eq!(buf[2] & 0x80, 0x80, "QR bit should be set");
        assert_eq!(server.udp_hits(), 1);

        server.shutdown();
    }
}
