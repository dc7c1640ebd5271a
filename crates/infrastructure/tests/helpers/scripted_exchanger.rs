#![allow(dead_code)]
use super::builders::a_answer;
use async_trait::async_trait;
use ferrous_resolv_domain::{DnsMessage, ResponseCode, ServerEndpoint, TransportError};
use ferrous_resolv_infrastructure::dns::forwarding::WireCodec;
use ferrous_resolv_infrastructure::dns::transport::{ExchangeRequest, QueryExchanger, TransportKind};
use std::collections::{HashMap, VecDeque};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted outcome for one exchange.
#[derive(Debug, Clone)]
pub enum Step {
    Answer(Ipv4Addr),
    NxDomain,
    Truncated,
    WrongId,
    Garbage,
    TimedOut,
    Network,
    /// Answer after sleeping, to exercise racing.
    Delayed(Duration, Ipv4Addr),
    /// Like `Delayed`, but the flag is raised if the exchange is dropped
    /// before it answers.
    Tracked(Duration, Ipv4Addr, Arc<AtomicBool>),
}

/// Raises `released` when dropped before `finish` is called.
struct ReleaseGuard {
    released: Arc<AtomicBool>,
    finished: bool,
}

impl ReleaseGuard {
    fn new(released: Arc<AtomicBool>) -> Self {
        Self {
            released,
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.released.store(true, Ordering::SeqCst);
        }
    }
}

/// In-memory exchanger that replays a per-endpoint script and records every
/// call. An exhausted script times out.
#[derive(Default)]
pub struct ScriptedExchanger {
    scripts: Mutex<HashMap<ServerEndpoint, VecDeque<Step>>>,
    calls: Mutex<Vec<(ServerEndpoint, TransportKind)>>,
}

impl ScriptedExchanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, endpoint: ServerEndpoint, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(endpoint, steps.into_iter().collect());
        self
    }

    pub fn calls(&self) -> Vec<(ServerEndpoint, TransportKind)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: ServerEndpoint) -> Vec<TransportKind> {
        self.calls()
            .into_iter()
            .filter(|(ep, _)| *ep == endpoint)
            .map(|(_, kind)| kind)
            .collect()
    }

    fn next_step(&self, endpoint: ServerEndpoint) -> Step {
        self.scripts
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(|steps| steps.pop_front())
            .unwrap_or(Step::TimedOut)
    }
}

#[async_trait]
impl QueryExchanger for ScriptedExchanger {
    async fn exchange(&self, request: ExchangeRequest<'_>) -> Result<Vec<u8>, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.endpoint, request.kind));

        let server = request.endpoint.to_string();
        let query = WireCodec::decode(request.query).unwrap();

        let reply = match self.next_step(request.endpoint) {
            Step::Answer(ip) => a_answer(&query, ip),
            Step::NxDomain => {
                DnsMessage::response_to(&query).with_response_code(ResponseCode::NXDomain)
            }
            Step::Truncated => DnsMessage::response_to(&query).with_truncated(true),
            Step::WrongId => DnsMessage::response_to(&query).with_id(query.id().wrapping_add(1)),
            Step::Garbage => return Ok(vec![1, 2, 3]),
            Step::TimedOut => {
                tokio::time::sleep(request.timeout).await;
                return Err(TransportError::TimedOut { server });
            }
            Step::Network => {
                return Err(TransportError::Network {
                    server,
                    detail: "connection refused".into(),
                })
            }
            Step::Delayed(delay, ip) => {
                tokio::time::sleep(delay).await;
                a_answer(&query, ip)
            }
            Step::Tracked(delay, ip, released) => {
                let mut guard = ReleaseGuard::new(released);
                tokio::time::sleep(delay).await;
                guard.finish();
                a_answer(&query, ip)
            }
        };

        Ok(WireCodec::encode(&reply).unwrap())
    }
}
