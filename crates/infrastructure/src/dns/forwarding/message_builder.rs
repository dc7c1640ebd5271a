//! DNS Message Builder
//!
//! Constructs outgoing query messages: one question, a fresh transaction ID,
//! header flags and the optional EDNS(0) OPT record taken from
//! [`DnsQueryOptions`].

use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainName, Edns, Header, OpCode, Question, RecordClass,
    RecordType, DEFAULT_EDNS_PAYLOAD_SIZE,
};
use ring::rand::{SecureRandom, SystemRandom};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::warn;

/// How many recently issued IDs are kept out of circulation.
const RECENT_ID_WINDOW: usize = 128;

/// Issues unpredictable 16-bit transaction IDs.
///
/// IDs come from the OS CSPRNG. The last [`RECENT_ID_WINDOW`] IDs are never
/// handed out again, so concurrent queries do not share an ID.
pub struct QueryIdGenerator {
    rng: SystemRandom,
    recent: Mutex<VecDeque<u16>>,
}

impl QueryIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
            recent: Mutex::new(VecDeque::with_capacity(RECENT_ID_WINDOW)),
        }
    }

    pub fn next_id(&self) -> u16 {
        let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            let id = self.random_u16();
            if recent.contains(&id) {
                continue;
            }
            if recent.len() == RECENT_ID_WINDOW {
                recent.pop_front();
            }
            recent.push_back(id);
            return id;
        }
    }

    fn random_u16(&self) -> u16 {
        let mut bytes = [0u8; 2];
        match self.rng.fill(&mut bytes) {
            Ok(()) => u16::from_be_bytes(bytes),
            Err(_) => {
                warn!("System RNG unavailable, falling back to fastrand for query ID");
                fastrand::u16(..)
            }
        }
    }
}

impl Default for QueryIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds DNS query messages
#[derive(Default)]
pub struct MessageBuilder {
    ids: QueryIdGenerator,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query with a fresh transaction ID.
    pub fn build_query(
        &self,
        name: &DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
    ) -> DnsMessage {
        Self::build_query_with_id(self.ids.next_id(), name, record_type, record_class, options)
    }

    /// Build a query with a caller-chosen transaction ID.
    pub fn build_query_with_id(
        id: u16,
        name: &DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
    ) -> DnsMessage {
        let header = Header {
            id,
            op_code: OpCode::Query,
            recursion_desired: options.recursion_desired,
            checking_disabled: options.checking_disabled,
            ..Header::default()
        };

        let edns = options.is_edns_enabled().then(|| {
            Edns::new(options.edns_buffer_size.unwrap_or(DEFAULT_EDNS_PAYLOAD_SIZE))
                .with_dnssec_ok(options.dnssec_ok)
        });

        DnsMessage::new(header)
            .with_question(Question::new(name.clone(), record_type, record_class))
            .with_edns(edns)
    }
}
