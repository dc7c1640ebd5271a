/// Payload size advertised when EDNS0 is on but no size was configured.
pub const DEFAULT_EDNS_PAYLOAD_SIZE: u16 = 4096;

/// Largest DNS payload over UDP without EDNS0 (RFC 1035 §4.2.1).
pub const CLASSIC_UDP_PAYLOAD_SIZE: u16 = 512;

/// What the OPT pseudo-record (RFC 6891 §6.1) carries for a stub resolver.
///
/// The extended RCODE bits are folded into the message's response code, so
/// they do not appear here. Options are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edns {
    pub udp_payload_size: u16,
    pub version: u8,
    pub dnssec_ok: bool,
}

impl Edns {
    pub fn new(udp_payload_size: u16) -> Self {
        Self {
            udp_payload_size,
            version: 0,
            dnssec_ok: false,
        }
    }

    pub fn with_dnssec_ok(mut self, dnssec_ok: bool) -> Self {
        self.dnssec_ok = dnssec_ok;
        self
    }

    /// Effective UDP payload size; values below 512 are treated as 512.
    pub fn effective_payload_size(&self) -> u16 {
        self.udp_payload_size.max(CLASSIC_UDP_PAYLOAD_SIZE)
    }
}

impl Default for Edns {
    fn default() -> Self {
        Self::new(DEFAULT_EDNS_PAYLOAD_SIZE)
    }
}
