use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TRIES: usize = 2;

/// Per-call settings for a resolution.
///
/// Handed to the resolver by shared reference, so it cannot change while a
/// call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQueryOptions {
    /// RD flag on the outgoing query. Default `true`.
    pub recursion_desired: bool,
    /// Skip UDP and always use TCP. Default `false`.
    pub tcp_only: bool,
    /// Deadline for a single try. Default 10 s.
    pub query_timeout: Duration,
    /// Tries per server, at least 1. Default 2.
    pub tries: usize,
    /// Query all servers at once and keep the first valid answer. Default `false`.
    pub parallel_queries: bool,
    /// Enables EDNS0 and advertises this UDP payload size.
    pub edns_buffer_size: Option<u16>,
    /// Sets the DO bit (enables EDNS0 on its own). Default `false`.
    pub dnssec_ok: bool,
    /// Sets the CD flag. Default `false`.
    pub checking_disabled: bool,
}

impl Default for DnsQueryOptions {
    fn default() -> Self {
        Self {
            recursion_desired: true,
            tcp_only: false,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            tries: DEFAULT_TRIES,
            parallel_queries: false,
            edns_buffer_size: None,
            dnssec_ok: false,
            checking_disabled: false,
        }
    }
}

impl DnsQueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }

    pub fn with_tcp_only(mut self, tcp_only: bool) -> Self {
        self.tcp_only = tcp_only;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_tries(mut self, tries: usize) -> Self {
        self.tries = tries;
        self
    }

    pub fn with_parallel_queries(mut self, parallel: bool) -> Self {
        self.parallel_queries = parallel;
        self
    }

    pub fn with_edns_buffer_size(mut self, size: Option<u16>) -> Self {
        self.edns_buffer_size = size;
        self
    }

    pub fn with_dnssec_ok(mut self, dnssec_ok: bool) -> Self {
        self.dnssec_ok = dnssec_ok;
        self
    }

    pub fn with_checking_disabled(mut self, checking_disabled: bool) -> Self {
        self.checking_disabled = checking_disabled;
        self
    }

    pub fn is_edns_enabled(&self) -> bool {
        self.edns_buffer_size.is_some() || self.dnssec_ok
    }
}
