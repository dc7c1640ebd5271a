use crate::errors::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Address of a name server to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerEndpoint {
    addr: SocketAddr,
}

impl ServerEndpoint {
    /// Endpoint on the default port 53.
    pub fn new(ip: IpAddr) -> Self {
        Self {
            addr: SocketAddr::new(ip, DEFAULT_DNS_PORT),
        }
    }

    pub fn with_port(ip: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::new(ip, port),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl From<SocketAddr> for ServerEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl From<IpAddr> for ServerEndpoint {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl FromStr for ServerEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.trim();
        let rest = rest.strip_prefix("udp://").unwrap_or(rest);

        if let Ok(addr) = rest.parse::<SocketAddr>() {
            return Ok(Self { addr });
        }
        if let Ok(ip) = rest.parse::<IpAddr>() {
            return Ok(Self::new(ip));
        }
        // "[::1]" without a port
        if let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            if let Ok(ip) = inner.parse::<IpAddr>() {
                return Ok(Self::new(ip));
            }
        }

        Err(DomainError::InvalidEndpoint(format!(
            "'{}'. Expected IP, IP:PORT or [IPv6]:PORT",
            s
        )))
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
