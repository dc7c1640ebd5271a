use super::{RecordClass, RecordType};
use crate::domain_name::DomainName;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decoded RDATA. Only types whose layout the resolver needs to present are
/// decoded; everything else is carried as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    Ns(DomainName),
    Cname(DomainName),
    Ptr(DomainName),
    Dname(DomainName),
    Mx {
        preference: u16,
        exchange: DomainName,
    },
    Txt(Vec<Vec<u8>>),
    Soa {
        mname: DomainName,
        rname: DomainName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Unknown(Vec<u8>),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{}", ip),
            RecordData::AAAA(ip) => write!(f, "{}", ip),
            RecordData::Ns(name)
            | RecordData::Cname(name)
            | RecordData::Ptr(name)
            | RecordData::Dname(name) => write!(f, "{}", name),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Txt(strings) => {
                let parts: Vec<String> = strings
                    .iter()
                    .map(|s| format!("\"{}\"", escape_character_string(s)))
                    .collect();
                f.write_str(&parts.join(" "))
            }
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            // RFC 3597 generic presentation
            RecordData::Unknown(bytes) => {
                write!(f, "\\# {}", bytes.len())?;
                if !bytes.is_empty() {
                    f.write_str(" ")?;
                    for b in bytes {
                        write!(f, "{:02x}", b)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn escape_character_string(s: &[u8]) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{:03}", b)),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: RecordType,
    pub record_class: RecordClass,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(
        name: DomainName,
        record_class: RecordClass,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        let record_type = match &data {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::Ns(_) => RecordType::NS,
            RecordData::Cname(_) => RecordType::CNAME,
            RecordData::Ptr(_) => RecordType::PTR,
            RecordData::Dname(_) => RecordType::DNAME,
            RecordData::Mx { .. } => RecordType::MX,
            RecordData::Txt(_) => RecordType::TXT,
            RecordData::Soa { .. } => RecordType::SOA,
            RecordData::Unknown(_) => RecordType::NULL,
        };
        Self {
            name,
            record_type,
            record_class,
            ttl,
            data,
        }
    }

    /// A record of an arbitrary type with opaque RDATA.
    pub fn opaque(
        name: DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Self {
        Self {
            name,
            record_type,
            record_class,
            ttl,
            data: RecordData::Unknown(rdata),
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.record_class, self.record_type, self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_infers_type() {
        let rr = ResourceRecord::new(
            "example.com".parse().unwrap(),
            RecordClass::IN,
            300,
            RecordData::A(Ipv4Addr::new(192, 0, 2, 1)),
        );
        assert_eq!(rr.record_type, RecordType::A);
        assert_eq!(rr.to_string(), "example.com.\t300\tIN\tA\t192.0.2.1");
    }

    #[test]
    fn test_txt_display_escapes() {
        let data = RecordData::Txt(vec![b"v=spf1 \"x\"".to_vec(), vec![0x01]]);
        assert_eq!(data.to_string(), r#""v=spf1 \"x\"" "\001""#);
    }

    #[test]
    fn test_unknown_display() {
        assert_eq!(
            RecordData::Unknown(vec![0xde, 0xad]).to_string(),
            "\\# 2 dead"
        );
        assert_eq!(RecordData::Unknown(vec![]).to_string(), "\\# 0");
    }
}
