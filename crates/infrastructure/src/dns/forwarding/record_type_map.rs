//! Mapping between the domain's record types and classes and `hickory_proto`'s.
//!
//! Named variants are matched one to one. Anything else travels by its
//! numeric code, so types neither side names (DNAME, private-use codes)
//! survive the trip unchanged.

use ferrous_resolv_domain::{RecordClass, RecordType};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

/// Bidirectional mapper between domain and hickory record types and classes
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building messages)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            // Basic records
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::NULL => HickoryRecordType::NULL,
            RecordType::HINFO => HickoryRecordType::HINFO,

            // Advanced records
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::NAPTR => HickoryRecordType::NAPTR,
            RecordType::SVCB => HickoryRecordType::SVCB,
            RecordType::HTTPS => HickoryRecordType::HTTPS,

            // Security & modern records
            RecordType::CAA => HickoryRecordType::CAA,
            RecordType::TLSA => HickoryRecordType::TLSA,
            RecordType::SSHFP => HickoryRecordType::SSHFP,

            // DNSSEC records
            RecordType::DS => HickoryRecordType::DS,
            RecordType::DNSKEY => HickoryRecordType::DNSKEY,
            RecordType::RRSIG => HickoryRecordType::RRSIG,
            RecordType::NSEC => HickoryRecordType::NSEC,
            RecordType::NSEC3 => HickoryRecordType::NSEC3,
            RecordType::NSEC3PARAM => HickoryRecordType::NSEC3PARAM,
            RecordType::CDS => HickoryRecordType::CDS,
            RecordType::CDNSKEY => HickoryRecordType::CDNSKEY,

            // Meta types
            RecordType::OPT => HickoryRecordType::OPT,
            RecordType::IXFR => HickoryRecordType::IXFR,
            RecordType::AXFR => HickoryRecordType::AXFR,
            RecordType::ANY => HickoryRecordType::ANY,

            other => HickoryRecordType::from(other.to_u16()),
        }
    }

    /// Convert hickory RecordType → domain RecordType (for decoded replies)
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::SRV => RecordType::SRV,
            HickoryRecordType::SOA => RecordType::SOA,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::OPT => RecordType::OPT,
            HickoryRecordType::ANY => RecordType::ANY,
            other => RecordType::from_u16(u16::from(other)),
        }
    }

    pub fn class_to_hickory(record_class: RecordClass) -> DNSClass {
        match record_class {
            RecordClass::IN => DNSClass::IN,
            RecordClass::CH => DNSClass::CH,
            RecordClass::HS => DNSClass::HS,
            RecordClass::NONE => DNSClass::NONE,
            RecordClass::ANY => DNSClass::ANY,
            other => DNSClass::from(other.to_u16()),
        }
    }

    pub fn class_from_hickory(dns_class: DNSClass) -> RecordClass {
        match dns_class {
            DNSClass::IN => RecordClass::IN,
            DNSClass::CH => RecordClass::CH,
            DNSClass::HS => RecordClass::HS,
            DNSClass::NONE => RecordClass::NONE,
            DNSClass::ANY => RecordClass::ANY,
            other => RecordClass::from_u16(u16::from(other)),
        }
    }
}
