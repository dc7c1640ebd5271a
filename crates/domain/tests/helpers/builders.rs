#![allow(dead_code)]
use ferrous_resolv_domain::{
    DnsMessage, Edns, Header, Question, RecordClass, RecordData, RecordType, ResourceRecord,
    ResponseCode,
};
use std::net::{Ipv4Addr, Ipv6Addr};

pub struct QueryBuilder {
    id: u16,
    name: String,
    record_type: RecordType,
    record_class: RecordClass,
    recursion_desired: bool,
    edns: Option<Edns>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            name: "example.com".to_string(),
            record_type: RecordType::A,
            record_class: RecordClass::IN,
            recursion_desired: true,
            edns: None,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn record_class(mut self, record_class: RecordClass) -> Self {
        self.record_class = record_class;
        self
    }

    pub fn edns(mut self, edns: Edns) -> Self {
        self.edns = Some(edns);
        self
    }

    pub fn build(self) -> DnsMessage {
        DnsMessage::new(Header {
            id: self.id,
            recursion_desired: self.recursion_desired,
            ..Header::default()
        })
        .with_question(Question::new(
            self.name.parse().unwrap(),
            self.record_type,
            self.record_class,
        ))
        .with_edns(self.edns)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn name(s: &str) -> ferrous_resolv_domain::DomainName {
    s.parse().unwrap()
}

/// A response carrying one record of every decoded RDATA kind.
pub fn full_response(query: &DnsMessage) -> DnsMessage {
    let owner = query.question().unwrap().name.clone();
    DnsMessage::response_to(query)
        .with_recursion_available(true)
        .with_answer(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            300,
            RecordData::A(Ipv4Addr::new(93, 184, 216, 34)),
        ))
        .with_answer(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            300,
            RecordData::AAAA(Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0x248, 0x1893, 0x25c8, 0x1946)),
        ))
        .with_answer(ResourceRecord::new(
            name("www.example.com"),
            RecordClass::IN,
            60,
            RecordData::Cname(owner.clone()),
        ))
        .with_answer(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            3600,
            RecordData::Mx {
                preference: 10,
                exchange: name("mail.example.com"),
            },
        ))
        .with_answer(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            3600,
            RecordData::Txt(vec![b"v=spf1 -all".to_vec(), b"".to_vec()]),
        ))
        .with_authority(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            86400,
            RecordData::Ns(name("a.iana-servers.net")),
        ))
        .with_authority(ResourceRecord::new(
            owner.clone(),
            RecordClass::IN,
            3600,
            RecordData::Soa {
                mname: name("ns.icann.org"),
                rname: name("noc.dns.icann.org"),
                serial: 2024081404,
                refresh: 7200,
                retry: 3600,
                expire: 1209600,
                minimum: 3600,
            },
        ))
        .with_additional(ResourceRecord::opaque(
            owner,
            RecordType::Unknown(65280),
            RecordClass::IN,
            0,
            vec![1, 2, 3, 4, 5],
        ))
}

pub fn nxdomain_response(query: &DnsMessage) -> DnsMessage {
    DnsMessage::response_to(query).with_response_code(ResponseCode::NXDomain)
}
