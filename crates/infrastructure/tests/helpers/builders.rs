#![allow(dead_code)]
use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainName, Edns, Header, Question, RecordClass, RecordData,
    RecordType, ResourceRecord,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

pub fn name(s: &str) -> DomainName {
    s.parse().unwrap()
}

/// Options tuned for loopback tests: short timeout, explicit tries.
pub fn fast_options(tries: usize) -> DnsQueryOptions {
    DnsQueryOptions::default()
        .with_tries(tries)
        .with_query_timeout(Duration::from_millis(150))
}

pub fn a_answer(query: &DnsMessage, ip: Ipv4Addr) -> DnsMessage {
    let mut response = DnsMessage::response_to(query).with_recursion_available(true);
    if let Some(question) = query.question() {
        response = response.with_answer(ResourceRecord::new(
            question.name.clone(),
            RecordClass::IN,
            60,
            RecordData::A(ip),
        ));
    }
    response
}

pub fn first_a(response: &DnsMessage) -> Option<Ipv4Addr> {
    response.answers().iter().find_map(|rr| match rr.data {
        RecordData::A(ip) => Some(ip),
        _ => None,
    })
}

pub fn query_for(domain: &str, record_type: RecordType, edns: Option<Edns>) -> DnsMessage {
    DnsMessage::new(Header {
        id: 0x1234,
        recursion_desired: true,
        ..Header::default()
    })
    .with_question(Question::new(name(domain), record_type, RecordClass::IN))
    .with_edns(edns)
}

/// A response carrying one record of every decoded RDATA kind.
pub fn full_response(query: &DnsMessage) -> DnsMessage {
    let owner = query.question().unwrap().name.clone();
    let record = |ttl, data| ResourceRecord::new(owner.clone(), RecordClass::IN, ttl, data);

    DnsMessage::response_to(query)
        .with_recursion_available(true)
        .with_answer(record(300, RecordData::A(Ipv4Addr::new(93, 184, 216, 34))))
        .with_answer(record(
            300,
            RecordData::AAAA(Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0x248, 0x1893, 0x25c8, 0x1946)),
        ))
        .with_answer(ResourceRecord::new(
            name("www.example.com"),
            RecordClass::IN,
            60,
            RecordData::Cname(owner.clone()),
        ))
        .with_answer(record(
            3600,
            RecordData::Mx {
                preference: 10,
                exchange: name("mail.example.com"),
            },
        ))
        .with_answer(record(
            3600,
            RecordData::Txt(vec![b"v=spf1 -all".to_vec(), b"".to_vec()]),
        ))
        .with_answer(ResourceRecord::new(
            name("old.example.com"),
            RecordClass::IN,
            600,
            RecordData::Dname(name("new.example.net")),
        ))
        .with_authority(record(86400, RecordData::Ns(name("a.iana-servers.net"))))
        .with_authority(record(
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
        .with_additional(ResourceRecord::new(
            name("34.216.184.93.in-addr.arpa"),
            RecordClass::IN,
            300,
            RecordData::Ptr(owner.clone()),
        ))
        .with_additional(ResourceRecord::opaque(
            owner.clone(),
            RecordType::Unknown(65280),
            RecordClass::IN,
            0,
            vec![1, 2, 3, 4, 5],
        ))
}
