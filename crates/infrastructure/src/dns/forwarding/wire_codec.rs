//! DNS wire format for [`DnsMessage`]
//!
//! Encoding goes through `hickory_proto::op::Message` and `BinEncoder`;
//! decoding reads a hickory `Message` and maps it onto the domain model.
//! Bytes left over after the last counted record make a reply malformed.

use super::record_type_map::RecordTypeMapper;
use ferrous_resolv_domain::{
    DnsMessage, DomainError, DomainName, Edns, Header, OpCode, Question, RecordData, RecordType,
    ResourceRecord, ResponseCode,
};
use hickory_proto::op::{
    Edns as WireEdns, Header as WireHeader, Message, MessageType, OpCode as WireOpCode, Query,
    ResponseCode as WireResponseCode,
};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, SOA, TXT};
use hickory_proto::rr::domain::Label;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};

pub struct WireCodec;

impl WireCodec {
    /// Serialize a message to wire format bytes
    pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let wire = Self::to_wire(message)?;
        Self::serialize_message(&wire)
    }

    pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let mut decoder = BinDecoder::new(bytes);
        let wire = Message::read(&mut decoder).map_err(malformed)?;
        if !decoder.is_empty() {
            return Err(DomainError::MalformedMessage(format!(
                "{} trailing bytes after the last record",
                decoder.len()
            )));
        }
        Self::from_wire(&wire)
    }

    /// Decodes only the fixed 12-byte header. Used on replies whose body
    /// did not decode, e.g. a UDP reply cut short mid-record.
    pub fn decode_header(bytes: &[u8]) -> Result<Header, DomainError> {
        let mut decoder = BinDecoder::new(bytes);
        let header = WireHeader::read(&mut decoder).map_err(malformed)?;
        Ok(Header {
            id: header.id(),
            is_response: header.message_type() == MessageType::Response,
            op_code: OpCode::from_u8(u8::from(header.op_code())),
            authoritative: header.authoritative(),
            truncated: header.truncated(),
            recursion_desired: header.recursion_desired(),
            recursion_available: header.recursion_available(),
            authentic_data: header.authentic_data(),
            checking_disabled: header.checking_disabled(),
            response_code: ResponseCode::from_u16(u16::from(header.response_code())),
        })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidArgument(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    fn to_wire(message: &DnsMessage) -> Result<Message, DomainError> {
        let header = message.header();
        let message_type = if header.is_response {
            MessageType::Response
        } else {
            MessageType::Query
        };
        let response_code: WireResponseCode = header.response_code.to_u16().into();

        let mut wire = Message::new(header.id, message_type, op_code_to_wire(header.op_code)?);
        wire.set_authoritative(header.authoritative);
        wire.set_truncated(header.truncated);
        wire.set_recursion_desired(header.recursion_desired);
        wire.set_recursion_available(header.recursion_available);
        wire.set_authentic_data(header.authentic_data);
        wire.set_checking_disabled(header.checking_disabled);
        wire.set_response_code(response_code);

        for question in message.questions() {
            let mut query = Query::new();
            query.set_name(name_to_wire(&question.name)?);
            query.set_query_type(RecordTypeMapper::to_hickory(question.record_type));
            query.set_query_class(RecordTypeMapper::class_to_hickory(question.record_class));
            wire.add_query(query);
        }
        for record in message.answers() {
            wire.add_answer(record_to_wire(record)?);
        }
        for record in message.authorities() {
            wire.add_name_server(record_to_wire(record)?);
        }
        for record in message.additionals() {
            wire.add_additional(record_to_wire(record)?);
        }

        if let Some(edns) = message.edns() {
            let mut opt = WireEdns::new();
            opt.set_max_payload(edns.udp_payload_size);
            opt.set_version(edns.version);
            opt.set_rcode_high(header.response_code.high_bits());
            opt.flags_mut().dnssec_ok = edns.dnssec_ok;
            wire.set_edns(opt);
        }

        Ok(wire)
    }

    fn from_wire(wire: &Message) -> Result<DnsMessage, DomainError> {
        // hickory has already merged the OPT extended bits into the RCODE.
        let header = Header {
            id: wire.id(),
            is_response: wire.message_type() == MessageType::Response,
            op_code: OpCode::from_u8(u8::from(wire.op_code())),
            authoritative: wire.authoritative(),
            truncated: wire.truncated(),
            recursion_desired: wire.recursion_desired(),
            recursion_available: wire.recursion_available(),
            authentic_data: wire.authentic_data(),
            checking_disabled: wire.checking_disabled(),
            response_code: ResponseCode::from_u16(u16::from(wire.response_code())),
        };

        let questions = wire
            .queries()
            .iter()
            .map(|query| {
                Ok(Question::new(
                    name_from_wire(query.name())?,
                    RecordTypeMapper::from_hickory(query.query_type()),
                    RecordTypeMapper::class_from_hickory(query.query_class()),
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let edns = wire.extensions().as_ref().map(|opt| Edns {
            udp_payload_size: opt.max_payload(),
            version: opt.version(),
            dnssec_ok: opt.flags().dnssec_ok,
        });

        Ok(DnsMessage::from_parts(
            header,
            questions,
            records_from_wire(wire.answers())?,
            records_from_wire(wire.name_servers())?,
            records_from_wire(wire.additionals())?,
            edns,
        ))
    }
}

fn malformed(err: impl std::fmt::Display) -> DomainError {
    DomainError::MalformedMessage(err.to_string())
}

fn unencodable(err: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidArgument(format!("cannot encode: {}", err))
}

fn op_code_to_wire(op_code: OpCode) -> Result<WireOpCode, DomainError> {
    match op_code {
        OpCode::Query => Ok(WireOpCode::Query),
        OpCode::Status => Ok(WireOpCode::Status),
        OpCode::Notify => Ok(WireOpCode::Notify),
        OpCode::Update => Ok(WireOpCode::Update),
        other => Err(DomainError::InvalidArgument(format!(
            "opcode {} cannot be encoded",
            other
        ))),
    }
}

fn name_to_wire(name: &DomainName) -> Result<Name, DomainError> {
    if name.is_root() {
        return Ok(Name::root());
    }
    let labels = name
        .labels()
        .map(Label::from_raw_bytes)
        .collect::<Result<Vec<_>, _>>()
        .map_err(unencodable)?;
    Name::from_labels(labels).map_err(unencodable)
}

fn name_from_wire(name: &Name) -> Result<DomainName, DomainError> {
    DomainName::from_labels(name.iter())
}

fn record_to_wire(record: &ResourceRecord) -> Result<Record, DomainError> {
    let rdata = match &record.data {
        RecordData::A(ip) => RData::A(A(*ip)),
        RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
        RecordData::Ns(name) => RData::NS(NS(name_to_wire(name)?)),
        RecordData::Cname(name) => RData::CNAME(CNAME(name_to_wire(name)?)),
        RecordData::Ptr(name) => RData::PTR(PTR(name_to_wire(name)?)),
        // hickory has no DNAME type; the target goes out uncompressed.
        RecordData::Dname(name) => {
            let target = name_to_wire(name)?.to_bytes().map_err(unencodable)?;
            opaque_rdata(RecordType::DNAME, target)
        }
        RecordData::Mx {
            preference,
            exchange,
        } => RData::MX(MX::new(*preference, name_to_wire(exchange)?)),
        RecordData::Txt(strings) => {
            RData::TXT(TXT::from_bytes(strings.iter().map(Vec::as_slice).collect()))
        }
        RecordData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => RData::SOA(SOA::new(
            name_to_wire(mname)?,
            name_to_wire(rname)?,
            *serial,
            *refresh as _,
            *retry as _,
            *expire as _,
            *minimum as _,
        )),
        RecordData::Unknown(bytes) => opaque_rdata(record.record_type, bytes.clone()),
    };

    let mut wire = Record::from_rdata(name_to_wire(&record.name)?, record.ttl, rdata);
    wire.set_dns_class(RecordTypeMapper::class_to_hickory(record.record_class));
    Ok(wire)
}

fn opaque_rdata(record_type: RecordType, bytes: Vec<u8>) -> RData {
    let rdata = if bytes.is_empty() {
        NULL::new()
    } else {
        NULL::with(bytes)
    };
    RData::Unknown {
        code: RecordTypeMapper::to_hickory(record_type),
        rdata,
    }
}

fn records_from_wire(records: &[Record]) -> Result<Vec<ResourceRecord>, DomainError> {
    records.iter().map(record_from_wire).collect()
}

fn record_from_wire(record: &Record) -> Result<ResourceRecord, DomainError> {
    let record_type = RecordTypeMapper::from_hickory(record.record_type());
    Ok(ResourceRecord {
        name: name_from_wire(record.name())?,
        record_type,
        record_class: RecordTypeMapper::class_from_hickory(record.dns_class()),
        ttl: record.ttl(),
        data: rdata_from_wire(record_type, record.data())?,
    })
}

fn rdata_from_wire(record_type: RecordType, rdata: &RData) -> Result<RecordData, DomainError> {
    let data = match rdata {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
        RData::NS(ns) => RecordData::Ns(name_from_wire(&ns.0)?),
        RData::CNAME(cname) => RecordData::Cname(name_from_wire(&cname.0)?),
        RData::PTR(ptr) => RecordData::Ptr(name_from_wire(&ptr.0)?),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: name_from_wire(mx.exchange())?,
        },
        RData::TXT(txt) => RecordData::Txt(txt.txt_data().iter().map(|s| s.to_vec()).collect()),
        RData::SOA(soa) => RecordData::Soa {
            mname: name_from_wire(soa.mname())?,
            rname: name_from_wire(soa.rname())?,
            serial: soa.serial(),
            refresh: soa.refresh() as u32,
            retry: soa.retry() as u32,
            expire: soa.expire() as u32,
            minimum: soa.minimum() as u32,
        },
        other => {
            let bytes = other.to_bytes().map_err(malformed)?;
            if record_type == RecordType::DNAME {
                let target = Name::read(&mut BinDecoder::new(&bytes)).map_err(malformed)?;
                RecordData::Dname(name_from_wire(&target)?)
            } else {
                RecordData::Unknown(bytes)
            }
        }
    };
    Ok(data)
}
