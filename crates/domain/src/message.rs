pub mod codes;
pub mod edns;
pub mod header;

pub use codes::{OpCode, ResponseCode};
pub use edns::{Edns, CLASSIC_UDP_PAYLOAD_SIZE, DEFAULT_EDNS_PAYLOAD_SIZE};
pub use header::{Header, Question};

use crate::dns_record::ResourceRecord;
use std::fmt;

/// A DNS message. Built once through the `with_*` methods and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
    edns: Option<Edns>,
}

impl DnsMessage {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Assembles a message from already decoded sections.
    pub fn from_parts(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<ResourceRecord>,
        authorities: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
        edns: Option<Edns>,
    ) -> Self {
        Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
            edns,
        }
    }

    /// Skeleton response to `query`: same ID, opcode, RD and question, QR set.
    pub fn response_to(query: &DnsMessage) -> Self {
        Self {
            header: Header {
                id: query.header.id,
                is_response: true,
                op_code: query.header.op_code,
                recursion_desired: query.header.recursion_desired,
                checking_disabled: query.header.checking_disabled,
                ..Header::default()
            },
            questions: query.questions.clone(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.header.id = id;
        self
    }

    pub fn with_response_code(mut self, code: ResponseCode) -> Self {
        self.header.response_code = code;
        self
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.header.truncated = truncated;
        self
    }

    pub fn with_recursion_available(mut self, available: bool) -> Self {
        self.header.recursion_available = available;
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn with_authority(mut self, record: ResourceRecord) -> Self {
        self.authorities.push(record);
        self
    }

    pub fn with_additional(mut self, record: ResourceRecord) -> Self {
        self.additionals.push(record);
        self
    }

    pub fn with_edns(mut self, edns: Option<Edns>) -> Self {
        self.edns = edns;
        self
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn is_response(&self) -> bool {
        self.header.is_response
    }

    pub fn is_truncated(&self) -> bool {
        self.header.truncated
    }

    pub fn response_code(&self) -> ResponseCode {
        self.header.response_code
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authorities
    }

    /// Additional records, the OPT pseudo-record excluded (see [`Self::edns`]).
    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    pub fn edns(&self) -> Option<&Edns> {
        self.edns.as_ref()
    }

    /// Largest reply this message tells a server it can take over UDP.
    pub fn max_udp_payload(&self) -> usize {
        self.edns
            .as_ref()
            .map_or(CLASSIC_UDP_PAYLOAD_SIZE, Edns::effective_payload_size) as usize
    }
}

impl fmt::Display for DnsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            self.header.op_code, self.header.response_code, self.header.id
        )?;
        writeln!(
            f,
            ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.header.flag_names().join(" "),
            self.questions.len(),
            self.answers.len(),
            self.authorities.len(),
            self.additionals.len() + usize::from(self.edns.is_some())
        )?;

        if let Some(edns) = &self.edns {
            writeln!(f)?;
            writeln!(f, ";; OPT PSEUDOSECTION:")?;
            writeln!(
                f,
                "; EDNS: version: {}, flags:{}; udp: {}",
                edns.version,
                if edns.dnssec_ok { " do" } else { "" },
                edns.udp_payload_size
            )?;
        }

        writeln!(f)?;
        writeln!(f, ";; QUESTION SECTION:")?;
        for q in &self.questions {
            writeln!(f, ";{}", q)?;
        }

        for (title, records) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ] {
            if records.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, ";; {} SECTION:", title)?;
            for rr in records {
                writeln!(f, "{}", rr)?;
            }
        }
        Ok(())
    }
}
