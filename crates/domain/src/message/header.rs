use super::codes::{OpCode, ResponseCode};
use crate::dns_record::{RecordClass, RecordType};
use crate::domain_name::DomainName;
use std::fmt;

/// Message header without the section counts, which follow from the
/// sections themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub is_response: bool,
    pub op_code: OpCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub authentic_data: bool,
    pub checking_disabled: bool,
    pub response_code: ResponseCode,
}

impl Header {
    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.is_response {
            names.push("qr");
        }
        if self.authoritative {
            names.push("aa");
        }
        if self.truncated {
            names.push("tc");
        }
        if self.recursion_desired {
            names.push("rd");
        }
        if self.recursion_available {
            names.push("ra");
        }
        if self.authentic_data {
            names.push("ad");
        }
        if self.checking_disabled {
            names.push("cd");
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType, record_class: RecordClass) -> Self {
        Self {
            name,
            record_type,
            record_class,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t\t{}\t{}",
            self.name, self.record_class, self.record_type
        )
    }
}
