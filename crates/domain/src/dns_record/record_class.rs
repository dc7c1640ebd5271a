use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordClass {
    #[default]
    IN,
    CS,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

impl RecordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CS => "CS",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
            RecordClass::NONE => "NONE",
            RecordClass::ANY => "ANY",
            RecordClass::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordClass::IN => 1,
            RecordClass::CS => 2,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::NONE => 254,
            RecordClass::ANY => 255,
            RecordClass::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordClass::IN,
            2 => RecordClass::CS,
            3 => RecordClass::CH,
            4 => RecordClass::HS,
            254 => RecordClass::NONE,
            255 => RecordClass::ANY,
            other => RecordClass::Unknown(other),
        }
    }
}

impl From<u16> for RecordClass {
    fn from(code: u16) -> Self {
        Self::from_u16(code)
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordClass::Unknown(code) => write!(f, "CLASS{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for RecordClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if let Some(code) = upper.strip_prefix("CLASS") {
            return code
                .parse::<u16>()
                .map(RecordClass::from_u16)
                .map_err(|_| DomainError::InvalidRecordClass(s.to_string()));
        }
        match upper.as_str() {
            "IN" | "INET" => Ok(RecordClass::IN),
            "CS" => Ok(RecordClass::CS),
            "CH" | "CHAOS" => Ok(RecordClass::CH),
            "HS" | "HESIOD" => Ok(RecordClass::HS),
            "NONE" => Ok(RecordClass::NONE),
            "ANY" | "*" => Ok(RecordClass::ANY),
            _ => Err(DomainError::InvalidRecordClass(s.to_string())),
        }
    }
}
