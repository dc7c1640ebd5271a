use crate::errors::DomainError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_WIRE_LEN: usize = 255;

/// An absolute domain name held as a sequence of raw labels.
///
/// Comparison and hashing ignore ASCII case, so `Example.COM` and
/// `example.com.` are the same name. The root name has no labels.
#[derive(Clone, Default)]
pub struct DomainName {
    labels: Vec<Box<[u8]>>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Builds a name from raw labels, enforcing the RFC 1035 length limits.
    pub fn from_labels<I, L>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut out = Vec::new();
        let mut wire_len = 1;
        for label in labels {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName("empty label".into()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label of {} bytes exceeds {} bytes",
                    label.len(),
                    MAX_LABEL_LEN
                )));
            }
            wire_len += label.len() + 1;
            if wire_len > MAX_NAME_WIRE_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "name exceeds {} bytes in wire form",
                    MAX_NAME_WIRE_LEN
                )));
            }
            out.push(Box::from(label));
        }
        Ok(Self { labels: out })
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(|l| &l[..])
    }

    /// Length of the uncompressed wire encoding, terminating zero included.
    pub fn wire_len(&self) -> usize {
        1 + self.labels.iter().map(|l| l.len() + 1).sum::<usize>()
    }

    /// True if `self` equals `parent` or lies below it.
    pub fn is_subdomain_of(&self, parent: &DomainName) -> bool {
        if parent.labels.len() > self.labels.len() {
            return false;
        }
        let offset = self.labels.len() - parent.labels.len();
        self.labels[offset..]
            .iter()
            .zip(parent.labels.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    pub fn to_lowercase(&self) -> Self {
        Self {
            labels: self
                .labels
                .iter()
                .map(|l| l.to_ascii_lowercase().into_boxed_slice())
                .collect(),
        }
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for DomainName {}

impl Hash for DomainName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.labels.len());
        for label in &self.labels {
            state.write_u8(label.len() as u8);
            for b in label.iter() {
                state.write_u8(b.to_ascii_lowercase());
            }
        }
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let mut labels: Vec<Vec<u8>> = Vec::new();
        let mut current = Vec::new();
        let mut chars = s.bytes().peekable();

        while let Some(b) = chars.next() {
            match b {
                b'.' => {
                    if current.is_empty() {
                        return Err(DomainError::InvalidDomainName(format!(
                            "empty label in '{}'",
                            s
                        )));
                    }
                    labels.push(std::mem::take(&mut current));
                }
                b'\\' => {
                    let first = chars.next().ok_or_else(|| {
                        DomainError::InvalidDomainName(format!("dangling escape in '{}'", s))
                    })?;
                    if first.is_ascii_digit() {
                        let mut value = u32::from(first - b'0');
                        for _ in 0..2 {
                            match chars.next() {
                                Some(d) if d.is_ascii_digit() => {
                                    value = value * 10 + u32::from(d - b'0');
                                }
                                _ => {
                                    return Err(DomainError::InvalidDomainName(format!(
                                        "bad \\DDD escape in '{}'",
                                        s
                                    )))
                                }
                            }
                        }
                        let byte = u8::try_from(value).map_err(|_| {
                            DomainError::InvalidDomainName(format!(
                                "escape value {} out of range in '{}'",
                                value, s
                            ))
                        })?;
                        current.push(byte);
                    } else {
                        current.push(first);
                    }
                }
                _ => current.push(b),
            }
        }

        if !current.is_empty() {
            labels.push(current);
        }

        Self::from_labels(labels)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for label in &self.labels {
            for &b in label.iter() {
                match b {
                    b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x21..=0x7e => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainName({})", self)
    }
}
