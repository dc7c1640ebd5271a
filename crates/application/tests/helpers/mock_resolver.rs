#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_resolv_application::ports::DnsResolver;
use ferrous_resolv_domain::{
    DnsMessage, DnsQueryOptions, DomainName, Header, Question, RecordClass, RecordType,
    ResolveError, ResponseCode,
};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub name: DomainName,
    pub record_type: RecordType,
    pub record_class: RecordClass,
    pub options: DnsQueryOptions,
}

/// Answers every question with a fixed RCODE, or fails with a fixed error.
#[derive(Clone)]
pub struct MockDnsResolver {
    rcode: ResponseCode,
    error: Option<ResolveError>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            rcode: ResponseCode::NoError,
            error: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_rcode(mut self, rcode: ResponseCode) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn failing(mut self, error: ResolveError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        name: &DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        options: &DnsQueryOptions,
        cancel: &CancellationToken,
    ) -> Result<DnsMessage, ResolveError> {
        self.calls.lock().unwrap().push(RecordedCall {
            name: name.clone(),
            record_type,
            record_class,
            options: options.clone(),
        });

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let query = DnsMessage::new(Header {
            id: 1,
            recursion_desired: options.recursion_desired,
            ..Header::default()
        })
        .with_question(Question::new(name.clone(), record_type, record_class));

        Ok(DnsMessage::response_to(&query).with_response_code(self.rcode))
    }
}
