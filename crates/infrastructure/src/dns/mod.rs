pub mod forwarding;
pub mod resolver;
pub mod scheduler;
pub mod transport;

pub use forwarding::{
    MessageBuilder, QueryIdGenerator, RecordTypeMapper, ResponseValidator, Validation, WireCodec,
};
pub use resolver::DnsClient;
pub use scheduler::{AttemptScheduler, FailoverStrategy, ParallelStrategy};
pub use transport::{
    ExchangeRequest, NetworkExchanger, QueryExchanger, TransportKind, TransportResponse,
};
