pub mod message_builder;
pub mod record_type_map;
pub mod response_validator;
pub mod wire_codec;

pub use message_builder::{MessageBuilder, QueryIdGenerator};
pub use record_type_map::RecordTypeMapper;
pub use response_validator::{ResponseValidator, Validation};
pub use wire_codec::WireCodec;
