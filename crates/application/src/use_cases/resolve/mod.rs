mod resolve_name;

pub use resolve_name::{Lookup, LookupRequest, ResolveNameUseCase};
