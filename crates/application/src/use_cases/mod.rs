pub mod resolve;

pub use resolve::{Lookup, LookupRequest, ResolveNameUseCase};
