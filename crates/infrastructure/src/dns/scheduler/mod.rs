pub mod candidate;
pub mod failover;
pub mod parallel;
pub mod strategy;

pub use candidate::query_candidate;
pub use failover::FailoverStrategy;
pub use parallel::ParallelStrategy;
pub use strategy::{AttemptScheduler, QueryContext, Strategy};
