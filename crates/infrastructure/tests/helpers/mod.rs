#![allow(dead_code)]
pub mod builders;
pub mod dns_server_mock;
pub mod scripted_exchanger;

pub use builders::*;
pub use dns_server_mock::{Behavior, MockDnsServer};
pub use scripted_exchanger::{ScriptedExchanger, Step};
