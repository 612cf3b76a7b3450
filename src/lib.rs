// ===============================
// src/lib.rs
// ===============================
pub mod api;
pub mod checksum;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod params;
pub mod response;
pub mod transport;

pub use api::{History, MemberQueryType, MemberRole, MsgType, Room};
pub use client::YunxinClient;
pub use config::{ClientConfig, Credentials};
pub use error::{ErrorKind, Result, TransportError, YunxinError};
pub use params::{compose, ParamValue, ParameterSet};
pub use response::{validate, ResponseEnvelope};
