//! Provider-agnostic data types.

pub mod config;
pub mod job;

pub use config::{
    AlertsConfig, BoardTarget, CompanyTarget, InterestProfile, PortalTarget, TargetConfig, Window,
};
pub use job::{JobRecord, RawPayload, Source};
