/// Allow normal error handling from structs
pub use super::Result;
/// Validation plumbing used by every model
pub use super::{Binary, Formats, Validate, ValidationContext};

/// Security context for pods of a tenant component
mod securitycontext;
pub use self::securitycontext::{FsGroupChangePolicy, SecurityContext};

/// Prometheus configuration of a tenant
mod prometheus;
pub use self::prometheus::PrometheusConfiguration;
