use thiserror::Error;

/// Failures surfaced by the particle core.
///
/// Every variant leaves previously installed state untouched: callers can log
/// the error and keep rendering the last good generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticleError {
    /// A count or shape multiplier outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// GPU context or shader stage not usable on this host.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// The particle arrays could not be allocated.
    #[error("could not allocate buffers for {count} particles")]
    Allocation { count: usize },
    /// A startup configuration value could not be parsed.
    #[error("bad config value for `{key}`: {value:?}")]
    Config { key: String, value: String },
}

pub type Result<T, E = ParticleError> = std::result::Result<T, E>;
