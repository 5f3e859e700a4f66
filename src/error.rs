// src/error.rs - Typed errors for site resolution and metric derivation

use thiserror::Error;

/// Errors raised at the boundary of each operation. None of these are
/// transient: every operation is a pure computation over in-memory data,
/// so callers surface them rather than retry.
#[derive(Error, Debug)]
pub enum IcestupaError {
    #[error("unknown site '{0}'")]
    UnknownSite(String),

    #[error("unknown spray mode '{mode}' for site '{site}'")]
    UnknownSprayMode { site: String, mode: String },

    #[error("invalid fountain schedule: {0}")]
    InvalidSchedule(String),

    #[error("simulation output table has no rows")]
    EmptyTable,

    #[error("missing field '{0}' in simulation output")]
    MissingField(String),

    #[error("malformed {what}: {details}")]
    Malformed { what: &'static str, details: String },
}

pub type Result<T> = std::result::Result<T, IcestupaError>;
