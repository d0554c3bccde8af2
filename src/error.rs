//! Error taxonomy for the dashboard service.
//!
//! Failures are split by where they occur: establishing the store
//! connection (fatal at startup), running a query (recoverable per
//! refresh), and shaping rows into view artifacts (recoverable per
//! refresh). The refresh loop itself never dies on the latter two.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VitalboardError>;

#[derive(Debug, Error)]
pub enum VitalboardError {
    #[error("connection failure: {0}")]
    Connection(String),

    #[error("query failure: {0}")]
    Query(String),

    #[error("transform failure: {0}")]
    Transform(String),
}

/// Serializable tag for the view model, so the renderer can
/// distinguish failure classes without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    Query,
    Transform,
}

impl VitalboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VitalboardError::Connection(_) => ErrorKind::Connection,
            VitalboardError::Query(_) => ErrorKind::Query,
            VitalboardError::Transform(_) => ErrorKind::Transform,
        }
    }
}
