//! Error types for span-engine input normalization.
//!
//! [`crate::duration::compute`] itself is total and never fails; these errors
//! only arise while turning raw form input into instants.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid hourly rate: {0}")]
    InvalidRate(String),
}

pub type Result<T> = std::result::Result<T, SpanError>;
