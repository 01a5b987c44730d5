//! # survey-core
//!
//! Core types and the submission normalization routine for the want-survey
//! service.
//!
//! The API server and the form client both depend on this crate: the client
//! builds a [`SubmissionPayload`], the server turns whatever JSON arrives into
//! a [`NormalizedRecord`] with [`normalize`].

pub mod coerce;
pub mod defaults;
pub mod error;
pub mod models;
pub mod sanitize;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use sanitize::{normalize, validate};
