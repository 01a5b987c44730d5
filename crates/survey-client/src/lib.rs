//! # survey-client
//!
//! The survey form as a library: a controlled [`FormState`], the local guards
//! that run before any network call, and a [`SurveyForm`] that submits over a
//! pluggable [`Transport`].

pub mod form;
pub mod transport;

pub use form::{Field, FormError, FormState, FormView, SurveyForm, WantCounter};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
