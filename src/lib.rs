//! Housing cost estimates for event RSVP forms.

pub mod config;
pub mod error;
pub mod pricing;

pub use error::{EstimateError, Result};
