//! Shared protocol types for exam-portal
//!
//! Defines the JSON payloads served by the subjects-by-department endpoint
//! and the URL the browser layer requests them from.

pub mod endpoint;
pub mod subjects;

pub use endpoint::*;
pub use subjects::*;
