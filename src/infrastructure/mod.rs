//! Infrastructure Layer
//!
//! Host-environment components the gate runs inside.

pub mod document;

pub use document::{Document, DocumentError, ReadyState};
