//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns live here; authentication is an
//! extractor in the HTTP adapter rather than middleware so handlers can opt in.

pub mod trace;

pub use trace::Trace;
