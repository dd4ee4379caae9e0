//! # Domain Layer
//!
//! Pure authentication logic: certificate fingerprinting and the
//! accept/reject outcome types. No I/O.

pub mod entities;
pub mod errors;
pub mod fingerprint;
