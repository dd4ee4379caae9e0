//! # Transport Decode Paths
//!
//! Pure mappings from protocol-specific frame descriptors to
//! taxonomy-tagged [`ClassifiedMessage`]s.
//!
//! Socket lifecycle, TLS termination, and wire parsing stay in the
//! transport adapters proper; what lives here is the one decision both
//! adapters must make identically: *which message kind is this frame*.
//! Neither adapter may re-derive the stimulus/bookkeeping split — that is
//! the taxonomy's job — and neither may map an unknown frame to a default
//! kind. Unknown frames are hard errors.

pub mod coap;
pub mod errors;
pub mod mqtt;

pub use errors::TransportError;
