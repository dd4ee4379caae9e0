//! # Device Hub Test Suite
//!
//! Unified test crate for flows that span subsystem boundaries:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── authentication.rs   # Chain-scan handshakes end to end
//!     ├── classification.rs   # Taxonomy totality and decode coverage
//!     └── correlation_flows.rs # Request/response lifecycle under load
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hub-tests
//!
//! # By category
//! cargo test -p hub-tests integration::authentication
//! cargo test -p hub-tests integration::classification
//! cargo test -p hub-tests integration::correlation_flows
//! ```

pub mod integration;
