//! # Deployer Test Suite
//!
//! Unified test crate for the relief treasury deployer.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── e2e_deployment.rs   # full pipeline runs against the dev chain
//!     └── failure_modes.rs    # abort paths and partial naming failure
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p deployer-tests
//! cargo test -p deployer-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
