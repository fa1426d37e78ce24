//! Access-mode conformance matrix through the public facade
//!
//! ```bash
//! cargo test --test access_matrix
//! ```

#[path = "../common/mod.rs"]
mod common;

mod array;
mod instance_field;
mod lookup;
mod properties;
mod runner;
mod static_field;
mod unsupported;
