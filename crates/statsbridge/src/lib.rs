//! Top-level facade crate for statsbridge.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use statsbridge_core::*;
}

pub mod exporter {
    pub use statsbridge_exporter::*;
}
