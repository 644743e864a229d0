//! Integration tests for reinhardt-staff-toolbar crate
//!
//! Covers configuration loading, rendering of the configured tree and the
//! process-wide toolbar root.

// Test modules organized by category
pub mod common {
	pub mod fixtures;
	pub mod objects;
}

mod integration {
	mod global_root;
	mod registration;
	mod rendering;
}

// Re-export common test utilities for convenience
pub use common::{fixtures::*, objects::*};
