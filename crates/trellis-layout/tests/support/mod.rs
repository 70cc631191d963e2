//! Test support utilities for Trellis layout integration tests
//!
//! - TestChild: a leaf with a fixed intrinsic size that records its layout calls
//! - SlotChild: a leaf that reports its arranged rectangle through a shared slot
//! - Assertions: float-tolerant comparisons for sizes and rectangles
//! - init_tracing: route layout traces to the test output (`RUST_LOG=trellis_layout=trace`)

#![allow(dead_code)]


pub use assertions::*;
pub use test_child::{SlotChild, TestChild};

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
