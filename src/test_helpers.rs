// SPDX-License-Identifier: CC0-1.0

//! Internal helper functions for unit tests
//!
//!

/// Decodes a hex string, panicking on malformed input.
pub fn hex_bytes(s: &str) -> Vec<u8> { hex::decode(s).unwrap() }

/// Installs a `tracing` subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
