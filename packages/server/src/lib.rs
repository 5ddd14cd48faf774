//! Multi-room chat server library.
//!
//! In-memory user and room registries, a chat service facade over them, and
//! an HTTP dispatch layer speaking a plaintext comma-delimited encoding.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
