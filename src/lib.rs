//! `tallybot` - the ledger core of a personal-finance chat bot
//!
//! This crate provides durable, validated storage for income/expense
//! transactions and a small debt register, with authorization enforced at the
//! store boundary. A framework-agnostic command layer parses the inbound
//! command surface and renders plain-text replies, so any messaging front end
//! can sit on top of it; the bundled binary is a local operator console.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
)]

/// Inbound command surface - parsing and dispatch for the chat commands
pub mod commands;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - ledger, debt book, and authorization policy
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
