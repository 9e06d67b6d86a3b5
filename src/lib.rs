//! `order-desk` - A Discord ordering desk for a small restaurant
//!
//! Customers browse the menu and build a cart through slash commands, then submit
//! it as an order for their table. The kitchen follows a live dashboard that
//! re-fetches every order whenever one is submitted or changes status.

#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    // poise-generated command functions carry no docs, hence warn
    missing_docs,

    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::needless_pass_by_value,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    clippy::enum_glob_use,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,

    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Discord bot interface - commands, handlers, and bot context
pub mod bot;
/// Configuration management for the database and the seed menu
pub mod config;
/// Core business logic - framework-agnostic cart, order, feed and view operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
