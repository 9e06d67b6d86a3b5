//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for menu items, temperatures and statuses
pub mod autocomplete;
