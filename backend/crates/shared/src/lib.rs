//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate holds the vocabulary every other crate agrees on:
//! - The unified error type and its HTTP classification
//! - Typed identifiers
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
