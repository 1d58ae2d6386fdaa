//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random, hex, HMAC-SHA256, Base64)
//! - Password hashing (Argon2id)
//! - Request header parsing (bearer tokens, client IP)

pub mod crypto;
pub mod header;
pub mod password;
