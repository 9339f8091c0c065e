//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed dashboard session tokens.

pub mod jwt;
pub mod password;
