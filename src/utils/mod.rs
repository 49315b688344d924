//! Shared utilities: error taxonomy, token signing and verification, and
//! password hashing.

pub mod errors;
pub mod jwt;
pub mod password;
