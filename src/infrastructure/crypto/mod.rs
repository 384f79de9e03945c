//! Credential hashing

pub mod password;
