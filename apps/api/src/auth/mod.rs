//! Authentication: token claims and codec, caller identity, password hashing.

pub mod claims;
pub mod identity;
pub mod password;
pub mod token;
