//! CLI command implementations.

pub mod attack;
pub mod login;
pub mod map;
