//! Keygate Shared Types
//!
//! This crate contains the wire types shared between the Keygate server and
//! the client session library.

pub mod types;

pub use types::*;
