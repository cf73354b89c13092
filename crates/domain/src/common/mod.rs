//! Common utility functions shared by the rules and the form boundary.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Never fail on numbers** - malformed input resolves to a bound, not an error

pub mod number;

pub use number::{clamp_number, clamp_to, parse_number};
