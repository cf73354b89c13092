//! Infrastructure - ports and the adapters that need no host.

pub mod dice;
pub mod memory;
pub mod ports;
pub mod random;
pub mod settings;
