//! pr20 rules engine library.
//!
//! Application layer over the `pr20-domain` rules.
//!
//! ## Structure
//!
//! - `use_cases/` - Skill checks, the character builder and sheet edits
//! - `infrastructure/` - Port traits plus adapters that need no host
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
