//! Business logic services for admin.
//!
//! # Services
//!
//! - `console` - Task owning the users and roles console

pub mod console;

pub use console::ConsoleHandle;
