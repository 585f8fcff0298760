//! Roster Core - users and roles console state.
//!
//! This crate holds everything the admin panel needs to manage users and
//! roles in memory:
//! - `admin` - axum server rendering the console and exposing the intent API
//! - `cli` - seed dump and intent script replay
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no async,
//! no logging. Every mutation goes through [`AdminConsole::apply`], which
//! consumes one [`Intent`] and reports an [`Effect`].
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email and status enums
//! - [`models`] - `User` and `Role` records
//! - [`allocator`] - Monotonic identifier allocation
//! - [`store`] - Ordered in-memory record store (upsert/delete by id)
//! - [`form`] - Single-draft form state controller
//! - [`router`] - Active screen selection
//! - [`console`] - The state-owning reducer tying it all together
//! - [`seed`] - Mock users and roles
//! - [`error`] - Console error kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod allocator;
pub mod console;
pub mod error;
pub mod form;
pub mod models;
pub mod router;
pub mod seed;
pub mod store;
pub mod types;

pub use console::{AdminConsole, ConsoleSnapshot, Effect, Intent, OrphanedRole};
pub use error::{ConsoleError, ValidationError, ValidationMode};
pub use form::{Draft, DraftKind, FieldValue, FormController};
pub use models::{Role, User, parse_permissions};
pub use router::ViewRouter;
pub use store::{Record, RecordStore, Upserted};
pub use types::*;
