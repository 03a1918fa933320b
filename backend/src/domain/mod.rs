//! Core domain model for the exercise tracker.
//!
//! The domain layer is transport and storage agnostic. Driving ports
//! ([`ports::UserRegistry`], [`ports::ExerciseLedger`]) describe the
//! use-cases exposed to inbound adapters; the driven port
//! ([`ports::TrackerStore`]) describes what the domain needs from
//! persistence. Services in [`registry`] and [`ledger`] implement the
//! driving ports on top of any store.

pub mod error;
pub mod exercise;
pub mod ledger;
pub mod log_window;
pub mod ports;
pub mod registry;
pub mod trace_id;
pub mod user;

pub use error::{Error, ErrorCode};
pub use exercise::{Description, DurationMinutes, Exercise, ExerciseDraft, ExerciseValidationError};
pub use ledger::LedgerService;
pub use log_window::LogWindow;
pub use registry::RegistryService;
pub use trace_id::{TRACE_ID_HEADER, TraceId};
pub use user::{User, UserId, UserValidationError, Username};
