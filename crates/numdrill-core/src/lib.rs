//! numdrill-core — problem generation, answer validation, and scoring.
//!
//! This crate holds everything with real logic in a timed arithmetic drill:
//! the weighted operation table, operand synthesis, tolerance-based answer
//! checking, and the session counters a controller keeps between rounds.
//! It performs no terminal I/O.

pub mod config;
pub mod error;
pub mod generator;
pub mod operation;
pub mod problem;
pub mod report;
pub mod session;
pub mod validator;

pub use error::{DrillError, InputError, ProblemError};
pub use generator::Generator;
pub use operation::{Operation, OperationKind};
pub use problem::{Problem, Slot};
pub use validator::{validate, ValidationResult, Validator};
