//! Error types for the drill core.
//!
//! Wrong answers are not errors: they come back as an ordinary
//! [`ValidationResult`](crate::validator::ValidationResult). Only malformed
//! input, broken configuration, and inconsistent problems are represented here.

use serde::Serialize;
use thiserror::Error;

use crate::operation::OperationKind;
use crate::problem::Slot;

/// Errors raised when an operation table or drill configuration is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrillError {
    /// No operations to choose from.
    #[error("operation table is empty")]
    EmptyOperationTable,

    /// An operation with zero selection weight.
    #[error("operation '{kind}' has zero weight")]
    ZeroWeight { kind: OperationKind },

    /// Operand parameters that cannot produce a clean problem.
    #[error("invalid parameters for '{kind}': {detail}")]
    InvalidRange { kind: OperationKind, detail: String },

    /// Answer tolerance that is zero, negative, or not finite.
    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    /// A session that would end before it starts.
    #[error("session duration must be at least one second")]
    ZeroDuration,
}

/// A problem whose fields do not describe a valid equation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// The operands do not reproduce the result.
    #[error("{a} {symbol} {b} does not equal {result}")]
    Inconsistent {
        a: i64,
        b: i64,
        result: i64,
        symbol: &'static str,
    },

    /// The slot may not be hidden for this operation.
    #[error("'{slot}' cannot be the missing term of a {kind} problem")]
    IllegalSlot { kind: OperationKind, slot: Slot },
}

/// A raw answer that could not be read as a number.
///
/// The display strings are the messages shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "input", rename_all = "snake_case")]
pub enum InputError {
    /// Blank or whitespace-only input.
    #[error("Please enter an answer")]
    Empty,

    /// Input that is not a finite number.
    #[error("Please enter a valid number")]
    NotANumber(String),
}
