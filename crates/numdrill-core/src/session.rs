//! Running score and countdown for one drill session.
//!
//! The controller owns a [`Session`] and a [`Countdown`]; generation and
//! validation never touch them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::operation::OperationKind;
use crate::problem::Problem;
use crate::validator::ValidationResult;

/// What the controller should do after recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input was not a number: keep the same problem.
    Retry,
    /// Correct: retire the problem.
    Correct,
    /// Wrong: retire the problem.
    Incorrect,
}

/// Correct and incorrect counts for one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub incorrect: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Aggregate counters for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub correct: u32,
    pub incorrect: u32,
    #[serde(default)]
    pub by_operation: BTreeMap<OperationKind, Tally>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one verdict into the counters. Input errors change nothing.
    pub fn record(&mut self, problem: &Problem, verdict: &ValidationResult) -> Outcome {
        if verdict.is_input_error() {
            return Outcome::Retry;
        }

        let tally = self.by_operation.entry(problem.operation()).or_default();
        if verdict.is_correct {
            self.score += u64::from(verdict.score_delta);
            self.correct += 1;
            tally.correct += 1;
            Outcome::Correct
        } else {
            self.incorrect += 1;
            tally.incorrect += 1;
            Outcome::Incorrect
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Percentage of answers that were correct, rounded; 0 before any answer.
    pub fn accuracy(&self) -> u32 {
        match self.total() {
            0 => 0,
            total => (f64::from(self.correct) * 100.0 / f64::from(total)).round() as u32,
        }
    }
}

/// State reported by a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running,
    /// Time is low.
    Warning,
    Expired,
}

/// Whole-second countdown, ticked once per second by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    warning_threshold: u32,
}

impl Countdown {
    pub fn new(duration_secs: u32, warning_threshold: u32) -> Self {
        Self {
            remaining: duration_secs,
            warning_threshold,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn status(&self) -> Tick {
        if self.remaining == 0 {
            Tick::Expired
        } else if self.remaining <= self.warning_threshold {
            Tick::Warning
        } else {
            Tick::Running
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Tick {
        self.remaining = self.remaining.saturating_sub(1);
        self.status()
    }
}
