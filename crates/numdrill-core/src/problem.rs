//! Generated problem instances and their text rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;
use crate::operation::{OperationKind, Operands};

/// Placeholder shown in place of the missing term.
pub const BLANK: &str = "_";

/// Which term of the equation the learner must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    A,
    B,
    Result,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "a"),
            Slot::B => write!(f, "b"),
            Slot::Result => write!(f, "result"),
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Slot::A),
            "b" => Ok(Slot::B),
            "result" | "r" | "c" => Ok(Slot::Result),
            other => Err(format!("unknown slot: {other}")),
        }
    }
}

/// One equation with a single hidden term.
///
/// Fields are private: a `Problem` is immutable once built, and every
/// constructor guarantees that `a op b == result` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    a: i64,
    b: i64,
    result: i64,
    operation: OperationKind,
    missing: Slot,
}

impl Problem {
    /// Build a problem from explicit values, checking the equation and the slot.
    pub fn new(
        operation: OperationKind,
        a: i64,
        b: i64,
        result: i64,
        missing: Slot,
    ) -> Result<Self, ProblemError> {
        if !operation.slots().contains(&missing) {
            return Err(ProblemError::IllegalSlot {
                kind: operation,
                slot: missing,
            });
        }
        if !operation.holds(a, b, result) {
            return Err(ProblemError::Inconsistent {
                a,
                b,
                result,
                symbol: operation.symbol(),
            });
        }
        Ok(Self {
            a,
            b,
            result,
            operation,
            missing,
        })
    }

    /// Assemble from synthesized operands. The synthesis rules establish the
    /// invariant; this only re-asserts it in debug builds.
    pub(crate) fn from_operands(operation: OperationKind, ops: Operands, missing: Slot) -> Self {
        debug_assert!(
            operation.holds(ops.a, ops.b, ops.result),
            "synthesis produced an invalid {operation} problem: {ops:?}"
        );
        debug_assert!(operation.slots().contains(&missing));
        Self {
            a: ops.a,
            b: ops.b,
            result: ops.result,
            operation,
            missing,
        }
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn result(&self) -> i64 {
        self.result
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn missing(&self) -> Slot {
        self.missing
    }

    /// The value of the hidden term.
    pub fn expected(&self) -> i64 {
        self.value(self.missing)
    }

    pub fn value(&self, slot: Slot) -> i64 {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
            Slot::Result => self.result,
        }
    }

    /// Render the equation with `placeholder` in the missing slot.
    pub fn render(&self, placeholder: &str) -> String {
        let term = |slot: Slot| {
            if slot == self.missing {
                placeholder.to_string()
            } else {
                self.value(slot).to_string()
            }
        };
        let (a, b, result) = (term(Slot::A), term(Slot::B), term(Slot::Result));

        match self.operation {
            OperationKind::Power => format!("{a}^{b} = {result}"),
            OperationKind::Root => format!("{}{a} = {result}", radical(self.b)),
            kind => format!("{a} {} {b} = {result}", kind.symbol()),
        }
    }
}

fn radical(degree: i64) -> String {
    match degree {
        2 => "√".to_string(),
        3 => "∛".to_string(),
        4 => "∜".to_string(),
        d => format!("{d}√"),
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(BLANK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_consistent_problem() {
        let p = Problem::new(OperationKind::Add, 3, 4, 7, Slot::Result).unwrap();
        assert_eq!(p.expected(), 7);
        assert_eq!(p.to_string(), "3 + 4 = _");
    }

    #[test]
    fn new_rejects_inconsistent_problem() {
        let err = Problem::new(OperationKind::Divide, 7, 2, 3, Slot::A).unwrap_err();
        assert_eq!(
            err,
            ProblemError::Inconsistent {
                a: 7,
                b: 2,
                result: 3,
                symbol: "÷"
            }
        );
        assert_eq!(err.to_string(), "7 ÷ 2 does not equal 3");
    }

    #[test]
    fn new_rejects_hidden_root_degree() {
        let err = Problem::new(OperationKind::Root, 49, 2, 7, Slot::B).unwrap_err();
        assert!(matches!(err, ProblemError::IllegalSlot { .. }));
    }

    #[test]
    fn render_each_slot() {
        let p = |missing| Problem::new(OperationKind::Subtract, 9, 4, 5, missing).unwrap();
        assert_eq!(p(Slot::A).to_string(), "_ − 4 = 5");
        assert_eq!(p(Slot::B).to_string(), "9 − _ = 5");
        assert_eq!(p(Slot::Result).to_string(), "9 − 4 = _");
    }

    #[test]
    fn render_power_and_root() {
        let pow = Problem::new(OperationKind::Power, 3, 4, 81, Slot::B).unwrap();
        assert_eq!(pow.to_string(), "3^_ = 81");

        let sq = Problem::new(OperationKind::Root, 49, 2, 7, Slot::A).unwrap();
        assert_eq!(sq.to_string(), "√_ = 7");
        let cube = Problem::new(OperationKind::Root, 27, 3, 3, Slot::Result).unwrap();
        assert_eq!(cube.to_string(), "∛27 = _");
        let fifth = Problem::new(OperationKind::Root, 32, 5, 2, Slot::Result).unwrap();
        assert_eq!(fifth.to_string(), "5√32 = _");
    }

    #[test]
    fn render_is_pure() {
        let p = Problem::new(OperationKind::Modulo, 17, 5, 2, Slot::Result).unwrap();
        assert_eq!(p.render("?"), "17 % 5 = ?");
        assert_eq!(p.render("?"), p.render("?"));
        assert_eq!(p.to_string(), p.to_string());
    }

    #[test]
    fn slot_parse() {
        assert_eq!("A".parse::<Slot>().unwrap(), Slot::A);
        assert_eq!("result".parse::<Slot>().unwrap(), Slot::Result);
        assert!("d".parse::<Slot>().is_err());
    }
}
