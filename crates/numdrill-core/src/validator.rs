//! Answer checking with numeric tolerance.

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, InputError};
use crate::operation::OperationKind;
use crate::problem::{Problem, Slot};

/// Absolute tolerance for accepting an answer.
pub const DEFAULT_TOLERANCE: f64 = 0.0001;
/// Decimal places shown for non-integral expected values.
pub const DEFAULT_PRECISION: usize = 2;
/// Score awarded per correct answer.
pub const DEFAULT_POINTS: u32 = 10;

/// Verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// The answer matched. Always `false` when `input_error` is set.
    pub is_correct: bool,
    /// The hidden value.
    pub expected: f64,
    /// `expected` formatted for display.
    pub expected_display: String,
    /// Set when the raw input was not a number; the problem stays active.
    pub input_error: Option<InputError>,
    /// Points to add to the running score.
    pub score_delta: u32,
}

impl ValidationResult {
    pub fn is_input_error(&self) -> bool {
        self.input_error.is_some()
    }
}

/// Checks raw answers against problems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub tolerance: f64,
    pub precision: usize,
    pub points_per_correct: u32,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            precision: DEFAULT_PRECISION,
            points_per_correct: DEFAULT_POINTS,
        }
    }
}

impl Validator {
    pub fn new(
        tolerance: f64,
        precision: usize,
        points_per_correct: u32,
    ) -> Result<Self, DrillError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(DrillError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            precision,
            points_per_correct,
        })
    }

    /// Validate `raw` against the problem's missing term.
    pub fn validate(&self, problem: &Problem, raw: &str) -> ValidationResult {
        let expected = problem.expected() as f64;
        let expected_display = format_number(expected, self.precision);

        let answer = match parse_answer(raw) {
            Ok(answer) => answer,
            Err(e) => {
                return ValidationResult {
                    is_correct: false,
                    expected,
                    expected_display,
                    input_error: Some(e),
                    score_delta: 0,
                }
            }
        };

        let is_correct =
            self.within(answer, expected) || self.equivalent(problem, answer, expected);
        ValidationResult {
            is_correct,
            expected,
            expected_display,
            input_error: None,
            score_delta: if is_correct { self.points_per_correct } else { 0 },
        }
    }

    fn within(&self, answer: f64, expected: f64) -> bool {
        (answer - expected).abs() < self.tolerance
    }

    /// Operation-specific equivalents for modulo: an answer whose remainder
    /// against the modulus matches, or, when an operand is hidden, any other
    /// integer that makes the equation true (`_ % 5 = 2` accepts 7, 12, 17;
    /// `17 % _ = 2` accepts 3, 5, 15).
    fn equivalent(&self, problem: &Problem, answer: f64, expected: f64) -> bool {
        if problem.operation() != OperationKind::Modulo {
            return false;
        }

        let modulus = problem.b() as f64;
        let derived = if expected.fract() == 0.0 {
            answer.round().rem_euclid(modulus)
        } else {
            answer.rem_euclid(modulus)
        };
        if self.within(derived, expected) {
            return true;
        }

        if !self.within(answer, answer.round()) {
            return false;
        }
        let candidate = answer.round() as i64;
        match problem.missing() {
            Slot::A => OperationKind::Modulo.holds(candidate, problem.b(), problem.result()),
            Slot::B => {
                candidate > problem.result()
                    && OperationKind::Modulo.holds(problem.a(), candidate, problem.result())
            }
            Slot::Result => false,
        }
    }
}

/// Validate with the default tolerance, precision, and points.
pub fn validate(problem: &Problem, raw: &str) -> ValidationResult {
    Validator::default().validate(problem, raw)
}

/// Parse a raw answer. Surrounding whitespace is ignored; infinities and NaN
/// are not numbers.
pub fn parse_answer(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::NotANumber(trimmed.to_string())),
    }
}

/// Integers print without decimals; anything else is rounded to `precision` places.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.precision$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(kind: OperationKind, a: i64, b: i64, result: i64, missing: Slot) -> Problem {
        Problem::new(kind, a, b, result, missing).unwrap()
    }

    #[test]
    fn exact_answer_is_correct() {
        let p = problem(OperationKind::Add, 12, 30, 42, Slot::Result);
        let v = validate(&p, "42");
        assert!(v.is_correct);
        assert_eq!(v.expected, 42.0);
        assert_eq!(v.score_delta, DEFAULT_POINTS);
        assert!(v.input_error.is_none());
    }

    #[test]
    fn tolerance_boundary() {
        let p = problem(OperationKind::Add, 12, 30, 42, Slot::Result);
        assert!(validate(&p, "42.00005").is_correct);
        assert!(validate(&p, "41.99995").is_correct);
        let wrong = validate(&p, "42.01");
        assert!(!wrong.is_correct);
        assert_eq!(wrong.score_delta, 0);
        assert_eq!(wrong.expected_display, "42");
    }

    #[test]
    fn whitespace_is_trimmed() {
        let p = problem(OperationKind::Multiply, 6, 7, 42, Slot::B);
        assert!(validate(&p, "  7\n").is_correct);
    }

    #[test]
    fn non_numeric_input_is_distinct() {
        let p = problem(OperationKind::Add, 1, 2, 3, Slot::Result);
        let v = validate(&p, "abc");
        assert!(!v.is_correct);
        assert!(v.is_input_error());
        assert_eq!(v.input_error, Some(InputError::NotANumber("abc".into())));
        assert_eq!(v.score_delta, 0);

        assert_eq!(validate(&p, "   ").input_error, Some(InputError::Empty));
        assert!(validate(&p, "NaN").is_input_error());
        assert!(validate(&p, "inf").is_input_error());
    }

    #[test]
    fn input_error_messages() {
        assert_eq!(InputError::Empty.to_string(), "Please enter an answer");
        assert_eq!(
            InputError::NotANumber("x".into()).to_string(),
            "Please enter a valid number"
        );
    }

    #[test]
    fn expected_tracks_missing_slot() {
        let p = problem(OperationKind::Divide, 56, 8, 7, Slot::A);
        assert!(validate(&p, "56").is_correct);
        let v = validate(&p, "7");
        assert!(!v.is_correct);
        assert_eq!(v.expected_display, "56");
    }

    #[test]
    fn modulo_equivalent_remainder() {
        let p = problem(OperationKind::Modulo, 17, 5, 2, Slot::Result);
        assert!(validate(&p, "2").is_correct);
        // 7 and 22 leave the same remainder against 5.
        assert!(validate(&p, "7").is_correct);
        assert!(validate(&p, "22").is_correct);
        assert!(validate(&p, "-3").is_correct);
        assert!(!validate(&p, "3").is_correct);
    }

    #[test]
    fn modulo_alternate_modulus() {
        let p = problem(OperationKind::Modulo, 17, 5, 2, Slot::B);
        assert!(validate(&p, "5").is_correct);
        assert!(validate(&p, "15").is_correct);
        // 17 leaves 2 against 3 as well.
        assert!(validate(&p, "3").is_correct);
        assert!(!validate(&p, "4").is_correct);
        // A modulus no larger than the remainder cannot leave it.
        assert!(!validate(&p, "1").is_correct);
    }

    #[test]
    fn modulo_alternate_dividend() {
        let p = problem(OperationKind::Modulo, 17, 5, 2, Slot::A);
        assert!(validate(&p, "17").is_correct);
        for other in ["2", "7", "12", "22", "-3"] {
            let v = validate(&p, other);
            assert!(v.is_correct, "{other} leaves 2 against 5");
            assert_eq!(v.score_delta, DEFAULT_POINTS);
        }
        assert!(!validate(&p, "18").is_correct);
        assert!(!validate(&p, "7.5").is_correct);
        assert_eq!(validate(&p, "18").expected_display, "17");
    }

    #[test]
    fn equivalence_only_for_modulo() {
        let p = problem(OperationKind::Add, 1, 1, 2, Slot::Result);
        assert!(!validate(&p, "7").is_correct);
    }

    #[test]
    fn custom_validator() {
        let strict = Validator::new(1e-9, 3, 5).unwrap();
        let p = problem(OperationKind::Root, 81, 2, 9, Slot::Result);
        assert!(!strict.validate(&p, "9.00005").is_correct);
        assert_eq!(strict.validate(&p, "9").score_delta, 5);
        assert!(matches!(
            Validator::new(0.0, 2, 10),
            Err(DrillError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn format_number_integral_and_fractional() {
        assert_eq!(format_number(7.0, 2), "7");
        assert_eq!(format_number(-3.0, 2), "-3");
        assert_eq!(format_number(10.0 / 3.0, 2), "3.33");
        assert_eq!(format_number(2.5, 2), "2.50");
        assert_eq!(format_number(2.0 / 3.0, 4), "0.6667");
    }
}
