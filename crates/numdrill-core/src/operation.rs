//! The arithmetic operations a drill can ask about.
//!
//! Each [`Operation`] pairs a selection weight with an [`OperandRule`]: a
//! tagged variant that carries only the parameters its kind needs and knows
//! how to synthesize operands that always form a clean, unambiguous problem.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::problem::Slot;

/// The seven arithmetic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Root,
    Modulo,
}

const ALL_SLOTS: [Slot; 3] = [Slot::A, Slot::B, Slot::Result];
// The root degree is part of the notation, never the question.
const ROOT_SLOTS: [Slot; 2] = [Slot::A, Slot::Result];

impl OperationKind {
    /// Every kind, in default table order.
    pub const ALL: [OperationKind; 7] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::Multiply,
        OperationKind::Divide,
        OperationKind::Power,
        OperationKind::Root,
        OperationKind::Modulo,
    ];

    /// The symbol used when rendering a problem.
    pub fn symbol(self) -> &'static str {
        match self {
            OperationKind::Add => "+",
            OperationKind::Subtract => "−",
            OperationKind::Multiply => "×",
            OperationKind::Divide => "÷",
            OperationKind::Power => "^",
            OperationKind::Root => "√",
            OperationKind::Modulo => "%",
        }
    }

    /// Lowercase name, as used in config files.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Subtract => "subtract",
            OperationKind::Multiply => "multiply",
            OperationKind::Divide => "divide",
            OperationKind::Power => "power",
            OperationKind::Root => "root",
            OperationKind::Modulo => "modulo",
        }
    }

    /// Slots that may be hidden for this kind.
    pub fn slots(self) -> &'static [Slot] {
        match self {
            OperationKind::Root => &ROOT_SLOTS,
            _ => &ALL_SLOTS,
        }
    }

    /// The operation's binary function.
    ///
    /// Root evaluates `a^(1/b)` and modulo the non-negative remainder, so the
    /// result may carry floating-point error for those kinds.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            OperationKind::Add => a + b,
            OperationKind::Subtract => a - b,
            OperationKind::Multiply => a * b,
            OperationKind::Divide => a / b,
            OperationKind::Power => a.powf(b),
            OperationKind::Root => a.powf(b.recip()),
            OperationKind::Modulo => a.rem_euclid(b),
        }
    }

    /// Exact integer check that `a op b == result`.
    pub fn holds(self, a: i64, b: i64, result: i64) -> bool {
        match self {
            OperationKind::Add => a.checked_add(b) == Some(result),
            OperationKind::Subtract => a.checked_sub(b) == Some(result),
            OperationKind::Multiply => a.checked_mul(b) == Some(result),
            OperationKind::Divide => b != 0 && b.checked_mul(result) == Some(a),
            OperationKind::Power => u32::try_from(b)
                .ok()
                .and_then(|exp| a.checked_pow(exp))
                .is_some_and(|v| v == result),
            OperationKind::Root => {
                result >= 0
                    && u32::try_from(b)
                        .ok()
                        .filter(|&degree| degree >= 1)
                        .and_then(|degree| result.checked_pow(degree))
                        .is_some_and(|v| v == a)
            }
            OperationKind::Modulo => b > 0 && a.rem_euclid(b) == result,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(OperationKind::Add),
            "subtract" | "sub" | "subtraction" | "-" | "−" => Ok(OperationKind::Subtract),
            "multiply" | "mul" | "multiplication" | "*" | "x" | "×" => {
                Ok(OperationKind::Multiply)
            }
            "divide" | "div" | "division" | "/" | "÷" => Ok(OperationKind::Divide),
            "power" | "pow" | "^" => Ok(OperationKind::Power),
            "root" | "sqrt" | "√" => Ok(OperationKind::Root),
            "modulo" | "mod" | "%" => Ok(OperationKind::Modulo),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

/// Operands synthesized for one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    pub a: i64,
    pub b: i64,
    pub result: i64,
}

/// Per-kind operand synthesis parameters. All ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OperandRule {
    /// `a` and `b` drawn independently.
    Add {
        #[serde(default = "one")]
        min: i64,
        #[serde(default = "fifty")]
        max: i64,
    },
    /// `a` drawn first, then `b` no larger than `a`, so the result is never negative.
    Subtract {
        #[serde(default = "one")]
        min: i64,
        #[serde(default = "hundred")]
        max: i64,
    },
    /// Small factors keep products human-scale.
    Multiply {
        #[serde(default = "one")]
        min: i64,
        #[serde(default = "twelve")]
        max: i64,
    },
    /// Divisor and quotient drawn first; the dividend is their product.
    Divide {
        #[serde(default = "ten")]
        max_divisor: i64,
        #[serde(default = "ten")]
        max_quotient: i64,
    },
    /// Small base and exponent; the result is computed directly.
    Power {
        #[serde(default = "two")]
        min_base: i64,
        #[serde(default = "six")]
        max_base: i64,
        #[serde(default = "two_u32")]
        min_exponent: u32,
        #[serde(default = "four_u32")]
        max_exponent: u32,
    },
    /// Result drawn first; the radicand is `result^degree`.
    Root {
        #[serde(default = "two_u32")]
        degree: u32,
        #[serde(default = "one")]
        min_result: i64,
        #[serde(default = "ten")]
        max_result: i64,
    },
    /// Modulus, remainder and multiplier drawn; the dividend is `b·k + r`.
    Modulo {
        #[serde(default = "two")]
        min_modulus: i64,
        #[serde(default = "eleven")]
        max_modulus: i64,
        #[serde(default = "ten")]
        max_multiplier: i64,
    },
}

fn one() -> i64 {
    1
}
fn two() -> i64 {
    2
}
fn six() -> i64 {
    6
}
fn ten() -> i64 {
    10
}
fn eleven() -> i64 {
    11
}
fn twelve() -> i64 {
    12
}
fn fifty() -> i64 {
    50
}
fn hundred() -> i64 {
    100
}
fn two_u32() -> u32 {
    2
}
fn four_u32() -> u32 {
    4
}

impl OperandRule {
    /// The standard rule for a kind.
    pub fn standard(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Add => OperandRule::Add { min: 1, max: 50 },
            OperationKind::Subtract => OperandRule::Subtract { min: 1, max: 100 },
            OperationKind::Multiply => OperandRule::Multiply { min: 1, max: 12 },
            OperationKind::Divide => OperandRule::Divide {
                max_divisor: 10,
                max_quotient: 10,
            },
            OperationKind::Power => OperandRule::Power {
                min_base: 2,
                max_base: 6,
                min_exponent: 2,
                max_exponent: 4,
            },
            OperationKind::Root => OperandRule::Root {
                degree: 2,
                min_result: 1,
                max_result: 10,
            },
            OperationKind::Modulo => OperandRule::Modulo {
                min_modulus: 2,
                max_modulus: 11,
                max_multiplier: 10,
            },
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            OperandRule::Add { .. } => OperationKind::Add,
            OperandRule::Subtract { .. } => OperationKind::Subtract,
            OperandRule::Multiply { .. } => OperationKind::Multiply,
            OperandRule::Divide { .. } => OperationKind::Divide,
            OperandRule::Power { .. } => OperationKind::Power,
            OperandRule::Root { .. } => OperationKind::Root,
            OperandRule::Modulo { .. } => OperationKind::Modulo,
        }
    }

    /// Check that every draw this rule can make yields a representable,
    /// unambiguous problem.
    pub fn check(&self) -> Result<(), DrillError> {
        let kind = self.kind();
        let invalid = |detail: String| Err(DrillError::InvalidRange { kind, detail });

        match *self {
            OperandRule::Add { min, max } | OperandRule::Subtract { min, max } => {
                if min < 0 || min > max {
                    return invalid(format!("need 0 <= min <= max, got {min}..={max}"));
                }
                if max.checked_add(max).is_none() {
                    return invalid(format!("max {max} overflows"));
                }
            }
            OperandRule::Multiply { min, max } => {
                // A zero factor would make the other factor unrecoverable.
                if min < 1 || min > max {
                    return invalid(format!("need 1 <= min <= max, got {min}..={max}"));
                }
                if max.checked_mul(max).is_none() {
                    return invalid(format!("max {max} overflows"));
                }
            }
            OperandRule::Divide {
                max_divisor,
                max_quotient,
            } => {
                if max_divisor < 1 || max_quotient < 1 {
                    return invalid(format!(
                        "divisor and quotient maxima must be >= 1, got {max_divisor} and {max_quotient}"
                    ));
                }
                if max_divisor.checked_mul(max_quotient).is_none() {
                    return invalid("dividend overflows".into());
                }
            }
            OperandRule::Power {
                min_base,
                max_base,
                min_exponent,
                max_exponent,
            } => {
                if min_base < 2 || min_base > max_base {
                    return invalid(format!(
                        "need 2 <= min_base <= max_base, got {min_base}..={max_base}"
                    ));
                }
                if min_exponent < 1 || min_exponent > max_exponent {
                    return invalid(format!(
                        "need 1 <= min_exponent <= max_exponent, got {min_exponent}..={max_exponent}"
                    ));
                }
                if max_base.checked_pow(max_exponent).is_none() {
                    return invalid(format!("{max_base}^{max_exponent} overflows"));
                }
            }
            OperandRule::Root {
                degree,
                min_result,
                max_result,
            } => {
                if degree < 2 {
                    return invalid(format!("degree must be >= 2, got {degree}"));
                }
                if min_result < 0 || min_result > max_result {
                    return invalid(format!(
                        "need 0 <= min_result <= max_result, got {min_result}..={max_result}"
                    ));
                }
                if max_result.checked_pow(degree).is_none() {
                    return invalid(format!("{max_result}^{degree} overflows"));
                }
            }
            OperandRule::Modulo {
                min_modulus,
                max_modulus,
                max_multiplier,
            } => {
                if min_modulus < 2 || min_modulus > max_modulus {
                    return invalid(format!(
                        "need 2 <= min_modulus <= max_modulus, got {min_modulus}..={max_modulus}"
                    ));
                }
                if max_multiplier < 1 {
                    return invalid(format!("max_multiplier must be >= 1, got {max_multiplier}"));
                }
                let largest = max_modulus
                    .checked_mul(max_multiplier)
                    .and_then(|v| v.checked_add(max_modulus));
                if largest.is_none() {
                    return invalid("dividend overflows".into());
                }
            }
        }
        Ok(())
    }

    /// Draw operands satisfying this rule's constraints.
    ///
    /// Assumes [`check`](Self::check) passed; the generator enforces that
    /// before it will synthesize anything.
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Operands {
        match *self {
            OperandRule::Add { min, max } => {
                let a = rng.gen_range(min..=max);
                let b = rng.gen_range(min..=max);
                Operands { a, b, result: a + b }
            }
            OperandRule::Subtract { min, max } => {
                let a = rng.gen_range(min..=max);
                let b = rng.gen_range(min..=a);
                Operands { a, b, result: a - b }
            }
            OperandRule::Multiply { min, max } => {
                let a = rng.gen_range(min..=max);
                let b = rng.gen_range(min..=max);
                Operands { a, b, result: a * b }
            }
            OperandRule::Divide {
                max_divisor,
                max_quotient,
            } => {
                let b = rng.gen_range(1..=max_divisor);
                let result = rng.gen_range(1..=max_quotient);
                Operands {
                    a: b * result,
                    b,
                    result,
                }
            }
            OperandRule::Power {
                min_base,
                max_base,
                min_exponent,
                max_exponent,
            } => {
                let a = rng.gen_range(min_base..=max_base);
                let exponent = rng.gen_range(min_exponent..=max_exponent);
                Operands {
                    a,
                    b: i64::from(exponent),
                    result: a.pow(exponent),
                }
            }
            OperandRule::Root {
                degree,
                min_result,
                max_result,
            } => {
                let result = rng.gen_range(min_result..=max_result);
                Operands {
                    a: result.pow(degree),
                    b: i64::from(degree),
                    result,
                }
            }
            OperandRule::Modulo {
                min_modulus,
                max_modulus,
                max_multiplier,
            } => {
                let b = rng.gen_range(min_modulus..=max_modulus);
                let remainder = rng.gen_range(0..b);
                let multiplier = rng.gen_range(1..=max_multiplier);
                Operands {
                    a: b * multiplier + remainder,
                    b,
                    result: remainder,
                }
            }
        }
    }
}

/// One entry of the operation table: a rule and its relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Relative probability mass.
    pub weight: u32,
    #[serde(flatten)]
    pub rule: OperandRule,
}

impl Operation {
    pub fn new(weight: u32, rule: OperandRule) -> Self {
        Self { weight, rule }
    }

    pub fn kind(&self) -> OperationKind {
        self.rule.kind()
    }

    pub fn symbol(&self) -> &'static str {
        self.kind().symbol()
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        self.kind().apply(a, b)
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.kind().slots()
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Operands {
        self.rule.synthesize(rng)
    }

    pub fn check(&self) -> Result<(), DrillError> {
        if self.weight == 0 {
            return Err(DrillError::ZeroWeight { kind: self.kind() });
        }
        self.rule.check()
    }
}

/// The standard table: add 20, subtract 20, multiply 25, divide 15,
/// power 10, root 5, modulo 5.
pub fn default_operations() -> Vec<Operation> {
    const WEIGHTS: [u32; 7] = [20, 20, 25, 15, 10, 5, 5];
    OperationKind::ALL
        .iter()
        .zip(WEIGHTS)
        .map(|(&kind, weight)| Operation::new(weight, OperandRule::standard(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn draws(rule: &OperandRule, n: usize) -> Vec<Operands> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..n).map(|_| rule.synthesize(&mut rng)).collect()
    }

    #[test]
    fn kind_parse_accepts_names_and_symbols() {
        assert_eq!("add".parse::<OperationKind>().unwrap(), OperationKind::Add);
        assert_eq!("-".parse::<OperationKind>().unwrap(), OperationKind::Subtract);
        assert_eq!("x".parse::<OperationKind>().unwrap(), OperationKind::Multiply);
        assert_eq!("÷".parse::<OperationKind>().unwrap(), OperationKind::Divide);
        assert_eq!("sqrt".parse::<OperationKind>().unwrap(), OperationKind::Root);
        assert_eq!("Mod".parse::<OperationKind>().unwrap(), OperationKind::Modulo);
        assert!("log".parse::<OperationKind>().is_err());
    }

    #[test]
    fn root_never_hides_degree() {
        assert!(!OperationKind::Root.slots().contains(&Slot::B));
        for kind in OperationKind::ALL {
            if kind != OperationKind::Root {
                assert_eq!(kind.slots().len(), 3, "{kind}");
            }
        }
    }

    #[test]
    fn default_table_weights() {
        let ops = default_operations();
        let weights: Vec<u32> = ops.iter().map(|o| o.weight).collect();
        assert_eq!(weights, vec![20, 20, 25, 15, 10, 5, 5]);
        for op in &ops {
            op.check().unwrap();
        }
    }

    #[test]
    fn subtract_never_negative() {
        let rule = OperandRule::standard(OperationKind::Subtract);
        for ops in draws(&rule, 2000) {
            assert!(ops.result >= 0, "{ops:?}");
            assert!(OperationKind::Subtract.holds(ops.a, ops.b, ops.result));
        }
    }

    #[test]
    fn divide_is_exact() {
        let rule = OperandRule::standard(OperationKind::Divide);
        for ops in draws(&rule, 2000) {
            assert_eq!(ops.a % ops.b, 0, "{ops:?}");
            assert_eq!(ops.a / ops.b, ops.result);
        }
    }

    #[test]
    fn root_radicand_is_perfect_power() {
        let rule = OperandRule::Root {
            degree: 3,
            min_result: 1,
            max_result: 10,
        };
        for ops in draws(&rule, 500) {
            assert_eq!(ops.b, 3);
            assert_eq!(ops.result.pow(3), ops.a);
        }
    }

    #[test]
    fn modulo_remainder_in_range() {
        let rule = OperandRule::standard(OperationKind::Modulo);
        for ops in draws(&rule, 2000) {
            assert!(0 <= ops.result && ops.result < ops.b, "{ops:?}");
            assert!(ops.a >= ops.b, "multiplier is at least one: {ops:?}");
            assert_eq!(ops.a % ops.b, ops.result);
        }
    }

    #[test]
    fn power_and_multiply_stay_in_range() {
        for ops in draws(&OperandRule::standard(OperationKind::Power), 500) {
            assert!((2..=6).contains(&ops.a));
            assert!((2..=4).contains(&ops.b));
            assert!(OperationKind::Power.holds(ops.a, ops.b, ops.result));
        }
        for ops in draws(&OperandRule::standard(OperationKind::Multiply), 500) {
            assert!((1..=12).contains(&ops.a) && (1..=12).contains(&ops.b));
        }
    }

    #[test]
    fn apply_matches_holds_for_root() {
        let v = OperationKind::Root.apply(81.0, 2.0);
        assert!((v - 9.0).abs() < 1e-9);
        let v = OperationKind::Root.apply(27.0, 3.0);
        assert!((v - 3.0).abs() < 1e-9);
        assert!(OperationKind::Root.holds(27, 3, 3));
        assert!(!OperationKind::Root.holds(28, 3, 3));
    }

    #[test]
    fn check_rejects_bad_parameters() {
        let err = Operation::new(0, OperandRule::standard(OperationKind::Add))
            .check()
            .unwrap_err();
        assert_eq!(
            err,
            DrillError::ZeroWeight {
                kind: OperationKind::Add
            }
        );

        let bad = [
            OperandRule::Add { min: 10, max: 5 },
            OperandRule::Multiply { min: 0, max: 12 },
            OperandRule::Divide {
                max_divisor: 0,
                max_quotient: 10,
            },
            OperandRule::Power {
                min_base: 1,
                max_base: 6,
                min_exponent: 2,
                max_exponent: 4,
            },
            OperandRule::Power {
                min_base: 2,
                max_base: 1000,
                min_exponent: 2,
                max_exponent: 40,
            },
            OperandRule::Root {
                degree: 1,
                min_result: 1,
                max_result: 10,
            },
            OperandRule::Modulo {
                min_modulus: 1,
                max_modulus: 11,
                max_multiplier: 10,
            },
        ];
        for rule in bad {
            assert!(
                matches!(rule.check(), Err(DrillError::InvalidRange { .. })),
                "{rule:?} should be rejected"
            );
        }
    }
}
