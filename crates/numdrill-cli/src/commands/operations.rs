//! The `numdrill operations` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use numdrill_core::config::load_config_from;
use numdrill_core::operation::OperandRule;
use numdrill_core::Generator;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let generator = Generator::from_config(&config)?;

    let mut table = Table::new();
    table.set_header(vec!["Operation", "Symbol", "Weight", "Probability", "Operands"]);
    for op in generator.operations() {
        let share = generator.probability(op.kind());
        table.add_row(vec![
            Cell::new(op.kind()),
            Cell::new(op.symbol()),
            Cell::new(op.weight),
            Cell::new(format!("{:.1}%", share * 100.0)),
            Cell::new(describe(&op.rule)),
        ]);
    }

    println!("{table}");
    println!(
        "{} operations, total weight {}, {}s per session",
        generator.operations().len(),
        generator.total_weight(),
        config.session.duration_secs
    );
    Ok(())
}

fn describe(rule: &OperandRule) -> String {
    match *rule {
        OperandRule::Add { min, max }
        | OperandRule::Subtract { min, max }
        | OperandRule::Multiply { min, max } => format!("a, b in {min}..={max}"),
        OperandRule::Divide {
            max_divisor,
            max_quotient,
        } => format!("divisor 1..={max_divisor}, quotient 1..={max_quotient}"),
        OperandRule::Power {
            min_base,
            max_base,
            min_exponent,
            max_exponent,
        } => format!("base {min_base}..={max_base}, exponent {min_exponent}..={max_exponent}"),
        OperandRule::Root {
            degree,
            min_result,
            max_result,
        } => format!("degree {degree}, root {min_result}..={max_result}"),
        OperandRule::Modulo {
            min_modulus,
            max_modulus,
            max_multiplier,
        } => format!("modulus {min_modulus}..={max_modulus}, multiplier 1..={max_multiplier}"),
    }
}
