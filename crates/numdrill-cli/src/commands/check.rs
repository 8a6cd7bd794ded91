//! The `numdrill check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use numdrill_core::config::load_config_from;
use numdrill_core::{OperationKind, Problem, Slot};

/// Exit code when the answer is wrong.
pub const EXIT_INCORRECT: i32 = 3;
/// Exit code when the answer is not a number.
pub const EXIT_INPUT_ERROR: i32 = 2;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    op: String,
    a: i64,
    b: i64,
    result: i64,
    missing: String,
    answer: String,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let config = load_config_from(config_path.as_deref())?;
    let validator = config.validator()?;

    let kind: OperationKind = op.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let missing: Slot = missing
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let problem = Problem::new(kind, a, b, result, missing).context("not a valid problem")?;

    let verdict = validator.validate(&problem, &answer);
    println!("{problem}");

    if let Some(e) = &verdict.input_error {
        println!("{e}");
        return Ok(EXIT_INPUT_ERROR);
    }
    if verdict.is_correct {
        println!("Correct! +{}", verdict.score_delta);
        Ok(0)
    } else {
        println!("Incorrect. The answer was {}", verdict.expected_display);
        Ok(EXIT_INCORRECT)
    }
}
