//! The `numdrill generate` command.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use numdrill_core::config::load_config_from;
use numdrill_core::validator::format_number;
use numdrill_core::Generator;

use super::make_rng;

pub fn execute(
    count: usize,
    seed: Option<u64>,
    format: String,
    answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let generator = Generator::from_config(&config)?;
    let mut rng = make_rng(seed);
    let problems = generator.generate_many(&mut rng, count);

    match format.as_str() {
        "json" => {
            let items: Vec<_> = problems
                .iter()
                .map(|p| {
                    json!({
                        "text": p.to_string(),
                        "problem": p,
                        "expected": p.expected(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        "text" => {
            let width = count.to_string().len();
            for (i, p) in problems.iter().enumerate() {
                if answers {
                    let expected = format_number(p.expected() as f64, config.validation.precision);
                    println!("{:>width$}. {p}    ({expected})", i + 1);
                } else {
                    println!("{:>width$}. {p}", i + 1);
                }
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
