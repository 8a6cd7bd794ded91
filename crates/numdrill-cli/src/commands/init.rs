//! The `numdrill init` command.

use std::path::Path;

use anyhow::Result;

use numdrill_core::config::{CONFIG_FILE_NAME, SAMPLE_CONFIG};

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Adjust weights and ranges in {CONFIG_FILE_NAME}");
    println!("  2. Run: numdrill operations");
    println!("  3. Run: numdrill play");

    Ok(())
}
