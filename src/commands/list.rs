//! List command - print the check registry without touching any artifact.

use anyhow::Result;
use colored::Colorize;

use crate::checks;

pub fn execute(package: &str) -> Result<()> {
    let registry = checks::registry(package);

    println!("{}", "Registered checks".bold());
    for check in &registry {
        println!("  {}  {}", check.id.as_str().cyan(), check.description);
    }
    println!("\n{} checks", registry.len());

    Ok(())
}
