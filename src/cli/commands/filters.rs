//! Filters command implementation.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Print the distinct categories, and optionally credits, in the guide.
pub fn list_filters(guide_file: Option<&Path>, credits: bool) -> Result<()> {
    let guide = super::load_guide(guide_file)?;

    let categories = guide.categories();
    println!("{}", format!("Categories ({}):", categories.len()).bold());
    for category in &categories {
        println!("  {}", category);
    }

    if credits {
        let names = guide.credits();
        println!();
        println!("{}", format!("Credits ({}):", names.len()).bold());
        for name in &names {
            println!("  {}", name);
        }
    }

    Ok(())
}
