use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::{Config, API_BASE_URL_ENV};

const DEFAULT_CONFIG: &str = r#"# coverly configuration

[api]
# Books / Toggl proxy. COVERLY_API_BASE_URL or --api-url override this.
base_url = "http://localhost:3001"
timeout_secs = 10

[export]
# Exported cards are written here unless --out is given
output_dir = "."
# TrueType/OpenType font for card text; system fonts are probed when unset
# font_path = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
image_timeout_secs = 15
jpeg_quality = 90

[storage]
# SQLite file for history, cached results, palette and board
# path = "~/.local/share/coverly/coverly.db"
"#;

/// Write a default config file
pub fn run(path: Option<&Path>, force: bool, quiet: bool) -> Result<()> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    if config_path.exists() && !force {
        eprintln!(
            "{}: Config already exists at {}",
            "Error".red().bold(),
            config_path.display()
        );
        eprintln!();
        eprintln!("Use {} to overwrite.", "--force".cyan());
        bail!("Config file already exists");
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!(
        "{} Config written to {}",
        "✓".green(),
        config_path.display()
    );
    if !quiet {
        println!();
        println!("You can now use:");
        println!("  {} - find a book", "coverly search <title>".cyan());
        println!(
            "  {} - export a story card for a result",
            "coverly story <id>".cyan()
        );
        println!();
        println!("Set {} to point at another API server.", API_BASE_URL_ENV.cyan());
    }

    Ok(())
}
