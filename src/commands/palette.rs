use anyhow::{bail, Context, Result};
use colored::Colorize;

use super::Session;
use crate::palette::{self, ColorPalette, COLOR_PALETTES};

pub fn list(session: &Session) -> Result<()> {
    let selected = palette::current(&session.store).id;

    for p in COLOR_PALETTES {
        let marker = if p.id == selected { "*".green() } else { " ".normal() };
        println!("{} {}", marker, describe(p));
    }

    Ok(())
}

pub fn show(session: &Session) -> Result<()> {
    println!("{}", describe(palette::current(&session.store)));
    Ok(())
}

pub fn set(session: &Session, id: &str) -> Result<()> {
    let Some(chosen) = COLOR_PALETTES.iter().find(|p| p.id == id) else {
        let known: Vec<&str> = COLOR_PALETTES.iter().map(|p| p.id).collect();
        bail!("Unknown palette: {}. Valid palettes: {}", id, known.join(", "));
    };

    palette::save_palette_id(&session.store, chosen.id)
        .context("Failed to save palette preference")?;

    if !session.quiet {
        println!("{} Palette set to {}", "✓".green(), chosen.name.bold());
    }
    Ok(())
}

fn describe(p: &ColorPalette) -> String {
    let accent = p.accent();
    format!(
        "{:<10} {:<10} {}",
        p.id.cyan(),
        p.name,
        p.colors[0].truecolor(accent.0, accent.1, accent.2)
    )
}
