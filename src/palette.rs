//! Accent color palettes

use tracing::warn;

use crate::render::Rgb;
use crate::storage::{StoreError, TypedStore, PALETTE};

pub const DEFAULT_PALETTE_ID: &str = "emerald";

/// Accent used when a palette color cannot be parsed
const FALLBACK_ACCENT: Rgb = Rgb(255, 143, 171);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: [&'static str; 3],
}

impl ColorPalette {
    /// Primary accent color
    pub fn accent(&self) -> Rgb {
        Rgb::from_hex(self.colors[0]).unwrap_or(FALLBACK_ACCENT)
    }
}

const fn palette(id: &'static str, name: &'static str, hex: &'static str) -> ColorPalette {
    ColorPalette {
        id,
        name,
        colors: [hex, hex, hex],
    }
}

pub const COLOR_PALETTES: &[ColorPalette] = &[
    palette("emerald", "Esmeralda", "#63C39E"),
    palette("jasmine", "Jasmine", "#E6C86E"),
    palette("ocean", "Oceano", "#6FB8E8"),
    palette("sunset", "Pôr do sol", "#F49A7A"),
    palette("lavender", "Lavanda", "#B79BE3"),
    palette("forest", "Floresta", "#7CB77A"),
    palette("rose", "Rosa", "#E89BB6"),
    palette("ruby", "Rubi", "#E25A6B"),
    palette("graphite", "Grafite", "#8C9AA9"),
    palette("terra", "Terra", "#C5956E"),
];

/// Look up a palette, falling back to the default for unknown or missing ids
pub fn palette_by_id(id: Option<&str>) -> &'static ColorPalette {
    let fallback = COLOR_PALETTES
        .iter()
        .find(|p| p.id == DEFAULT_PALETTE_ID)
        .unwrap_or(&COLOR_PALETTES[0]);

    match id {
        Some(id) => COLOR_PALETTES.iter().find(|p| p.id == id).unwrap_or(fallback),
        None => fallback,
    }
}

/// Stored palette id; read failures fall back to the default
pub fn load_palette_id<S: TypedStore + ?Sized>(store: &S) -> String {
    match store.get(&PALETTE) {
        Ok(Some(id)) if !id.is_empty() => id,
        Ok(_) => DEFAULT_PALETTE_ID.to_string(),
        Err(e) => {
            warn!("could not read palette preference: {}", e);
            DEFAULT_PALETTE_ID.to_string()
        }
    }
}

pub fn save_palette_id<S: TypedStore + ?Sized>(store: &S, id: &str) -> Result<(), StoreError> {
    store.set(&PALETTE, &id.to_string())
}

/// The palette currently selected in `store`
pub fn current<S: TypedStore + ?Sized>(store: &S) -> &'static ColorPalette {
    palette_by_id(Some(&load_palette_id(store)))
}
